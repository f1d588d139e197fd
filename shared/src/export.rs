use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::SurfaceError;
use crate::surface::DrawingSurface;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    Signature,
    Stamp,
    SignatureOnStamp,
}

impl Feature {
    pub fn filename(self) -> &'static str {
        match self {
            Feature::Signature => "signature.png",
            Feature::Stamp => "company_stamp.png",
            Feature::SignatureOnStamp => "signature_on_stamp.png",
        }
    }
}

/// A PNG captured from a surface, ready to be offered as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: &'static str,
    pub png: Vec<u8>,
}

impl ExportArtifact {
    pub fn data_url(&self) -> String {
        format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(&self.png))
    }
}

/// Inverse of [`ExportArtifact::data_url`], for hosts that only hand out
/// data URLs (`HTMLCanvasElement.toDataURL`).
pub fn decode_png_data_url(url: &str) -> Result<Vec<u8>, SurfaceError> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| SurfaceError::DataUrl("not a base64 PNG data URL".to_string()))?;
    STANDARD
        .decode(payload)
        .map_err(|error| SurfaceError::DataUrl(error.to_string()))
}

pub fn export<S: DrawingSurface + ?Sized>(
    surface: &S,
    feature: Feature,
) -> Result<ExportArtifact, SurfaceError> {
    let png = surface.export_png()?;
    log::debug!("exported {} ({} bytes)", feature.filename(), png.len());
    Ok(ExportArtifact {
        filename: feature.filename(),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;
    use crate::{Point, StrokeStyle};

    #[test]
    fn filenames_are_fixed_per_feature() {
        assert_eq!(Feature::Signature.filename(), "signature.png");
        assert_eq!(Feature::Stamp.filename(), "company_stamp.png");
        assert_eq!(
            Feature::SignatureOnStamp.filename(),
            "signature_on_stamp.png"
        );
    }

    #[test]
    fn data_url_decodes_back_to_the_same_bytes() {
        let artifact = ExportArtifact {
            filename: Feature::Stamp.filename(),
            png: vec![0x89, b'P', b'N', b'G', 0, 255],
        };
        let url = artifact.data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_png_data_url(&url).unwrap(), artifact.png);
        assert!(matches!(
            decode_png_data_url("data:text/plain,hi"),
            Err(SurfaceError::DataUrl(_))
        ));
    }

    #[test]
    fn export_is_a_snapshot() {
        let mut surface = RecordingSurface::new(10, 10);
        let artifact = export(&surface, Feature::Signature).unwrap();
        surface.stroke_segment(Point::ORIGIN, Point::new(5.0, 5.0), &StrokeStyle::default());
        let later = export(&surface, Feature::Signature).unwrap();
        assert_ne!(artifact.png, later.png);
    }
}
