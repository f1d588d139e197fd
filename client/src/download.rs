use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement};

use sigstamp_shared::{ExportArtifact, SurfaceError};

/// Hands a captured PNG to the browser as a file download. The artifact is
/// already a snapshot, so drawing after this call cannot change the file.
pub fn trigger_download(document: &Document, artifact: &ExportArtifact) {
    let Ok(element) = document.create_element("a") else {
        return;
    };
    let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() else {
        return;
    };
    anchor.set_href(&artifact.data_url());
    anchor.set_download(artifact.filename);
    anchor.click();
    log::info!("download {} ({} bytes)", artifact.filename, artifact.png.len());
}

pub fn offer(document: &Document, result: Result<Option<ExportArtifact>, SurfaceError>) {
    match result {
        Ok(Some(artifact)) => trigger_download(document, &artifact),
        Ok(None) => log::debug!("download skipped: nothing to export"),
        Err(error) => log::warn!("download failed: {error}"),
    }
}
