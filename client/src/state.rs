use sigstamp_shared::{Composite, SignaturePad, StampPad};

use crate::canvas::CanvasSurface;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Signature,
    Stamp,
    Combined,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Signature, Tab::Stamp, Tab::Combined];

    pub fn button_id(self) -> &'static str {
        match self {
            Tab::Signature => "tabSignature",
            Tab::Stamp => "tabStamp",
            Tab::Combined => "tabCombined",
        }
    }

    pub fn panel_id(self) -> &'static str {
        match self {
            Tab::Signature => "panelSignature",
            Tab::Stamp => "panelStamp",
            Tab::Combined => "panelCombined",
        }
    }
}

/// Everything the event handlers mutate. One instance lives behind an
/// `Rc<RefCell<_>>` for the lifetime of the page.
pub struct State {
    pub tab: Tab,
    pub signature: SignaturePad<CanvasSurface>,
    pub stamp: StampPad<CanvasSurface>,
    pub composite: Composite<CanvasSurface>,
}
