use super::*;

/// The external UI toolkit collaborator. This crate only hands elements
/// over, once per matching element; widget behavior is the toolkit's
/// business.
pub trait WidgetToolkit {
    fn tooltip(&mut self, element: NodeId);
    fn toast(&mut self, element: NodeId);
}

/// A toolkit that does nothing, for pages rendered headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullToolkit;

impl WidgetToolkit for NullToolkit {
    fn tooltip(&mut self, _element: NodeId) {}

    fn toast(&mut self, _element: NodeId) {}
}

/// Records every element handed over, for asserting wiring in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingToolkit {
    pub tooltips: Vec<NodeId>,
    pub toasts: Vec<NodeId>,
}

impl WidgetToolkit for RecordingToolkit {
    fn tooltip(&mut self, element: NodeId) {
        self.tooltips.push(element);
    }

    fn toast(&mut self, element: NodeId) {
        self.toasts.push(element);
    }
}
