use std::sync::Arc;

use crate::models::filter::{FilterCriteria, FilterInputs};
use crate::view::FilterControls;

/// Key pressed while the source IP field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// Reads and resets the filter controls
#[derive(Clone)]
pub struct FilterState {
    controls: Arc<dyn FilterControls>,
}

impl FilterState {
    pub fn new(controls: Arc<dyn FilterControls>) -> Self {
        Self { controls }
    }

    /// Criteria built fresh from the current control values
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_inputs(&self.controls.read_inputs())
    }

    /// Put every control back to its default (`""`, `""`, `"100"`)
    pub fn reset(&self) {
        self.controls.write_inputs(FilterInputs::cleared());
    }

    /// Whether a key in the IP field submits the filters
    pub fn submits(key: Key) -> bool {
        key == Key::Enter
    }
}
