use crate::refine::Style;

/// Transient refinement state shown to the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// A request is outstanding; the refine action is disabled.
    pub is_refining: bool,
    /// Latest refined image (data URL).
    pub result_image: Option<String>,
    /// Message from the last failed refinement.
    pub error: Option<String>,
    pub selected_style: Style,
    /// Sketch that will be sent on the next refinement (data URL).
    pub input_image: Option<String>,
    /// Free-text guidance appended to the style prompt.
    pub details: String,
}

impl AppState {
    pub fn start_refining(&mut self) {
        self.is_refining = true;
        self.error = None;
    }

    pub fn finish_success(&mut self, image: String) {
        self.result_image = Some(image);
        self.is_refining = false;
    }

    /// Records the failure; the previous result stays visible.
    pub fn finish_failure(&mut self, message: String) {
        self.error = Some(message);
        self.is_refining = false;
    }

    /// Clears the input and everything derived from it. The selected style
    /// is kept.
    pub fn reset(&mut self) {
        *self = Self {
            selected_style: self.selected_style,
            ..Self::default()
        };
    }
}
