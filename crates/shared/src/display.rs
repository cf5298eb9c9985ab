use crate::query::DEFAULT_FONT_SIZE;

/// What the result area is currently showing.
///
/// Each trigger walks `begin_reload` then `reveal`: the previous image is
/// removed before the new one becomes visible, so a stale image never sits
/// in the display while a fresh one loads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Empty,
    /// Cleared for a reload; nothing is visible.
    Hidden,
    ShowingImage(String),
}

impl DisplayState {
    pub fn begin_reload(&mut self) {
        *self = DisplayState::Hidden;
    }

    pub fn reveal(&mut self, uri: impl Into<String>) {
        *self = DisplayState::ShowingImage(uri.into());
    }

    pub fn visible_uri(&self) -> Option<&str> {
        match self {
            DisplayState::ShowingImage(uri) => Some(uri.as_str()),
            _ => None,
        }
    }
}

/// Mirrors the font-size slider's value into a text label.
///
/// The readout starts out showing the slider default, so the label is
/// correct before the first drag. `on_input` copies the control's value
/// verbatim — no parsing, no formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSizeReadout {
    text: String,
}

impl FontSizeReadout {
    pub fn new() -> Self {
        Self {
            text: DEFAULT_FONT_SIZE.to_string(),
        }
    }

    pub fn on_input(&mut self, raw: &str) {
        self.text.clear();
        self.text.push_str(raw);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for FontSizeReadout {
    fn default() -> Self {
        Self::new()
    }
}
