use serde::{Deserialize, Serialize};

/// Atomic read of every form control at trigger time.
///
/// Numeric fields stay raw text and are never validated here; whatever the
/// controls hold is what the endpoint receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub width: String,
    pub height: String,
    pub font_size: String,
    pub text: String,
    /// State of the presence checkbox (`p`); the endpoint decides what the
    /// flag means.
    pub has_property: bool,
    /// Value of the checked image-type radio, `None` when nothing is
    /// selected and the endpoint falls back to its own default.
    pub image_type: Option<String>,
}

/// Read access to the live form controls. The GUI implements this over its
/// widget state; tests implement it with fixed values.
pub trait FormFields {
    fn width(&self) -> String;
    fn height(&self) -> String;
    fn font_size(&self) -> String;
    fn text(&self) -> String;
    fn has_property(&self) -> bool;
    fn image_type(&self) -> Option<String>;
}

/// Reads every accessor exactly once and freezes the result. No field is
/// re-read after capture.
pub fn capture_snapshot<F: FormFields + ?Sized>(fields: &F) -> FormSnapshot {
    FormSnapshot {
        width: fields.width(),
        height: fields.height(),
        font_size: fields.font_size(),
        text: fields.text(),
        has_property: fields.has_property(),
        image_type: fields.image_type(),
    }
}
