//! Events flowing from the image worker back to the UI thread.

use crate::ui::app::PreviewImage;

pub enum UiEvent {
    /// A fetch finished and decoded; `uri` is the request that produced it.
    ImageReady { uri: String, image: PreviewImage },
    /// A fetch or decode failed; shown as the broken-image line.
    ImageFailed { reason: String },
    Info(String),
}
