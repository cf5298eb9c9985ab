//! Commands queued from the UI to the image worker.

pub enum BackendCommand {
    FetchImage { uri: String },
}
