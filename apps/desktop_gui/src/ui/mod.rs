//! UI layer: the form app shell and its display area.

pub mod app;

pub use app::LoremFormApp;
