//! Worker-thread side of the UI: command intake and the fetch runtime.

pub mod commands;
pub mod runtime;
