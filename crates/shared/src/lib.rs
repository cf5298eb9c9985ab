pub mod display;
pub mod error;
pub mod form;
pub mod query;
