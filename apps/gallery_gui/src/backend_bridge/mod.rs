//! Bridge between the UI thread and the async catalog worker.

pub mod commands;
pub mod runtime;
