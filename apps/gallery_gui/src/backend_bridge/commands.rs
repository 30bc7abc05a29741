//! Backend commands queued from UI to backend worker.

use client_core::PageRequest;

pub enum BackendCommand {
    FetchPage { request: PageRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchPage { .. } => "fetch_page",
        }
    }
}
