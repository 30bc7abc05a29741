//! UI/backend events and error modeling for the gallery controller.

use client_core::{FetchFailure, RequestId};
use shared::protocol::ProductPage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    PageResolved {
        request: RequestId,
        outcome: Result<ProductPage, FetchFailure>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchPage,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connect")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line status text for the footer.
    pub fn status_line(&self) -> String {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => {
                format!("Catalog worker failed to start: {}", self.message)
            }
            (_, UiErrorCategory::Transport) => {
                "Catalog unreachable; check the URL/network and change page to retry.".to_string()
            }
            (_, UiErrorCategory::Validation) => format!("Catalog data problem: {}", self.message),
            (_, UiErrorCategory::Unknown) => format!("Error: {}", self.message),
        }
    }
}
