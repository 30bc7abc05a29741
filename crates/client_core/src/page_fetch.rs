//! Page-fetch state machine behind the product gallery.
//!
//! The controller owns the pager counters and the tri-state fetch outcome. It
//! never performs I/O itself: entering `Loading` hands back a [`PageRequest`]
//! for the caller to run, and the caller feeds the outcome back in as
//! [`PageEvent::Resolved`]. Requests are tagged with increasing [`RequestId`]s
//! so a response that lost a race against a newer page change is dropped.

use shared::protocol::{Product, ProductPage};
use thiserror::Error;
use tracing::debug;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }
}

impl PageState {
    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Highest page `current_page` may hold; 1 while the total is unknown or zero.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }
}

/// A failed page fetch, carrying the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchFailure {
    message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&CatalogError> for FetchFailure {
    fn from(value: &CatalogError) -> Self {
        Self::new(value.message())
    }
}

impl From<CatalogError> for FetchFailure {
    fn from(value: CatalogError) -> Self {
        Self::from(&value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Loading,
    Error(FetchFailure),
    Loaded {
        items: Vec<Product>,
        total_pages: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub id: RequestId,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Mount,
    Previous,
    Next,
    Resolved {
        request: RequestId,
        outcome: Result<ProductPage, FetchFailure>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    AlreadyMounted,
    AtFirstPage,
    AtLastPage,
    StaleResponse,
}

/// What the caller has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Run this request and feed its outcome back as `PageEvent::Resolved`.
    Fetch(PageRequest),
    Updated,
    Ignored(IgnoreReason),
}

#[derive(Debug)]
pub struct PageFetchController {
    state: PageState,
    result: FetchResult,
    mounted: bool,
    has_loaded: bool,
    next_request_id: u64,
    in_flight: Option<PageRequest>,
}

impl Default for PageFetchController {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetchController {
    pub fn new() -> Self {
        Self {
            state: PageState::default(),
            result: FetchResult::Loading,
            mounted: false,
            has_loaded: false,
            next_request_id: 0,
            in_flight: None,
        }
    }

    pub fn transition(&mut self, event: PageEvent) -> Step {
        match event {
            PageEvent::Mount => {
                if self.mounted {
                    return Step::Ignored(IgnoreReason::AlreadyMounted);
                }
                self.mounted = true;
                self.enter_loading()
            }
            PageEvent::Previous => {
                if !self.state.can_go_previous() {
                    return Step::Ignored(IgnoreReason::AtFirstPage);
                }
                self.state.current_page -= 1;
                self.enter_loading()
            }
            PageEvent::Next => {
                if !self.state.can_go_next() {
                    return Step::Ignored(IgnoreReason::AtLastPage);
                }
                self.state.current_page += 1;
                self.enter_loading()
            }
            PageEvent::Resolved { request, outcome } => self.resolve(request, outcome),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn result(&self) -> &FetchResult {
        &self.result
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.state.total_pages
    }

    /// The one request whose response will still be applied, if any.
    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    /// Whether any page has loaded successfully since mount.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.result, FetchResult::Loading)
    }

    fn enter_loading(&mut self) -> Step {
        self.next_request_id += 1;
        let request = PageRequest {
            id: RequestId(self.next_request_id),
            page: self.state.current_page,
        };
        if let Some(superseded) = self.in_flight.replace(request) {
            debug!(
                superseded = superseded.id.0,
                superseded_page = superseded.page,
                "page request superseded before completion"
            );
        }
        self.result = FetchResult::Loading;
        debug!(request = request.id.0, page = request.page, "loading product page");
        Step::Fetch(request)
    }

    fn resolve(&mut self, request: RequestId, outcome: Result<ProductPage, FetchFailure>) -> Step {
        let Some(current) = self.in_flight.filter(|pending| pending.id == request) else {
            debug!(
                request = request.0,
                latest = self.in_flight.map(|pending| pending.id.0),
                "discarding stale page response"
            );
            return Step::Ignored(IgnoreReason::StaleResponse);
        };
        self.in_flight = None;

        match outcome {
            Ok(listing) => {
                self.state.total_pages = listing.total_pages;
                let last_page = self.state.last_page();
                if self.state.current_page > last_page {
                    debug!(
                        page = current.page,
                        total_pages = listing.total_pages,
                        "listing shrank below current page; reloading last page"
                    );
                    self.state.current_page = last_page;
                    return self.enter_loading();
                }

                self.has_loaded = true;
                debug!(
                    request = request.0,
                    page = current.page,
                    items = listing.products.len(),
                    total_pages = listing.total_pages,
                    "product page loaded"
                );
                self.result = FetchResult::Loaded {
                    items: listing.products,
                    total_pages: listing.total_pages,
                };
            }
            Err(failure) => {
                debug!(
                    request = request.0,
                    page = current.page,
                    reason = failure.message(),
                    "product page failed"
                );
                self.result = FetchResult::Error(failure);
            }
        }
        Step::Updated
    }
}

#[cfg(test)]
#[path = "tests/page_fetch_tests.rs"]
mod tests;
