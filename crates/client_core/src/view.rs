//! Render-state derivation for the gallery, shared by every front end.

use std::fmt::Write as _;

use shared::protocol::Product;

use crate::page_fetch::{FetchResult, PageFetchController};

pub const GALLERY_HEADING: &str = "Products Gallery";
pub const LOADING_TEXT: &str = "Loading products...";
pub const ERROR_PREFIX: &str = "Error fetching products: ";

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryBody {
    Loading,
    Error(String),
    Grid(Vec<Product>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    pub heading: &'static str,
    pub body: GalleryBody,
    pub pager: Option<PagerView>,
}

impl GalleryView {
    pub fn from_controller(controller: &PageFetchController) -> Self {
        let body = match controller.result() {
            FetchResult::Loading => GalleryBody::Loading,
            FetchResult::Error(failure) => {
                GalleryBody::Error(format!("{ERROR_PREFIX}{}", failure.message()))
            }
            FetchResult::Loaded { items, .. } => GalleryBody::Grid(items.clone()),
        };

        // Hidden until a page has loaded, so a failed first load shows only the error.
        let pager = controller.has_loaded().then(|| {
            let state = controller.state();
            PagerView {
                label: format!("Page {} of {}", state.current_page, state.total_pages),
                previous_enabled: state.can_go_previous(),
                next_enabled: state.can_go_next(),
            }
        });

        Self {
            heading: GALLERY_HEADING,
            body,
            pager,
        }
    }
}

/// Draws a single product card; invoked once per product, keyed by its id.
pub trait CardRenderer {
    fn render_card(&self, product: &Product) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCardRenderer;

impl CardRenderer for PlainCardRenderer {
    fn render_card(&self, product: &Product) -> String {
        let mut line = format!("[{}] {}", product.id, product.name);
        if let Some(price) = product.price {
            let _ = write!(line, " - {price:.2}");
        }
        line
    }
}

pub fn render_text(view: &GalleryView, cards: &dyn CardRenderer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.heading);
    let _ = writeln!(out);

    match &view.body {
        GalleryBody::Loading => {
            let _ = writeln!(out, "{LOADING_TEXT}");
        }
        GalleryBody::Error(text) => {
            let _ = writeln!(out, "{text}");
        }
        GalleryBody::Grid(items) if items.is_empty() => {
            let _ = writeln!(out, "No products on this page.");
        }
        GalleryBody::Grid(items) => {
            for product in items {
                let _ = writeln!(out, "  {}", cards.render_card(product));
            }
        }
    }

    if let Some(pager) = &view.pager {
        let previous = if pager.previous_enabled {
            "[p] Previous"
        } else {
            "( ) Previous"
        };
        let next = if pager.next_enabled {
            "[n] Next"
        } else {
            "( ) Next"
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "{previous}   {}   {next}", pager.label);
    }
    out
}

/// Column count for the card grid at `available_width` logical pixels.
pub fn grid_columns(available_width: f32) -> usize {
    if available_width < 480.0 {
        1
    } else if available_width < 1024.0 {
        2
    } else {
        4
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
