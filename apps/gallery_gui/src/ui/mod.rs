//! UI layer for the gallery: app shell and product cards.

pub mod app;
pub mod card;

pub use app::GalleryApp;
