//! Business logic services for the application layer.

pub mod slug_generator;
pub mod url_service;

pub use slug_generator::SlugGenerator;
pub use url_service::{MissPolicy, SlugRange, UrlService};
