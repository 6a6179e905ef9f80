//! Page assembly and static site build on top of the resolver and JSON-LD
//! assemblers.

pub mod builder;
pub mod document;
pub mod sitemap;

pub use builder::{document_path, BuildReport, SiteBuilder, REPORT_FILE, SITEMAP_FILE};
pub use document::{
    meta_description, Cta, PageDocument, PageRenderer, ROBOTS_INDEX, ROBOTS_NOINDEX,
};
