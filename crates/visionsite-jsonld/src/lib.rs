//! schema.org JSON-LD for VisionSite pages.
//!
//! Assemblers are pure functions from catalog records to typed node structs.
//! Nodes serialize standalone (`graph::standalone`) or share one `@graph`
//! (`JsonLdGraph`), and are embedded as `<script type="application/ld+json">`.

pub mod commerce;
pub mod graph;
pub mod medical;
pub mod navigation;
pub mod organization;
pub mod schema;
pub mod validate;

pub use commerce::{image_gallery, product};
pub use graph::{script_tag, standalone, JsonLdGraph};
pub use medical::{condition, physician, procedure};
pub use navigation::{breadcrumbs, faq_page};
pub use organization::{aggregate_rating, business, rating_summary, review};
pub use validate::{ContentWarning, FaqValidator, ReviewValidator};

/// Joins a site-relative path onto the base URL. The root path keeps its
/// trailing slash.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() || path == "/" {
        format!("{}/", base)
    } else if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url("https://a.com", "/"), "https://a.com/");
        assert_eq!(absolute_url("https://a.com/", "/x/y"), "https://a.com/x/y");
        assert_eq!(absolute_url("https://a.com", "x"), "https://a.com/x");
        assert_eq!(absolute_url("https://a.com", "https://b.com/z"), "https://b.com/z");
    }
}
