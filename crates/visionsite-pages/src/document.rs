//! Turns a resolved `Page` into the document a renderer consumes: head
//! metadata, CTA wiring and the JSON-LD script tags.

use serde::{Deserialize, Serialize};
use tracing::debug;

use visionsite_core::{
    Business, City, Page, Provenance, Result, Route, RouteKind, SiteCatalog, StaticPageKind,
};
use visionsite_jsonld::{self as jsonld, absolute_url, JsonLdGraph};

pub const ROBOTS_INDEX: &str = "index, follow";
/// Paid-campaign pages duplicate service copy and stay out of search.
pub const ROBOTS_NOINDEX: &str = "noindex, follow";

const META_DESCRIPTION_LIMIT: usize = 160;

/// Lead-generation hooks shared by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cta {
    pub phone_display: String,
    pub phone_href: String,
    pub tracking_class: String,
    pub booking_url: String,
    pub portal_url: String,
}

impl Cta {
    pub fn for_business(business: &Business) -> Self {
        Self {
            phone_display: business.phones.main.display(),
            phone_href: business.phones.main.tel_href(),
            tracking_class: business.phone_tracking_class.clone(),
            booking_url: absolute_url(&business.url, &business.booking_path),
            portal_url: business.patient_portal_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub path: String,
    pub canonical_url: String,
    pub title: String,
    pub description: String,
    pub robots: String,
    pub provenance: Provenance,
    pub cta: Cta,
    pub page: Page,
    /// Complete `<script type="application/ld+json">` elements.
    pub json_ld: Vec<String>,
}

impl PageDocument {
    pub fn kind(&self) -> RouteKind {
        self.page.kind()
    }

    pub fn is_indexable(&self) -> bool {
        self.robots == ROBOTS_INDEX
    }
}

pub struct PageRenderer<'a> {
    catalog: &'a SiteCatalog,
    base_url: String,
}

impl<'a> PageRenderer<'a> {
    pub fn new(catalog: &'a SiteCatalog, base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn render(&self, route: &Route, page: Page) -> Result<PageDocument> {
        let path = route.path();
        let canonical_url = absolute_url(&self.base_url, &path);
        let (title, description) = self.head(&page);
        let json_ld = self.structured_data(&page, &canonical_url)?;
        let robots = match page.kind() {
            RouteKind::Landing => ROBOTS_NOINDEX,
            _ => ROBOTS_INDEX,
        };

        debug!("rendered {} with {} JSON-LD blocks", path, json_ld.len());

        Ok(PageDocument {
            path,
            canonical_url,
            title,
            description: meta_description(&description),
            robots: robots.to_string(),
            provenance: page.provenance(),
            cta: Cta::for_business(&self.catalog.business),
            page,
            json_ld,
        })
    }

    fn head(&self, page: &Page) -> (String, String) {
        let business = &self.catalog.business;
        let brand = &business.name;
        match page {
            Page::Home(_) => (
                format!(
                    "{} | Optometrist in {}, {}",
                    brand, business.address.locality, business.address.region
                ),
                business.description.clone(),
            ),
            Page::Static(p) => (
                format!("{} | {}", p.title, brand),
                static_description(p.page, business),
            ),
            Page::Directory(p) => (
                format!("{} | {}", p.section.title(), brand),
                format!(
                    "Browse {} offered by {} across {}.",
                    p.section.title().to_lowercase(),
                    brand,
                    business.region.name
                ),
            ),
            Page::Landing(p) => (
                format!("{} | {}", p.landing.title, brand),
                p.landing.summary.clone(),
            ),
            Page::Condition(p) => (
                format!("{} Diagnosis & Treatment | {}", p.condition.condition.name, brand),
                p.condition.condition.description.clone(),
            ),
            Page::ConditionInCity(p) => (
                format!(
                    "{} Treatment in {} | {}",
                    p.condition.condition.name, p.city.name, brand
                ),
                format!(
                    "{} care for patients in {}. {}",
                    p.condition.condition.name, p.city.name, p.condition.condition.description
                ),
            ),
            Page::Service(p) => (
                format!("{} | {}", p.service.name, brand),
                p.service.description.clone(),
            ),
            Page::ServiceInCity(p) => (
                format!("{} in {} | {}", p.service.name, p.city.name, brand),
                format!(
                    "{} for patients in {}. {}",
                    p.service.name, p.city.name, p.service.description
                ),
            ),
            Page::Location(p) => city_head(&p.city, brand),
        }
    }

    fn structured_data(&self, page: &Page, url: &str) -> Result<Vec<String>> {
        let business = &self.catalog.business;
        let provider_id = business.node_id();
        let mut blocks = Vec::new();

        let crumbs = jsonld::standalone(&jsonld::breadcrumbs(page.breadcrumbs(), &self.base_url))?;
        blocks.push(jsonld::script_tag(&crumbs)?);

        let city = page_city(page);
        let mut graph = JsonLdGraph::new();
        graph.push(&jsonld::business(business, city))?;

        match page {
            Page::Home(p) => {
                for review in &p.reviews {
                    graph.push(&jsonld::review(review, &provider_id))?;
                }
            }
            Page::Static(p) if p.page == StaticPageKind::About => {
                for doctor in &self.catalog.doctors {
                    graph.push(&jsonld::physician(doctor, url, &provider_id))?;
                }
                if !business.gallery.is_empty() {
                    let name = format!("{} office", business.name);
                    graph.push(&jsonld::image_gallery(&name, &business.gallery, url))?;
                }
            }
            Page::Landing(p) => {
                if let Some(product) = &p.landing.product {
                    let rating = (!product.reviews.is_empty())
                        .then(|| jsonld::aggregate_rating(&product.reviews));
                    graph.push(&jsonld::product(product, url, &provider_id, rating))?;
                }
            }
            Page::Condition(p) => {
                let condition = &p.condition.condition;
                graph.push(&jsonld::condition(condition, url))?;
                graph.push(&jsonld::faq_page(&condition.faqs))?;
            }
            Page::ConditionInCity(p) => {
                let condition = &p.condition.condition;
                graph.push(&jsonld::condition(condition, url))?;
                graph.push(&jsonld::faq_page(&condition.faqs))?;
            }
            Page::Service(p) => {
                graph.push(&jsonld::procedure(&p.service, url, None))?;
                graph.push(&jsonld::faq_page(&p.service.faqs))?;
            }
            Page::ServiceInCity(p) => {
                graph.push(&jsonld::procedure(&p.service, url, Some(&p.city)))?;
                graph.push(&jsonld::faq_page(&p.service.faqs))?;
            }
            Page::Static(_) | Page::Directory(_) | Page::Location(_) => {}
        }

        blocks.push(graph.to_script_tag()?);
        Ok(blocks)
    }
}

fn page_city(page: &Page) -> Option<&City> {
    match page {
        Page::ConditionInCity(p) => Some(&p.city),
        Page::ServiceInCity(p) => Some(&p.city),
        Page::Location(p) => Some(&p.city),
        _ => None,
    }
}

fn city_head(city: &City, brand: &str) -> (String, String) {
    let title = if city.seo_title.trim().is_empty() {
        format!("Eye Doctor in {} | {}", city.name, brand)
    } else {
        city.seo_title.clone()
    };
    let description = if city.seo_description.trim().is_empty() {
        city.description.clone()
    } else {
        city.seo_description.clone()
    };
    (title, description)
}

fn static_description(page: StaticPageKind, business: &Business) -> String {
    match page {
        StaticPageKind::About => format!(
            "Meet the optometrists and team at {} in {}.",
            business.name, business.address.locality
        ),
        StaticPageKind::Insurance => format!(
            "Vision and medical insurance plans accepted at {}.",
            business.name
        ),
        StaticPageKind::Financing => format!(
            "Pricing and financing options for eye care at {}.",
            business.name
        ),
        StaticPageKind::FsaHsa => format!(
            "Use your FSA or HSA dollars for eye exams, glasses and treatment at {}.",
            business.name
        ),
    }
}

/// Collapses whitespace and cuts at a word boundary within the meta limit.
pub fn meta_description(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= META_DESCRIPTION_LIMIT {
        return text;
    }

    let mut cut = String::new();
    for word in text.split(' ') {
        // room for the ellipsis
        if cut.chars().count() + word.chars().count() + 1 > META_DESCRIPTION_LIMIT - 1 {
            break;
        }
        if !cut.is_empty() {
            cut.push(' ');
        }
        cut.push_str(word);
    }
    if cut.is_empty() {
        // first word alone overflows
        cut = text.chars().take(META_DESCRIPTION_LIMIT - 1).collect();
    }
    let cut = cut.trim_end_matches(|c: char| c == ',' || c == '.' || c == ';');
    format!("{}…", cut)
}
