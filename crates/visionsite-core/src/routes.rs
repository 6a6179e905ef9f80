use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, SiteError, Slug};

/// Fixed single pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticPageKind {
    About,
    Insurance,
    Financing,
    FsaHsa,
}

impl StaticPageKind {
    pub const ALL: [StaticPageKind; 4] = [
        StaticPageKind::About,
        StaticPageKind::Insurance,
        StaticPageKind::Financing,
        StaticPageKind::FsaHsa,
    ];

    pub fn segment(&self) -> &'static str {
        match self {
            StaticPageKind::About => "about",
            StaticPageKind::Insurance => "insurance",
            StaticPageKind::Financing => "financing",
            StaticPageKind::FsaHsa => "fsa-hsa-eye-care",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StaticPageKind::About => "About Us",
            StaticPageKind::Insurance => "Insurance",
            StaticPageKind::Financing => "Financing",
            StaticPageKind::FsaHsa => "FSA & HSA Eye Care",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.segment() == segment)
    }
}

/// Listing pages that link to every entity of one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Conditions,
    Services,
    Locations,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Conditions, Section::Services, Section::Locations];

    pub fn segment(&self) -> &'static str {
        match self {
            Section::Conditions => "conditions",
            Section::Services => "services",
            Section::Locations => "locations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Conditions => "Conditions",
            Section::Services => "Services",
            Section::Locations => "Locations",
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segment())
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.segment() == segment)
    }
}

/// Route families, used for filtering and build reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    Home,
    Static,
    Directory,
    Landing,
    Condition,
    ConditionInCity,
    Service,
    ServiceInCity,
    Location,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RouteKind::Home => "home",
            RouteKind::Static => "static",
            RouteKind::Directory => "directory",
            RouteKind::Landing => "landing",
            RouteKind::Condition => "condition",
            RouteKind::ConditionInCity => "condition-in-city",
            RouteKind::Service => "service",
            RouteKind::ServiceInCity => "service-in-city",
            RouteKind::Location => "location",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RouteKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(RouteKind::Home),
            "static" => Ok(RouteKind::Static),
            "directory" => Ok(RouteKind::Directory),
            "landing" => Ok(RouteKind::Landing),
            "condition" => Ok(RouteKind::Condition),
            "condition-in-city" => Ok(RouteKind::ConditionInCity),
            "service" => Ok(RouteKind::Service),
            "service-in-city" => Ok(RouteKind::ServiceInCity),
            "location" => Ok(RouteKind::Location),
            other => Err(format!("unknown route kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Route {
    Home,
    Static { page: StaticPageKind },
    Directory { section: Section },
    Landing { slug: Slug },
    Condition { condition: Slug },
    ConditionInCity { condition: Slug, city: Slug },
    Service { service: Slug },
    ServiceInCity { service: Slug, city: Slug },
    Location { city: Slug },
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Home => RouteKind::Home,
            Route::Static { .. } => RouteKind::Static,
            Route::Directory { .. } => RouteKind::Directory,
            Route::Landing { .. } => RouteKind::Landing,
            Route::Condition { .. } => RouteKind::Condition,
            Route::ConditionInCity { .. } => RouteKind::ConditionInCity,
            Route::Service { .. } => RouteKind::Service,
            Route::ServiceInCity { .. } => RouteKind::ServiceInCity,
            Route::Location { .. } => RouteKind::Location,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Static { page } => format!("/{}", page.segment()),
            Route::Directory { section } => section.path(),
            Route::Landing { slug } => format!("/lp/{}", slug),
            Route::Condition { condition } => format!("/conditions/{}", condition),
            Route::ConditionInCity { condition, city } => {
                format!("/conditions/{}/{}", condition, city)
            }
            Route::Service { service } => format!("/services/{}", service),
            Route::ServiceInCity { service, city } => format!("/services/{}/{}", service, city),
            Route::Location { city } => format!("/locations/{}", city),
        }
    }

    /// Parses a site-relative URL path. Query strings, fragments and a trailing
    /// slash are ignored; anything that is not a known route shape is rejected.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        if !path.starts_with('/') {
            return Err(SiteError::InvalidRoute(format!(
                "path must start with '/': {}",
                path
            )));
        }

        // a single trailing slash is tolerated, empty inner segments are not
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed[1..].split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(SiteError::InvalidRoute(path.to_string()));
        }
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["lp", slug] => Route::Landing {
                slug: Slug::parse(slug)?,
            },
            ["conditions", condition] => Route::Condition {
                condition: Slug::parse(condition)?,
            },
            ["conditions", condition, city] => Route::ConditionInCity {
                condition: Slug::parse(condition)?,
                city: Slug::parse(city)?,
            },
            ["services", service] => Route::Service {
                service: Slug::parse(service)?,
            },
            ["services", service, city] => Route::ServiceInCity {
                service: Slug::parse(service)?,
                city: Slug::parse(city)?,
            },
            ["locations", city] => Route::Location {
                city: Slug::parse(city)?,
            },
            [segment] => {
                if let Some(section) = Section::from_segment(segment) {
                    Route::Directory { section }
                } else if let Some(page) = StaticPageKind::from_segment(segment) {
                    Route::Static { page }
                } else {
                    return Err(SiteError::InvalidRoute(path.to_string()));
                }
            }
            _ => return Err(SiteError::InvalidRoute(path.to_string())),
        };
        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        Route::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(
            Route::Static {
                page: StaticPageKind::FsaHsa
            }
            .path(),
            "/fsa-hsa-eye-care"
        );
        assert_eq!(
            Route::ConditionInCity {
                condition: slug("keratoconus"),
                city: slug("irvine")
            }
            .path(),
            "/conditions/keratoconus/irvine"
        );
        assert_eq!(
            Route::ServiceInCity {
                service: slug("scleral-lenses"),
                city: slug("orange-county")
            }
            .path(),
            "/services/scleral-lenses/orange-county"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(
            Route::parse("/about/").unwrap(),
            Route::Static {
                page: StaticPageKind::About
            }
        );
        assert_eq!(
            Route::parse("/conditions/glaucoma/tustin?utm_source=x#faq").unwrap(),
            Route::ConditionInCity {
                condition: slug("glaucoma"),
                city: slug("tustin")
            }
        );
        assert_eq!(
            Route::parse("/services").unwrap(),
            Route::Directory {
                section: Section::Services
            }
        );
        assert_eq!(
            Route::parse("/lp/dry-eye-relief").unwrap(),
            Route::Landing {
                slug: slug("dry-eye-relief")
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        assert!(Route::parse("conditions/glaucoma").is_err());
        assert!(Route::parse("/blog").is_err());
        assert!(Route::parse("/conditions/a/b/c").is_err());
        assert!(Route::parse("/locations/Irvine").is_err());
        assert!(Route::parse("/lp").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(Route::parse("//about").is_err());
        assert!(Route::parse("/conditions//glaucoma").is_err());
        assert!(Route::parse("/services/myopia-control//").is_err());
        assert!(Route::parse("//").is_err());
        assert_eq!(Route::parse("/about/").unwrap().path(), "/about");
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
    }

    #[test]
    fn test_route_kind_from_str() {
        assert_eq!(
            "condition-in-city".parse::<RouteKind>().unwrap(),
            RouteKind::ConditionInCity
        );
        assert!("nope".parse::<RouteKind>().is_err());
    }
}
