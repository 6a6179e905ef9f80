//! Static path enumeration and per-route resolution.
//!
//! `Resolver::enumerate` produces every path the site publishes, including the
//! unfiltered condition × city and service × city products (the region
//! pseudo-city is unioned into the city list first). `Resolver::resolve` turns
//! one route into a `Page`; each slug is looked up independently and any miss
//! yields `SiteError::NotFound` with no partial page.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::synth::resolve_condition;
use crate::{
    City, ConditionSummary, Crumb, Doctor, GalleryImage, Insurance, InsuranceKind, LandingPage,
    Provenance, ResolvedCondition, Result, Review, Route, RouteKind, Section, Service,
    ServiceSummary, SiteCatalog, SiteError, Slug, StaticPageKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLink {
    pub slug: Slug,
    pub name: String,
}

impl From<&City> for CityLink {
    fn from(c: &City) -> Self {
        Self {
            slug: c.slug.clone(),
            name: c.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePage {
    pub featured_conditions: Vec<ConditionSummary>,
    pub services: Vec<ServiceSummary>,
    pub cities: Vec<CityLink>,
    pub reviews: Vec<Review>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StaticContent {
    About {
        doctors: Vec<Doctor>,
        gallery: Vec<GalleryImage>,
    },
    Insurance {
        vision: Vec<Insurance>,
        medical: Vec<Insurance>,
    },
    Financing {
        services: Vec<ServiceCost>,
    },
    FsaHsa {
        eligible_services: Vec<ServiceSummary>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: ServiceSummary,
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub page: StaticPageKind,
    pub title: String,
    pub content: StaticContent,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryPage {
    pub section: Section,
    pub entries: Vec<DirectoryEntry>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingView {
    pub landing: LandingPage,
    /// `None` when the page has no service or its reference dangles.
    pub service: Option<ServiceSummary>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionPage {
    pub condition: ResolvedCondition,
    pub related: Vec<ConditionSummary>,
    pub cities: Vec<CityLink>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCityPage {
    pub condition: ResolvedCondition,
    pub city: City,
    pub related: Vec<ConditionSummary>,
    pub nearby: Vec<CityLink>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePage {
    pub service: Service,
    pub related: Vec<ServiceSummary>,
    pub cities: Vec<CityLink>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCityPage {
    pub service: Service,
    pub city: City,
    pub related: Vec<ServiceSummary>,
    pub nearby: Vec<CityLink>,
    pub breadcrumbs: Vec<Crumb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPage {
    pub city: City,
    pub conditions: Vec<ConditionSummary>,
    pub services: Vec<ServiceSummary>,
    pub nearby: Vec<CityLink>,
    pub breadcrumbs: Vec<Crumb>,
}

/// A fully resolved page record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Page {
    Home(HomePage),
    Static(StaticPage),
    Directory(DirectoryPage),
    Landing(LandingView),
    Condition(ConditionPage),
    ConditionInCity(ConditionCityPage),
    Service(ServicePage),
    ServiceInCity(ServiceCityPage),
    Location(LocationPage),
}

impl Page {
    pub fn kind(&self) -> RouteKind {
        match self {
            Page::Home(_) => RouteKind::Home,
            Page::Static(_) => RouteKind::Static,
            Page::Directory(_) => RouteKind::Directory,
            Page::Landing(_) => RouteKind::Landing,
            Page::Condition(_) => RouteKind::Condition,
            Page::ConditionInCity(_) => RouteKind::ConditionInCity,
            Page::Service(_) => RouteKind::Service,
            Page::ServiceInCity(_) => RouteKind::ServiceInCity,
            Page::Location(_) => RouteKind::Location,
        }
    }

    pub fn breadcrumbs(&self) -> &[Crumb] {
        match self {
            Page::Home(p) => &p.breadcrumbs,
            Page::Static(p) => &p.breadcrumbs,
            Page::Directory(p) => &p.breadcrumbs,
            Page::Landing(p) => &p.breadcrumbs,
            Page::Condition(p) => &p.breadcrumbs,
            Page::ConditionInCity(p) => &p.breadcrumbs,
            Page::Service(p) => &p.breadcrumbs,
            Page::ServiceInCity(p) => &p.breadcrumbs,
            Page::Location(p) => &p.breadcrumbs,
        }
    }

    /// Synthesized only for condition pages built from the search index.
    pub fn provenance(&self) -> Provenance {
        match self {
            Page::Condition(p) => p.condition.provenance,
            Page::ConditionInCity(p) => p.condition.provenance,
            _ => Provenance::Authored,
        }
    }
}

pub struct Resolver<'a> {
    catalog: &'a SiteCatalog,
    related_limit: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a SiteCatalog, related_limit: usize) -> Self {
        Self {
            catalog,
            related_limit,
        }
    }

    pub fn catalog(&self) -> &'a SiteCatalog {
        self.catalog
    }

    /// Every static route in deterministic declaration order.
    pub fn enumerate(&self) -> Vec<Route> {
        let catalog = self.catalog;
        let conditions = catalog.condition_slugs();
        let cities: Vec<&Slug> = catalog.cities_with_region().map(|c| &c.slug).collect();

        let mut routes = Vec::with_capacity(
            8 + conditions.len() * (cities.len() + 1)
                + catalog.services.len() * (cities.len() + 1)
                + cities.len()
                + catalog.landing_pages.len(),
        );

        routes.push(Route::Home);
        routes.extend(
            StaticPageKind::ALL
                .into_iter()
                .map(|page| Route::Static { page }),
        );
        routes.extend(
            Section::ALL
                .into_iter()
                .map(|section| Route::Directory { section }),
        );
        routes.extend(catalog.landing_pages.iter().map(|p| Route::Landing {
            slug: p.slug.clone(),
        }));

        for condition in &conditions {
            routes.push(Route::Condition {
                condition: (*condition).clone(),
            });
            for city in &cities {
                routes.push(Route::ConditionInCity {
                    condition: (*condition).clone(),
                    city: (*city).clone(),
                });
            }
        }

        for service in &catalog.services {
            routes.push(Route::Service {
                service: service.slug.clone(),
            });
            for city in &cities {
                routes.push(Route::ServiceInCity {
                    service: service.slug.clone(),
                    city: (*city).clone(),
                });
            }
        }

        routes.extend(cities.iter().map(|city| Route::Location {
            city: (*city).clone(),
        }));

        routes
    }

    /// Parses and resolves a URL path; unknown shapes and slugs are not-found.
    pub fn resolve_path(&self, path: &str) -> Result<Page> {
        self.resolve(&Route::parse(path)?)
    }

    pub fn resolve(&self, route: &Route) -> Result<Page> {
        let page = match route {
            Route::Home => Page::Home(self.home()),
            Route::Static { page } => Page::Static(self.static_page(*page)),
            Route::Directory { section } => Page::Directory(self.directory(*section)),
            Route::Landing { slug } => Page::Landing(self.landing(slug)?),
            Route::Condition { condition } => Page::Condition(self.condition(condition)?),
            Route::ConditionInCity { condition, city } => {
                Page::ConditionInCity(self.condition_in_city(condition, city)?)
            }
            Route::Service { service } => Page::Service(self.service(service)?),
            Route::ServiceInCity { service, city } => {
                Page::ServiceInCity(self.service_in_city(service, city)?)
            }
            Route::Location { city } => Page::Location(self.location(city)?),
        };
        Ok(page)
    }

    fn home(&self) -> HomePage {
        HomePage {
            featured_conditions: self
                .catalog
                .conditions
                .iter()
                .take(self.related_limit * 2)
                .map(ConditionSummary::from)
                .collect(),
            services: self.catalog.services.iter().map(ServiceSummary::from).collect(),
            cities: self.catalog.cities.iter().map(CityLink::from).collect(),
            reviews: self.catalog.reviews.clone(),
            breadcrumbs: vec![home_crumb()],
        }
    }

    fn static_page(&self, page: StaticPageKind) -> StaticPage {
        let catalog = self.catalog;
        let content = match page {
            StaticPageKind::About => StaticContent::About {
                doctors: catalog.doctors.clone(),
                gallery: catalog.business.gallery.clone(),
            },
            StaticPageKind::Insurance => StaticContent::Insurance {
                vision: cloned(catalog.insurances_by_kind(InsuranceKind::Vision)),
                medical: cloned(catalog.insurances_by_kind(InsuranceKind::Medical)),
            },
            StaticPageKind::Financing => StaticContent::Financing {
                services: catalog
                    .services
                    .iter()
                    .map(|s| ServiceCost {
                        service: ServiceSummary::from(s),
                        range: s.cost.range.clone(),
                    })
                    .collect(),
            },
            StaticPageKind::FsaHsa => StaticContent::FsaHsa {
                eligible_services: catalog.services.iter().map(ServiceSummary::from).collect(),
            },
        };
        StaticPage {
            page,
            title: page.title().to_string(),
            content,
            breadcrumbs: vec![
                home_crumb(),
                Crumb::new(page.title(), format!("/{}", page.segment())),
            ],
        }
    }

    fn directory(&self, section: Section) -> DirectoryPage {
        let catalog = self.catalog;
        let entries = match section {
            Section::Conditions => catalog
                .condition_summaries()
                .into_iter()
                .map(|c| DirectoryEntry {
                    path: Route::Condition {
                        condition: c.slug.clone(),
                    }
                    .path(),
                    name: c.name,
                })
                .collect(),
            Section::Services => catalog
                .services
                .iter()
                .map(|s| DirectoryEntry {
                    name: s.name.clone(),
                    path: Route::Service {
                        service: s.slug.clone(),
                    }
                    .path(),
                })
                .collect(),
            Section::Locations => catalog
                .cities_with_region()
                .map(|c| DirectoryEntry {
                    name: c.name.clone(),
                    path: Route::Location {
                        city: c.slug.clone(),
                    }
                    .path(),
                })
                .collect(),
        };
        DirectoryPage {
            section,
            entries,
            breadcrumbs: vec![home_crumb(), section_crumb(section)],
        }
    }

    fn landing(&self, slug: &Slug) -> Result<LandingView> {
        let landing = self
            .catalog
            .landing_page(slug)
            .ok_or_else(|| SiteError::not_found("landing page", slug.as_str()))?;
        let service = landing.service.as_ref().and_then(|s| {
            let found = self.catalog.service(s).map(ServiceSummary::from);
            if found.is_none() {
                warn!("landing page '{}' references unknown service '{}'", slug, s);
            }
            found
        });
        Ok(LandingView {
            landing: landing.clone(),
            service,
            breadcrumbs: vec![
                home_crumb(),
                Crumb::new(landing.title.clone(), format!("/lp/{}", slug)),
            ],
        })
    }

    fn condition(&self, slug: &Slug) -> Result<ConditionPage> {
        let condition = resolve_condition(self.catalog, slug)?;
        let related = self.related_conditions(&condition);
        let breadcrumbs = condition_crumbs(&condition);
        Ok(ConditionPage {
            related,
            cities: self.catalog.cities_with_region().map(CityLink::from).collect(),
            breadcrumbs,
            condition,
        })
    }

    fn condition_in_city(&self, condition: &Slug, city: &Slug) -> Result<ConditionCityPage> {
        let condition = resolve_condition(self.catalog, condition);
        let city = self.city(city);
        let (condition, city) = (condition?, city?);

        let mut breadcrumbs = condition_crumbs(&condition);
        breadcrumbs.push(Crumb::new(
            city.name.clone(),
            format!("/conditions/{}/{}", condition.condition.slug, city.slug),
        ));

        Ok(ConditionCityPage {
            related: self.related_conditions(&condition),
            nearby: self.nearby(&city.slug),
            city: city.clone(),
            breadcrumbs,
            condition,
        })
    }

    fn service(&self, slug: &Slug) -> Result<ServicePage> {
        let service = self.lookup_service(slug)?;
        Ok(ServicePage {
            related: self.related_services(service),
            cities: self.catalog.cities_with_region().map(CityLink::from).collect(),
            breadcrumbs: service_crumbs(service),
            service: service.clone(),
        })
    }

    fn service_in_city(&self, service: &Slug, city: &Slug) -> Result<ServiceCityPage> {
        let service = self.lookup_service(service);
        let city = self.city(city);
        let (service, city) = (service?, city?);

        let mut breadcrumbs = service_crumbs(service);
        breadcrumbs.push(Crumb::new(
            city.name.clone(),
            format!("/services/{}/{}", service.slug, city.slug),
        ));

        Ok(ServiceCityPage {
            related: self.related_services(service),
            nearby: self.nearby(&city.slug),
            service: service.clone(),
            city: city.clone(),
            breadcrumbs,
        })
    }

    fn location(&self, slug: &Slug) -> Result<LocationPage> {
        let city = self.city(slug)?;
        Ok(LocationPage {
            conditions: self.catalog.condition_summaries(),
            services: self.catalog.services.iter().map(ServiceSummary::from).collect(),
            nearby: self.nearby(&city.slug),
            breadcrumbs: vec![
                home_crumb(),
                section_crumb(Section::Locations),
                Crumb::new(city.name.clone(), format!("/locations/{}", city.slug)),
            ],
            city: city.clone(),
        })
    }

    fn city(&self, slug: &Slug) -> Result<&'a City> {
        self.catalog
            .city_or_region(slug)
            .ok_or_else(|| SiteError::not_found("city", slug.as_str()))
    }

    fn lookup_service(&self, slug: &Slug) -> Result<&'a Service> {
        self.catalog
            .service(slug)
            .ok_or_else(|| SiteError::not_found("service", slug.as_str()))
    }

    /// Same category, declaration order, current slug excluded, capped.
    pub fn related_conditions(&self, current: &ResolvedCondition) -> Vec<ConditionSummary> {
        let current = &current.condition;
        self.catalog
            .condition_summaries()
            .into_iter()
            .filter(|c| c.category == current.category && c.slug != current.slug)
            .take(self.related_limit)
            .collect()
    }

    /// The service's own cross-references; dangling slugs are skipped.
    pub fn related_services(&self, service: &Service) -> Vec<ServiceSummary> {
        service
            .related
            .iter()
            .filter(|slug| **slug != service.slug)
            .filter_map(|slug| {
                let found = self.catalog.service(slug);
                if found.is_none() {
                    warn!(
                        "service '{}' references unknown service '{}'",
                        service.slug, slug
                    );
                }
                found
            })
            .map(ServiceSummary::from)
            .take(self.related_limit)
            .collect()
    }

    /// Other real cities in declaration order.
    pub fn nearby(&self, current: &Slug) -> Vec<CityLink> {
        self.catalog
            .cities
            .iter()
            .filter(|c| &c.slug != current)
            .take(self.related_limit)
            .map(CityLink::from)
            .collect()
    }
}

fn cloned<T: Clone>(items: Vec<&T>) -> Vec<T> {
    items.into_iter().cloned().collect()
}

fn home_crumb() -> Crumb {
    Crumb::new("Home", "/")
}

fn section_crumb(section: Section) -> Crumb {
    Crumb::new(section.title(), section.path())
}

fn condition_crumbs(condition: &ResolvedCondition) -> Vec<Crumb> {
    let c = &condition.condition;
    vec![
        home_crumb(),
        section_crumb(Section::Conditions),
        Crumb::new(c.name.clone(), format!("/conditions/{}", c.slug)),
    ]
}

fn service_crumbs(service: &Service) -> Vec<Crumb> {
    vec![
        home_crumb(),
        section_crumb(Section::Services),
        Crumb::new(service.name.clone(), format!("/services/{}", service.slug)),
    ]
}
