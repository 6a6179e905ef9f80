//! Build-time content catalogs keyed by slug.
//!
//! Every catalog ships embedded in the binary (`data/*.toml`) and can be
//! replaced wholesale by pointing `catalog.dir` at a directory holding files
//! with the same names. Records are immutable once loaded; joins across
//! catalogs (condition × city, service × city) are computed by the resolver.

pub mod city;
pub mod condition;
pub mod landing;
pub mod people;
pub mod service;

pub use city::*;
pub use condition::*;
pub use landing::*;
pub use people::*;
pub use service::*;

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Business, CatalogConfig, Result, SiteError, Slug};

const BUSINESS_FILE: &str = "business.toml";
const CITIES_FILE: &str = "cities.toml";
const CONDITIONS_FILE: &str = "conditions.toml";
const CONDITION_INDEX_FILE: &str = "condition_index.toml";
const SERVICES_FILE: &str = "services.toml";
const INSURANCES_FILE: &str = "insurances.toml";
const DOCTORS_FILE: &str = "doctors.toml";
const REVIEWS_FILE: &str = "reviews.toml";
const LANDING_FILE: &str = "landing.toml";

enum CatalogSource<'a> {
    Embedded,
    Dir(&'a Path),
}

impl CatalogSource<'_> {
    fn read(&self, file: &str) -> Result<String> {
        match self {
            CatalogSource::Embedded => embedded(file)
                .map(str::to_string)
                .ok_or_else(|| SiteError::Catalog(format!("no embedded catalog named {}", file))),
            CatalogSource::Dir(dir) => {
                let path = dir.join(file);
                fs::read_to_string(&path).map_err(|e| {
                    SiteError::Catalog(format!("reading {}: {}", path.display(), e))
                })
            }
        }
    }
}

fn embedded(file: &str) -> Option<&'static str> {
    let text = match file {
        BUSINESS_FILE => include_str!("../../data/business.toml"),
        CITIES_FILE => include_str!("../../data/cities.toml"),
        CONDITIONS_FILE => include_str!("../../data/conditions.toml"),
        CONDITION_INDEX_FILE => include_str!("../../data/condition_index.toml"),
        SERVICES_FILE => include_str!("../../data/services.toml"),
        INSURANCES_FILE => include_str!("../../data/insurances.toml"),
        DOCTORS_FILE => include_str!("../../data/doctors.toml"),
        REVIEWS_FILE => include_str!("../../data/reviews.toml"),
        LANDING_FILE => include_str!("../../data/landing.toml"),
        _ => return None,
    };
    Some(text)
}

/// Deserializes the array of tables stored under `key` (`[[key]]` in TOML).
fn parse_list<T: DeserializeOwned>(file: &str, text: &str, key: &str) -> Result<Vec<T>> {
    let mut table: toml::Table =
        toml::from_str(text).map_err(|e| SiteError::Catalog(format!("{}: {}", file, e)))?;
    match table.remove(key) {
        Some(value) => value
            .try_into()
            .map_err(|e| SiteError::Catalog(format!("{}: {}", file, e))),
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteCatalog {
    pub business: Business,
    pub cities: Vec<City>,
    pub conditions: Vec<Condition>,
    pub condition_index: Vec<ConditionIndexEntry>,
    pub services: Vec<Service>,
    pub insurances: Vec<Insurance>,
    pub doctors: Vec<Doctor>,
    pub reviews: Vec<Review>,
    pub landing_pages: Vec<LandingPage>,
    region: City,
}

impl SiteCatalog {
    /// Catalogs compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_source(CatalogSource::Embedded)
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        Self::from_source(CatalogSource::Dir(dir))
    }

    pub fn load(config: &CatalogConfig) -> Result<Self> {
        match &config.dir {
            Some(dir) if !dir.is_dir() => Err(SiteError::Config(format!(
                "catalog.dir {} is not a directory",
                dir.display()
            ))),
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    fn from_source(source: CatalogSource<'_>) -> Result<Self> {
        let business: Business = toml::from_str(&source.read(BUSINESS_FILE)?)
            .map_err(|e| SiteError::Catalog(format!("{}: {}", BUSINESS_FILE, e)))?;

        Self::new(
            business,
            parse_list(CITIES_FILE, &source.read(CITIES_FILE)?, "city")?,
            parse_list(CONDITIONS_FILE, &source.read(CONDITIONS_FILE)?, "condition")?,
            parse_list(
                CONDITION_INDEX_FILE,
                &source.read(CONDITION_INDEX_FILE)?,
                "entry",
            )?,
            parse_list(SERVICES_FILE, &source.read(SERVICES_FILE)?, "service")?,
            parse_list(INSURANCES_FILE, &source.read(INSURANCES_FILE)?, "insurance")?,
            parse_list(DOCTORS_FILE, &source.read(DOCTORS_FILE)?, "doctor")?,
            parse_list(REVIEWS_FILE, &source.read(REVIEWS_FILE)?, "review")?,
            parse_list(LANDING_FILE, &source.read(LANDING_FILE)?, "page")?,
        )
    }

    /// Assembles a catalog from already-parsed records and checks its invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        business: Business,
        cities: Vec<City>,
        conditions: Vec<Condition>,
        condition_index: Vec<ConditionIndexEntry>,
        services: Vec<Service>,
        insurances: Vec<Insurance>,
        doctors: Vec<Doctor>,
        reviews: Vec<Review>,
        landing_pages: Vec<LandingPage>,
    ) -> Result<Self> {
        let region = City::region(&business.region, &cities);
        let catalog = Self {
            business,
            cities,
            conditions,
            condition_index,
            services,
            insurances,
            doctors,
            reviews,
            landing_pages,
            region,
        };
        catalog.validate()?;
        debug!(
            cities = catalog.cities.len(),
            conditions = catalog.conditions.len(),
            index_entries = catalog.condition_index.len(),
            services = catalog.services.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        ensure_unique("city", self.cities.iter().map(|c| &c.slug))?;
        ensure_unique("condition", self.conditions.iter().map(|c| &c.slug))?;
        ensure_unique(
            "condition index",
            self.condition_index.iter().map(|e| &e.slug),
        )?;
        ensure_unique("service", self.services.iter().map(|s| &s.slug))?;
        ensure_unique("insurance", self.insurances.iter().map(|i| &i.id))?;
        ensure_unique("doctor", self.doctors.iter().map(|d| &d.slug))?;
        ensure_unique("landing page", self.landing_pages.iter().map(|p| &p.slug))?;

        if self.city(&self.business.region.slug).is_some() {
            return Err(SiteError::DuplicateSlug {
                catalog: "city".to_string(),
                slug: self.business.region.slug.to_string(),
            });
        }

        for entry in &self.condition_index {
            if entry.name.trim().is_empty() || entry.category.trim().is_empty() {
                return Err(SiteError::Catalog(format!(
                    "condition index entry '{}' needs a name and a category",
                    entry.slug
                )));
            }
        }

        for slug in &self.business.service_area {
            if self.city(slug).is_none() {
                warn!("service area lists unknown city '{}'", slug);
            }
        }

        Ok(())
    }

    /// Looks up a real city or the region pseudo-city.
    pub fn city(&self, slug: &Slug) -> Option<&City> {
        self.cities.iter().find(|c| &c.slug == slug)
    }

    pub fn city_or_region(&self, slug: &Slug) -> Option<&City> {
        if &self.region.slug == slug {
            return Some(&self.region);
        }
        self.city(slug)
    }

    pub fn region(&self) -> &City {
        &self.region
    }

    /// Cities in declaration order followed by the region pseudo-city.
    pub fn cities_with_region(&self) -> impl Iterator<Item = &City> {
        self.cities.iter().chain(std::iter::once(&self.region))
    }

    pub fn condition(&self, slug: &Slug) -> Option<&Condition> {
        self.conditions.iter().find(|c| &c.slug == slug)
    }

    pub fn index_entry(&self, slug: &Slug) -> Option<&ConditionIndexEntry> {
        self.condition_index.iter().find(|e| &e.slug == slug)
    }

    /// Every resolvable condition slug: full catalog order first, then index-only entries.
    pub fn condition_slugs(&self) -> Vec<&Slug> {
        let mut seen: HashSet<&Slug> = HashSet::new();
        self.conditions
            .iter()
            .map(|c| &c.slug)
            .chain(self.condition_index.iter().map(|e| &e.slug))
            .filter(|slug| seen.insert(*slug))
            .collect()
    }

    /// Summaries of every resolvable condition, in `condition_slugs` order.
    pub fn condition_summaries(&self) -> Vec<ConditionSummary> {
        let mut seen: HashSet<&Slug> = HashSet::new();
        let authored = self
            .conditions
            .iter()
            .filter(|c| seen.insert(&c.slug))
            .map(ConditionSummary::from)
            .collect::<Vec<_>>();
        let index_only = self
            .condition_index
            .iter()
            .filter(|e| seen.insert(&e.slug))
            .map(ConditionSummary::from);
        authored.into_iter().chain(index_only).collect()
    }

    pub fn service(&self, slug: &Slug) -> Option<&Service> {
        self.services.iter().find(|s| &s.slug == slug)
    }

    pub fn doctor(&self, slug: &Slug) -> Option<&Doctor> {
        self.doctors.iter().find(|d| &d.slug == slug)
    }

    pub fn landing_page(&self, slug: &Slug) -> Option<&LandingPage> {
        self.landing_pages.iter().find(|p| &p.slug == slug)
    }

    pub fn insurances_by_kind(&self, kind: InsuranceKind) -> Vec<&Insurance> {
        self.insurances.iter().filter(|i| i.kind == kind).collect()
    }
}

fn ensure_unique<'a>(catalog: &str, slugs: impl Iterator<Item = &'a Slug>) -> Result<()> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(SiteError::DuplicateSlug {
                catalog: catalog.to_string(),
                slug: slug.to_string(),
            });
        }
    }
    Ok(())
}

/// Writes the embedded catalog files into `dir` so they can be edited and
/// loaded back through `catalog.dir`.
pub fn export_builtin(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let files = [
        BUSINESS_FILE,
        CITIES_FILE,
        CONDITIONS_FILE,
        CONDITION_INDEX_FILE,
        SERVICES_FILE,
        INSURANCES_FILE,
        DOCTORS_FILE,
        REVIEWS_FILE,
        LANDING_FILE,
    ];
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let text = CatalogSource::Embedded.read(file)?;
        let path = dir.join(file);
        fs::write(&path, text)?;
        written.push(path);
    }
    Ok(written)
}
