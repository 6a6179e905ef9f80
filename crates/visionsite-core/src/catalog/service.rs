use serde::{Deserialize, Serialize};

use crate::{Faq, Slug};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostInfo {
    /// Display range, e.g. "$150 - $350".
    pub range: String,
    #[serde(default)]
    pub insurance_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub slug: Slug,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub overview: String,
    /// schema.org procedureType, e.g. "NoninvasiveProcedure".
    #[serde(default = "Service::default_procedure_type")]
    pub procedure_type: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default)]
    pub non_candidates: Vec<String>,
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
    pub cost: CostInfo,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    /// Weak references into the service catalog.
    #[serde(default)]
    pub related: Vec<Slug>,
}

impl Service {
    fn default_procedure_type() -> String {
        "NoninvasiveProcedure".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub slug: Slug,
    pub name: String,
    pub short_name: String,
}

impl From<&Service> for ServiceSummary {
    fn from(s: &Service) -> Self {
        Self {
            slug: s.slug.clone(),
            name: s.name.clone(),
            short_name: s.short_name.clone(),
        }
    }
}
