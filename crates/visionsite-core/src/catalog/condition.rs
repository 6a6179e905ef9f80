use serde::{Deserialize, Serialize};

use crate::{Faq, Provenance, Severity, Slug};

/// Fully authored condition record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub slug: Slug,
    pub name: String,
    /// Grouping key for related conditions.
    pub category: String,
    #[serde(default)]
    pub severity: Severity,
    pub description: String,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Minimal search-index record; only name and category are guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionIndexEntry {
    pub slug: Slug,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCondition {
    pub condition: Condition,
    pub provenance: Provenance,
}

impl ResolvedCondition {
    pub fn is_synthesized(&self) -> bool {
        self.provenance == Provenance::Synthesized
    }
}

/// Sidebar-sized view of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub slug: Slug,
    pub name: String,
    pub category: String,
}

impl From<&Condition> for ConditionSummary {
    fn from(c: &Condition) -> Self {
        Self {
            slug: c.slug.clone(),
            name: c.name.clone(),
            category: c.category.clone(),
        }
    }
}

impl From<&ConditionIndexEntry> for ConditionSummary {
    fn from(e: &ConditionIndexEntry) -> Self {
        Self {
            slug: e.slug.clone(),
            name: e.name.clone(),
            category: e.category.clone(),
        }
    }
}
