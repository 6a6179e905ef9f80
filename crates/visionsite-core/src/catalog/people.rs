use serde::{Deserialize, Serialize};

use crate::{RatingSummary, Slug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceKind {
    Vision,
    Medical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    pub id: Slug,
    pub name: String,
    pub kind: InsuranceKind,
    /// Missing logos render as a text-only tile.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub slug: Slug,
    pub name: String,
    pub credentials: String,
    pub title: String,
    pub bio: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub memberships: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub rating: RatingSummary,
}

impl Doctor {
    /// "Dr. Jane Park, OD"
    pub fn display_name(&self) -> String {
        format!("Dr. {}, {}", self.name, self.credentials)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub body: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub source: Option<String>,
}
