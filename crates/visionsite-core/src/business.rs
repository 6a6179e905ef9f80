//! Contact and business registry: phones, address, hours, social links and the
//! service area. Pure data loaded from `business.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, SiteError, Slug};

/// Ten-digit North American number, stored as bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accepts any punctuation and an optional leading country code `1`.
    pub fn parse(raw: &str) -> Result<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let digits = match digits.len() {
            10 => digits,
            11 if digits.starts_with('1') => digits[1..].to_string(),
            _ => {
                return Err(SiteError::Catalog(format!(
                    "invalid phone number '{}'",
                    raw
                )))
            }
        };
        Ok(PhoneNumber(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    /// `(949) 555-0123`
    pub fn display(&self) -> String {
        format!("({}) {}-{}", &self.0[..3], &self.0[3..6], &self.0[6..])
    }

    /// `+19495550123`
    pub fn e164(&self) -> String {
        format!("+1{}", self.0)
    }

    /// `tel:+19495550123`
    pub fn tel_href(&self) -> String {
        format!("tel:{}", self.e164())
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = SiteError;

    fn try_from(value: String) -> Result<Self> {
        PhoneNumber::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneBook {
    pub main: PhoneNumber,
    #[serde(default)]
    pub text: Option<PhoneNumber>,
    #[serde(default)]
    pub fax: Option<PhoneNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    #[serde(default)]
    pub suite: Option<String>,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    #[serde(default = "PostalAddress::default_country")]
    pub country: String,
}

impl PostalAddress {
    fn default_country() -> String {
        "US".to_string()
    }

    pub fn street_line(&self) -> String {
        match &self.suite {
            Some(suite) => format!("{}, {}", self.street, suite),
            None => self.street.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub days: Vec<String>,
    pub opens: String,
    pub closes: String,
}

/// Aggregate rating as published on review platforms; never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub value: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub slug: Slug,
    pub name: String,
    pub county: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub legal_name: String,
    pub url: String,
    pub logo: String,
    pub image: String,
    pub description: String,
    pub phones: PhoneBook,
    pub email: String,
    pub address: PostalAddress,
    pub geo: GeoPoint,
    pub hours: Vec<OpeningHours>,
    #[serde(default)]
    pub social: Vec<String>,
    pub price_range: String,
    pub rating: RatingSummary,
    pub booking_path: String,
    pub patient_portal_url: String,
    pub phone_tracking_class: String,
    pub service_area: Vec<Slug>,
    pub region: Region,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

impl Business {
    /// Stable JSON-LD node id for the practice.
    pub fn node_id(&self) -> String {
        format!("{}/#organization", self.url.trim_end_matches('/'))
    }
}
