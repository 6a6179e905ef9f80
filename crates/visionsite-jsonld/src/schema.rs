//! schema.org node types. Field names serialize to the exact vocabulary terms
//! search engines read, so renames here are wire-format changes.

use serde::Serialize;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Reference to a node defined elsewhere in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Named {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
}

impl Named {
    pub fn new(schema_type: &'static str, name: impl Into<String>) -> Self {
        Self {
            schema_type,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub day_of_week: Vec<String>,
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub url_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReserveAction {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub target: EntryPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub rating_value: f64,
    pub review_count: u32,
    pub best_rating: u8,
    pub worst_rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalBusiness {
    #[serde(rename = "@type")]
    pub schema_type: Vec<&'static str>,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub legal_name: String,
    pub description: String,
    pub url: String,
    pub logo: String,
    pub image: String,
    pub telephone: String,
    pub email: String,
    pub price_range: String,
    pub address: PostalAddress,
    pub geo: GeoCoordinates,
    pub opening_hours_specification: Vec<OpeningHoursSpecification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub area_served: Vec<Named>,
    pub medical_specialty: &'static str,
    pub aggregate_rating: AggregateRating,
    pub potential_action: ReserveAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalCondition {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternate_name: Vec<String>,
    pub description: String,
    pub url: String,
    pub sign_or_symptom: Vec<Named>,
    pub possible_treatment: Vec<Named>,
    pub associated_anatomy: Named,
    pub relevant_specialty: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalProcedure {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub alternate_name: String,
    pub description: String,
    pub url: String,
    pub procedure_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_performed: Option<String>,
    pub body_location: &'static str,
    pub relevant_specialty: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub credential_category: &'static str,
    pub recognized_by: Named,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Physician {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub medical_specialty: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub knows_about: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub knows_language: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_credential: Vec<Credential>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member_of: Vec<Named>,
    pub parent_organization: NodeRef,
    pub aggregate_rating: AggregateRating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub position: usize,
    pub name: String,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub rating_value: u8,
    pub best_rating: u8,
    pub worst_rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub author: Named,
    pub review_rating: Rating,
    pub review_body: String,
    pub date_published: String,
    pub item_reviewed: NodeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Named>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub price: String,
    pub price_currency: String,
    pub availability: &'static str,
    pub url: String,
    pub seller: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub description: String,
    pub brand: Named,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub url: String,
    pub offers: Offer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_rating: Option<AggregateRating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub content_url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGallery {
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub url: String,
    pub associated_media: Vec<ImageObject>,
}
