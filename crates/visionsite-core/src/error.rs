use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Duplicate slug '{slug}' in {catalog} catalog")]
    DuplicateSlug { catalog: String, slug: String },

    #[error("{kind} not found: {slug}")]
    NotFound { kind: String, slug: String },

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SiteError {
    pub fn not_found(kind: impl Into<String>, slug: impl Into<String>) -> Self {
        SiteError::NotFound {
            kind: kind.into(),
            slug: slug.into(),
        }
    }

    /// True for the one error a page request is allowed to surface.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteError::NotFound { .. } | SiteError::InvalidRoute(_))
    }
}

impl From<toml::de::Error> for SiteError {
    fn from(err: toml::de::Error) -> Self {
        SiteError::Catalog(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
