//! Country catalog loading.
//!
//! The catalog is a JSON array of `{ "code", "flag", "names" }` objects.
//! A copy is compiled into the binary; a user file can replace it.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../../assets/countries.json");

/// A single country the quiz can ask about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryRecord {
    code: String,
    flag: String,
    names: Vec<String>,
}

impl CountryRecord {
    pub fn new(code: impl Into<String>, flag: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            code: code.into(),
            flag: flag.into(),
            names,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// All accepted spellings, canonical one first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name shown to the user. Validated catalogs always have one.
    pub fn display_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(&self.code)
    }
}

/// Where to read the catalog from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Bundled => write!(f, "bundled catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Errors that can occur while loading a catalog.
///
/// Any invalid record aborts the whole load.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog contains no countries")]
    Empty,
    #[error("Record #{index} has an empty code")]
    BlankCode { index: usize },
    #[error("Record #{index} ({code}) has no names")]
    EmptyNames { index: usize, code: String },
    #[error("Record #{index} ({code}) has a blank name")]
    BlankName { index: usize, code: String },
    #[error("Country code {code} appears more than once")]
    DuplicateCode { code: String },
}

/// Load and validate a catalog.
pub fn load_catalog(source: &CatalogSource) -> Result<Vec<CountryRecord>, CatalogError> {
    let records = match source {
        CatalogSource::Bundled => parse_catalog(BUNDLED_CATALOG)?,
        CatalogSource::File(path) => {
            debug!(path = %path.display(), "Reading catalog file");
            let json = std::fs::read_to_string(path)?;
            parse_catalog(&json)?
        }
    };
    info!(%source, countries = records.len(), "Catalog loaded");
    Ok(records)
}

/// Load a catalog, falling back to the built-in list on any error.
///
/// Returns the catalog and the error that forced the fallback, if any.
pub fn load_catalog_or_fallback(
    source: &CatalogSource,
) -> (Vec<CountryRecord>, Option<CatalogError>) {
    match load_catalog(source) {
        Ok(records) => (records, None),
        Err(e) => {
            warn!(%source, error = %e, "Failed to load catalog, using fallback list");
            (fallback_catalog(), Some(e))
        }
    }
}

/// Parse and validate catalog JSON.
pub fn parse_catalog(json: &str) -> Result<Vec<CountryRecord>, CatalogError> {
    let records: Vec<CountryRecord> = serde_json::from_str(json)?;
    validate(&records)?;
    Ok(records)
}

fn validate(records: &[CountryRecord]) -> Result<(), CatalogError> {
    if records.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        if record.code.trim().is_empty() {
            return Err(CatalogError::BlankCode { index });
        }
        if record.names.is_empty() {
            return Err(CatalogError::EmptyNames {
                index,
                code: record.code.clone(),
            });
        }
        if record.names.iter().any(|n| n.trim().is_empty()) {
            return Err(CatalogError::BlankName {
                index,
                code: record.code.clone(),
            });
        }
        if !seen.insert(record.code.as_str()) {
            return Err(CatalogError::DuplicateCode {
                code: record.code.clone(),
            });
        }
    }
    Ok(())
}

/// Small built-in catalog used when loading fails.
pub fn fallback_catalog() -> Vec<CountryRecord> {
    vec![
        CountryRecord::new("PL", "🇵🇱", vec!["Polska".to_string()]),
        CountryRecord::new("DE", "🇩🇪", vec!["Niemcy".to_string()]),
        CountryRecord::new("FR", "🇫🇷", vec!["Francja".to_string()]),
        CountryRecord::new(
            "IT",
            "🇮🇹",
            vec!["Włochy".to_string(), "Italia".to_string()],
        ),
    ]
}
