use std::collections::HashMap;

use storage::catalog::ParkCatalog;
use storage::models::ParkName;
use tracing::warn;

use crate::{ImporterError, Result};

pub struct CatalogValidator;

impl CatalogValidator {
    pub fn validate(catalog: &ParkCatalog) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if catalog.is_empty() {
            report.errors.push("Catalog contains no parks".to_string());
        } else if catalog.len() < 2 {
            report
                .warnings
                .push("Voting needs at least two parks; only one is listed".to_string());
        }

        let mut seen: HashMap<String, String> = HashMap::new();
        for (idx, entry) in catalog.entries().iter().enumerate() {
            let Some(name) = ParkName::new(&entry.name) else {
                report
                    .errors
                    .push(format!("Entry {} has an empty park name", idx + 1));
                continue;
            };

            if name.as_str() != entry.name {
                report.warnings.push(format!(
                    "Park name '{}' will be stored as '{}'",
                    entry.name, name
                ));
            }

            if let Some(previous) = seen.insert(name.dedup_key(), entry.name.clone()) {
                report.errors.push(format!(
                    "Duplicate park name: '{}' conflicts with '{}'",
                    entry.name, previous
                ));
            }

            let url = entry.image_url.trim();
            if url.is_empty() {
                report
                    .errors
                    .push(format!("Park '{}' has an empty image URL", name));
            } else if !(url.starts_with("https://")
                || url.starts_with("http://")
                || url.starts_with('/'))
            {
                report.warnings.push(format!(
                    "Park '{}' image URL '{}' is neither absolute nor site-relative",
                    name, url
                ));
            }
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
