//! Descriptive block published about the aggregator itself.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role the aggregator announces to its consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorCategory {
    /// Mirrors provider content.
    Aggregator,
    /// Only lists providers, never mirrors them.
    Lister,
}

impl Display for AggregatorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aggregator => f.write_str("aggregator"),
            Self::Lister => f.write_str("lister"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("aggregator.category is mandatory")]
    MissingCategory,
    #[error("aggregator.name is mandatory")]
    MissingName,
    #[error("aggregator.namespace is mandatory")]
    MissingNamespace,
    #[error("aggregator.namespace must be an http(s) URL: '{value}'")]
    InvalidNamespace { value: String },
}

/// The `[aggregator]` table of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AggregatorInfo {
    #[serde(default)]
    pub category: Option<AggregatorCategory>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub contact_details: String,
    #[serde(default)]
    pub issuing_authority: String,
}

impl AggregatorInfo {
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.category.is_none() {
            return Err(MetadataError::MissingCategory);
        }
        if self.name.trim().is_empty() {
            return Err(MetadataError::MissingName);
        }
        if self.namespace.is_empty() {
            return Err(MetadataError::MissingNamespace);
        }
        if !(self.namespace.starts_with("https://") || self.namespace.starts_with("http://")) {
            return Err(MetadataError::InvalidNamespace {
                value: self.namespace.clone(),
            });
        }
        Ok(())
    }
}
