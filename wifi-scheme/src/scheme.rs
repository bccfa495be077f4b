/*!
 * Scheme catalog
 * Named interface profiles and the network each one expects to join
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SchemeError};
use crate::fuzzy;

/// Option keys that name the target network, in lookup order.
pub const SSID_KEYS: [&str; 2] = ["wireless-essid", "wpa-ssid"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub interface: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Scheme {
    pub fn new(name: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Network name this scheme associates with, or `""` if none is configured.
    pub fn target_ssid(&self) -> &str {
        SSID_KEYS
            .iter()
            .find_map(|key| self.options.get(*key))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchemeCatalog {
    schemes: Vec<Scheme>,
}

impl SchemeCatalog {
    pub fn new(schemes: Vec<Scheme>) -> Self {
        Self { schemes }
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// Schemes whose name fuzzy-matches `query`, best first, ties by name.
    pub fn search(&self, query: &str) -> Vec<(&Scheme, f64)> {
        fuzzy::rank(query, &self.schemes, |s| s.name.as_str())
    }

    /// Exact name first, then the best fuzzy match.
    pub fn resolve(&self, query: &str) -> Result<&Scheme> {
        if let Some(scheme) = self.find(query) {
            return Ok(scheme);
        }
        self.search(query)
            .into_iter()
            .next()
            .map(|(scheme, _)| scheme)
            .ok_or_else(|| SchemeError::UnknownScheme(query.to_string()))
    }
}
