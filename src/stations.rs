//! WMO station index lookup

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::i18n::Translator;
use crate::{Result, TelexError};

const DEFAULT_STATIONS: &str = include_str!("../data/stations.json");

/// Mapping from 5-digit station index to station name
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    names: HashMap<String, String>,
}

impl StationTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let names: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| TelexError::catalog(format!("invalid station table: {e}")))?;
        Ok(Self { names })
    }

    /// Load a station table file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        info!("Loaded {} stations from: {:?}", table.len(), path);
        Ok(table)
    }

    /// The table compiled into the crate
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json_str(DEFAULT_STATIONS).unwrap_or_else(|e| {
            warn!("Built-in station table unusable: {}", e);
            Self::default()
        })
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Station name, or the localized "unknown station" label carrying the code
    #[must_use]
    pub fn name_for(&self, code: &str, translator: &dyn Translator) -> String {
        match self.get(code) {
            Some(name) => name.to_string(),
            None => translator.translate("unknown_station", &[("code", code)]),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
