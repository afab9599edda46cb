//! In-memory directory of JRV voting centers.
//!
//! The authoritative registry lives outside this service; at startup we load
//! a JSON export of it so the login flow can resolve the JRV named in a
//! credential to reference coordinates for the GPS check.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One voting center, keyed by the JRV it hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    /// JRV code as printed on the credential, e.g. "00001". Leading zeros
    /// are not significant.
    pub jrv: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Default)]
pub struct CenterDirectory {
    centers: HashMap<u32, Center>,
}

impl CenterDirectory {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a directory from a JSON file containing an array of centers.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or a
    /// center carries a non-numeric JRV code.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading centers file {}", path.display()))?;

        Self::from_json(&data)
    }

    /// # Errors
    /// Returns an error on malformed JSON or a non-numeric JRV code.
    pub fn from_json(data: &str) -> Result<Self> {
        let list: Vec<Center> = serde_json::from_str(data).context("parsing centers JSON")?;

        let mut centers = HashMap::with_capacity(list.len());
        for center in list {
            let jrv: u32 = center
                .jrv
                .trim()
                .parse()
                .with_context(|| format!("invalid JRV code in centers file: {:?}", center.jrv))?;
            centers.insert(jrv, center);
        }

        Ok(Self { centers })
    }

    /// Resolve a JRV code (zero-padded or not) to its center.
    #[must_use]
    pub fn find(&self, jrv: &str) -> Option<&Center> {
        jrv.trim().parse::<u32>().ok().and_then(|n| self.centers.get(&n))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}
