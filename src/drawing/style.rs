use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Stroke colour per route name.
///
/// Deserializes from a flat table, e.g. `"AK-01" = "blue"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    colors: BTreeMap<String, String>,
}

impl StyleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a table from TOML.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Toml` if the text is not a flat string table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LoadError::from(e).into())
    }

    /// Sets the colour of a route.
    pub fn insert(&mut self, route: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(route.into(), color.into());
    }

    /// Returns the colour of a route, if it has one.
    #[must_use]
    pub fn color(&self, route: &str) -> Option<&str> {
        self.colors.get(route).map(String::as_str)
    }

    /// Colours of the Bogor angkot network.
    #[must_use]
    pub fn bogor() -> Self {
        let colors = [
            ("AK-01", "blue"),
            ("AK-02", "orange"),
            ("AK-03", "blue"),
            ("AK-04", "blue"),
            ("AK-05", "pink"),
            ("AK-06", "yellow"),
            ("AK-07", "lightgrey"),
            ("AK-08", "red"),
            ("AK-09", "purple"),
            ("AK-10", "silver"),
            ("AK-11", "brown"),
            ("AK-12", "yellow"),
            ("AK-13", "orange"),
            ("AK-14", "pink"),
            ("AK-15", "brown"),
            ("AK-16", "lightgrey"),
            ("AK-17", "grey"),
            ("AK-18", "yellow"),
            ("AK-19", "darkgreen"),
            ("AK-20", "black"),
            ("AK-21", "black"),
            ("AK-22", "black"),
            ("AK-23", "black"),
        ];
        colors.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
