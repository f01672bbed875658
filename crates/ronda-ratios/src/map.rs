//! Computed ratio values.

use crate::{Ratio, RatioCategory};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

/// Ratios that could be computed for one company.
///
/// Only ratios whose inputs were available and whose denominator was non-zero
/// are present. Iteration follows display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioMap {
    values: BTreeMap<Ratio, f64>,
}

impl RatioMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, ratio: Ratio, value: f64) {
        self.values.insert(ratio, value);
    }

    /// Raw value of a ratio, if computed.
    #[must_use]
    pub fn get(&self, ratio: Ratio) -> Option<f64> {
        self.values.get(&ratio).copied()
    }

    /// Whether a ratio was computed.
    #[must_use]
    pub fn contains(&self, ratio: Ratio) -> bool {
        self.values.contains_key(&ratio)
    }

    /// Number of computed ratios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no ratio could be computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate ratios with their raw values, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Ratio, f64)> + '_ {
        self.values.iter().map(|(r, v)| (*r, *v))
    }

    /// Iterate the computed ratios of one category.
    pub fn in_category(&self, category: RatioCategory) -> impl Iterator<Item = (Ratio, f64)> + '_ {
        self.iter().filter(move |(r, _)| r.category() == category)
    }

    /// Display name and formatted value of each ratio, in display order.
    #[must_use]
    pub fn formatted(&self) -> Vec<(&'static str, String)> {
        self.iter()
            .map(|(r, v)| (r.name(), r.format().render(v)))
            .collect()
    }
}

impl Serialize for RatioMap {
    /// Serializes as `{"<display name>": "<formatted value>", ...}`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.formatted() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

impl FromIterator<(Ratio, f64)> for RatioMap {
    fn from_iter<I: IntoIterator<Item = (Ratio, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
