//! Composition state: the generated style table and the active themes.
//!
//! # Layout
//!
//! The generated table maps `component → mode → bucket`. A bucket holds one
//! [`ContributionRecord`] per contributing theme, ranked by priority:
//!
//! ```text
//! generated
//! └── psk-button
//!     ├── default   { _max_priority: 2, clear: {priority 1}, citrus: {priority 2} }
//!     └── dark      { _max_priority: 1, clear: {priority 1} }
//! ```
//!
//! Priorities within a bucket are always exactly `1..=max_priority`. The
//! highest priority is the contribution consumers apply; lower ones form the
//! fallback chain.
//!
//! # Serialization
//!
//! The table serializes to the nested layout consumed by the component build:
//!
//! ```json
//! { "psk-button": { "default": {
//!     "_max_priority": 2,
//!     "clear":  { "_code": "...", "_from": "themes",   "_priority": 1 },
//!     "citrus": { "_code": "...", "_from": "extended", "_priority": 2 }
//! } } }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Which operation produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Themes,
    Overridden,
    Extended,
}

/// A single theme's style at one (component, mode) location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionRecord {
    /// Style text, copied verbatim from the registry.
    #[serde(rename = "_code")]
    pub code: String,
    #[serde(rename = "_from")]
    pub origin: Origin,
    /// Rank within the bucket, starting at 1.
    #[serde(rename = "_priority")]
    pub priority: u32,
}

/// All contributions at one (component, mode) location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionBucket {
    #[serde(rename = "_max_priority")]
    max_priority: u32,
    #[serde(flatten)]
    records: BTreeMap<String, ContributionRecord>,
}

impl ContributionBucket {
    /// Creates a bucket holding a single record at priority 1.
    pub fn seeded(theme: impl Into<String>, code: impl Into<String>, origin: Origin) -> Self {
        let mut records = BTreeMap::new();
        records.insert(
            theme.into(),
            ContributionRecord {
                code: code.into(),
                origin,
                priority: 1,
            },
        );
        Self {
            max_priority: 1,
            records,
        }
    }

    /// Adds a theme's record above every existing one.
    ///
    /// If the theme already contributes here, its record is replaced in place
    /// and keeps its priority, so no slot is consumed.
    pub fn insert_ranked(
        &mut self,
        theme: impl Into<String>,
        code: impl Into<String>,
        origin: Origin,
    ) {
        let theme = theme.into();
        let code = code.into();

        if let Some(record) = self.records.get_mut(&theme) {
            record.code = code;
            record.origin = origin;
            return;
        }

        self.max_priority += 1;
        self.records.insert(
            theme,
            ContributionRecord {
                code,
                origin,
                priority: self.max_priority,
            },
        );
    }

    /// Removes a theme's contribution and closes the gap it leaves.
    ///
    /// Records ranked above the removed one move down by one.
    pub fn remove(&mut self, theme: &str) -> Option<ContributionRecord> {
        let removed = self.records.remove(theme)?;
        for record in self.records.values_mut() {
            if record.priority > removed.priority {
                record.priority -= 1;
            }
        }
        self.max_priority = self.max_priority.saturating_sub(1);
        Some(removed)
    }

    /// Highest priority assigned in this bucket.
    pub fn max_priority(&self) -> u32 {
        self.max_priority
    }

    /// Returns a theme's record.
    pub fn get(&self, theme: &str) -> Option<&ContributionRecord> {
        self.records.get(theme)
    }

    /// Returns true if the theme contributes to this bucket.
    pub fn contains(&self, theme: &str) -> bool {
        self.records.contains_key(theme)
    }

    /// Iterates records by theme name.
    pub fn records(&self) -> impl Iterator<Item = (&str, &ContributionRecord)> {
        self.records.iter().map(|(theme, record)| (theme.as_str(), record))
    }

    /// The record with the highest priority.
    pub fn winner(&self) -> Option<(&str, &ContributionRecord)> {
        self.records().max_by_key(|(_, record)| record.priority)
    }

    /// Records ordered from lowest to highest priority.
    pub fn ranked(&self) -> Vec<(&str, &ContributionRecord)> {
        let mut ranked: Vec<_> = self.records().collect();
        ranked.sort_by_key(|(_, record)| record.priority);
        ranked
    }

    /// Number of contributing themes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks that priorities are exactly `1..=max_priority`.
    pub fn has_contiguous_priorities(&self) -> bool {
        let priorities: BTreeSet<u32> = self.records.values().map(|r| r.priority).collect();
        priorities.len() == self.records.len()
            && priorities.len() == self.max_priority as usize
            && priorities.iter().copied().eq(1..=self.max_priority)
    }
}

/// Buckets per mode name for one component.
pub type ModeBuckets = BTreeMap<String, ContributionBucket>;

/// The generated table: `component → mode → bucket`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedStyles {
    components: BTreeMap<String, ModeBuckets>,
}

impl GeneratedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bucket at one location.
    pub fn bucket(&self, component: &str, mode: &str) -> Option<&ContributionBucket> {
        self.components.get(component)?.get(mode)
    }

    /// Returns every mode bucket of a component.
    pub fn component(&self, component: &str) -> Option<&ModeBuckets> {
        self.components.get(component)
    }

    /// Returns true if the component has at least one bucket.
    pub fn has_component(&self, component: &str) -> bool {
        self.components
            .get(component)
            .is_some_and(|modes| !modes.is_empty())
    }

    /// Returns true if a bucket exists at the location.
    pub fn has_location(&self, component: &str, mode: &str) -> bool {
        self.bucket(component, mode).is_some()
    }

    /// Iterates component names in natural order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Iterates every `(component, mode, bucket)` triple.
    pub fn locations(&self) -> impl Iterator<Item = (&str, &str, &ContributionBucket)> {
        self.components.iter().flat_map(|(component, modes)| {
            modes
                .iter()
                .map(move |(mode, bucket)| (component.as_str(), mode.as_str(), bucket))
        })
    }

    /// Snapshot of the occupied `(component, mode)` keys.
    pub fn location_keys(&self) -> BTreeSet<(String, String)> {
        self.locations()
            .map(|(component, mode, _)| (component.to_string(), mode.to_string()))
            .collect()
    }

    /// Number of buckets in the table.
    pub fn len(&self) -> usize {
        self.components.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes one theme's contribution at a location.
    ///
    /// Remaining records are renumbered; a bucket left empty is dropped, and
    /// so is a component left without buckets.
    pub fn remove_contribution(
        &mut self,
        component: &str,
        mode: &str,
        theme: &str,
    ) -> Option<ContributionRecord> {
        let modes = self.components.get_mut(component)?;
        let bucket = modes.get_mut(mode)?;
        let removed = bucket.remove(theme)?;

        if bucket.is_empty() {
            modes.remove(mode);
        }
        if modes.is_empty() {
            self.components.remove(component);
        }
        Some(removed)
    }

    /// Removes every bucket.
    pub(crate) fn clear(&mut self) {
        self.components.clear();
    }

    /// Replaces a component's buckets wholesale.
    pub(crate) fn replace_component(&mut self, component: &str, buckets: ModeBuckets) {
        self.components.insert(component.to_string(), buckets);
    }

    /// Writes a fresh single-record bucket, discarding whatever was there.
    pub(crate) fn seed(
        &mut self,
        component: &str,
        mode: &str,
        theme: &str,
        code: &str,
        origin: Origin,
    ) {
        self.components
            .entry(component.to_string())
            .or_default()
            .insert(mode.to_string(), ContributionBucket::seeded(theme, code, origin));
    }

    /// Adds a ranked record, creating the bucket if needed.
    pub(crate) fn insert_ranked(
        &mut self,
        component: &str,
        mode: &str,
        theme: &str,
        code: &str,
        origin: Origin,
    ) {
        let modes = self.components.entry(component.to_string()).or_default();
        match modes.get_mut(mode) {
            Some(bucket) => bucket.insert_ranked(theme, code, origin),
            None => {
                modes.insert(mode.to_string(), ContributionBucket::seeded(theme, code, origin));
            }
        }
    }
}

/// The active themes and the table built so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionState {
    pub(crate) active_themes: Vec<String>,
    pub(crate) generated: GeneratedStyles,
}

impl CompositionState {
    /// Creates an empty state with no active themes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Themes selected by the most recent `themes` operation.
    pub fn active_themes(&self) -> &[String] {
        &self.active_themes
    }

    /// The first active theme.
    pub fn base_theme(&self) -> Option<&str> {
        self.active_themes.first().map(String::as_str)
    }

    /// Every active theme except the base.
    pub fn tail_themes(&self) -> &[String] {
        self.active_themes.get(1..).unwrap_or(&[])
    }

    pub fn generated(&self) -> &GeneratedStyles {
        &self.generated
    }

    pub fn generated_mut(&mut self) -> &mut GeneratedStyles {
        &mut self.generated
    }

    /// Consumes the state, returning the generated table.
    pub fn into_generated(self) -> GeneratedStyles {
        self.generated
    }
}
