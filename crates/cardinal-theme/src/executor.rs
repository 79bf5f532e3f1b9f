//! The four operations, applied to a composition state.
//!
//! Every function here assumes its options were already validated, and none of
//! them can fail: a location the tail theme does not offer is simply not
//! written.
//!
//! # Traversal
//!
//! `overridden` and `extended` walk the tail themes (every active theme but
//! the first) in order. For each theme the candidate components are the
//! explicit `components` option if present, otherwise every component the
//! theme defines. Components and modes are visited in natural order, so when
//! two writes hit the same location the later one in that walk wins.
//!
//! # Selection
//!
//! | `type` | Location written when... |
//! |--------|--------------------------|
//! | `all` | always |
//! | `intersect` | it is present in the table as the theme is evaluated |
//! | `difference` | it was absent from the table when the operation started |
//!
//! With `match: component` the presence tests are made on whole components,
//! with `match: mode` on individual (component, mode) pairs.

use std::collections::BTreeSet;

use crate::options::{MatchOn, MergeOptions, SetKind};
use crate::registry::{ComponentStyles, StyleRegistry};
use crate::state::{CompositionState, ContributionBucket, ModeBuckets, Origin};

/// Occupied components and locations captured before an operation writes.
///
/// `difference` tests against this so that writes made earlier in the same
/// operation do not hide locations from later tail themes.
struct Snapshot {
    components: BTreeSet<String>,
    locations: BTreeSet<(String, String)>,
}

impl Snapshot {
    fn of(state: &CompositionState) -> Self {
        let locations = state.generated.location_keys();
        let components = locations
            .iter()
            .map(|(component, _)| component.clone())
            .collect();
        Self {
            components,
            locations,
        }
    }

    fn has_component(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    fn has_location(&self, component: &str, mode: &str) -> bool {
        self.locations
            .contains(&(component.to_string(), mode.to_string()))
    }
}

/// Selects the active themes and reseeds the table from the base theme.
///
/// The previous table is discarded. Every (component, mode) the base theme
/// defines gets a bucket with the base theme's record at priority 1.
pub fn apply_themes(
    mut state: CompositionState,
    themes: Vec<String>,
    registry: &StyleRegistry,
) -> CompositionState {
    state.generated.clear();
    state.active_themes = themes;

    let Some(base) = state.active_themes.first().cloned() else {
        return state;
    };

    if let Some(components) = registry.theme(&base) {
        for (component, modes) in components {
            for (mode, code) in modes {
                state
                    .generated
                    .seed(component, mode, &base, code, Origin::Themes);
            }
        }
    }

    state
}

/// Clears the generated table. Active themes are kept.
pub fn apply_reset(mut state: CompositionState) -> CompositionState {
    state.generated.clear();
    state
}

/// Replaces selected locations with a single fresh record from a tail theme.
///
/// Whatever was at a written location before is discarded; the new bucket
/// holds only the tail theme's record at priority 1.
pub fn apply_override(
    mut state: CompositionState,
    options: &MergeOptions,
    registry: &StyleRegistry,
) -> CompositionState {
    let snapshot = Snapshot::of(&state);
    let tail = state.tail_themes().to_vec();

    for theme in &tail {
        for (component, modes) in candidates(registry, theme, options) {
            override_component(&mut state, &snapshot, options, theme, component, modes);
        }
    }

    state
}

fn override_component(
    state: &mut CompositionState,
    snapshot: &Snapshot,
    options: &MergeOptions,
    theme: &str,
    component: &str,
    modes: &ComponentStyles,
) {
    let generated = &mut state.generated;
    match (options.kind, options.match_on) {
        (SetKind::All, MatchOn::Component) => {
            generated.replace_component(component, fresh_component(theme, modes));
        }
        (SetKind::All, MatchOn::Mode) => {
            for (mode, code) in modes {
                generated.seed(component, mode, theme, code, Origin::Overridden);
            }
        }
        (SetKind::Intersect, MatchOn::Component) => {
            if generated.has_component(component) {
                generated.replace_component(component, fresh_component(theme, modes));
            }
        }
        (SetKind::Intersect, MatchOn::Mode) => {
            for (mode, code) in modes {
                if generated.has_location(component, mode) {
                    generated.seed(component, mode, theme, code, Origin::Overridden);
                }
            }
        }
        (SetKind::Difference, MatchOn::Component) => {
            if !snapshot.has_component(component) {
                generated.replace_component(component, fresh_component(theme, modes));
            }
        }
        (SetKind::Difference, MatchOn::Mode) => {
            for (mode, code) in modes {
                if !snapshot.has_location(component, mode) {
                    generated.seed(component, mode, theme, code, Origin::Overridden);
                }
            }
        }
    }
}

/// Adds tail theme styles as ranked contributors on top of what is there.
///
/// A new location starts at priority 1; an existing one gets the tail theme's
/// record at `max_priority + 1`.
pub fn apply_extend(
    mut state: CompositionState,
    options: &MergeOptions,
    registry: &StyleRegistry,
) -> CompositionState {
    let snapshot = Snapshot::of(&state);
    let tail = state.tail_themes().to_vec();

    for theme in &tail {
        for (component, modes) in candidates(registry, theme, options) {
            extend_component(&mut state, &snapshot, options, theme, component, modes);
        }
    }

    state
}

fn extend_component(
    state: &mut CompositionState,
    snapshot: &Snapshot,
    options: &MergeOptions,
    theme: &str,
    component: &str,
    modes: &ComponentStyles,
) {
    let generated = &mut state.generated;

    // Presence for `intersect` is decided before this theme writes.
    let present: BTreeSet<String> = generated
        .component(component)
        .map(|buckets| buckets.keys().cloned().collect())
        .unwrap_or_default();

    for (mode, code) in modes {
        let selected = match (options.kind, options.match_on) {
            (SetKind::All, _) => true,
            (SetKind::Intersect, MatchOn::Component) => !present.is_empty(),
            (SetKind::Intersect, MatchOn::Mode) => present.contains(mode),
            (SetKind::Difference, MatchOn::Component) => !snapshot.has_component(component),
            (SetKind::Difference, MatchOn::Mode) => !snapshot.has_location(component, mode),
        };
        if selected {
            generated.insert_ranked(component, mode, theme, code, Origin::Extended);
        }
    }
}

/// Candidate `(component, modes)` pairs a tail theme offers, in visit order.
///
/// Components named in the options but not defined by the theme are skipped.
fn candidates<'r>(
    registry: &'r StyleRegistry,
    theme: &str,
    options: &MergeOptions,
) -> Vec<(&'r str, &'r ComponentStyles)> {
    let Some(components) = registry.theme(theme) else {
        return Vec::new();
    };

    match &options.components {
        Some(names) => names
            .iter()
            .filter_map(|name| {
                let modes = registry.modes(theme, name)?;
                components
                    .get_key_value(name.as_str())
                    .map(|(name, _)| (name.as_str(), modes))
            })
            .collect(),
        None => components
            .iter()
            .filter(|(_, modes)| !modes.is_empty())
            .map(|(name, modes)| (name.as_str(), modes))
            .collect(),
    }
}

fn fresh_component(theme: &str, modes: &ComponentStyles) -> ModeBuckets {
    modes
        .iter()
        .map(|(mode, code)| {
            (
                mode.clone(),
                ContributionBucket::seeded(theme, code.as_str(), Origin::Overridden),
            )
        })
        .collect()
}
