//! Property-based tests for theme composition using proptest.

use std::collections::BTreeSet;

use cardinal_theme::{
    apply_extend, apply_override, apply_reset, apply_themes, CompositionState, MatchOn,
    MergeOptions, SetKind, StyleRegistry,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

const THEMES: &[&str] = &["clear", "citrus", "neon", "slate"];
const COMPONENTS: &[&str] = &["badge", "button", "card"];
const MODES: &[&str] = &["dark", "default", "hover"];

#[derive(Debug, Clone)]
enum Step {
    Override(MergeOptions),
    Extend(MergeOptions),
    Reset,
}

fn apply(state: CompositionState, step: &Step, registry: &StyleRegistry) -> CompositionState {
    match step {
        Step::Override(options) => apply_override(state, options, registry),
        Step::Extend(options) => apply_extend(state, options, registry),
        Step::Reset => apply_reset(state),
    }
}

// Each theme offers a random subset of the component/mode grid.
fn registry_strategy() -> impl Strategy<Value = StyleRegistry> {
    prop::collection::vec(
        prop::collection::btree_set((0..COMPONENTS.len(), 0..MODES.len()), 0..8),
        THEMES.len(),
    )
    .prop_map(|per_theme| {
        let mut registry = StyleRegistry::new();
        for (theme, locations) in THEMES.iter().zip(per_theme) {
            registry.add_theme(*theme);
            for (c, m) in locations {
                let code = format!("{}/{}/{}", theme, COMPONENTS[c], MODES[m]);
                registry.insert(*theme, COMPONENTS[c], MODES[m], code);
            }
        }
        registry
    })
}

fn active_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(THEMES.to_vec(), 1..=THEMES.len())
        .prop_shuffle()
        .prop_map(|themes| themes.into_iter().map(String::from).collect())
}

fn options_strategy() -> impl Strategy<Value = MergeOptions> {
    (
        prop_oneof![Just(MatchOn::Component), Just(MatchOn::Mode)],
        prop_oneof![
            Just(SetKind::All),
            Just(SetKind::Difference),
            Just(SetKind::Intersect)
        ],
        prop::option::of(prop::sample::subsequence(
            COMPONENTS.to_vec(),
            0..=COMPONENTS.len(),
        )),
    )
        .prop_map(|(match_on, kind, components)| {
            let options = MergeOptions::new(match_on, kind);
            match components {
                Some(components) => options.with_components(components),
                None => options,
            }
        })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => options_strategy().prop_map(Step::Override),
        4 => options_strategy().prop_map(Step::Extend),
        1 => Just(Step::Reset),
    ]
}

fn components_of(state: &CompositionState) -> BTreeSet<String> {
    state
        .generated()
        .component_names()
        .map(String::from)
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Seeding from the same base twice gives the same table.
    #[test]
    fn themes_is_idempotent(
        registry in registry_strategy(),
        active in active_strategy(),
    ) {
        let once = apply_themes(CompositionState::new(), active.clone(), &registry);
        let twice = apply_themes(once.clone(), active, &registry);
        prop_assert_eq!(once.generated(), twice.generated());
    }

    /// Every bucket keeps priorities 1..=max with no gaps, whatever ran.
    #[test]
    fn priorities_stay_contiguous(
        registry in registry_strategy(),
        active in active_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..8),
    ) {
        let mut state = apply_themes(CompositionState::new(), active, &registry);
        for step in &steps {
            state = apply(state, step, &registry);
            for (component, mode, bucket) in state.generated().locations() {
                prop_assert!(
                    bucket.has_contiguous_priorities(),
                    "{}/{} after {:?}: {:?}", component, mode, step, bucket
                );
                prop_assert!(!bucket.is_empty());
            }
        }
    }

    /// `intersect` never introduces a key at its match granularity.
    #[test]
    fn intersect_never_creates_keys(
        registry in registry_strategy(),
        active in active_strategy(),
        setup in prop::collection::vec(step_strategy(), 0..4),
        options in options_strategy(),
        extend in any::<bool>(),
    ) {
        let options = MergeOptions { kind: SetKind::Intersect, ..options };
        let mut state = apply_themes(CompositionState::new(), active, &registry);
        for step in &setup {
            state = apply(state, step, &registry);
        }

        let keys_before = state.generated().location_keys();
        let components_before = components_of(&state);

        let after = if extend {
            apply_extend(state, &options, &registry)
        } else {
            apply_override(state, &options, &registry)
        };

        match options.match_on {
            MatchOn::Mode => {
                prop_assert!(after.generated().location_keys().is_subset(&keys_before));
            }
            MatchOn::Component => {
                prop_assert!(components_of(&after).is_subset(&components_before));
            }
        }
    }

    /// `difference` never changes a location that existed beforehand.
    #[test]
    fn difference_never_touches_existing(
        registry in registry_strategy(),
        active in active_strategy(),
        setup in prop::collection::vec(step_strategy(), 0..4),
        options in options_strategy(),
        extend in any::<bool>(),
    ) {
        let options = MergeOptions { kind: SetKind::Difference, ..options };
        let mut state = apply_themes(CompositionState::new(), active, &registry);
        for step in &setup {
            state = apply(state, step, &registry);
        }

        let before = state.clone();
        let after = if extend {
            apply_extend(state, &options, &registry)
        } else {
            apply_override(state, &options, &registry)
        };

        for (component, mode, bucket) in before.generated().locations() {
            prop_assert_eq!(after.generated().bucket(component, mode), Some(bucket));
        }
    }

    /// `extended` never drops a contributor already in a bucket.
    #[test]
    fn extend_preserves_history(
        registry in registry_strategy(),
        active in active_strategy(),
        options in options_strategy(),
    ) {
        let before = apply_themes(CompositionState::new(), active, &registry);
        let after = apply_extend(before.clone(), &options, &registry);

        for (component, mode, bucket) in before.generated().locations() {
            let after_bucket = after.generated().bucket(component, mode);
            prop_assert!(after_bucket.is_some());
            let after_bucket = after_bucket.unwrap();
            for (theme, record) in bucket.records() {
                prop_assert_eq!(after_bucket.get(theme), Some(record));
            }
        }
    }

    /// Every code in the table is the registry's text for that location.
    #[test]
    fn codes_are_copied_verbatim(
        registry in registry_strategy(),
        active in active_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..6),
    ) {
        let mut state = apply_themes(CompositionState::new(), active, &registry);
        for step in &steps {
            state = apply(state, step, &registry);
        }

        for (component, mode, bucket) in state.generated().locations() {
            for (theme, record) in bucket.records() {
                prop_assert_eq!(
                    registry.style(theme, component, mode),
                    Some(record.code.as_str())
                );
            }
        }
    }
}
