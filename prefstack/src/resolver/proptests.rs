//! Property-based tests for layer resolution.

use super::LayerResolver;
use crate::preference::{Layer, PrefValue};
use proptest::prelude::*;
use std::collections::HashSet;

// Small key space so layers collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]\\.[a-c]"
}

fn value_strategy() -> impl Strategy<Value = PrefValue> {
    prop_oneof![
        any::<bool>().prop_map(PrefValue::Bool),
        (-3i64..3).prop_map(PrefValue::Int),
        "[xy]{0,2}".prop_map(PrefValue::String),
    ]
}

fn layers_strategy() -> impl Strategy<Value = Vec<Layer>> {
    prop::collection::vec(
        prop::collection::vec((key_strategy(), value_strategy()), 0..12),
        0..6,
    )
    .prop_map(|layers| {
        layers
            .into_iter()
            .enumerate()
            .map(|(i, pairs)| Layer::from_pairs(format!("L{i}"), pairs))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Resolving the same input twice yields identical results
    #[test]
    fn resolution_is_idempotent(layers in layers_strategy()) {
        let resolver = LayerResolver::default();
        prop_assert_eq!(resolver.resolve(&layers).unwrap(), resolver.resolve(&layers).unwrap());
    }

    // Every key seen in any layer appears exactly once in the effective map
    #[test]
    fn resolution_is_complete(layers in layers_strategy()) {
        let resolved = LayerResolver::default().resolve(&layers).unwrap();
        let seen: HashSet<&str> = layers
            .iter()
            .flat_map(|l| l.entries().iter().map(|e| e.key.as_str()))
            .collect();
        prop_assert_eq!(resolved.len(), seen.len());
        for key in seen {
            prop_assert!(resolved.get(key).is_some());
            prop_assert!(resolved.provenance_of(key).is_some());
        }
    }

    // The effective value is the last declaration of the key anywhere
    #[test]
    fn last_declaration_wins(layers in layers_strategy()) {
        let resolved = LayerResolver::default().resolve(&layers).unwrap();
        for layer in &layers {
            for entry in layer.entries() {
                let last = layers
                    .iter()
                    .flat_map(|l| l.entries())
                    .filter(|e| e.key == entry.key)
                    .last()
                    .unwrap();
                prop_assert_eq!(resolved.get(&entry.key), Some(&last.value));
            }
        }
    }

    // Conflicts always carry differing values and come from different layers
    #[test]
    fn no_false_conflicts(layers in layers_strategy()) {
        let resolved = LayerResolver::default().resolve(&layers).unwrap();
        for conflict in resolved.conflicts() {
            prop_assert_ne!(&conflict.previous_value, &conflict.value);
            prop_assert_ne!(&conflict.previous_layer, &conflict.layer);
            prop_assert_eq!(
                conflict.kind_changed,
                conflict.previous_value.kind() != conflict.value.kind()
            );
        }
    }

    // Provenance always points at a layer that declares the winning value
    #[test]
    fn provenance_points_at_declaring_layer(layers in layers_strategy()) {
        let resolved = LayerResolver::default().resolve(&layers).unwrap();
        for (key, provenance) in resolved.provenance() {
            let layer = &layers[provenance.layer_index];
            prop_assert_eq!(layer.name(), provenance.layer.as_str());
            let declared = layer
                .entries()
                .iter()
                .filter(|e| &e.key == key)
                .last()
                .map(|e| &e.value);
            prop_assert_eq!(declared, resolved.get(key));
        }
    }
}
