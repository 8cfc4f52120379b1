//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use crate::output::ReportFormat;
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

fn format_strategy() -> impl Strategy<Value = ReportFormat> {
    prop_oneof![
        Just(ReportFormat::Text),
        Just(ReportFormat::Json),
        Just(ReportFormat::Csv),
        Just(ReportFormat::UserJs),
    ]
}

fn keys_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]\\.[a-c]", 0..6)
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
        prop::option::of(keys_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec("[a-z]{1,8}\\.js", 0..4)),
    )
        .prop_map(
            |(strict, require_layers, output_format, ignore, diagnostics, layers)| Config {
                strict,
                require_layers,
                output_format,
                ignore_conflicts: ignore.map(dedup),
                diagnostics,
                layers: layers.map(|l| l.into_iter().map(PathBuf::from).collect()),
            },
        )
}

fn dedup(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins for every simple field it sets
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.strict, high.strict.or(low.strict));
        prop_assert_eq!(result.require_layers, high.require_layers.or(low.require_layers));
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(result.diagnostics, high.diagnostics.or(low.diagnostics));
        prop_assert_eq!(result.layers, high.layers.or(low.layers));
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = Config::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    // Ignored keys are the duplicate-free union of both sides, low side first
    #[test]
    fn ignored_keys_accumulate(low in keys_strategy(), high in keys_strategy()) {
        let mut result = Config {
            ignore_conflicts: Some(dedup(low.clone())),
            ..Default::default()
        };
        let source = Config { ignore_conflicts: Some(high.clone()), ..Default::default() };
        ConfigMerger::merge_into(&mut result, &source);

        let merged = result.ignore_conflicts.unwrap();
        let mut expected = low;
        expected.extend(high);
        prop_assert_eq!(merged, dedup(expected));
    }

    // Merging only valid configs never produces an invalid one
    #[test]
    fn merged_valid_configs_stay_valid(a in config_strategy(), b in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&a).is_ok());
        prop_assert!(ConfigValidator::validate(&b).is_ok());

        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }

    // Merging is associative
    #[test]
    fn config_merge_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut right = a;
        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left, right);
    }

    // YAML serialization preserves every field
    #[test]
    fn config_yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
