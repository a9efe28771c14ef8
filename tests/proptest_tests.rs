// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests use property-based testing to verify that parsing, writing and
//! lookup behave correctly for arbitrary inputs.

use cfg_lib::adapters::{to_cfg_string, CfgParser};
use cfg_lib::domain::{ConfigError, ConfigKey, ConfigValue, Mapping};
use cfg_lib::ports::ConfigParser;
use cfg_lib::service::Config;
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::Integer),
        (-1.0e12f64..1.0e12).prop_map(ConfigValue::Float),
        "\\PC{0,16}".prop_map(ConfigValue::String),
    ]
}

fn arb_value() -> impl Strategy<Value = ConfigValue> {
    arb_scalar().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::Sequence),
            prop::collection::vec(("\\PC{0,8}", inner), 0..4)
                .prop_map(|entries| ConfigValue::Mapping(entries.into_iter().collect())),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = ConfigValue> {
    prop::collection::vec(("\\PC{0,8}", arb_value()), 0..6)
        .prop_map(|entries| ConfigValue::Mapping(entries.into_iter().collect()))
}

// Test that every value written inside `{k: v}` is returned unchanged by get("k")
proptest! {
    #[test]
    fn test_single_entry_lookup(key in "\\PC{0,8}", value in arb_value()) {
        let mut map = Mapping::new();
        map.insert(key.clone(), value.clone());
        let body = to_cfg_string(&ConfigValue::from(map)).unwrap();
        let text = format!("{{{}}}", body);

        let config: Config = text.parse().unwrap();
        prop_assert_eq!(config.get(&key).unwrap(), &value);
    }
}

// Test that writing a parsed tree and parsing it again yields the same tree
proptest! {
    #[test]
    fn test_write_parse_roundtrip(doc in arb_document()) {
        let text = to_cfg_string(&doc).unwrap();
        let parsed = CfgParser::new().parse(&text).unwrap();
        prop_assert_eq!(&parsed, &doc);

        let rewritten = to_cfg_string(&parsed).unwrap();
        prop_assert_eq!(rewritten, text);
    }
}

// Test that repeated lookups of the same path agree
proptest! {
    #[test]
    fn test_lookup_idempotent(doc in arb_document(), path in "[a-z.\\[\\]0-9]{0,10}") {
        let text = to_cfg_string(&doc).unwrap();
        let config: Config = text.parse().unwrap();

        let first = config.get(&path).cloned().map_err(|e| e.to_string());
        let second = config.get(&path).cloned().map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }
}

// Test that absent keys always fail with KeyNotFound
proptest! {
    #[test]
    fn test_missing_key_not_found(
        entries in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..8)
    ) {
        let map: Mapping = entries
            .into_iter()
            .map(|(k, v)| (k, ConfigValue::from(v)))
            .collect();
        let text = to_cfg_string(&ConfigValue::from(map)).unwrap();
        let config: Config = text.parse().unwrap();

        let is_not_found = matches!(
            config.get("zz_missing"),
            Err(ConfigError::KeyNotFound { .. })
        );
        prop_assert!(is_not_found);
    }
}

// Test that nested paths reach the leaf they name
proptest! {
    #[test]
    fn test_nested_path_lookup(
        parts in prop::collection::vec("k_[a-z]{0,5}", 1..6),
        leaf in any::<i64>()
    ) {
        let mut text = leaf.to_string();
        for part in parts.iter().rev() {
            text = format!("{{{}: {}}}", part, text);
        }
        let config: Config = text.parse().unwrap();

        prop_assert_eq!(config.get_i64(&parts.join(".")).unwrap(), leaf);
    }
}

// Test that negative indices mirror positive ones
proptest! {
    #[test]
    fn test_negative_index(
        items in prop::collection::vec(any::<i64>(), 1..8),
        pick in any::<prop::sample::Index>()
    ) {
        let i = pick.index(items.len());
        let list = items.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        let config: Config = format!("items: [{}]", list).parse().unwrap();

        let back = i as i64 - items.len() as i64;
        prop_assert_eq!(config.get_i64(&format!("items[{}]", i)).unwrap(), items[i]);
        prop_assert_eq!(config.get_i64(&format!("items[{}]", back)).unwrap(), items[i]);
    }
}

// Test that malformed input is reported on the line where it breaks
proptest! {
    #[test]
    fn test_malformed_input_position(
        good_lines in 0usize..5,
        tail in prop::sample::select(vec!["", "'open", "[1, 2", "@", "{a: 1", "1 2"])
    ) {
        let mut text = String::new();
        for i in 0..good_lines {
            text.push_str(&format!("key{}: {}\n", i, i));
        }
        text.push_str("bad: ");
        text.push_str(tail);

        match text.parse::<Config>() {
            Err(ConfigError::SyntaxError { line, column, .. }) => {
                prop_assert_eq!(line, good_lines + 1);
                prop_assert!(column >= 1);
            }
            other => prop_assert!(false, "expected syntax error, got {:?}", other),
        }
    }
}

// Test that string values survive parsing whatever they contain
proptest! {
    #[test]
    fn test_string_values_roundtrip(s in "\\PC*") {
        let mut map = Mapping::new();
        map.insert("s", ConfigValue::from(s.clone()));
        let config: Config = to_cfg_string(&ConfigValue::from(map)).unwrap().parse().unwrap();

        prop_assert_eq!(config.get_str("s").unwrap(), s.as_str());
    }
}

// Test integer literals in every radix
proptest! {
    #[test]
    fn test_integer_radix_literals(n in 0i64..=i64::MAX) {
        for text in [
            format!("n: {}", n),
            format!("n: 0x{:x}", n),
            format!("n: 0o{:o}", n),
            format!("n: 0b{:b}", n),
        ] {
            let config: Config = text.parse().unwrap();
            prop_assert_eq!(config.get_i64("n").unwrap(), n);
        }
    }
}

// Test that ConfigKey can be created from any string
proptest! {
    #[test]
    fn test_config_key_from_any_string(s in "\\PC*") {
        let key = ConfigKey::from(s.clone());
        prop_assert_eq!(key.as_str(), s.as_str());
    }
}

// Test that dotted keys split into one segment per part
proptest! {
    #[test]
    fn test_keys_with_dots(
        parts in prop::collection::vec("[a-z]+", 1..5)
    ) {
        let key = ConfigKey::from(parts.join("."));
        prop_assert_eq!(key.segments().unwrap().len(), parts.len());
    }
}

// Test integer parsing from strings
proptest! {
    #[test]
    fn test_i64_parsing_valid(n in prop::num::i64::ANY) {
        let value = ConfigValue::from(n.to_string());
        prop_assert_eq!(value.as_i64("test").unwrap(), n);
    }
}

proptest! {
    #[test]
    fn test_u32_narrowing(n in prop::num::i64::ANY) {
        let value = ConfigValue::from(n);
        prop_assert_eq!(value.as_u32("test").is_ok(), u32::try_from(n).is_ok());
    }
}

// Test that non-numeric strings fail integer parsing
proptest! {
    #[test]
    fn test_integer_parsing_non_numeric(
        s in "[a-zA-Z]\\PC*" // Strings starting with a letter
    ) {
        let value = ConfigValue::from(s);
        prop_assert!(value.as_i32("test").is_err());
    }
}
