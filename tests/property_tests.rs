//! Property-based tests verifying the round-trip law across generated
//! inputs: flattening a record and rebuilding it yields an equal record,
//! for default and custom configurations alike.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_flatmap::{from_flat_map, from_flat_map_with_options, to_flat_map,
    to_flat_map_with_options, FlatOptions};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrap<T> {
    value: T,
}

fn roundtrip<T>(value: T) -> bool
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let record = Wrap { value };
    match to_flat_map(&record) {
        Ok(map) => match from_flat_map::<Wrap<T>>(&map) {
            Ok(back) => record == back,
            Err(e) => {
                eprintln!("unflatten failed: {}", e);
                eprintln!("map was: {:?}", map);
                false
            }
        },
        Err(e) => {
            eprintln!("flatten failed: {}", e);
            false
        }
    }
}

proptest! {
    // Scalar kinds
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(b));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(s));
    }

    #[test]
    fn prop_f32(x in proptest::num::f32::NORMAL | proptest::num::f32::ZERO) {
        prop_assert!(roundtrip(x));
    }

    #[test]
    fn prop_f64(x in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        prop_assert!(roundtrip(x));
    }

    // Collections of scalars
    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(v));
    }

    #[test]
    fn prop_vec_string(v in prop::collection::vec(any::<String>(), 0..10)) {
        prop_assert!(roundtrip(v));
    }

    #[test]
    fn prop_fixed_array(a in any::<[i64; 4]>()) {
        prop_assert!(roundtrip(a));
    }

    // Custom configurations preserve the round-trip law
    #[test]
    fn prop_custom_config(
        n in any::<i64>(),
        s in any::<String>(),
        prefix in "[a-z]{0,6}",
        delimiter in prop::sample::select(vec![".", ":", "/", "::", "|"]),
    ) {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Pair {
            n: i64,
            s: String,
        }

        let mut options = FlatOptions::new().with_delimiter(delimiter);
        if !prefix.is_empty() {
            options = options.with_prefix(&prefix);
        }

        let record = Pair { n, s };
        let map = to_flat_map_with_options(&record, options.clone()).unwrap();
        let back: Pair = from_flat_map_with_options(&map, options).unwrap();
        prop_assert_eq!(record, back);
    }
}
