use serde::{Deserialize, Serialize};
use serde_flatmap::{from_flat_map, to_flat_map, Error, FlatMap};
use std::collections::HashMap;

fn map_of(entries: &[(&str, &str)]) -> FlatMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_map_field_is_unsupported() {
    #[derive(Serialize)]
    struct Holder {
        meta: HashMap<String, String>,
    }

    let err = to_flat_map(&Holder {
        meta: HashMap::new(),
    })
    .unwrap_err();
    assert_eq!(err, Error::unsupported("meta", "map"));

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        meta: HashMap<String, String>,
    }

    let err = from_flat_map::<Target>(&FlatMap::new()).unwrap_err();
    assert_eq!(err, Error::unsupported("meta", "map"));
}

#[test]
fn test_option_field_is_unsupported() {
    #[derive(Serialize)]
    struct Holder {
        maybe: Option<i32>,
    }

    let err = to_flat_map(&Holder { maybe: Some(1) }).unwrap_err();
    assert_eq!(err, Error::unsupported("maybe", "option"));

    let err = to_flat_map(&Holder { maybe: None }).unwrap_err();
    assert_eq!(err, Error::unsupported("maybe", "option"));

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        maybe: Option<i32>,
    }

    let err = from_flat_map::<Target>(&FlatMap::new()).unwrap_err();
    assert_eq!(err, Error::unsupported("maybe", "option"));
}

#[test]
fn test_enum_field_is_unsupported() {
    #[derive(Serialize, Deserialize, Debug)]
    enum Mode {
        On,
        #[allow(dead_code)]
        Off,
    }

    #[derive(Serialize)]
    struct Holder {
        mode: Mode,
    }

    let err = to_flat_map(&Holder { mode: Mode::On }).unwrap_err();
    assert_eq!(err, Error::unsupported("mode", "enum"));

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        mode: Mode,
    }

    let err = from_flat_map::<Target>(&map_of(&[("mode", "On")])).unwrap_err();
    assert_eq!(err, Error::unsupported("mode", "enum"));
}

#[test]
fn test_vec_of_records_is_unsupported() {
    #[derive(Serialize, Deserialize, Debug)]
    struct Item {
        #[allow(dead_code)]
        id: i32,
    }

    #[derive(Serialize)]
    struct Holder {
        items: Vec<Item>,
    }

    let err = to_flat_map(&Holder {
        items: vec![Item { id: 1 }],
    })
    .unwrap_err();
    assert_eq!(
        err,
        Error::unsupported("items.0", "record element in collection")
    );

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        items: Vec<Item>,
    }

    let err = from_flat_map::<Target>(&map_of(&[("items.0.id", "1"), ("items.0", "x")]))
        .unwrap_err();
    assert_eq!(
        err,
        Error::unsupported("items.0", "record element in collection")
    );
}

#[test]
fn test_vec_of_records_with_only_nested_keys_is_unsupported() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Item {
        id: i32,
    }

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        items: Vec<Item>,
    }

    // The element's data lives only under nested keys; there is no bare
    // `items.0` entry to probe, but the run must not end silently
    let err = from_flat_map::<Target>(&map_of(&[("items.0.id", "1")])).unwrap_err();
    assert_eq!(err, Error::unsupported("items.0", "compound element"));
}

#[test]
fn test_scalar_element_with_nested_keys_is_unsupported() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        h: Vec<i64>,
    }

    let err = from_flat_map::<Target>(&map_of(&[("h.0", "1"), ("h.1.x", "2")])).unwrap_err();
    assert_eq!(err, Error::unsupported("h.1", "compound element"));
}

#[test]
fn test_fixed_array_slot_with_nested_keys_is_unsupported() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        i: [i64; 3],
    }

    let err =
        from_flat_map::<Target>(&map_of(&[("i.0", "1"), ("i.1.x", "2"), ("i.2", "3")]))
            .unwrap_err();
    assert_eq!(err, Error::unsupported("i.1", "compound element"));
}

#[test]
fn test_vec_of_vecs_is_unsupported() {
    #[derive(Serialize)]
    struct Holder {
        grid: Vec<Vec<i32>>,
    }

    let err = to_flat_map(&Holder {
        grid: vec![vec![1, 2]],
    })
    .unwrap_err();
    assert_eq!(err, Error::unsupported("grid.0", "nested collection"));

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        grid: Vec<Vec<i32>>,
    }

    let err = from_flat_map::<Target>(&map_of(&[("grid.0", "1")])).unwrap_err();
    assert_eq!(err, Error::unsupported("grid.0", "nested collection"));
}

#[test]
fn test_bare_scalar_at_root_is_unsupported() {
    let err = to_flat_map("hello").unwrap_err();
    assert_eq!(err, Error::unsupported("(root)", "string"));

    let err = to_flat_map(&vec![1, 2, 3]).unwrap_err();
    assert_eq!(err, Error::unsupported("(root)", "sequence"));
}

#[test]
fn test_parse_error_names_key_and_value() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        b: i64,
    }

    let err = from_flat_map::<Target>(&map_of(&[("b", "two")])).unwrap_err();
    assert_eq!(err, Error::parse("b", "a 64-bit integer", "two"));
    assert!(err.to_string().contains("`b`"));
    assert!(err.to_string().contains("two"));
}

#[test]
fn test_parse_error_on_bad_bool() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        c: bool,
    }

    // The parser accepts only the exact literals `true` / `false`
    for bad in ["True", "1", "yes", ""] {
        let err = from_flat_map::<Target>(&map_of(&[("c", bad)])).unwrap_err();
        assert_eq!(err, Error::parse("c", "a boolean", bad));
    }
}

#[test]
fn test_integer_overflow_is_a_parse_error() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        n: u8,
    }

    let err = from_flat_map::<Target>(&map_of(&[("n", "300")])).unwrap_err();
    assert_eq!(err, Error::parse("n", "an unsigned 8-bit integer", "300"));
}

#[test]
fn test_negative_value_for_unsigned_is_a_parse_error() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        n: u32,
    }

    let err = from_flat_map::<Target>(&map_of(&[("n", "-1")])).unwrap_err();
    assert_eq!(err, Error::parse("n", "an unsigned 32-bit integer", "-1"));
}

#[test]
fn test_parse_error_inside_nested_record() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Inner {
        db: f32,
    }

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        d: Inner,
    }

    let err = from_flat_map::<Target>(&map_of(&[("d.db", "pi")])).unwrap_err();
    assert_eq!(err, Error::parse("d.db", "a 32-bit float", "pi"));
}

#[test]
fn test_parse_error_inside_collection() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        h: Vec<i64>,
    }

    let err = from_flat_map::<Target>(&map_of(&[("h.0", "1"), ("h.1", "x")])).unwrap_err();
    assert_eq!(err, Error::parse("h.1", "a 64-bit integer", "x"));
}

#[test]
fn test_unsupported_kind_names_the_nested_key() {
    #[derive(Serialize)]
    struct Inner {
        meta: HashMap<String, String>,
    }

    #[derive(Serialize)]
    struct Holder {
        d: Inner,
    }

    let err = to_flat_map(&Holder {
        d: Inner {
            meta: HashMap::new(),
        },
    })
    .unwrap_err();
    assert_eq!(err, Error::unsupported("d.meta", "map"));
}

#[test]
fn test_char_parse_requires_single_character() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Target {
        grade: char,
    }

    let err = from_flat_map::<Target>(&map_of(&[("grade", "AB")])).unwrap_err();
    assert_eq!(err, Error::parse("grade", "a single character", "AB"));
}
