//! Behavioural laws of `Reader` over hand-built expanded fragments.

use jsonld_reader::{Error, Reader, Selector};
use serde_json::{Value, json};

fn node_with(key: &str, value: Value) -> Value {
    let mut node = serde_json::Map::new();
    node.insert(key.to_owned(), value);
    Value::Array(vec![Value::Object(node)])
}

#[test]
fn test_hash_and_slash_suffix_resolve_alike() {
    let literal = json!([{"@value": "Alice"}]);
    let by_hash = node_with("https://example.org/ns#givenName", literal.clone());
    let by_slash = node_with("https://example.org/ns/givenName", literal);

    let hash = Reader::new(&by_hash).read("givenName");
    let slash = Reader::new(&by_slash).read("givenName");
    assert_eq!(hash.get(), Some(&json!("Alice")));
    assert_eq!(hash.get(), slash.get());
}

#[test]
fn test_absent_is_absorbing() {
    let doc = json!([{"https://example.org/ns#a": [{"@value": 1}]}]);
    let root = Reader::new(&doc);

    let failures = [
        root.read("missing"),
        root.read(3),
        root.read("a").read("b").read("c"),
        root.read(Selector::Missing),
        root.read(""),
        root.read(None::<usize>),
    ];
    for absent in failures {
        let diagnostic = absent.error().cloned().expect("absent");
        for next in [Selector::Key("a"), Selector::Index(0), Selector::Missing] {
            let deeper = absent.read(next);
            assert_eq!(deeper.error(), Some(&diagnostic));
        }
    }
}

#[test]
fn test_missing_selector_message() {
    let doc = json!([{}]);
    let root = Reader::new(&doc);
    let absent = root.read(Option::<&str>::None);
    assert_eq!(absent.try_get(), Err(Error::MissingSelector));
    assert_eq!(
        absent.try_get().unwrap_err().to_string(),
        "key or index is required"
    );
}

#[test]
fn test_get_is_idempotent() {
    let doc = json!([{"https://example.org/ns#n": [{"@value": 2}]}]);
    let n = Reader::new(&doc).read("n");
    let first = n.get().cloned();
    let second = n.get().cloned();
    assert_eq!(first, second);
    assert_eq!(first, Some(json!(2)));
    assert_eq!(n.value(), Some(&json!([{"@value": 2}])));
}

#[test]
fn test_reserved_key_aliasing() {
    let doc = json!([{
        "@id": "urn:uuid:6e8bc430",
        "@type": ["https://example.org/ns#Person"],
        "@value": "literal",
    }]);
    let root = Reader::new(&doc);
    for (short, canonical) in [("id", "@id"), ("type", "@type"), ("value", "@value")] {
        assert!(root.read(short).is_present(), "{short}");
        assert_eq!(root.read(short).get(), root.read(canonical).get(), "{short}");
    }
}

#[test]
fn test_type_compaction() {
    let cases = [
        ("https://example.org/ns#Person", "Person"),
        ("https://example.org/Person", "Person"),
        ("Person", "Person"),
    ];
    for (iri, expected) in cases {
        let doc = json!([{"@type": [iri]}]);
        let root = Reader::new(&doc);
        assert_eq!(root.read("type").get(), Some(&json!(expected)), "{iri}");
        assert_eq!(root.read("@type").get(), Some(&json!(expected)), "{iri}");
    }

    // A literal wrapper in the type slot yields its literal
    let doc = json!([{"@type": [{"@value": "Custom"}]}]);
    assert_eq!(Reader::new(&doc).read("type").string_or(""), "Custom");
}

#[test]
fn test_boolean_coercion_table() {
    for truthy in [json!("true"), json!("1"), json!(1), json!(true)] {
        let doc = node_with("https://example.org/ns#flag", json!([{"@value": truthy.clone()}]));
        let flag = Reader::new(&doc).read("flag");
        assert_eq!(flag.try_boolean(), Ok(true), "{truthy}");
    }
    for falsy in [json!("false"), json!("0"), json!(0), json!(false)] {
        let doc = node_with("https://example.org/ns#flag", json!([{"@value": falsy.clone()}]));
        let flag = Reader::new(&doc).read("flag");
        assert_eq!(flag.try_boolean(), Ok(false), "{falsy}");
    }
    for other in [json!("yes"), json!(2)] {
        let doc = node_with("https://example.org/ns#flag", json!([{"@value": other.clone()}]));
        let flag = Reader::new(&doc).read("flag");
        assert_eq!(flag.try_boolean(), Err(Error::NotABoolean), "{other}");
        assert_eq!(flag.boolean_or_err("bad flag"), Err("bad flag"));
    }
}

#[test]
#[allow(clippy::float_cmp)]
fn test_or_else_never_fails_on_absent() {
    let doc = json!([{"https://example.org/ns#a": [{"@value": "x"}]}]);
    let root = Reader::new(&doc);
    let fallback = json!({"fallback": true});

    for absent in [root.read("b"), root.read(9), root.read("a").read("a")] {
        assert!(absent.is_absent());
        assert_eq!(absent.get_or(&fallback), &fallback);
        assert_eq!(absent.string_or("default"), "default");
        assert_eq!(absent.number_or(-1.0), -1.0);
        assert!(!absent.boolean_or(false));
        assert!(absent.boolean_or(true));
    }
}

#[test]
#[allow(clippy::float_cmp)]
fn test_or_else_swallows_coercion_failures() {
    let doc = json!([{"https://example.org/ns#a": [{"@value": "x"}, {"@value": "y"}]}]);
    let many = Reader::new(&doc).read("a");
    assert!(many.is_present());
    assert_eq!(many.string_or("d"), "d");
    assert_eq!(many.number_or(0.5), 0.5);
    assert!(many.boolean_or(true));
    assert_eq!(many.string_or_err(Error::NotAnObject), Err(Error::NotAnObject));
}

#[test]
fn test_or_throw_uses_supplied_error() {
    #[derive(Debug, PartialEq)]
    struct MissingField(&'static str);

    let doc = json!([{}]);
    let root = Reader::new(&doc);
    let name = root.read("name");
    assert_eq!(name.try_get(), Err(Error::KeyNotFound("name".into())));
    assert_eq!(
        name.get_or_err(MissingField("name")),
        Err(MissingField("name"))
    );
    assert_eq!(
        name.string_or_err(MissingField("name")),
        Err(MissingField("name"))
    );
    assert_eq!(
        name.number_or_err(MissingField("name")),
        Err(MissingField("name"))
    );
}

#[test]
fn test_stringify_primitives() {
    let doc = json!([{
        "https://example.org/ns#count": [{"@value": 12}],
        "https://example.org/ns#ratio": [{"@value": 0.25}],
        "https://example.org/ns#whole": [{"@value": 3.0}],
        "https://example.org/ns#big": [{"@value": 18446744073709551615u64}],
        "https://example.org/ns#on": [{"@value": true}],
        "https://example.org/ns#nothing": [{"@value": null}],
    }]);
    let root = Reader::new(&doc);
    assert_eq!(root.read("count").try_string(), Ok("12".into()));
    assert_eq!(root.read("ratio").try_string(), Ok("0.25".into()));
    assert_eq!(root.read("whole").try_string(), Ok("3".into()));
    assert_eq!(
        root.read("big").try_string(),
        Ok("18446744073709551615".into())
    );
    assert_eq!(root.read("on").try_string(), Ok("true".into()));
    assert_eq!(root.read("nothing").try_string(), Err(Error::NotAString));
}

#[test]
fn test_length_and_iteration() {
    let doc = json!([{
        "https://example.org/ns#items": [{"@value": 1}, {"@value": 2}, {"@value": 3}],
        "https://example.org/ns#one": [{"@value": 1}],
    }]);
    let root = Reader::new(&doc);
    let items = root.read("items");
    assert_eq!(items.length(), 3);
    let values: Vec<f64> = items.iter().map(|item| item.number_or(0.0)).collect();
    assert_eq!(values, [1.0, 2.0, 3.0]);

    assert_eq!(root.read("one").length(), 1);
    assert_eq!(root.read("one").read("value").length(), 1);
    assert_eq!(root.read("none").length(), 0);
}

#[test]
fn test_nested_singletons_are_transparent() {
    let doc = json!([[[{"https://example.org/ns#deep": [[{"@value": "yes"}]]}]]]);
    let root = Reader::new(&doc);
    assert_eq!(root.read("deep").string_or(""), "yes");
}
