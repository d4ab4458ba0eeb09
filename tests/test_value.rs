use helm_values::value::{Mapping, Value};
use yaml_rust2::{Yaml, YamlLoader};

fn key(s: &str) -> Yaml {
    Yaml::String(s.to_string())
}

fn get<'a>(mapping: &'a Mapping, k: &str) -> Option<&'a Value> {
    mapping.get(&key(k))
}

#[test]
fn test_insert_replaces_in_place() {
    let mut mapping = Mapping::new();
    assert!(mapping.insert(key("a"), Value::Scalar(Yaml::Integer(1))).is_none());
    mapping.insert(key("b"), Value::Scalar(Yaml::Integer(2)));

    let previous = mapping.insert(key("a"), Value::Scalar(Yaml::Integer(3)));

    assert_eq!(previous, Some(Value::Scalar(Yaml::Integer(1))));
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.keys().collect::<Vec<_>>(), vec![&key("a"), &key("b")]);
    assert_eq!(get(&mapping, "a"), Some(&Value::Scalar(Yaml::Integer(3))));
}

#[test]
fn test_equality_is_order_sensitive() {
    let ab: Mapping = vec![
        (key("a"), Value::Scalar(Yaml::Integer(1))),
        (key("b"), Value::Scalar(Yaml::Integer(2))),
    ]
    .into_iter()
    .collect();
    let ba: Mapping = vec![
        (key("b"), Value::Scalar(Yaml::Integer(2))),
        (key("a"), Value::Scalar(Yaml::Integer(1))),
    ]
    .into_iter()
    .collect();

    assert_ne!(ab, ba);
    assert_eq!(ab, ab.clone());
}

#[test]
fn test_from_yaml_classifies_nodes() {
    let yaml = YamlLoader::load_from_str("s: text\nn: 1.5\nl:\n  - x\nm:\n  k: v")
        .unwrap()
        .remove(0);

    let mapping = match Value::from(yaml) {
        Value::Mapping(mapping) => mapping,
        other => panic!("expected a mapping, got {}", other.kind()),
    };

    assert_eq!(get(&mapping, "s").unwrap().kind(), "scalar");
    assert_eq!(get(&mapping, "n").unwrap().kind(), "scalar");
    assert_eq!(get(&mapping, "l").unwrap().kind(), "sequence");
    assert_eq!(get(&mapping, "m").unwrap().kind(), "mapping");
    assert!(mapping.contains_key(&key("m")));
    assert!(!mapping.contains_key(&key("missing")));

    let kinds: Vec<(&str, &str)> = mapping
        .iter()
        .map(|(k, v)| (k.as_str().unwrap(), v.kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![("s", "scalar"), ("n", "scalar"), ("l", "sequence"), ("m", "mapping")]
    );
}

#[test]
fn test_yaml_conversion_keeps_order() {
    let yaml = YamlLoader::load_from_str("z: 1\ny:\n  b: 2\n  a: 3\nx: [1, 2]")
        .unwrap()
        .remove(0);

    let back: Yaml = Value::from(yaml.clone()).into();

    assert_eq!(back, yaml);
    let hash = back.as_hash().unwrap();
    let order: Vec<&str> = hash.keys().map(|k| k.as_str().unwrap()).collect();
    assert_eq!(order, vec!["z", "y", "x"]);
}
