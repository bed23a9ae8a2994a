use crate::common::{
    WireItem,
    schema::{AttributeType, Schema},
    value::{Attributes, Value},
};

use aws_sdk_dynamodb::{primitives::Blob, types};
use indexmap::IndexMap;
use std::collections;

fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::List(values) => values.iter().map(ToString::to_string).collect(),
        other => vec![other.to_string()],
    }
}

fn blob_list(value: &Value) -> Vec<Blob> {
    match value {
        Value::List(values) => values.iter().map(|value| Blob::new(value.to_bytes())).collect(),
        other => vec![Blob::new(other.to_bytes())],
    }
}

/// Normalize a plain value to the representation its wire type expects.
///
/// `S` and `N` become text, `B` becomes bytes, set types become dense lists of the member
/// representation. `Null` is left untouched so that compaction can drop it.
pub fn coerce(attribute_type: AttributeType, value: Value) -> Value {
    match (attribute_type, value) {
        (_, Value::Null) => Value::Null,
        (AttributeType::S | AttributeType::N, value @ Value::String(_)) => value,
        (AttributeType::S | AttributeType::N, other) => Value::String(other.to_string()),
        (AttributeType::B, value @ Value::Binary(_)) => value,
        (AttributeType::B, other) => Value::Binary(other.to_bytes()),
        (attribute_type, Value::List(values)) => Value::List(
            values
                .into_iter()
                .map(|value| coerce(attribute_type.element_type(), value))
                .collect(),
        ),
        (attribute_type, other) => {
            Value::List(vec![coerce(attribute_type.element_type(), other)])
        }
    }
}

/// Encode one plain value as the given wire type.
pub fn encode_value(attribute_type: AttributeType, value: &Value) -> types::AttributeValue {
    match attribute_type {
        AttributeType::S => types::AttributeValue::S(value.to_string()),
        AttributeType::N => types::AttributeValue::N(value.to_string()),
        AttributeType::B => types::AttributeValue::B(Blob::new(value.to_bytes())),
        AttributeType::Ss => types::AttributeValue::Ss(text_list(value)),
        AttributeType::Ns => types::AttributeValue::Ns(text_list(value)),
        AttributeType::Bs => types::AttributeValue::Bs(blob_list(value)),
    }
}

/// Encode a plain map into its wire form, resolving each type through the schema.
pub fn encode_attributes(schema: &Schema, attributes: &Attributes) -> WireItem {
    attributes
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(schema.resolve(name), value)))
        .collect()
}

/// Encode a plain map as attribute updates.
///
/// Every attribute is `PUT` unless `actions` names another action for it.
pub fn encode_attribute_updates(
    schema: &Schema,
    attributes: &Attributes,
    actions: &IndexMap<String, types::AttributeAction>,
) -> collections::HashMap<String, types::AttributeValueUpdate> {
    attributes
        .iter()
        .map(|(name, value)| {
            let action = actions
                .get(name)
                .cloned()
                .unwrap_or(types::AttributeAction::Put);
            let update = types::AttributeValueUpdate::builder()
                .action(action)
                .value(encode_value(schema.resolve(name), value))
                .build();
            (name.clone(), update)
        })
        .collect()
}

/// Decode a single wire value, trusting the type echoed by the store.
pub fn decode_attribute(attribute_value: types::AttributeValue) -> Value {
    match attribute_value {
        types::AttributeValue::S(text) | types::AttributeValue::N(text) => Value::String(text),
        types::AttributeValue::B(blob) => Value::Binary(blob.into_inner()),
        types::AttributeValue::Ss(texts) | types::AttributeValue::Ns(texts) => {
            Value::List(texts.into_iter().map(Value::String).collect())
        }
        types::AttributeValue::Bs(blobs) => Value::List(
            blobs
                .into_iter()
                .map(|blob| Value::Binary(blob.into_inner()))
                .collect(),
        ),
        types::AttributeValue::Bool(flag) => Value::Bool(flag),
        types::AttributeValue::L(values) => {
            Value::List(values.into_iter().map(decode_attribute).collect())
        }
        types::AttributeValue::M(map) => Value::Map(decode_item(map)),
        _ => Value::Null,
    }
}

/// Decode a wire item into a plain map.
pub fn decode_item(item: WireItem) -> Attributes {
    item.into_iter()
        .map(|(name, value)| (name, decode_attribute(value)))
        .collect()
}

/// Decode a list of wire items.
pub fn decode_items(items: Vec<WireItem>) -> Vec<Attributes> {
    items.into_iter().map(decode_item).collect()
}

/// Drop null and empty string entries; the store rejects empty scalars.
pub fn compact_for_write(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .filter(|(_, value)| !value.is_empty_scalar())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Append a member to a set value.
///
/// String and number set members are stored as text, binary set members as bytes.
/// Scalar types leave the value unchanged.
pub fn add_to_set(attribute_type: AttributeType, current: Option<Value>, value: Value) -> Option<Value> {
    if !attribute_type.is_set() {
        return current;
    }
    let mut members = match current {
        Some(Value::List(members)) => members,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    };
    members.push(coerce(attribute_type.element_type(), value));
    Some(Value::List(members))
}

/// Remove the first member equal to `value`; the remaining members stay dense and ordered.
///
/// Removing a member that is not present is a no-op.
pub fn remove_from_set(current: Vec<Value>, value: &Value) -> Vec<Value> {
    let mut members = current;
    if let Some(index) = members.iter().position(|member| member == value) {
        members.remove(index);
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn schema() -> Schema {
        Schema::from([
            ("id", AttributeType::S),
            ("age", AttributeType::N),
            ("avatar", AttributeType::B),
            ("tags", AttributeType::Ss),
            ("scores", AttributeType::Ns),
            ("chunks", AttributeType::Bs),
        ])
    }

    #[rstest]
    #[case::string(
        "id",
        Value::from("John"),
        types::AttributeValue::S(
            "John".to_string()
        )
    )]
    #[case::number(
        "age",
        Value::from(20),
        types::AttributeValue::N(
            "20".to_string()
        )
    )]
    #[case::number_from_text(
        "age",
        Value::from("20"),
        types::AttributeValue::N(
            "20".to_string()
        )
    )]
    #[case::undeclared_defaults_to_string(
        "nickname",
        Value::from(7),
        types::AttributeValue::S(
            "7".to_string()
        )
    )]
    #[case::binary(
        "avatar",
        Value::binary(vec![0u8, 159, 146, 150]),
        types::AttributeValue::B(
            Blob::new(vec![0u8, 159, 146, 150])
        )
    )]
    #[case::string_set(
        "tags",
        Value::from(vec!["a", "b"]),
        types::AttributeValue::Ss(
            vec![
                "a".to_string(),
                "b".to_string()
            ]
        )
    )]
    #[case::number_set(
        "scores",
        Value::from(vec![1, 2]),
        types::AttributeValue::Ns(
            vec![
                "1".to_string(),
                "2".to_string()
            ]
        )
    )]
    #[case::binary_set(
        "chunks",
        Value::List(
            vec![
                Value::binary(vec![1u8]),
                Value::binary(vec![2u8])
            ]
        ),
        types::AttributeValue::Bs(
            vec![
                Blob::new(vec![1u8]),
                Blob::new(vec![2u8])
            ]
        )
    )]
    #[case::scalar_into_set(
        "tags",
        Value::from("solo"),
        types::AttributeValue::Ss(
            vec![
                "solo".to_string()
            ]
        )
    )]
    fn test_encode_attributes(
        #[case] name: &str,
        #[case] value: Value,
        #[case] expected: types::AttributeValue,
    ) {
        let attributes = Attributes::from([(name.to_string(), value)]);
        let actual = encode_attributes(&schema(), &attributes);
        assert_eq!(actual, WireItem::from([(name.to_string(), expected)]));
    }

    #[rstest]
    #[case::string("id", Value::from("John"))]
    #[case::number("age", Value::from("20"))]
    #[case::undeclared("nickname", Value::from("Johnny"))]
    #[case::binary("avatar", Value::binary(vec![1u8, 2, 3]))]
    #[case::string_set("tags", Value::from(vec!["a", "b"]))]
    #[case::number_set("scores", Value::from(vec!["1", "2.5"]))]
    #[case::binary_set("chunks", Value::List(vec![Value::binary(vec![9u8])]))]
    fn test_encode_then_decode_is_identity(#[case] name: &str, #[case] value: Value) {
        let attributes = Attributes::from([(name.to_string(), value.clone())]);
        let mut encoded = encode_attributes(&schema(), &attributes);
        let wire = encoded.remove(name).unwrap();
        assert_eq!(decode_attribute(wire), value);
    }

    #[rstest]
    #[case::boolean(types::AttributeValue::Bool(true), Value::Bool(true))]
    #[case::null(types::AttributeValue::Null(true), Value::Null)]
    #[case::list(
        types::AttributeValue::L(
            vec![
                types::AttributeValue::S(
                    "a".to_string()
                ),
                types::AttributeValue::N(
                    "1".to_string()
                ),
            ]
        ),
        Value::List(
            vec![
                Value::from("a"),
                Value::from("1")
            ]
        )
    )]
    #[case::map(
        types::AttributeValue::M(
            WireItem::from(
                [(
                    "city".to_string(),
                    types::AttributeValue::S(
                        "Tokyo".to_string()
                    ),
                )]
            )
        ),
        Value::Map(
            IndexMap::from(
                [(
                    "city".to_string(),
                    Value::from("Tokyo")
                )]
            )
        )
    )]
    fn test_decode_attribute_other_types(
        #[case] attribute_value: types::AttributeValue,
        #[case] expected: Value,
    ) {
        assert_eq!(decode_attribute(attribute_value), expected);
    }

    #[test]
    fn test_decode_items() {
        let items = vec![
            WireItem::from([(
                "id".to_string(),
                types::AttributeValue::S("u1".to_string()),
            )]),
            WireItem::from([(
                "id".to_string(),
                types::AttributeValue::S("u2".to_string()),
            )]),
        ];
        let actual = decode_items(items);
        assert_eq!(
            actual,
            vec![
                Attributes::from([("id".to_string(), Value::from("u1"))]),
                Attributes::from([("id".to_string(), Value::from("u2"))]),
            ]
        );
    }

    #[test]
    fn test_encode_attribute_updates() {
        let attributes = Attributes::from([
            ("name".to_string(), Value::from("John")),
            ("count".to_string(), Value::from(1)),
        ]);
        let actions = IndexMap::from([("count".to_string(), types::AttributeAction::Add)]);
        let schema = Schema::from([("count", AttributeType::N)]);
        let actual = encode_attribute_updates(&schema, &attributes, &actions);
        let expected = collections::HashMap::from([
            (
                "name".to_string(),
                types::AttributeValueUpdate::builder()
                    .action(types::AttributeAction::Put)
                    .value(types::AttributeValue::S("John".to_string()))
                    .build(),
            ),
            (
                "count".to_string(),
                types::AttributeValueUpdate::builder()
                    .action(types::AttributeAction::Add)
                    .value(types::AttributeValue::N("1".to_string()))
                    .build(),
            ),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_compact_for_write() {
        let attributes = Attributes::from([
            ("id".to_string(), Value::from("u1")),
            ("nickname".to_string(), Value::from("")),
            ("age".to_string(), Value::Null),
            ("zero".to_string(), Value::from(0)),
            ("tags".to_string(), Value::List(vec![])),
        ]);
        let actual = compact_for_write(&attributes);
        let expected = Attributes::from([
            ("id".to_string(), Value::from("u1")),
            ("zero".to_string(), Value::from(0)),
            ("tags".to_string(), Value::List(vec![])),
        ]);
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::string_from_number(AttributeType::S, Value::from(5), Value::from("5"))]
    #[case::number_from_text(AttributeType::N, Value::from("5"), Value::from("5"))]
    #[case::binary_from_text(AttributeType::B, Value::from("ab"), Value::binary(b"ab".to_vec()))]
    #[case::null_kept(AttributeType::Ss, Value::Null, Value::Null)]
    #[case::set_from_scalar(AttributeType::Ns, Value::from(3), Value::from(vec!["3"]))]
    #[case::set_from_numbers(AttributeType::Ns, Value::from(vec![1, 2]), Value::from(vec!["1", "2"]))]
    #[case::binary_set_from_texts(
        AttributeType::Bs,
        Value::from(vec!["x"]),
        Value::List(vec![Value::binary(b"x".to_vec())])
    )]
    fn test_coerce(#[case] attribute_type: AttributeType, #[case] value: Value, #[case] expected: Value) {
        assert_eq!(coerce(attribute_type, value), expected);
    }

    #[rstest]
    #[case::string_set_from_empty(AttributeType::Ss, None, Value::from(1), Some(Value::from(vec!["1"])))]
    #[case::number_set_append(
        AttributeType::Ns,
        Some(Value::from(vec!["1"])),
        Value::from(2),
        Some(Value::from(vec!["1", "2"]))
    )]
    #[case::binary_set_raw(
        AttributeType::Bs,
        None,
        Value::binary(vec![7u8]),
        Some(Value::List(vec![Value::binary(vec![7u8])]))
    )]
    #[case::scalar_untouched(AttributeType::S, Some(Value::from("a")), Value::from("b"), Some(Value::from("a")))]
    fn test_add_to_set(
        #[case] attribute_type: AttributeType,
        #[case] current: Option<Value>,
        #[case] value: Value,
        #[case] expected: Option<Value>,
    ) {
        assert_eq!(add_to_set(attribute_type, current, value), expected);
    }

    #[rstest]
    #[case::first_member(vec!["a", "b", "c"], "a", vec!["b", "c"])]
    #[case::middle_member(vec!["a", "b", "c"], "b", vec!["a", "c"])]
    #[case::first_of_duplicates(vec!["a", "b", "a"], "a", vec!["b", "a"])]
    #[case::absent_member(vec!["a", "b"], "z", vec!["a", "b"])]
    #[case::empty(vec![], "a", vec![])]
    fn test_remove_from_set(
        #[case] current: Vec<&str>,
        #[case] value: &str,
        #[case] expected: Vec<&str>,
    ) {
        let current = current.into_iter().map(Value::from).collect();
        let expected: Vec<Value> = expected.into_iter().map(Value::from).collect();
        assert_eq!(remove_from_set(current, &Value::from(value)), expected);
    }
}
