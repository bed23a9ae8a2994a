use crate::common::{codec, schema::Schema, value::Attributes};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::collections;

/// Build the expected previous state of a conditional write.
///
/// Every attribute of `values` is expected to hold that value; `exists` then sets the
/// existence flag per attribute, creating existence-only entries for attributes without a value.
///
/// ```rust
/// use dynamodb_orm::common::{expected, schema::Schema, value::Attributes};
/// use indexmap::IndexMap;
///
/// let exists = IndexMap::from([("age".to_string(), false)]);
/// let expected = expected::build_expected(&Schema::default(), &Attributes::new(), &exists);
/// assert_eq!(expected["age"].exists(), Some(false));
/// assert_eq!(expected["age"].value(), None);
/// ```
pub fn build_expected(
    schema: &Schema,
    values: &Attributes,
    exists: &IndexMap<String, bool>,
) -> collections::HashMap<String, types::ExpectedAttributeValue> {
    let mut expected: collections::HashMap<String, (Option<types::AttributeValue>, Option<bool>)> =
        values
            .iter()
            .map(|(name, value)| {
                let value = codec::encode_value(schema.resolve(name), value);
                (name.clone(), (Some(value), None))
            })
            .collect();
    for (name, flag) in exists {
        expected.entry(name.clone()).or_default().1 = Some(*flag);
    }
    expected
        .into_iter()
        .map(|(name, (value, exists))| {
            let expected_value = types::ExpectedAttributeValue::builder()
                .set_value(value)
                .set_exists(exists)
                .build();
            (name, expected_value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{schema::AttributeType, value::Value};

    use rstest::rstest;

    fn schema() -> Schema {
        Schema::from([("id", AttributeType::S), ("age", AttributeType::N)])
    }

    #[rstest]
    #[case::existence_only(
        Attributes::new(),
        IndexMap::from([("age".to_string(), false)]),
        collections::HashMap::from(
            [(
                "age".to_string(),
                types::ExpectedAttributeValue::builder()
                    .exists(false)
                    .build(),
            )]
        )
    )]
    #[case::values_only(
        Attributes::from(
            [
                ("id".to_string(), Value::from("u1")),
                ("age".to_string(), Value::from(20)),
            ]
        ),
        IndexMap::new(),
        collections::HashMap::from(
            [
                (
                    "id".to_string(),
                    types::ExpectedAttributeValue::builder()
                        .value(types::AttributeValue::S("u1".to_string()))
                        .build(),
                ),
                (
                    "age".to_string(),
                    types::ExpectedAttributeValue::builder()
                        .value(types::AttributeValue::N("20".to_string()))
                        .build(),
                ),
            ]
        )
    )]
    #[case::exists_overrides_value_entry(
        Attributes::from([("id".to_string(), Value::from("u1"))]),
        IndexMap::from([("id".to_string(), true)]),
        collections::HashMap::from(
            [(
                "id".to_string(),
                types::ExpectedAttributeValue::builder()
                    .value(types::AttributeValue::S("u1".to_string()))
                    .exists(true)
                    .build(),
            )]
        )
    )]
    #[case::empty(
        Attributes::new(),
        IndexMap::new(),
        collections::HashMap::new()
    )]
    fn test_build_expected(
        #[case] values: Attributes,
        #[case] exists: IndexMap<String, bool>,
        #[case] expected: collections::HashMap<String, types::ExpectedAttributeValue>,
    ) {
        assert_eq!(build_expected(&schema(), &values, &exists), expected);
    }
}
