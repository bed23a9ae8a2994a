use crate::{
    common::{WireItem, codec, schema::Schema, value::Value},
    error::{Error, Result},
};

/// Key component.
///
/// ```rust
/// use dynamodb_orm::common::{key, value::Value};
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: Value::from("1"),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: Value,
}

/// Primary key (partition key and optional sort key).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys {
    /// The partition key (required).
    pub partition_key: Key,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key>,
}

impl Keys {
    /// Encode the key attributes through the schema.
    pub fn encode(&self, schema: &Schema) -> WireItem {
        let partition_key = &self.partition_key;
        let mut keys = WireItem::from([(
            partition_key.name.clone(),
            codec::encode_value(schema.resolve(&partition_key.name), &partition_key.value),
        )]);
        if let Some(sort_key) = &self.sort_key {
            keys.insert(
                sort_key.name.clone(),
                codec::encode_value(schema.resolve(&sort_key.name), &sort_key.value),
            );
        }
        keys
    }
}

/// Key values of one item in a batch read.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyValues {
    /// Partition key value only.
    Hash(Value),
    /// Partition key value and sort key value.
    HashAndRange(Value, Value),
}

impl KeyValues {
    /// Partition key value only.
    pub fn hash(hash: impl Into<Value>) -> Self {
        Self::Hash(hash.into())
    }

    /// Partition key value and sort key value.
    pub fn pair(hash: impl Into<Value>, range: impl Into<Value>) -> Self {
        Self::HashAndRange(hash.into(), range.into())
    }
}

/// Partition key name and optional sort key name of a table.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct KeyDefinition {
    /// The partition key attribute.
    pub hash_key: String,
    /// The sort key attribute, if the table has one.
    pub range_key: Option<String>,
}

impl KeyDefinition {
    /// Key definition; an empty range key name means the table has no range key.
    pub fn new(hash_key: impl Into<String>, range_key: Option<&str>) -> Self {
        Self {
            hash_key: hash_key.into(),
            range_key: range_key
                .filter(|range_key| !range_key.is_empty())
                .map(str::to_string),
        }
    }

    /// Build the primary key of an item.
    ///
    /// Fails with a configuration error when a range value is given but no range key is defined.
    pub fn keys(&self, table: &str, hash: Value, range: Option<Value>) -> Result<Keys> {
        let partition_key = Key {
            name: self.hash_key.clone(),
            value: hash,
        };
        let sort_key = match (range, &self.range_key) {
            (Some(value), Some(name)) => Some(Key {
                name: name.clone(),
                value,
            }),
            (Some(_), None) => {
                return Err(Error::RangeKeyNotDefined {
                    table: table.to_string(),
                });
            }
            (None, _) => None,
        };
        Ok(Keys {
            partition_key,
            sort_key,
        })
    }

    /// Build the primary key of one batch entry.
    ///
    /// Range-keyed tables need both values; hash-only tables use the first value of a pair.
    pub fn batch_keys(&self, table: &str, key_values: KeyValues) -> Result<Keys> {
        match (key_values, &self.range_key) {
            (KeyValues::HashAndRange(hash, range), Some(_)) => self.keys(table, hash, Some(range)),
            (KeyValues::Hash(_), Some(_)) => Err(Error::MissingRangeValue {
                table: table.to_string(),
            }),
            (KeyValues::Hash(hash) | KeyValues::HashAndRange(hash, _), None) => {
                self.keys(table, hash, None)
            }
        }
    }
}
