//! Binding source generator.
//!
//! Builds the [`Table`](crate::entity::Table) implementation of an existing table from its
//! description and a few sample items. Used by the `dynamodb-orm-skeleton` binary.

use crate::{
    common::{WireItem, schema::AttributeType},
    error::Result,
};

use aws_sdk_dynamodb::types;
use std::{collections, fmt};

/// Key pair of a secondary index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexLayout {
    /// The index name.
    pub name: String,
    /// The partition key attribute.
    pub hash_key: String,
    /// The sort key attribute, if any.
    pub range_key: Option<String>,
}

/// Everything needed to render a binding.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TableLayout {
    /// The table name.
    pub table_name: String,
    /// The partition key attribute.
    pub hash_key: String,
    /// The sort key attribute, if any.
    pub range_key: Option<String>,
    /// Attribute types, sorted by name.
    pub schema: collections::BTreeMap<String, AttributeType>,
    /// Global secondary indexes.
    pub global_secondary_indexes: Vec<IndexLayout>,
    /// Local secondary indexes.
    pub local_secondary_indexes: Vec<IndexLayout>,
}

fn key_pair(key_schema: &[types::KeySchemaElement]) -> (String, Option<String>) {
    let mut hash_key = String::new();
    let mut range_key = None;
    for element in key_schema {
        match element.key_type() {
            types::KeyType::Hash => hash_key = element.attribute_name().to_string(),
            types::KeyType::Range => range_key = Some(element.attribute_name().to_string()),
            _ => {}
        }
    }
    (hash_key, range_key)
}

fn index_layout(name: Option<&str>, key_schema: &[types::KeySchemaElement]) -> IndexLayout {
    let (hash_key, range_key) = key_pair(key_schema);
    IndexLayout {
        name: name.unwrap_or_default().to_string(),
        hash_key,
        range_key,
    }
}

fn sample_type(attribute_value: &types::AttributeValue) -> Option<AttributeType> {
    match attribute_value {
        types::AttributeValue::S(_) => Some(AttributeType::S),
        types::AttributeValue::N(_) => Some(AttributeType::N),
        types::AttributeValue::B(_) => Some(AttributeType::B),
        types::AttributeValue::Ss(_) => Some(AttributeType::Ss),
        types::AttributeValue::Ns(_) => Some(AttributeType::Ns),
        types::AttributeValue::Bs(_) => Some(AttributeType::Bs),
        _ => None,
    }
}

/// Convert a table name to a type name: `user_events` becomes `UserEvents`.
pub fn type_name(table_name: &str) -> String {
    let mut name: String = table_name
        .split(['_', '-', '.'])
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first.to_uppercase().chain(characters).collect(),
                None => String::new(),
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|character: char| character.is_ascii_digit()) {
        name.insert_str(0, "Table");
    }
    name
}

impl TableLayout {
    /// Build the layout of a described table.
    ///
    /// Attribute types are taken from the sample items, then from the attribute
    /// definitions, which win. Sample attributes of non-key wire types (maps, lists,
    /// booleans, nulls) are left out.
    ///
    /// # Errors
    ///
    /// Fails when an attribute definition carries an unknown scalar type.
    pub fn from_description(
        description: &types::TableDescription,
        items: &[WireItem],
    ) -> Result<Self> {
        let (hash_key, range_key) = key_pair(description.key_schema());
        let mut schema = collections::BTreeMap::new();
        for item in items {
            for (name, attribute_value) in item {
                if let Some(attribute_type) = sample_type(attribute_value) {
                    schema.insert(name.clone(), attribute_type);
                }
            }
        }
        for definition in description.attribute_definitions() {
            let attribute_type = definition.attribute_type().as_str().parse()?;
            schema.insert(definition.attribute_name().to_string(), attribute_type);
        }
        Ok(Self {
            table_name: description.table_name().unwrap_or_default().to_string(),
            hash_key,
            range_key,
            schema,
            global_secondary_indexes: description
                .global_secondary_indexes()
                .iter()
                .map(|index| index_layout(index.index_name(), index.key_schema()))
                .collect(),
            local_secondary_indexes: description
                .local_secondary_indexes()
                .iter()
                .map(|index| index_layout(index.index_name(), index.key_schema()))
                .collect(),
        })
    }

    /// Render the Rust source of the binding.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn write_indexes(f: &mut fmt::Formatter<'_>, title: &str, indexes: &[IndexLayout]) -> fmt::Result {
    if indexes.is_empty() {
        return Ok(());
    }
    writeln!(f, "///")?;
    writeln!(f, "/// {title}:")?;
    for index in indexes {
        write!(f, "/// - `{}`: `{}`", index.name, index.hash_key)?;
        if let Some(range_key) = &index.range_key {
            write!(f, ", `{range_key}`")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = type_name(&self.table_name);
        writeln!(f, "use dynamodb_orm::{{")?;
        writeln!(f, "    common::schema::AttributeType,")?;
        writeln!(f, "    entity::{{Binding, Table}},")?;
        writeln!(f, "}};")?;
        writeln!(f)?;
        writeln!(f, "/// Binding of the `{}` table.", self.table_name)?;
        write_indexes(f, "Global secondary indexes", &self.global_secondary_indexes)?;
        write_indexes(f, "Local secondary indexes", &self.local_secondary_indexes)?;
        writeln!(f, "pub struct {type_name};")?;
        writeln!(f)?;
        writeln!(f, "impl Table for {type_name} {{")?;
        writeln!(f, "    fn binding() -> Binding {{")?;
        writeln!(f, "        Binding::define(")?;
        writeln!(f, "            {:?},", self.table_name)?;
        writeln!(f, "            {:?},", self.hash_key)?;
        match &self.range_key {
            Some(range_key) => writeln!(f, "            Some({range_key:?}),")?,
            None => writeln!(f, "            None,")?,
        }
        writeln!(f, "            [")?;
        for (name, attribute_type) in &self.schema {
            writeln!(f, "                ({name:?}, AttributeType::{attribute_type:?}),")?;
        }
        writeln!(f, "            ],")?;
        writeln!(f, "        )")?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}
