use crate::common::{key::KeyDefinition, schema::Schema};

/// Table name, key definition and schema of a table.
///
/// ```rust
/// use dynamodb_orm::{common::schema::AttributeType, entity::Binding};
///
/// let binding = Binding::define(
///     "users",
///     "id",
///     Some("created_at"),
///     [
///         ("id", AttributeType::S),
///         ("created_at", AttributeType::N),
///         ("tags", AttributeType::Ss),
///     ],
/// );
/// assert_eq!(binding.key.range_key.as_deref(), Some("created_at"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Binding {
    /// The table name.
    pub table_name: String,
    /// Partition key and optional sort key.
    pub key: KeyDefinition,
    /// Attribute types; attributes outside the schema are not mapped.
    pub schema: Schema,
}

impl Binding {
    /// Define a binding. An empty range key name means the table has no range key.
    pub fn define(
        table_name: impl Into<String>,
        hash_key: impl Into<String>,
        range_key: Option<&str>,
        schema: impl Into<Schema>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            key: KeyDefinition::new(hash_key, range_key),
            schema: schema.into(),
        }
    }
}

/// A table type producing its binding.
///
/// ```rust
/// use dynamodb_orm::{common::schema::AttributeType, entity::{Binding, Table}};
///
/// struct Users;
///
/// impl Table for Users {
///     fn binding() -> Binding {
///         Binding::define("users", "id", None, [("id", AttributeType::S)])
///     }
/// }
/// ```
pub trait Table {
    /// The binding of the table.
    fn binding() -> Binding;
}
