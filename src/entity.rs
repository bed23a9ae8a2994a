//! Records bound to a table.
//!
//! An [`Entity`] holds the attributes of one item together with the binding of its table,
//! the store client of its connection and the state of the query being built on it.
//! Records returned by reads are fresh entities sharing the binding and the client.

mod binding;
mod state;

pub use binding::{Binding, Table};

use crate::{
    client::StoreClient,
    common::{
        WireItem, codec,
        expected::build_expected,
        key::{Key, KeyValues, Keys},
        value::{Attributes, Value},
    },
    error::Result,
    export,
    read::{self, get_item::GetOptions, query::QueryOptions, scan::ScanOptions},
    write::{self, common::WriteOptions},
};

use aws_sdk_dynamodb::{operation, types};
use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use state::QueryState;
use std::{collections, fmt, sync::Arc};

/// Key conditions of a query, keyed by attribute name.
pub type Conditions = collections::HashMap<String, types::Condition>;

/// A record of a bound table.
///
/// A record is either new (after [`Entity::create`]) or existing (after [`Entity::hydrate`]
/// or a read). Saving a new record asserts that no item with its attributes exists yet;
/// saving an existing record asserts that the stored item still equals the attributes it
/// was loaded with.
///
/// A record is meant for one logical operation at a time: its query state is plain
/// instance state.
///
/// ```rust,no_run
/// use dynamodb_orm::{common::{schema::AttributeType, value::Value}, connection::ClientRegistry, entity::Binding};
/// use std::sync::Arc;
///
/// # fn example(registry: &ClientRegistry) -> dynamodb_orm::Result<()> {
/// let binding = Arc::new(Binding::define(
///     "users",
///     "id",
///     None,
///     [("id", AttributeType::S), ("age", AttributeType::N)],
/// ));
/// let mut user = registry.factory(Arc::clone(&binding), "default")?;
/// user.create([("id", Value::from("u1")), ("age", Value::from(20))]);
/// user.save(Default::default())?;
///
/// let adults = registry
///     .factory(binding, "default")?
///     .where_equals("id", "u1")
///     .filter_op("age", ">=", 18)
///     .find_many(Default::default())?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Entity {
    binding: Arc<Binding>,
    client: Arc<dyn StoreClient>,
    connection_name: String,
    data: Attributes,
    data_original: Attributes,
    is_new: bool,
    state: QueryState,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("table_name", &self.binding.table_name)
            .field("connection_name", &self.connection_name)
            .field("data", &self.data)
            .field("is_new", &self.is_new)
            .finish_non_exhaustive()
    }
}

impl Entity {
    /// An empty record of `binding`, reading and writing through `client`.
    pub fn new(
        binding: Arc<Binding>,
        client: Arc<dyn StoreClient>,
        connection_name: impl Into<String>,
    ) -> Self {
        Self {
            binding,
            client,
            connection_name: connection_name.into(),
            data: Attributes::new(),
            data_original: Attributes::new(),
            is_new: false,
            state: QueryState::default(),
        }
    }

    fn spawn(&self, row: Attributes) -> Self {
        let mut entity = Self::new(
            Arc::clone(&self.binding),
            Arc::clone(&self.client),
            self.connection_name.clone(),
        );
        entity.hydrate(row);
        entity
    }

    // ----- data -----

    /// Fill the record as a new item.
    pub fn create<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.is_new = true;
        self.hydrate(data)
    }

    /// Fill the record as an existing item and take the snapshot asserted by `save`.
    pub fn hydrate<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in data {
            self.set(name, value);
        }
        self.data_original = self.data.clone();
        self
    }

    /// Fill the record as a new item from a typed model.
    pub fn create_from_model<M: Serialize>(&mut self, model: &M) -> Result<&mut Self> {
        let item: WireItem = serde_dynamo::to_item(model)?;
        Ok(self.create(codec::decode_item(item)))
    }

    /// Convert the attributes into a typed model.
    pub fn to_model<M: DeserializeOwned>(&self) -> Result<M> {
        let values = codec::compact_for_write(&self.data);
        let item = codec::encode_attributes(&self.binding.schema, &values);
        Ok(serde_dynamo::from_item(item)?)
    }

    /// Whether the record has not been saved yet.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Set an attribute, coerced to its schema type.
    ///
    /// Attributes outside the schema are ignored.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        if self.binding.schema.contains(&name) {
            let attribute_type = self.binding.schema.resolve(&name);
            self.data
                .insert(name, codec::coerce(attribute_type, value.into()));
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                table = %self.binding.table_name,
                attribute = %name,
                "ignoring attribute outside the schema"
            );
        }
        self
    }

    /// The value of an attribute; `None` when absent or null.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|value| **value != Value::Null)
    }

    /// Remove an attribute, returning its value.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.data.shift_remove(name)
    }

    /// Whether an attribute is present and not null.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The attributes of the record.
    pub fn as_map(&self) -> &Attributes {
        &self.data
    }

    /// Consume the record, keeping its attributes.
    pub fn into_attributes(self) -> Attributes {
        self.data
    }

    /// Append a member to a set attribute; other attributes are left alone.
    ///
    /// See [`Entity::set_remove`] for emptied sets.
    pub fn set_add(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let attribute_type = self.binding.schema.resolve(name);
        if attribute_type.is_set() {
            let current = self.data.get(name).cloned();
            if let Some(members) = codec::add_to_set(attribute_type, current, value.into()) {
                self.data.insert(name.to_string(), members);
            }
        }
        self
    }

    /// Remove the first equal member from a set attribute; absent members are a no-op.
    ///
    /// Removing the last member leaves an empty list, which the store rejects as a set
    /// value: [`Entity::unset`] an emptied set before saving.
    pub fn set_remove(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let attribute_type = self.binding.schema.resolve(name);
        if !attribute_type.is_set() {
            return self;
        }
        if let Some(Value::List(members)) = self.data.get(name) {
            let value = codec::coerce(attribute_type.element_type(), value.into());
            let members = codec::remove_from_set(members.clone(), &value);
            self.data.insert(name.to_string(), Value::List(members));
        }
        self
    }

    // ----- query builder -----

    /// Add an equality key condition.
    pub fn where_equals(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.state.where_clauses.equals(name, value);
        self
    }

    /// Add a key condition; unknown operator tokens mean equality.
    pub fn where_op(
        &mut self,
        name: impl Into<String>,
        token: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.state.where_clauses.op(name, token, value);
        self
    }

    /// Add a key condition, failing on an unknown operator token.
    pub fn try_where_op(
        &mut self,
        name: impl Into<String>,
        token: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.state.where_clauses.try_op(name, token, value)?;
        Ok(self)
    }

    /// Add an equality filter.
    pub fn filter_equals(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.state.filter_clauses.equals(name, value);
        self
    }

    /// Add a filter; unknown operator tokens mean equality.
    pub fn filter_op(
        &mut self,
        name: impl Into<String>,
        token: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.state.filter_clauses.op(name, token, value);
        self
    }

    /// Add a filter, failing on an unknown operator token.
    pub fn try_filter_op(
        &mut self,
        name: impl Into<String>,
        token: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.state.filter_clauses.try_op(name, token, value)?;
        Ok(self)
    }

    /// Fetch a single page of at most `limit` items per query.
    pub fn limit(&mut self, limit: i32) -> &mut Self {
        self.state.limit = Some(limit);
        self
    }

    /// Query a secondary index instead of the table.
    pub fn index(&mut self, index_name: impl Into<String>) -> &mut Self {
        self.state.index_name = Some(index_name.into());
        self
    }

    /// Use strongly consistent reads for point lookups and queries.
    pub fn consistent(&mut self, consistent_read: bool) -> &mut Self {
        self.state.consistent_read = consistent_read;
        self
    }

    /// Resume a limited query after `key`, usually a previous [`Entity::last_evaluated_key`].
    pub fn set_exclusive_start_key<K, V>(
        &mut self,
        key: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.state.exclusive_start_key = Some(key);
        self
    }

    /// Clear conditions, limit, cursor, index and consistency.
    pub fn reset_conditions(&mut self) -> &mut Self {
        self.state.reset();
        self
    }

    // ----- accessors -----

    /// Number of items returned by the last query.
    pub fn count(&self) -> Option<usize> {
        self.state.result_count
    }

    /// Cursor of the last limited query, if more items remain.
    pub fn last_evaluated_key(&self) -> Option<&Attributes> {
        self.state.last_evaluated_key.as_ref()
    }

    /// The binding of the record.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// The table name.
    pub fn table_name(&self) -> &str {
        &self.binding.table_name
    }

    /// The partition key attribute.
    pub fn hash_key(&self) -> &str {
        &self.binding.key.hash_key
    }

    /// The sort key attribute, if any.
    pub fn range_key(&self) -> Option<&str> {
        self.binding.key.range_key.as_deref()
    }

    /// The connection the record reads and writes through.
    pub fn connection_name(&self) -> &str {
        &self.connection_name
    }

    // ----- reads -----

    /// Read one item by primary key.
    ///
    /// An empty range value is treated as absent. Returns `Ok(None)` when the item does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error, before any store call, when a range value is
    /// given but the table has no range key.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.find_one",
            skip_all,
            fields(table = %self.binding.table_name),
            err
        )
    )]
    pub fn find_one(
        &self,
        hash: impl Into<Value>,
        range: Option<impl Into<Value>>,
        options: GetOptions,
    ) -> Result<Option<Entity>> {
        let range = range
            .map(Into::into)
            .filter(|value: &Value| !value.is_empty_scalar());
        let keys = self
            .binding
            .key
            .keys(&self.binding.table_name, hash.into(), range)?;
        let get_item = read::get_item::GetItem {
            key: keys.encode(&self.binding.schema),
            return_consumed_capacity: Some(
                options
                    .return_consumed_capacity
                    .unwrap_or(types::ReturnConsumedCapacity::Total),
            ),
            single_read_args: read::common::SingleReadArgs {
                attributes_to_get: options.attributes_to_get,
                consistent_read: Some(self.state.consistent_read),
                table_name: self.binding.table_name.clone(),
            },
        };
        let output = get_item.send(self.client.as_ref())?;
        Ok(output
            .item
            .map(|item| self.spawn(codec::decode_item(item))))
    }

    fn query_request(&self, key_conditions: Conditions, options: QueryOptions) -> read::query::Query {
        read::query::Query {
            key_conditions,
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: Some(self.state.consistent_read),
                index_name: self.state.index_name.clone(),
                select: Some(types::Select::AllAttributes),
                table_name: self.binding.table_name.clone(),
                ..Default::default()
            },
            query_filter: options.query_filter,
            return_consumed_capacity: Some(types::ReturnConsumedCapacity::Total),
            scan_index_forward: Some(options.scan_index_forward.unwrap_or(true)),
        }
    }

    fn encoded_exclusive_start_key(&self) -> Option<WireItem> {
        self.state
            .exclusive_start_key
            .as_ref()
            .map(|key| codec::encode_attributes(&self.binding.schema, key))
    }

    fn prepare_query(&self, mut options: QueryOptions) -> Result<(Conditions, QueryOptions)> {
        let key_conditions = self.state.where_clauses.build(&self.binding.schema)?;
        if !self.state.filter_clauses.is_empty() {
            options.query_filter = Some(self.state.filter_clauses.build(&self.binding.schema)?);
        }
        Ok((key_conditions, options))
    }

    /// Run a query and decode its items.
    ///
    /// With a positive limit a single page is fetched, starting at the exclusive start key,
    /// and its cursor and count are recorded. Without one every page is fetched and held
    /// in memory; the count is the number of items and no cursor is kept.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.query",
            skip_all,
            fields(table = %self.binding.table_name),
            err
        )
    )]
    pub fn query(
        &mut self,
        key_conditions: Conditions,
        options: QueryOptions,
    ) -> Result<Vec<Attributes>> {
        let mut query = self.query_request(key_conditions, options);
        let items = match self.state.page_limit() {
            Some(limit) => {
                query.multiple_read_args.limit = Some(limit);
                query.multiple_read_args.exclusive_start_key = self.encoded_exclusive_start_key();
                let page = read::common::Page::from(query.send(self.client.as_ref())?);
                self.state.last_evaluated_key = page.last_evaluated_key.map(codec::decode_item);
                self.state.result_count = Some(usize::try_from(page.count).unwrap_or_default());
                page.items
            }
            None => {
                let page = read::common::collect_pages(query.pages(self.client.as_ref()))?;
                self.state.last_evaluated_key = None;
                self.state.result_count = Some(page.items.len());
                page.items
            }
        };
        Ok(codec::decode_items(items))
    }

    /// Lazily run a query page by page.
    ///
    /// A positive limit is used as the page size; the exclusive start key, if set, is the
    /// first cursor. The query state is not updated.
    pub fn query_pages(
        &self,
        key_conditions: Conditions,
        options: QueryOptions,
    ) -> impl Iterator<Item = Result<Vec<Attributes>>> {
        let mut query = self.query_request(key_conditions, options);
        query.multiple_read_args.limit = self.state.page_limit();
        query.multiple_read_args.exclusive_start_key = self.encoded_exclusive_start_key();
        query
            .pages(self.client.as_ref())
            .map(|page| page.map(|page| codec::decode_items(page.items)))
    }

    /// Query with the accumulated key conditions and filters.
    pub fn find_many(&mut self, options: QueryOptions) -> Result<Vec<Entity>> {
        let (key_conditions, options) = self.prepare_query(options)?;
        let rows = self.query(key_conditions, options)?;
        Ok(rows.into_iter().map(|row| self.spawn(row)).collect())
    }

    /// The first record of [`Entity::find_many`].
    pub fn find_first(&mut self, options: QueryOptions) -> Result<Option<Entity>> {
        Ok(self.find_many(options)?.into_iter().next())
    }

    /// The attributes of the records of [`Entity::find_many`].
    pub fn find_array(&mut self, options: QueryOptions) -> Result<Vec<Attributes>> {
        let entities = self.find_many(options)?;
        Ok(entities.into_iter().map(Entity::into_attributes).collect())
    }

    fn scan_request(&self, options: ScanOptions) -> read::scan::Scan {
        read::scan::Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: options.consistent_read,
                index_name: options.index_name,
                limit: options.limit,
                table_name: self.binding.table_name.clone(),
                ..Default::default()
            },
            return_consumed_capacity: options.return_consumed_capacity,
            scan_filter: options.scan_filter,
        }
    }

    /// Scan the whole table and decode every item, holding all pages in memory.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.scan",
            skip_all,
            fields(table = %self.binding.table_name),
            err
        )
    )]
    pub fn scan(&self, options: ScanOptions) -> Result<Vec<Attributes>> {
        let scan = self.scan_request(options);
        let page = read::common::collect_pages(scan.pages(self.client.as_ref()))?;
        Ok(codec::decode_items(page.items))
    }

    /// Lazily scan the table page by page.
    pub fn scan_pages(&self, options: ScanOptions) -> impl Iterator<Item = Result<Vec<Attributes>>> {
        self.scan_request(options)
            .pages(self.client.as_ref())
            .map(|page| page.map(|page| codec::decode_items(page.items)))
    }

    /// Scan with the accumulated filters.
    pub fn find_all(&self, mut options: ScanOptions) -> Result<Vec<Entity>> {
        if !self.state.filter_clauses.is_empty() {
            options.scan_filter = Some(self.state.filter_clauses.build(&self.binding.schema)?);
        }
        let rows = self.scan(options)?;
        Ok(rows.into_iter().map(|row| self.spawn(row)).collect())
    }

    /// Read several records by key in one request, with consistent reads.
    ///
    /// Range-keyed tables need [`KeyValues::HashAndRange`]; hash-only tables use the first
    /// value of each entry.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.batch_get_items",
            skip_all,
            fields(table = %self.binding.table_name),
            err
        )
    )]
    pub fn batch_get_items(
        &self,
        key_values: impl IntoIterator<Item = KeyValues>,
    ) -> Result<Vec<Entity>> {
        let table_name = &self.binding.table_name;
        let keys = key_values
            .into_iter()
            .map(|key_values| {
                self.binding
                    .key
                    .batch_keys(table_name, key_values)
                    .map(|keys| keys.encode(&self.binding.schema))
            })
            .collect::<Result<Vec<_>>>()?;
        let batch_get_item = read::batch_get_item::BatchGetItem {
            items: IndexMap::from([(
                read::common::SingleReadArgs {
                    consistent_read: Some(true),
                    table_name: table_name.clone(),
                    ..Default::default()
                },
                keys,
            )]),
            ..Default::default()
        };
        let output = batch_get_item.send(self.client.as_ref())?;
        let items = output
            .responses
            .and_then(|mut responses| responses.remove(table_name))
            .unwrap_or_default();
        Ok(codec::decode_items(items)
            .into_iter()
            .map(|row| self.spawn(row))
            .collect())
    }

    // ----- writes -----

    fn key_item(&self) -> WireItem {
        let key = &self.binding.key;
        let value_of = |name: &str| self.data.get(name).cloned().unwrap_or_default();
        let keys = Keys {
            partition_key: Key {
                name: key.hash_key.clone(),
                value: value_of(&key.hash_key),
            },
            sort_key: key
                .range_key
                .as_ref()
                .map(|name| Key {
                    name: name.clone(),
                    value: value_of(name),
                })
                .filter(|sort_key| !sort_key.value.is_empty_scalar()),
        };
        keys.encode(&self.binding.schema)
    }

    fn expected(
        &self,
        expected: &Attributes,
        options: &WriteOptions,
    ) -> Option<collections::HashMap<String, types::ExpectedAttributeValue>> {
        (!expected.is_empty() || !options.exists.is_empty())
            .then(|| build_expected(&self.binding.schema, expected, &options.exists))
    }

    /// Write the record as a whole item.
    ///
    /// A new record asserts that none of the schema attributes exist yet and becomes
    /// existing on success. An existing record asserts the attributes it was loaded or
    /// created with, which a concurrent write would have changed. `force_update` skips
    /// either assertion. Null and empty attributes are never written.
    ///
    /// # Errors
    ///
    /// A failed assertion is returned as
    /// [`Error::ConditionalCheckFailed`](crate::Error::ConditionalCheckFailed); the record
    /// is left unchanged on any error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.save",
            skip_all,
            fields(table = %self.binding.table_name, is_new = self.is_new),
            err
        )
    )]
    pub fn save(&mut self, mut options: WriteOptions) -> Result<operation::put_item::PutItemOutput> {
        let values = codec::compact_for_write(&self.data);
        if self.is_new {
            if !options.force_update {
                options.exists = self
                    .binding
                    .schema
                    .names()
                    .map(|name| (name.to_string(), false))
                    .collect();
            }
            let output = self.put_item(&values, &options, &Attributes::new())?;
            self.is_new = false;
            Ok(output)
        } else {
            let expected = if options.force_update {
                Attributes::new()
            } else {
                codec::compact_for_write(&self.data_original)
            };
            self.put_item(&values, &options, &expected)
        }
    }

    /// Put `values` as a whole item, expecting `expected` and `options.exists`.
    pub fn put_item(
        &self,
        values: &Attributes,
        options: &WriteOptions,
        expected: &Attributes,
    ) -> Result<operation::put_item::PutItemOutput> {
        let put_item = write::put_item::PutItem {
            item: codec::encode_attributes(&self.binding.schema, values),
            write_args: options.write_args(
                &self.binding.table_name,
                self.expected(expected, options),
                None,
            ),
        };
        put_item.send(self.client.as_ref())
    }

    /// Update `values` on the item of this record's key.
    ///
    /// Key attributes are never part of the updates. `options.actions` selects `ADD` or
    /// `DELETE` per attribute; returns the new item by default.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.update",
            skip_all,
            fields(table = %self.binding.table_name),
            err
        )
    )]
    pub fn update_item(
        &self,
        values: &Attributes,
        options: &WriteOptions,
        expected: &Attributes,
    ) -> Result<operation::update_item::UpdateItemOutput> {
        let key = self.key_item();
        let mut attribute_updates =
            codec::encode_attribute_updates(&self.binding.schema, values, &options.actions);
        attribute_updates.retain(|name, _| !key.contains_key(name));
        let update_item = write::update_item::UpdateItem {
            attribute_updates,
            key,
            write_args: options.write_args(
                &self.binding.table_name,
                self.expected(expected, options),
                Some(types::ReturnValue::AllNew),
            ),
        };
        update_item.send(self.client.as_ref())
    }

    /// Delete the item of this record's key, returning the old item. No assertion is made.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_orm.delete",
            skip_all,
            fields(table = %self.binding.table_name),
            err
        )
    )]
    pub fn delete(&self) -> Result<operation::delete_item::DeleteItemOutput> {
        let delete_item = write::delete_item::DeleteItem {
            key: self.key_item(),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllOld),
                table_name: self.binding.table_name.clone(),
                ..Default::default()
            },
        };
        delete_item.send(self.client.as_ref())
    }

    /// The record in the legacy import/export line format.
    pub fn to_import_format(&self) -> String {
        export::to_import_format(&self.binding.schema, &self.data)
    }
}
