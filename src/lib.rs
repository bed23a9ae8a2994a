#![deny(missing_docs)]

//! # DynamoDB ORM
//!
//! A typed object mapper for Amazon DynamoDB tables.
//!
//! ## Overview
//!
//! A table is described once by a [`Binding`]: its name, its partition and sort keys, and the
//! wire type of every mapped attribute. Records of the table are [`Entity`] values that:
//! - marshal plain values to and from wire attribute values through the binding's schema
//! - build key conditions and filters from chained `where_*` and `filter_*` calls
//! - save with optimistic concurrency: an insert asserts the item does not exist yet, an
//!   overwrite asserts the item still holds what was loaded
//! - paginate queries and scans either eagerly or as lazy page sequences
//!
//! Requests use the legacy condition forms of the `2012-08-10` API (`KeyConditions`,
//! `QueryFilter`, `ScanFilter`, `Expected`, `AttributeUpdates`) and go through a
//! [`StoreClient`], one per named connection of a [`ClientRegistry`].
//!
//! ## Quick Example
//!
//! ```no_run
//! use dynamodb_orm::{
//!     ClientRegistry, ConnectionConfig, DEFAULT_CONNECTION, Error,
//!     common::schema::AttributeType,
//!     entity::{Binding, Table},
//! };
//!
//! struct Users;
//!
//! impl Table for Users {
//!     fn binding() -> Binding {
//!         Binding::define(
//!             "users",
//!             "id",
//!             None,
//!             [("id", AttributeType::S), ("age", AttributeType::N), ("tags", AttributeType::Ss)],
//!         )
//!     }
//! }
//!
//! # fn example() -> dynamodb_orm::Result<()> {
//! let mut registry = ClientRegistry::sdk();
//! registry.configure(
//!     DEFAULT_CONNECTION,
//!     ConnectionConfig {
//!         region: Some("us-west-2".to_string()),
//!         ..Default::default()
//!     },
//! );
//!
//! // Insert: fails if an item with this id already exists
//! let mut user = registry.factory_for::<Users>(DEFAULT_CONNECTION)?;
//! user.create([("id", "u1"), ("age", "20")]);
//! user.set_add("tags", "admin");
//! user.save(Default::default())?;
//!
//! // Read, modify, overwrite: fails if someone else changed the item meanwhile
//! let users = registry.factory_for::<Users>(DEFAULT_CONNECTION)?;
//! if let Some(mut user) = users.find_one("u1", None::<&str>, Default::default())? {
//!     user.set("age", 21);
//!     match user.save(Default::default()) {
//!         Err(error) if error.is_conditional_check_failed() => { /* reload and retry */ }
//!         other => {
//!             other?;
//!         }
//!     }
//! }
//! # Ok::<(), Error>(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Schema, values, marshaling, keys, conditions and expected values
//! - [`mod@read`] - Read requests (GetItem, Query, Scan, BatchGetItem) and pagination
//! - [`mod@write`] - Write requests (PutItem, UpdateItem, DeleteItem) and write options
//! - [`mod@client`] - The store client capability and its AWS SDK implementation
//! - [`mod@connection`] - Connection settings and the client registry
//! - [`mod@entity`] - Bindings and records
//! - [`mod@export`] - The legacy import/export line format
//! - [`mod@skeleton`] - Binding source generation for existing tables

pub mod client;

/// Common utilities for schemas, values, keys and conditions.
pub mod common;

pub mod connection;

pub mod entity;

/// Crate errors.
pub mod error;

pub mod export;

/// Read operations for retrieving items from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning entire tables
/// - Batch retrieving multiple items
pub mod read;

pub mod skeleton;

/// Write operations for modifying items in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating attributes with put, add and delete actions
/// - Deleting items by key
pub mod write;

pub use client::StoreClient;
pub use connection::{ClientRegistry, ConnectionConfig, DEFAULT_CONNECTION};
pub use entity::{Binding, Entity, Table};
pub use error::{Error, Result};
