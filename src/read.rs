//! Read operations for retrieving items from DynamoDB tables.
//!
//! Each operation is a plain value describing one request in the legacy
//! condition form (`KeyConditions`, `QueryFilter`, `ScanFilter`). Calling
//! `send` hands it to a [`StoreClient`](crate::client::StoreClient).

/// Batch get item operation for retrieving multiple items by primary key.
pub mod batch_get_item;

/// Common arguments, pages and pagination for read operations.
pub mod common;

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Query operation for retrieving items with key conditions.
pub mod query;

/// Scan operation for reading a whole table.
pub mod scan;
