//! Write operations for modifying items in DynamoDB tables.
//!
//! Writes carry their optimistic concurrency check in the legacy `Expected`
//! form; a failed expectation surfaces as
//! [`Error::ConditionalCheckFailed`](crate::Error::ConditionalCheckFailed).

/// Common arguments and options for write operations.
pub mod common;

/// Delete item operation for removing an item by primary key.
pub mod delete_item;

/// Put item operation for creating or replacing an item.
pub mod put_item;

/// Update item operation for modifying attributes of an item.
pub mod update_item;
