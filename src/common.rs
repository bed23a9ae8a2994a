//! Common utilities for mapping records onto DynamoDB.
//!
//! This module provides the pieces shared by read and write operations:
//! schema type resolution, the plain value model, attribute marshaling,
//! key building, condition building and expected-value building.

/// Attribute marshaling between plain values and wire values.
pub mod codec;

/// Comparison conditions for key conditions and filters.
pub mod condition;

/// Expected previous state for conditional writes.
pub mod expected;

/// Key definitions and primary key values.
pub mod key;

/// Wire type tags and table schemas.
pub mod schema;

/// Plain attribute values.
pub mod value;

use aws_sdk_dynamodb::types;
use std::collections;

/// An item in its wire form, as sent to and received from the store.
pub type WireItem = collections::HashMap<String, types::AttributeValue>;
