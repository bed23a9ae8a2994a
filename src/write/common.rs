use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::collections;

/// Arguments common to all write operations (Put, Update, Delete).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Expected previous state of the item.
    ///
    /// If any expectation does not hold, the store rejects the write with a conditional check
    /// failure.
    pub expected: Option<collections::HashMap<String, types::ExpectedAttributeValue>>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    /// Which item attributes to return in the response.
    pub return_values: Option<types::ReturnValue>,
    /// The name of the table to write to.
    pub table_name: String,
}

/// Options of a record write.
///
/// ```rust
/// use dynamodb_orm::write::common::WriteOptions;
///
/// let options = WriteOptions {
///     force_update: true,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteOptions {
    /// Skip the optimistic concurrency check of `save`.
    pub force_update: bool,
    /// Existence assertions per attribute, merged into the expected state.
    pub exists: IndexMap<String, bool>,
    /// Update action per attribute; `PUT` for attributes not listed.
    pub actions: IndexMap<String, types::AttributeAction>,
    /// Which item attributes to return in the response.
    pub return_values: Option<types::ReturnValue>,
    /// Capacity reporting; `TOTAL` when `None`.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Item collection metrics; `SIZE` when `None`.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
}

impl WriteOptions {
    /// Write arguments for `table_name`, with the record write defaults applied.
    pub(crate) fn write_args(
        &self,
        table_name: &str,
        expected: Option<collections::HashMap<String, types::ExpectedAttributeValue>>,
        default_return_values: Option<types::ReturnValue>,
    ) -> WriteArgs {
        WriteArgs {
            expected,
            return_consumed_capacity: Some(
                self.return_consumed_capacity
                    .clone()
                    .unwrap_or(types::ReturnConsumedCapacity::Total),
            ),
            return_item_collection_metrics: Some(
                self.return_item_collection_metrics
                    .clone()
                    .unwrap_or(types::ReturnItemCollectionMetrics::Size),
            ),
            return_values: self.return_values.clone().or(default_return_values),
            table_name: table_name.to_string(),
        }
    }
}

/// apply common write operation settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_args:expr) => {
        $builder
            .set_expected($write_args.expected)
            .set_return_consumed_capacity($write_args.return_consumed_capacity)
            .set_return_item_collection_metrics($write_args.return_item_collection_metrics)
            .set_return_values($write_args.return_values)
            .table_name($write_args.table_name)
    };
}
