use crate::{client::StoreClient, common::WireItem, error::Result, read};

use aws_sdk_dynamodb::{operation, types};

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_orm::{client::StoreClient, read};
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let get_item = read::get_item::GetItem {
///     key: [("id".to_string(), AttributeValue::S("1".to_string()))].into(),
///     single_read_args: read::common::SingleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// get_item.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// The primary key of the item to retrieve.
    pub key: WireItem,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Additional read operation arguments (table name, consistent read, attributes to get).
    pub single_read_args: read::common::SingleReadArgs,
}

impl GetItem {
    /// Execute the get item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.get_item", skip_all, err)
    )]
    pub fn send(self, client: &dyn StoreClient) -> Result<operation::get_item::GetItemOutput> {
        client.get_item(self)
    }
}

/// Options of a point lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetOptions {
    /// Which attributes to retrieve; all attributes when `None`.
    pub attributes_to_get: Option<Vec<String>>,
    /// Capacity reporting; `TOTAL` when `None`.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
}
