use crate::{client::StoreClient, common::WireItem, error::Result, write};

use aws_sdk_dynamodb::operation;

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
/// use dynamodb_orm::{client::StoreClient, write};
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let delete_item = write::delete_item::DeleteItem {
///     key: [("id".to_string(), AttributeValue::S("1".to_string()))].into(),
///     write_args: write::common::WriteArgs {
///         return_values: Some(ReturnValue::AllOld),
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// let old = delete_item.send(client)?.attributes;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItem {
    /// The primary key of the item to delete.
    pub key: WireItem,
    /// Additional write operation arguments (table name, expected state, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl DeleteItem {
    /// Execute the delete item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.delete_item", skip_all, err)
    )]
    pub fn send(self, client: &dyn StoreClient) -> Result<operation::delete_item::DeleteItemOutput> {
        client.delete_item(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Call, MockClient};

    use aws_sdk_dynamodb::types;

    #[test]
    fn test_delete_item_send() {
        let client = MockClient::default();
        let delete_item = DeleteItem {
            key: WireItem::from([(
                "id".to_string(),
                types::AttributeValue::S("1".to_string()),
            )]),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllOld),
                table_name: "users".to_string(),
                ..Default::default()
            },
        };
        let output = delete_item.clone().send(&client).unwrap();
        assert_eq!(output.attributes, None);
        assert_eq!(client.calls(), vec![Call::DeleteItem(delete_item)]);
    }
}
