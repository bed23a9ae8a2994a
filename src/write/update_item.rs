use crate::{client::StoreClient, common::WireItem, error::Result, write};

use aws_sdk_dynamodb::{operation, types};
use std::collections;

/// Update item operation using legacy attribute updates.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types::{AttributeAction, AttributeValue, AttributeValueUpdate};
/// use dynamodb_orm::{client::StoreClient, write};
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let update_item = write::update_item::UpdateItem {
///     key: [("id".to_string(), AttributeValue::S("1".to_string()))].into(),
///     attribute_updates: [(
///         "visits".to_string(),
///         AttributeValueUpdate::builder()
///             .action(AttributeAction::Add)
///             .value(AttributeValue::N("1".to_string()))
///             .build(),
///     )]
///     .into(),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// update_item.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItem {
    /// Per-attribute updates; key attributes must not appear here.
    pub attribute_updates: collections::HashMap<String, types::AttributeValueUpdate>,
    /// The primary key of the item to update.
    pub key: WireItem,
    /// Additional write operation arguments (table name, expected state, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl UpdateItem {
    /// Execute the update item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.update_item", skip_all, err)
    )]
    pub fn send(self, client: &dyn StoreClient) -> Result<operation::update_item::UpdateItemOutput> {
        client.update_item(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Call, MockClient};

    #[test]
    fn test_update_item_send() {
        let client = MockClient::default();
        let attributes = WireItem::from([(
            "visits".to_string(),
            types::AttributeValue::N("2".to_string()),
        )]);
        client.push_update_item(Ok(operation::update_item::UpdateItemOutput::builder()
            .set_attributes(Some(attributes.clone()))
            .build()));
        let update_item = UpdateItem {
            attribute_updates: collections::HashMap::from([(
                "visits".to_string(),
                types::AttributeValueUpdate::builder()
                    .action(types::AttributeAction::Add)
                    .value(types::AttributeValue::N("1".to_string()))
                    .build(),
            )]),
            key: WireItem::from([(
                "id".to_string(),
                types::AttributeValue::S("1".to_string()),
            )]),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllNew),
                table_name: "users".to_string(),
                ..Default::default()
            },
        };
        let output = update_item.clone().send(&client).unwrap();
        assert_eq!(output.attributes, Some(attributes));
        assert_eq!(client.calls(), vec![Call::UpdateItem(update_item)]);
    }
}
