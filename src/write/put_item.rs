use crate::{client::StoreClient, common::WireItem, error::Result, write};

use aws_sdk_dynamodb::operation;

/// Put item operation, replacing the whole item.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_orm::{client::StoreClient, write};
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let put_item = write::put_item::PutItem {
///     item: [
///         ("id".to_string(), AttributeValue::S("1".to_string())),
///         ("name".to_string(), AttributeValue::S("John".to_string())),
///     ]
///     .into(),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// put_item.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem {
    /// The item to put into the table.
    pub item: WireItem,
    /// Additional write operation arguments (table name, expected state, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl PutItem {
    /// Execute the put item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.put_item", skip_all, err)
    )]
    pub fn send(self, client: &dyn StoreClient) -> Result<operation::put_item::PutItemOutput> {
        client.put_item(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Call, MockClient};

    use aws_sdk_dynamodb::types;
    use std::collections;

    #[test]
    fn test_put_item_conditional_check_failed() {
        let client = MockClient::default();
        client.push_put_item(Err(crate::Error::ConditionalCheckFailed(
            "expected value mismatch".into(),
        )));
        let put_item = PutItem {
            item: WireItem::from([(
                "id".to_string(),
                types::AttributeValue::S("1".to_string()),
            )]),
            write_args: write::common::WriteArgs {
                expected: Some(collections::HashMap::from([(
                    "id".to_string(),
                    types::ExpectedAttributeValue::builder()
                        .exists(false)
                        .build(),
                )])),
                table_name: "users".to_string(),
                ..Default::default()
            },
        };
        let error = put_item.clone().send(&client).unwrap_err();
        assert!(error.is_conditional_check_failed());
        assert_eq!(client.calls(), vec![Call::PutItem(put_item)]);
    }
}
