use crate::{
    client::StoreClient,
    common::WireItem,
    error::{Error, Result},
    read,
};

use aws_sdk_dynamodb::{operation, types};
use indexmap::IndexMap;
use std::collections;

/// Batch get item operation.
///
/// The store's per-request key ceiling is not enforced here, and unprocessed keys are left
/// in the output for the caller.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_orm::{client::StoreClient, read};
/// use indexmap::IndexMap;
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let batch_get = read::batch_get_item::BatchGetItem {
///     items: IndexMap::from([(
///         read::common::SingleReadArgs {
///             table_name: "users".to_string(),
///             ..Default::default()
///         },
///         vec![[("id".to_string(), AttributeValue::S("1".to_string()))].into()],
///     )]),
///     ..Default::default()
/// };
/// batch_get.send(client)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetItem {
    /// A map of read arguments to the keys to retrieve from that table.
    pub items: IndexMap<read::common::SingleReadArgs, Vec<WireItem>>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
}

impl TryFrom<BatchGetItem> for operation::batch_get_item::BatchGetItemInput {
    type Error = Error;

    fn try_from(batch_get_item: BatchGetItem) -> Result<Self> {
        let mut request_items = collections::HashMap::with_capacity(batch_get_item.items.len());
        for (args, keys) in batch_get_item.items {
            let keys_and_attributes = types::KeysAndAttributes::builder()
                .set_attributes_to_get(args.attributes_to_get)
                .set_consistent_read(args.consistent_read)
                .set_keys(Some(keys))
                .build()?;
            request_items.insert(args.table_name, keys_and_attributes);
        }
        let input = Self::builder()
            .set_request_items(Some(request_items))
            .set_return_consumed_capacity(batch_get_item.return_consumed_capacity)
            .build()?;
        Ok(input)
    }
}

impl BatchGetItem {
    /// Execute the batch get item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.batch_get_item", skip_all, err)
    )]
    pub fn send(
        self,
        client: &dyn StoreClient,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput> {
        let batch_get_item: operation::batch_get_item::BatchGetItemInput = self.try_into()?;
        client.batch_get_item(batch_get_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Call, MockClient};

    use rstest::rstest;

    fn key(id: &str) -> WireItem {
        WireItem::from([("id".to_string(), types::AttributeValue::S(id.to_string()))])
    }

    fn users_args(consistent_read: Option<bool>) -> read::common::SingleReadArgs {
        read::common::SingleReadArgs {
            consistent_read,
            table_name: "users".to_string(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::eventual(None)]
    #[case::consistent(Some(true))]
    fn test_batch_get_item_input_single_table(#[case] consistent_read: Option<bool>) {
        let batch_get_item = BatchGetItem {
            items: IndexMap::from([(users_args(consistent_read), vec![key("u1"), key("u2")])]),
            ..Default::default()
        };
        let input: operation::batch_get_item::BatchGetItemInput =
            batch_get_item.try_into().unwrap();
        let keys_and_attributes = &input.request_items().unwrap()["users"];
        assert_eq!(keys_and_attributes.keys(), &[key("u1"), key("u2")]);
        assert_eq!(keys_and_attributes.consistent_read(), consistent_read);
        assert!(keys_and_attributes.attributes_to_get().is_empty());
        assert_eq!(input.return_consumed_capacity(), None);
    }

    #[test]
    fn test_batch_get_item_input_several_tables() {
        let batch_get_item = BatchGetItem {
            items: IndexMap::from([
                (users_args(Some(true)), vec![key("u1")]),
                (
                    read::common::SingleReadArgs {
                        attributes_to_get: Some(vec!["id".to_string(), "at".to_string()]),
                        table_name: "events".to_string(),
                        ..Default::default()
                    },
                    vec![],
                ),
            ]),
            return_consumed_capacity: Some(types::ReturnConsumedCapacity::Indexes),
        };
        let input: operation::batch_get_item::BatchGetItemInput =
            batch_get_item.try_into().unwrap();
        let request_items = input.request_items().unwrap();
        assert_eq!(request_items.len(), 2);
        assert_eq!(
            request_items["events"].attributes_to_get(),
            &["id".to_string(), "at".to_string()]
        );
        assert!(request_items["events"].keys().is_empty());
        assert_eq!(
            input.return_consumed_capacity(),
            Some(&types::ReturnConsumedCapacity::Indexes)
        );
    }

    #[test]
    fn test_batch_get_item_send() {
        let client = MockClient::default();
        let batch_get_item = BatchGetItem {
            items: IndexMap::from([(users_args(Some(true)), vec![key("u1")])]),
            ..Default::default()
        };
        let expected: operation::batch_get_item::BatchGetItemInput =
            batch_get_item.clone().try_into().unwrap();
        batch_get_item.send(&client).unwrap();
        assert_eq!(client.calls(), vec![Call::BatchGetItem(expected)]);
    }
}
