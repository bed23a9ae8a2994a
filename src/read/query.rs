use crate::{client::StoreClient, common::WireItem, error::Result, read};

use aws_sdk_dynamodb::{operation, types};
use std::collections;

/// Query operation using legacy key conditions.
///
/// ```rust,no_run
/// use dynamodb_orm::{client::StoreClient, common::{condition::Clauses, schema::Schema}, read};
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let mut clauses = Clauses::default();
/// clauses.equals("id", "1");
/// let query = read::query::Query {
///     key_conditions: clauses.build(&Schema::default())?,
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let items = read::common::collect_pages(query.pages(client))?.items;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    /// Conditions on the partition key and, optionally, the sort key.
    pub key_conditions: collections::HashMap<String, types::Condition>,
    /// Additional read operation arguments (table name, index, limit, cursor, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs,
    /// Conditions applied to the items after key evaluation.
    pub query_filter: Option<collections::HashMap<String, types::Condition>>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to scan the index forward (ascending) or backward (descending).
    pub scan_index_forward: Option<bool>,
}

impl Query {
    /// Execute the query operation, returning a single page.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.query_page", skip_all, err)
    )]
    pub fn send(self, client: &dyn StoreClient) -> Result<operation::query::QueryOutput> {
        client.query(self)
    }

    /// Lazily fetch every page, starting at the configured exclusive start key.
    pub fn pages(self, client: &dyn StoreClient) -> impl Iterator<Item = Result<read::common::Page>> {
        let cursor = self.multiple_read_args.exclusive_start_key.clone();
        read::common::Pages::new(cursor, move |exclusive_start_key: Option<WireItem>| {
            let mut query = self.clone();
            query.multiple_read_args.exclusive_start_key = exclusive_start_key;
            query.send(client).map(read::common::Page::from)
        })
    }
}

/// Options of a query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Conditions applied after key evaluation; replaced by filter clauses when any are set.
    pub query_filter: Option<collections::HashMap<String, types::Condition>>,
    /// Sort order on the range key; ascending when `None`.
    pub scan_index_forward: Option<bool>,
}
