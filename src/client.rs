//! Store client capability.
//!
//! Every request built by the mapper goes through [`StoreClient`]. The trait is
//! synchronous: each call is one blocking round trip, and any timeout or retry
//! policy belongs to the implementation.

/// Store client backed by the AWS SDK.
pub mod sdk;

#[cfg(test)]
pub(crate) mod testing;

use crate::{
    error::Result,
    read::{get_item::GetItem, query::Query, scan::Scan},
    write::{delete_item::DeleteItem, put_item::PutItem, update_item::UpdateItem},
};

use aws_sdk_dynamodb::operation;

/// Blocking access to a DynamoDB compatible store.
///
/// Implementations must report a failed `Expected` check on writes as
/// [`Error::ConditionalCheckFailed`](crate::Error::ConditionalCheckFailed) and any other
/// failure as [`Error::Store`](crate::Error::Store). A missing item is an output without
/// an item, never an error.
pub trait StoreClient: Send + Sync {
    /// Read one item by primary key.
    fn get_item(&self, get_item: GetItem) -> Result<operation::get_item::GetItemOutput>;

    /// Create or replace one item.
    fn put_item(&self, put_item: PutItem) -> Result<operation::put_item::PutItemOutput>;

    /// Modify attributes of one item.
    fn update_item(
        &self,
        update_item: UpdateItem,
    ) -> Result<operation::update_item::UpdateItemOutput>;

    /// Delete one item by primary key.
    fn delete_item(
        &self,
        delete_item: DeleteItem,
    ) -> Result<operation::delete_item::DeleteItemOutput>;

    /// Fetch one page of a query.
    fn query(&self, query: Query) -> Result<operation::query::QueryOutput>;

    /// Fetch one page of a scan.
    fn scan(&self, scan: Scan) -> Result<operation::scan::ScanOutput>;

    /// Read several items by primary key in one request.
    fn batch_get_item(
        &self,
        batch_get_item: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput>;
}
