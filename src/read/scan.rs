use crate::{client::StoreClient, common::WireItem, error::Result, read};

use aws_sdk_dynamodb::{operation, types};
use std::collections;

/// Scan operation using a legacy scan filter.
///
/// ```rust,no_run
/// use dynamodb_orm::{client::StoreClient, read};
///
/// # fn example(client: &dyn StoreClient) -> dynamodb_orm::Result<()> {
/// let scan = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// for page in scan.pages(client) {
///     println!("{}", page?.count);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Additional read operation arguments (table name, index, limit, cursor, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Conditions every returned item must satisfy.
    pub scan_filter: Option<collections::HashMap<String, types::Condition>>,
}

impl Scan {
    /// Execute the scan operation, returning a single page.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orm.scan_page", skip_all, err)
    )]
    pub fn send(self, client: &dyn StoreClient) -> Result<operation::scan::ScanOutput> {
        client.scan(self)
    }

    /// Lazily fetch every page, starting at the configured exclusive start key.
    pub fn pages(self, client: &dyn StoreClient) -> impl Iterator<Item = Result<read::common::Page>> {
        let cursor = self.multiple_read_args.exclusive_start_key.clone();
        read::common::Pages::new(cursor, move |exclusive_start_key: Option<WireItem>| {
            let mut scan = self.clone();
            scan.multiple_read_args.exclusive_start_key = exclusive_start_key;
            scan.send(client).map(read::common::Page::from)
        })
    }
}

/// Options of a scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanOptions {
    /// Whether to use a consistent read.
    pub consistent_read: Option<bool>,
    /// Secondary index to scan instead of the table.
    pub index_name: Option<String>,
    /// Page size; every page is still fetched.
    pub limit: Option<i32>,
    /// Capacity reporting.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Conditions every returned item must satisfy; replaced by filter clauses when any are set.
    pub scan_filter: Option<collections::HashMap<String, types::Condition>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Call, MockClient};

    #[test]
    fn test_scan_send_single_page() {
        let client = MockClient::default();
        let scan = Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                limit: Some(5),
                table_name: "users".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let output = scan.clone().send(&client).unwrap();
        assert_eq!(output.count, 0);
        assert_eq!(client.calls(), vec![Call::Scan(scan)]);
    }

    #[test]
    fn test_scan_pages_stop_on_error() {
        let client = MockClient::default();
        client.push_scan(Err(crate::Error::Store("throttled".into())));
        let scan = Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let error = read::common::collect_pages(scan.pages(&client)).unwrap_err();
        assert!(matches!(error, crate::Error::Store(_)));
        assert_eq!(client.calls().len(), 1);
    }
}
