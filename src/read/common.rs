use crate::{common::WireItem, error::Result};

use aws_sdk_dynamodb::{operation, types};

/// Arguments for single-item read operations (GetItem, BatchGetItem).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SingleReadArgs {
    /// Which attributes to retrieve; all attributes when `None`.
    pub attributes_to_get: Option<Vec<String>>,
    /// Whether to use a consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub table_name: String,
}

/// Arguments for multiple-item read operations (Query, Scan).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadArgs {
    /// Whether to use a consistent read.
    pub consistent_read: Option<bool>,
    /// The exclusive start key for pagination.
    ///
    /// Typically obtained from the `last_evaluated_key` of the previous page.
    pub exclusive_start_key: Option<WireItem>,
    /// The name of a global secondary index or local secondary index to read.
    pub index_name: Option<String>,
    /// The maximum number of items to evaluate in one page.
    pub limit: Option<i32>,
    /// Which attributes to return.
    pub select: Option<types::Select>,
    /// The name of the table to read from.
    pub table_name: String,
}

/// One page of a query or scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Items of the page, in wire form.
    pub items: Vec<WireItem>,
    /// Number of items after filtering.
    pub count: i32,
    /// Number of items evaluated before filtering.
    pub scanned_count: i32,
    /// Cursor to resume from; `None` on the last page.
    pub last_evaluated_key: Option<WireItem>,
    /// Capacity consumed by the page.
    pub consumed_capacity: Option<types::ConsumedCapacity>,
}

impl From<operation::query::QueryOutput> for Page {
    fn from(output: operation::query::QueryOutput) -> Self {
        Self {
            items: output.items.unwrap_or_default(),
            count: output.count,
            scanned_count: output.scanned_count,
            last_evaluated_key: output.last_evaluated_key.filter(|key| !key.is_empty()),
            consumed_capacity: output.consumed_capacity,
        }
    }
}

impl From<operation::scan::ScanOutput> for Page {
    fn from(output: operation::scan::ScanOutput) -> Self {
        Self {
            items: output.items.unwrap_or_default(),
            count: output.count,
            scanned_count: output.scanned_count,
            last_evaluated_key: output.last_evaluated_key.filter(|key| !key.is_empty()),
            consumed_capacity: output.consumed_capacity,
        }
    }
}

/// Lazy sequence of pages.
///
/// `fetch` is called with the cursor of the previous page until a page comes back without
/// one. The sequence ends after the first error.
pub struct Pages<F> {
    cursor: Option<WireItem>,
    done: bool,
    fetch: F,
}

impl<F: FnMut(Option<WireItem>) -> Result<Page>> Pages<F> {
    /// Pages starting at `cursor`, or at the beginning when `None`.
    pub fn new(cursor: Option<WireItem>, fetch: F) -> Self {
        Self {
            cursor,
            done: false,
            fetch,
        }
    }
}

impl<F: FnMut(Option<WireItem>) -> Result<Page>> Iterator for Pages<F> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let page = (self.fetch)(self.cursor.take());
        match &page {
            Ok(Page {
                last_evaluated_key: Some(key),
                ..
            }) => self.cursor = Some(key.clone()),
            _ => self.done = true,
        }
        Some(page)
    }
}

/// Drain pages into a single page holding every item.
///
/// Counts are summed and consumed capacity aggregated; the result has no cursor.
pub fn collect_pages(pages: impl Iterator<Item = Result<Page>>) -> Result<Page> {
    let mut items = Vec::new();
    let mut count = 0;
    let mut scanned_count = 0;
    let mut capacities = Vec::new();
    for page in pages {
        let page = page?;
        items.extend(page.items);
        count += page.count;
        scanned_count += page.scanned_count;
        if let Some(capacity) = page.consumed_capacity {
            capacities.push(capacity);
        }
    }
    let consumed_capacity = (!capacities.is_empty()).then(|| aggregate_capacity(capacities));
    Ok(Page {
        items,
        count,
        scanned_count,
        last_evaluated_key: None,
        consumed_capacity,
    })
}

pub(crate) fn aggregate_capacity(
    capacities: Vec<types::ConsumedCapacity>,
) -> types::ConsumedCapacity {
    let (cap, read, write, table) = capacities.into_iter().fold(
        (0.0, 0.0, 0.0, None),
        |(cap, read, write, table), capacity| {
            (
                cap + capacity.capacity_units.unwrap_or(0.0),
                read + capacity.read_capacity_units.unwrap_or(0.0),
                write + capacity.write_capacity_units.unwrap_or(0.0),
                table.or(capacity.table_name),
            )
        },
    );
    types::ConsumedCapacity::builder()
        .set_table_name(table)
        .set_capacity_units(Some(cap))
        .set_read_capacity_units(Some(read))
        .set_write_capacity_units(Some(write))
        .build()
}

/// apply common single read operation settings to a builder
#[macro_export]
macro_rules! apply_single_read_operation {
    ($builder:expr, $single_read_args:expr) => {
        $builder
            .set_attributes_to_get($single_read_args.attributes_to_get)
            .set_consistent_read($single_read_args.consistent_read)
            .table_name($single_read_args.table_name)
    };
}

/// apply common multiple read operation settings to a builder
#[macro_export]
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $multiple_read_args:expr) => {
        $builder
            .set_consistent_read($multiple_read_args.consistent_read)
            .set_exclusive_start_key($multiple_read_args.exclusive_start_key)
            .set_index_name($multiple_read_args.index_name)
            .set_limit($multiple_read_args.limit)
            .set_select($multiple_read_args.select)
            .table_name($multiple_read_args.table_name)
    };
}
