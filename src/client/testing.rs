use crate::{
    client::StoreClient,
    error::Result,
    read::{get_item::GetItem, query::Query, scan::Scan},
    write::{delete_item::DeleteItem, put_item::PutItem, update_item::UpdateItem},
};

use aws_sdk_dynamodb::operation;
use std::{collections::VecDeque, sync::Mutex};

/// Request received by [`MockClient`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    GetItem(GetItem),
    PutItem(PutItem),
    UpdateItem(UpdateItem),
    DeleteItem(DeleteItem),
    Query(Query),
    Scan(Scan),
    BatchGetItem(operation::batch_get_item::BatchGetItemInput),
}

type Queue<T> = Mutex<VecDeque<Result<T>>>;

/// Scripted store client.
///
/// Records every request and answers with queued responses, one queue per operation.
/// An empty queue answers with an empty output.
#[derive(Default)]
pub(crate) struct MockClient {
    calls: Mutex<Vec<Call>>,
    get_item: Queue<operation::get_item::GetItemOutput>,
    put_item: Queue<operation::put_item::PutItemOutput>,
    update_item: Queue<operation::update_item::UpdateItemOutput>,
    delete_item: Queue<operation::delete_item::DeleteItemOutput>,
    query: Queue<operation::query::QueryOutput>,
    scan: Queue<operation::scan::ScanOutput>,
    batch_get_item: Queue<operation::batch_get_item::BatchGetItemOutput>,
}

fn pop<T>(queue: &Queue<T>, empty: impl FnOnce() -> T) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Ok(empty()))
}

impl MockClient {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub(crate) fn push_get_item(&self, response: Result<operation::get_item::GetItemOutput>) {
        self.get_item.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_put_item(&self, response: Result<operation::put_item::PutItemOutput>) {
        self.put_item.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_update_item(
        &self,
        response: Result<operation::update_item::UpdateItemOutput>,
    ) {
        self.update_item.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_query(&self, response: Result<operation::query::QueryOutput>) {
        self.query.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_scan(&self, response: Result<operation::scan::ScanOutput>) {
        self.scan.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_batch_get_item(
        &self,
        response: Result<operation::batch_get_item::BatchGetItemOutput>,
    ) {
        self.batch_get_item.lock().unwrap().push_back(response);
    }
}

impl StoreClient for MockClient {
    fn get_item(&self, get_item: GetItem) -> Result<operation::get_item::GetItemOutput> {
        self.record(Call::GetItem(get_item));
        pop(&self.get_item, || {
            operation::get_item::GetItemOutput::builder().build()
        })
    }

    fn put_item(&self, put_item: PutItem) -> Result<operation::put_item::PutItemOutput> {
        self.record(Call::PutItem(put_item));
        pop(&self.put_item, || {
            operation::put_item::PutItemOutput::builder().build()
        })
    }

    fn update_item(
        &self,
        update_item: UpdateItem,
    ) -> Result<operation::update_item::UpdateItemOutput> {
        self.record(Call::UpdateItem(update_item));
        pop(&self.update_item, || {
            operation::update_item::UpdateItemOutput::builder().build()
        })
    }

    fn delete_item(
        &self,
        delete_item: DeleteItem,
    ) -> Result<operation::delete_item::DeleteItemOutput> {
        self.record(Call::DeleteItem(delete_item));
        pop(&self.delete_item, || {
            operation::delete_item::DeleteItemOutput::builder().build()
        })
    }

    fn query(&self, query: Query) -> Result<operation::query::QueryOutput> {
        self.record(Call::Query(query));
        pop(&self.query, || operation::query::QueryOutput::builder().build())
    }

    fn scan(&self, scan: Scan) -> Result<operation::scan::ScanOutput> {
        self.record(Call::Scan(scan));
        pop(&self.scan, || operation::scan::ScanOutput::builder().build())
    }

    fn batch_get_item(
        &self,
        batch_get_item: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput> {
        self.record(Call::BatchGetItem(batch_get_item));
        pop(&self.batch_get_item, || {
            operation::batch_get_item::BatchGetItemOutput::builder().build()
        })
    }
}
