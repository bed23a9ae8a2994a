use crate::{
    client::StoreClient,
    connection::ConnectionConfig,
    error::{Error, Result},
    read::{get_item::GetItem, query::Query, scan::Scan},
    write::{delete_item::DeleteItem, put_item::PutItem, update_item::UpdateItem},
};

use aws_sdk_dynamodb::{Client, error, operation};
use std::{error as std_error, fmt, future::Future, sync::Arc, thread};
use tokio::runtime::Runtime;

/// [`StoreClient`] over the AWS SDK.
///
/// The SDK is asynchronous; the client owns a tokio runtime and blocks on it for every
/// call, so it must not be used from inside another tokio runtime.
pub struct SdkStoreClient {
    client: Client,
    /// Runtime driving the SDK futures; taken on drop.
    runtime: Option<Arc<Runtime>>,
}

impl Drop for SdkStoreClient {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let _ = thread::spawn(move || drop(runtime));
        }
    }
}

impl fmt::Debug for SdkStoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkStoreClient")
            .field("closed", &self.runtime.is_none())
            .finish_non_exhaustive()
    }
}

fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| Error::Runtime(error.to_string()))
}

/// Split SDK errors into conditional check failures and everything else.
fn classify<E, R>(error: error::SdkError<E, R>, is_conditional: impl Fn(&E) -> bool) -> Error
where
    E: std_error::Error + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    if error.as_service_error().is_some_and(is_conditional) {
        Error::ConditionalCheckFailed(Box::new(error))
    } else {
        Error::Store(Box::new(error))
    }
}

impl SdkStoreClient {
    /// Connect with the given connection settings.
    ///
    /// Credentials, region and profile fall back to the environment when not set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedApiVersion`] for an API version other than `2012-08-10`
    /// and [`Error::Runtime`] when the runtime cannot be started.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let runtime = build_runtime()?;
        let shared_config = runtime.block_on(config.load());
        let client = Client::new(&shared_config);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            region = ?shared_config.region(),
            endpoint = ?config.endpoint_url(),
            "connected dynamodb client"
        );
        Ok(Self {
            client,
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client) -> Result<Self> {
        let runtime = build_runtime()?;
        Ok(Self {
            client,
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// The underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| Error::Runtime("store client closed".to_string()))?;
        Ok(runtime.block_on(future))
    }
}

impl StoreClient for SdkStoreClient {
    fn get_item(&self, get_item: GetItem) -> Result<operation::get_item::GetItemOutput> {
        let builder = self
            .client
            .get_item()
            .set_key(Some(get_item.key))
            .set_return_consumed_capacity(get_item.return_consumed_capacity);
        let builder = crate::apply_single_read_operation!(builder, get_item.single_read_args);
        self.block_on(builder.send())?
            .map_err(|error| classify(error, |_| false))
    }

    fn put_item(&self, put_item: PutItem) -> Result<operation::put_item::PutItemOutput> {
        let builder = self.client.put_item().set_item(Some(put_item.item));
        let builder = crate::apply_write_operation!(builder, put_item.write_args);
        self.block_on(builder.send())?.map_err(|error| {
            classify(
                error,
                operation::put_item::PutItemError::is_conditional_check_failed_exception,
            )
        })
    }

    fn update_item(
        &self,
        update_item: UpdateItem,
    ) -> Result<operation::update_item::UpdateItemOutput> {
        let builder = self
            .client
            .update_item()
            .set_key(Some(update_item.key))
            .set_attribute_updates(
                (!update_item.attribute_updates.is_empty()).then_some(update_item.attribute_updates),
            );
        let builder = crate::apply_write_operation!(builder, update_item.write_args);
        self.block_on(builder.send())?.map_err(|error| {
            classify(
                error,
                operation::update_item::UpdateItemError::is_conditional_check_failed_exception,
            )
        })
    }

    fn delete_item(
        &self,
        delete_item: DeleteItem,
    ) -> Result<operation::delete_item::DeleteItemOutput> {
        let builder = self.client.delete_item().set_key(Some(delete_item.key));
        let builder = crate::apply_write_operation!(builder, delete_item.write_args);
        self.block_on(builder.send())?.map_err(|error| {
            classify(
                error,
                operation::delete_item::DeleteItemError::is_conditional_check_failed_exception,
            )
        })
    }

    fn query(&self, query: Query) -> Result<operation::query::QueryOutput> {
        let builder = self
            .client
            .query()
            .set_key_conditions(Some(query.key_conditions))
            .set_query_filter(query.query_filter)
            .set_return_consumed_capacity(query.return_consumed_capacity)
            .set_scan_index_forward(query.scan_index_forward);
        let builder = crate::apply_multiple_read_operation!(builder, query.multiple_read_args);
        self.block_on(builder.send())?
            .map_err(|error| classify(error, |_| false))
    }

    fn scan(&self, scan: Scan) -> Result<operation::scan::ScanOutput> {
        let builder = self
            .client
            .scan()
            .set_scan_filter(scan.scan_filter)
            .set_return_consumed_capacity(scan.return_consumed_capacity);
        let builder = crate::apply_multiple_read_operation!(builder, scan.multiple_read_args);
        self.block_on(builder.send())?
            .map_err(|error| classify(error, |_| false))
    }

    fn batch_get_item(
        &self,
        batch_get_item: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput> {
        let builder = self
            .client
            .batch_get_item()
            .set_request_items(batch_get_item.request_items)
            .set_return_consumed_capacity(batch_get_item.return_consumed_capacity);
        self.block_on(builder.send())?
            .map_err(|error| classify(error, |_| false))
    }
}
