//! Connection settings and the client registry.

use crate::{
    client::{StoreClient, sdk::SdkStoreClient},
    entity::{Binding, Entity, Table},
    error::{Error, Result},
};

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::config::Credentials;
use indexmap::IndexMap;
use serde::Deserialize;
use std::{
    collections, fmt,
    sync::{Arc, Mutex, PoisonError},
};

/// Name of the connection used when none is given.
pub const DEFAULT_CONNECTION: &str = "default";

/// The only API version spoken by the store clients.
pub const API_VERSION: &str = "2012-08-10";

const CREDENTIALS_PROVIDER: &str = "dynamodb-orm";

/// Settings of one named connection.
///
/// Unset credentials, profile and region fall back to the environment.
///
/// ```rust
/// use dynamodb_orm::connection::ConnectionConfig;
///
/// let config: ConnectionConfig = serde_json::from_str(
///     r#"{"region": "ap-northeast-1", "base_url": "localhost:8000", "scheme": "http"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.endpoint_url().as_deref(), Some("http://localhost:8000"));
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Access key id.
    pub key: Option<String>,
    /// Secret access key.
    pub secret: Option<String>,
    /// Named profile of the shared credentials file.
    pub profile: Option<String>,
    /// Region, e.g. `us-west-2`.
    pub region: Option<String>,
    /// Endpoint override, e.g. a local store for development.
    pub endpoint: Option<String>,
    /// Endpoint override taking precedence over `endpoint`.
    pub base_url: Option<String>,
    /// Scheme applied to an endpoint given without one.
    pub scheme: String,
    /// API version.
    pub version: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            key: None,
            secret: None,
            profile: None,
            region: None,
            endpoint: None,
            base_url: None,
            scheme: "https".to_string(),
            version: API_VERSION.to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Check that the settings can be served.
    pub fn validate(&self) -> Result<()> {
        if self.version != API_VERSION {
            return Err(Error::UnsupportedApiVersion(self.version.clone()));
        }
        Ok(())
    }

    /// The endpoint override with its scheme; `base_url` wins over `endpoint`.
    pub fn endpoint_url(&self) -> Option<String> {
        [&self.base_url, &self.endpoint]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|endpoint| !endpoint.is_empty())
            .map(|endpoint| {
                if endpoint.contains("://") {
                    endpoint.to_string()
                } else {
                    format!("{}://{endpoint}", self.scheme)
                }
            })
    }

    /// Load the SDK configuration for these settings.
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let (Some(key), Some(secret)) = (&self.key, &self.secret) {
            loader = loader.credentials_provider(Credentials::new(
                key,
                secret,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = self.endpoint_url() {
            loader = loader.endpoint_url(endpoint);
        }
        loader.load().await
    }
}

type Connector = dyn Fn(&ConnectionConfig) -> Result<Arc<dyn StoreClient>> + Send + Sync;

/// Store clients by connection name.
///
/// A client is built on first use of its connection name and shared afterwards. Building
/// happens under the registry lock, so concurrent first uses build a single client.
///
/// ```rust,no_run
/// use dynamodb_orm::connection::{ClientRegistry, ConnectionConfig, DEFAULT_CONNECTION};
/// use dynamodb_orm::entity::Binding;
/// use dynamodb_orm::common::schema::AttributeType;
/// use std::sync::Arc;
///
/// # fn example() -> dynamodb_orm::Result<()> {
/// let mut registry = ClientRegistry::sdk();
/// registry.configure(
///     DEFAULT_CONNECTION,
///     ConnectionConfig {
///         region: Some("us-west-2".to_string()),
///         ..Default::default()
///     },
/// );
/// let binding = Arc::new(Binding::define("users", "id", None, [("id", AttributeType::S)]));
/// let user = registry.factory(binding, DEFAULT_CONNECTION)?.find_one("u1", None::<&str>, Default::default())?;
/// # Ok(())
/// # }
/// ```
pub struct ClientRegistry {
    clients: Mutex<collections::HashMap<String, Arc<dyn StoreClient>>>,
    configs: IndexMap<String, ConnectionConfig>,
    connector: Box<Connector>,
}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("configs", &self.configs)
            .finish_non_exhaustive()
    }
}

impl ClientRegistry {
    /// Registry building clients with `connector`.
    pub fn new(
        connector: impl Fn(&ConnectionConfig) -> Result<Arc<dyn StoreClient>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            clients: Mutex::new(collections::HashMap::new()),
            configs: IndexMap::new(),
            connector: Box::new(connector),
        }
    }

    /// Registry building [`SdkStoreClient`]s.
    pub fn sdk() -> Self {
        Self::new(|config| {
            let client: Arc<dyn StoreClient> = Arc::new(SdkStoreClient::connect(config)?);
            Ok(client)
        })
    }

    /// Set the settings of a connection, dropping any client already built for it.
    pub fn configure(&mut self, name: impl Into<String>, config: ConnectionConfig) -> &mut Self {
        let name = name.into();
        self.clients
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);
        self.configs.insert(name, config);
        self
    }

    /// Settings of a connection, if configured.
    pub fn config(&self, name: &str) -> Option<&ConnectionConfig> {
        self.configs.get(name)
    }

    /// Use a ready client for a connection name.
    pub fn register_client(&self, name: impl Into<String>, client: Arc<dyn StoreClient>) {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), client);
    }

    /// The client of a connection, built on first use.
    ///
    /// A connection without settings uses [`ConnectionConfig::default`].
    pub fn client(&self, name: &str) -> Result<Arc<dyn StoreClient>> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(name) {
            return Ok(Arc::clone(client));
        }
        let default_config = ConnectionConfig::default();
        let config = self.configs.get(name).unwrap_or(&default_config);
        let client = (self.connector)(config)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(connection = name, "store client created");
        clients.insert(name.to_string(), Arc::clone(&client));
        Ok(client)
    }

    /// A fresh record bound to `binding` on connection `name`.
    pub fn factory(&self, binding: Arc<Binding>, name: &str) -> Result<Entity> {
        let client = self.client(name)?;
        Ok(Entity::new(binding, client, name))
    }

    /// A fresh record of the table type `T` on connection `name`.
    pub fn factory_for<T: Table>(&self, name: &str) -> Result<Entity> {
        self.factory(Arc::new(T::binding()), name)
    }
}
