use aws_sdk_dynamodb::error::BuildError;
use std::error;

/// Boxed error coming from the store client.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the mapper.
///
/// Configuration errors are raised before any store call and are never worth retrying.
/// [`Error::ConditionalCheckFailed`] is kept apart from [`Error::Store`] so that callers can
/// reload and merge when an optimistic write loses a race.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A range key value was supplied to a binding without a range key.
    #[error("range key is not defined for table `{table}`")]
    RangeKeyNotDefined {
        /// The table of the binding.
        table: String,
    },
    /// A range-keyed binding received a key without its range value.
    #[error("table `{table}` requires a range key value")]
    MissingRangeValue {
        /// The table of the binding.
        table: String,
    },
    /// An operator token is not part of the alias table (strict mode only).
    #[error("unknown comparison operator `{0}`")]
    UnknownOperator(String),
    /// A wire type tag is not one of `S`, `N`, `B`, `SS`, `NS`, `BS`.
    #[error("invalid attribute type `{0}`")]
    InvalidAttributeType(String),
    /// The connection asks for an API version the store client does not speak.
    #[error("unsupported api version `{0}`")]
    UnsupportedApiVersion(String),
    /// The blocking runtime backing the store client could not be started.
    #[error("store client runtime error: {0}")]
    Runtime(String),
    /// The store rejected a write because its expected state did not hold.
    #[error("conditional check failed")]
    ConditionalCheckFailed(#[source] BoxError),
    /// Any other failure reported by the store client.
    #[error("store request failed")]
    Store(#[source] BoxError),
    /// A request structure could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// A typed model could not be converted to or from an item.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
}

impl Error {
    /// Whether the error comes from the binding or the call site rather than from the store.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::RangeKeyNotDefined { .. }
                | Self::MissingRangeValue { .. }
                | Self::UnknownOperator(_)
                | Self::InvalidAttributeType(_)
                | Self::UnsupportedApiVersion(_)
        )
    }

    /// Whether the store rejected a conditional write.
    pub fn is_conditional_check_failed(&self) -> bool {
        matches!(self, Self::ConditionalCheckFailed(_))
    }
}
