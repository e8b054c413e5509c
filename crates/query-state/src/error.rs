use query_state_codec::{EncodeError, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("`{0}` is not a field of the schema")]
    UnknownField(String),
    #[error("cannot write field `{field}`: {source}")]
    Encode { field: String, source: EncodeError },
    #[error("update must serialize to an object")]
    NotAnObject,
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
