//! query-state-codec - typed field codecs for URL query-string state.
//!
//! A [`Schema`] maps field names to [`FieldCodec`]s built with a
//! [`ParamBuilder`]. Decoding [`RawParams`] through a schema yields a
//! [`QueryState`] in which every field holds either its decoded value or its
//! fallback:
//!
//! ```
//! use query_state_codec::{ParamBuilder, RawParams, Schema};
//!
//! let p = ParamBuilder::new();
//! let schema = Schema::new()
//!     .field("page", p.page().with_fallback(1))
//!     .field("instock", p.boolean().with_fallback(false));
//!
//! let state = schema.decode(&RawParams::parse("page=abc&instock=true")).unwrap();
//! assert_eq!(state.get("page"), Some(&serde_json::json!(1)));
//! assert_eq!(state.get("instock"), Some(&serde_json::json!(true)));
//! ```

pub mod builder;
pub mod codec;
pub mod constants;
pub mod error;
pub mod field;
pub mod params;
pub mod schema;
pub mod state;

pub use builder::ParamBuilder;
pub use codec::{ArrayFormat, Codec, CodecNode};
pub use constants::InvalidReason;
pub use error::{EncodeError, FieldError, Invalid, SchemaError};
pub use field::FieldCodec;
pub use params::{join_href, split_href, RawParams};
pub use schema::{DecodeReport, DefaultValues, Schema};
pub use state::{Key, QueryState};
