//! query-state - keeps typed filter, sort and pagination state in sync with a
//! URL query string.
//!
//! The URL is the only source of truth. [`QueryStateStore::read`] decodes the
//! navigator's current query string through a schema, and every mutator
//! computes the next query string and hands it back to the [`Navigator`].
//! Values equal to their default are left out of the URL.
//!
//! ```
//! use query_state::product_list::{product_list_defaults, product_list_schema, StaticOptions, OptionSource, PAGE};
//! use query_state::{MemoryNavigator, ParamBuilder, QueryStateStore, Update};
//!
//! let nav = MemoryNavigator::new("/products?page=abc&sort=desc");
//! let schema = product_list_schema(&ParamBuilder::new(), &StaticOptions::catalog().options());
//! let store = QueryStateStore::new(schema, product_list_defaults().unwrap(), &nav).unwrap();
//!
//! assert_eq!(store.read().value(PAGE).unwrap(), 1);
//!
//! store
//!     .set_many(
//!         &Update::new()
//!             .set("page", 1)
//!             .set("sort", "asc")
//!             .set("categories", vec!["books", "clothing"]),
//!     )
//!     .unwrap();
//! assert_eq!(nav.href(), "/products?categories=books%2Cclothing");
//! ```

pub mod error;
pub mod navigation;
pub mod options;
pub mod product_list;
pub mod store;
pub mod update;

pub use error::StoreError;
pub use navigation::{HistoryMode, MemoryNavigator, Navigator, Transition};
pub use options::StoreOptions;
pub use store::{FieldHandle, QueryStateStore};
pub use update::Update;

pub use query_state_codec as codec;
pub use query_state_codec::{
    ArrayFormat, DefaultValues, FieldCodec, Key, ParamBuilder, QueryState, RawParams, Schema,
    SchemaError,
};
