//! Product list page filters: page, sort, categories, stock and rating.
//!
//! The allowed category values are not static. [`product_list_schema`] is a
//! factory over the current option snapshot; rebuild the schema and hand it
//! to [`QueryStateStore::replace_schema`](crate::QueryStateStore::replace_schema)
//! when the snapshot changes.

use query_state_codec::{DefaultValues, Key, ParamBuilder, Schema, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One selectable option of a dynamic list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Supplies the current category options.
pub trait OptionSource {
    fn options(&self) -> Vec<CategoryOption>;
}

/// A fixed, in-memory option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticOptions(pub Vec<CategoryOption>);

impl OptionSource for StaticOptions {
    fn options(&self) -> Vec<CategoryOption> {
        self.0.clone()
    }
}

impl StaticOptions {
    /// The catalog shipped with the product list page.
    pub fn catalog() -> Self {
        Self(vec![
            CategoryOption::new("electronics", "Electronics"),
            CategoryOption::new("books", "Books"),
            CategoryOption::new("clothing", "Clothing"),
        ])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Asc, SortOrder::Desc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Desc => "Descending",
        }
    }
}

pub const PAGE: Key<u64> = Key::new("page");
pub const SORT: Key<SortOrder> = Key::new("sort");
pub const CATEGORIES: Key<Vec<String>> = Key::new("categories");
pub const INSTOCK: Key<bool> = Key::new("instock");
pub const RATING: Key<Option<u8>> = Key::new("rating");

/// Typed view of the product list query state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListQuery {
    pub page: u64,
    pub sort: SortOrder,
    pub categories: Vec<String>,
    pub instock: bool,
    pub rating: Option<u8>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort: SortOrder::Asc,
            categories: Vec::new(),
            instock: false,
            rating: None,
        }
    }
}

/// Builds the schema for the given category snapshot.
pub fn product_list_schema(p: &ParamBuilder, categories: &[CategoryOption]) -> Schema {
    let d = ProductListQuery::default();
    Schema::new()
        .field(PAGE.name(), p.page().with_fallback(d.page))
        .field(
            SORT.name(),
            p.one_of(SortOrder::ALL.map(SortOrder::as_str))
                .with_fallback(d.sort.as_str()),
        )
        .field(
            CATEGORIES.name(),
            p.array_of(categories.iter().map(|c| c.value.as_str()))
                .with_fallback(d.categories),
        )
        .field(INSTOCK.name(), p.boolean().with_fallback(d.instock))
        .field(
            RATING.name(),
            p.star_rating().nullable().with_fallback(Value::Null),
        )
}

pub fn product_list_defaults() -> Result<DefaultValues, SchemaError> {
    DefaultValues::from_serialize(&ProductListQuery::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_state_codec::RawParams;

    #[test]
    fn schema_validates_against_defaults() {
        let schema = product_list_schema(&ParamBuilder::new(), &StaticOptions::catalog().options());
        assert!(schema.validate(&product_list_defaults().unwrap()).is_ok());
    }

    #[test]
    fn empty_catalog_still_valid() {
        let schema = product_list_schema(&ParamBuilder::new(), &[]);
        assert!(schema.validate(&product_list_defaults().unwrap()).is_ok());
    }

    #[test]
    fn decodes_into_typed_query() {
        let schema = product_list_schema(&ParamBuilder::new(), &StaticOptions::catalog().options());
        let params = RawParams::parse("page=2&sort=desc&categories=books&instock=true&rating=4");
        let query: ProductListQuery = schema.decode(&params).unwrap().to_typed().unwrap();
        assert_eq!(
            query,
            ProductListQuery {
                page: 2,
                sort: SortOrder::Desc,
                categories: vec!["books".into()],
                instock: true,
                rating: Some(4),
            }
        );
    }

    #[test]
    fn sort_labels() {
        assert_eq!(SortOrder::Desc.label(), "Descending");
        assert_eq!(SortOrder::ALL.map(SortOrder::as_str), ["asc", "desc"]);
    }
}
