use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category identifier as delivered by the backend.
///
/// The backend is inconsistent about the JSON type of ids: the same category
/// can arrive as `7` in one payload and `"7"` in another. Both normalize to
/// a number here so equality holds across representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryId(pub u64);

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = CategoryId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a category id as a number or a numeric string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<CategoryId, E>
            where
                E: serde::de::Error,
            {
                Ok(CategoryId(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<CategoryId, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(value)
                    .map(CategoryId)
                    .map_err(|_| E::custom(format!("negative category id {value}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<CategoryId, E>
            where
                E: serde::de::Error,
            {
                value
                    .trim()
                    .parse()
                    .map(CategoryId)
                    .map_err(|_| E::custom(format!("non-numeric category id {value:?}")))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

impl FromStr for CategoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(CategoryId)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub src: String,
}

/// A purchasable product as fetched from the catalog.
///
/// Immutable once fetched; a catalog refresh replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// Decimal price exactly as the backend sent it; parsed at cart time.
    pub price: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

/// Selects the products visible under a category selection.
///
/// `None` is the identity. Pure; safe to call on every render.
pub fn filter_by_category(
    products: &[Product],
    selected: Option<CategoryId>,
) -> Vec<&Product> {
    match selected {
        None => products.iter().collect(),
        Some(id) => products
            .iter()
            .filter(|product| product.categories.iter().any(|category| category.id == id))
            .collect(),
    }
}
