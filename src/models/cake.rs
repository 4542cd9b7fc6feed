//! Cake catalog models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A cake offered by the storefront, with its orderable sizes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Cake {
    pub id: i32,
    pub name: String,
    /// Image file name
    pub image: Option<String>,
    pub description: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub sizes: Vec<CakeSize>,
}

impl Cake {
    /// Find a size by its label, ignoring surrounding whitespace
    pub fn size(&self, label: &str) -> Option<&CakeSize> {
        let label = label.trim();
        self.sizes.iter().find(|s| s.size.trim() == label)
    }
}

/// Price and stock of one size of a cake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CakeSize {
    #[serde(skip)]
    pub cake_id: i32,
    /// Size label, e.g. "15cm"
    pub size: String,
    /// Unit price in yen
    pub price: i32,
    /// Units left; copied onto order lines as an informational snapshot
    pub stock: i32,
}
