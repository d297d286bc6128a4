//! Catalog items. Read-only from the ledger's point of view.

use super::Coins;

/// Database identifier of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoodId(i32);

impl GoodId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Good {
    pub id: GoodId,
    pub name: String,
    pub price: Coins,
}
