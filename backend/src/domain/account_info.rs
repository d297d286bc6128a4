//! Read models assembled by the account aggregator.

use std::collections::{BTreeMap, BTreeSet};

use super::{Coins, UserId};

/// One transfer as stored, before counterpart ids are resolved to names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTransfer {
    pub counterpart: UserId,
    pub amount: Coins,
}

/// Transfer history keyed by counterpart id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransferHistory {
    pub incoming: Vec<RawTransfer>,
    pub outgoing: Vec<RawTransfer>,
}

impl RawTransferHistory {
    /// Distinct counterpart ids across both directions.
    #[must_use]
    pub fn counterparts(&self) -> BTreeSet<UserId> {
        self.incoming
            .iter()
            .chain(self.outgoing.iter())
            .map(|transfer| transfer.counterpart)
            .collect()
    }
}

/// One transfer with its counterpart rendered as a username.
///
/// An empty `counterpart` means the identity service did not know the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTransfer {
    pub counterpart: String,
    pub amount: Coins,
}

/// Transfer history with counterparts resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferHistory {
    pub incoming: Vec<NamedTransfer>,
    pub outgoing: Vec<NamedTransfer>,
}

/// Aggregated view of one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub balance: Coins,
    /// Good name to purchased quantity.
    pub inventory: BTreeMap<String, u64>,
    pub transfers: TransferHistory,
}
