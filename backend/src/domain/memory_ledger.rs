//! In-memory ledger store used by service tests.
//!
//! Each unit of work takes the store mutex for its whole lifetime, works on a
//! copy of the state and swaps it in only when the closure returns `Ok`, so
//! failed units leave no trace and concurrent units serialise like row locks.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    BalanceRepository, BalanceRepositoryError, GoodsRepository, GoodsRepositoryError,
    HistoryRepositoryError, IdentityResolver, IdentityResolverError, PurchaseHistoryRepository,
    TransactionCoordinator, TransactionError, TransferHistoryRepository, UnitOfWork,
    UnitOfWorkError, UnitOfWorkFuture,
};
use crate::domain::{
    Coins, Good, GoodId, RawTransfer, RawTransferHistory, UserId, Username,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct LedgerState {
    pub(crate) balances: BTreeMap<UserId, Coins>,
    pub(crate) goods: Vec<Good>,
    pub(crate) purchases: Vec<(UserId, GoodId)>,
    pub(crate) transfers: Vec<(UserId, UserId, Coins)>,
}

/// Shared in-memory store implementing every persistence port.
#[derive(Clone, Default)]
pub(crate) struct MemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl MemoryLedger {
    /// Store preloaded with the standard catalog.
    pub(crate) fn with_catalog() -> Self {
        let catalog = [
            ("t-shirt", 80),
            ("cup", 20),
            ("book", 50),
            ("pen", 10),
            ("powerbank", 200),
            ("hoody", 300),
            ("umbrella", 200),
            ("socks", 10),
            ("wallet", 50),
            ("pink-hoody", 500),
        ];
        let goods = catalog
            .into_iter()
            .zip(1..)
            .map(|((name, price), id)| Good {
                id: GoodId::new(id),
                name: name.to_owned(),
                price: Coins::new(price),
            })
            .collect();
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                goods,
                ..LedgerState::default()
            })),
        }
    }

    pub(crate) async fn snapshot(&self) -> LedgerState {
        self.state.lock().await.clone()
    }

    pub(crate) async fn set_balance(&self, user_id: UserId, balance: Coins) {
        self.state.lock().await.balances.insert(user_id, balance);
    }
}

struct MemoryUnitOfWork<'a> {
    state: &'a mut LedgerState,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork<'_> {
    async fn lock_balance(&mut self, user_id: UserId) -> Result<Option<Coins>, UnitOfWorkError> {
        Ok(self.state.balances.get(&user_id).copied())
    }

    async fn lock_balances(
        &mut self,
        user_ids: Vec<UserId>,
    ) -> Result<Vec<(UserId, Coins)>, UnitOfWorkError> {
        let wanted: BTreeSet<_> = user_ids.into_iter().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| self.state.balances.get(&id).map(|balance| (id, *balance)))
            .collect())
    }

    async fn decrement_balance(
        &mut self,
        user_id: UserId,
        amount: Coins,
    ) -> Result<usize, UnitOfWorkError> {
        let Some(balance) = self.state.balances.get_mut(&user_id) else {
            return Ok(0);
        };
        match balance.checked_sub(amount) {
            Some(remaining) => {
                *balance = remaining;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn increment_balance(
        &mut self,
        user_id: UserId,
        amount: Coins,
    ) -> Result<usize, UnitOfWorkError> {
        let Some(balance) = self.state.balances.get_mut(&user_id) else {
            return Ok(0);
        };
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| UnitOfWorkError::query("balance overflow"))?;
        Ok(1)
    }

    async fn record_purchase(
        &mut self,
        user_id: UserId,
        good_id: GoodId,
    ) -> Result<(), UnitOfWorkError> {
        self.state.purchases.push((user_id, good_id));
        Ok(())
    }

    async fn record_transfer(
        &mut self,
        from: UserId,
        to: UserId,
        amount: Coins,
    ) -> Result<(), UnitOfWorkError> {
        self.state.transfers.push((from, to, amount));
        Ok(())
    }
}

#[async_trait]
impl TransactionCoordinator for MemoryLedger {
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<TransactionError> + Send + 'static,
        F: for<'a> FnOnce(&'a mut dyn UnitOfWork) -> UnitOfWorkFuture<'a, T, E> + Send + 'static,
    {
        let mut guard = self.state.lock().await;
        let mut working = guard.clone();
        let outcome = {
            let mut uow = MemoryUnitOfWork {
                state: &mut working,
            };
            work(&mut uow).await
        };
        if outcome.is_ok() {
            *guard = working;
        }
        outcome
    }
}

#[async_trait]
impl BalanceRepository for MemoryLedger {
    async fn insert_if_absent(
        &self,
        user_id: UserId,
        seed: Coins,
    ) -> Result<(), BalanceRepositoryError> {
        self.state
            .lock()
            .await
            .balances
            .entry(user_id)
            .or_insert(seed);
        Ok(())
    }

    async fn find_balance(&self, user_id: UserId) -> Result<Option<Coins>, BalanceRepositoryError> {
        Ok(self.state.lock().await.balances.get(&user_id).copied())
    }
}

#[async_trait]
impl GoodsRepository for MemoryLedger {
    async fn find_by_name(&self, name: &str) -> Result<Option<Good>, GoodsRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .goods
            .iter()
            .find(|good| good.name == name)
            .cloned())
    }
}

#[async_trait]
impl PurchaseHistoryRepository for MemoryLedger {
    async fn inventory(
        &self,
        user_id: UserId,
    ) -> Result<BTreeMap<String, u64>, HistoryRepositoryError> {
        let state = self.state.lock().await;
        let mut inventory = BTreeMap::new();
        for (_, good_id) in state.purchases.iter().filter(|(buyer, _)| *buyer == user_id) {
            if let Some(good) = state.goods.iter().find(|good| good.id == *good_id) {
                *inventory.entry(good.name.clone()).or_insert(0) += 1;
            }
        }
        Ok(inventory)
    }
}

#[async_trait]
impl TransferHistoryRepository for MemoryLedger {
    async fn transfers(&self, user_id: UserId) -> Result<RawTransferHistory, HistoryRepositoryError> {
        let state = self.state.lock().await;
        let mut history = RawTransferHistory::default();
        for &(from, to, amount) in &state.transfers {
            if from == user_id {
                history.outgoing.push(RawTransfer {
                    counterpart: to,
                    amount,
                });
            }
            if to == user_id {
                history.incoming.push(RawTransfer {
                    counterpart: from,
                    amount,
                });
            }
        }
        Ok(history)
    }
}

/// In-memory identity directory.
#[derive(Clone, Default)]
pub(crate) struct MemoryDirectory {
    users: Arc<HashMap<UserId, Username>>,
}

impl MemoryDirectory {
    pub(crate) fn new(users: &[(i64, &str)]) -> Self {
        let users = users
            .iter()
            .filter_map(|&(id, name)| Username::new(name).ok().map(|name| (UserId::new(id), name)))
            .collect();
        Self {
            users: Arc::new(users),
        }
    }
}

#[async_trait]
impl IdentityResolver for MemoryDirectory {
    async fn resolve_user_id(
        &self,
        username: &Username,
    ) -> Result<Option<UserId>, IdentityResolverError> {
        Ok(self
            .users
            .iter()
            .find(|(_, name)| *name == username)
            .map(|(id, _)| *id))
    }

    async fn resolve_usernames(
        &self,
        user_ids: &BTreeSet<UserId>,
    ) -> Result<HashMap<UserId, Username>, IdentityResolverError> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|name| (*id, name.clone())))
            .collect())
    }
}
