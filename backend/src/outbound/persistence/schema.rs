//! Diesel table definitions for the ledger schema.
//!
//! Kept in step with `backend/migrations` by hand; `diesel print-schema`
//! against a migrated database regenerates it.

diesel::table! {
    /// Purchasable catalog, seeded by the initial migration.
    goods (id) {
        id -> Int4,
        name -> Text,
        /// Price in coins, never negative.
        price -> Int8,
    }
}

diesel::table! {
    /// One row per user, created lazily on first contact.
    balances (id) {
        id -> Int4,
        /// Identity-service user id; unique.
        user_id -> Int8,
        /// Current coin balance, guarded by `CHECK (balance >= 0)`.
        balance -> Int8,
    }
}

diesel::table! {
    /// Append-only purchase log; one row per unit bought.
    purchases (id) {
        id -> Int4,
        user_id -> Int8,
        good_id -> Int4,
    }
}

diesel::table! {
    /// Append-only transfer log.
    transfers (id) {
        id -> Int4,
        from_user_id -> Int8,
        to_user_id -> Int8,
        amount -> Int8,
    }
}

diesel::joinable!(purchases -> goods (good_id));

diesel::allow_tables_to_appear_in_same_query!(goods, balances, purchases, transfers);
