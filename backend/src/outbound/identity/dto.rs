//! Wire shapes exchanged with the identity service.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{UserId, Username};

#[derive(Debug, Deserialize)]
pub(super) struct UserIdDto {
    pub(super) id: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct UsernamesRequestDto {
    pub(super) ids: Vec<i64>,
}

impl UsernamesRequestDto {
    pub(super) fn from_ids(ids: &BTreeSet<UserId>) -> Self {
        Self {
            ids: ids.iter().map(|id| id.get()).collect(),
        }
    }
}

/// Ids arrive as JSON object keys, so they are strings on the wire.
#[derive(Debug, Deserialize)]
pub(super) struct UsernamesResponseDto {
    #[serde(default)]
    pub(super) usernames: HashMap<String, String>,
}

impl UsernamesResponseDto {
    /// Convert the wire map, dropping entries whose username fails
    /// validation. Dropped ids are left for the caller to treat as
    /// unresolved.
    ///
    /// A non-integer key is a protocol error and fails the whole batch.
    pub(super) fn into_domain(self) -> Result<HashMap<UserId, Username>, String> {
        let mut resolved = HashMap::with_capacity(self.usernames.len());
        for (raw_id, raw_name) in self.usernames {
            let id = raw_id
                .parse::<i64>()
                .map(UserId::new)
                .map_err(|_| format!("user id `{raw_id}` is not an integer"))?;
            match Username::new(raw_name) {
                Ok(name) => {
                    resolved.insert(id, name);
                }
                Err(error) => {
                    warn!(
                        user_id = %id,
                        %error,
                        "identity service returned an unusable username"
                    );
                }
            }
        }
        Ok(resolved)
    }
}
