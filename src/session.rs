//! Metadata about past splits, keyed by a random session identifier.
//!
//! Records only ever hold counts and lengths. Shares and secrets are never stored here.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use textnonce::TextNonce;
use thiserror::Error;
use tracing::{debug, info};

use crate::split::{self, Parameters, SplitError};

const SESSION_ID_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub total_shares: u32,
    pub threshold: u32,
    /// Byte length of the original secret, for `combine_with_len`.
    pub secret_len: usize,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to generate session id: {0}")]
    SessionId(String),
    #[error("session registry lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Split(#[from] SplitError),
}

pub struct SessionRegistry {
    ttl: Duration,
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        SessionRegistry {
            ttl,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Stores metadata for a split and returns its new session id.
    pub fn record(&self, params: &Parameters, secret_len: usize) -> Result<String, SessionError> {
        let id = TextNonce::sized_urlsafe(SESSION_ID_LEN)
            .map_err(SessionError::SessionId)?
            .into_string();
        let record = SessionRecord {
            id: id.clone(),
            total_shares: params.total_shares,
            threshold: params.threshold,
            secret_len,
            created_at: unix_seconds(SystemTime::now()),
        };

        let mut records = self.records.write().map_err(|_| SessionError::Poisoned)?;
        records.insert(id.clone(), record);
        debug!(session = %id, "recorded split session");
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Option<SessionRecord>, SessionError> {
        let records = self.records.read().map_err(|_| SessionError::Poisoned)?;
        Ok(records.get(id).cloned())
    }

    pub fn remove(&self, id: &str) -> Result<Option<SessionRecord>, SessionError> {
        let mut records = self.records.write().map_err(|_| SessionError::Poisoned)?;
        Ok(records.remove(id))
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        let records = self.records.read().map_err(|_| SessionError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }

    /// Drops every record older than the registry's TTL as seen from `now`.
    /// Returns how many were removed.
    pub fn purge_expired(&self, now: SystemTime) -> Result<usize, SessionError> {
        let cutoff = unix_seconds(now).saturating_sub(self.ttl.as_secs());
        let mut records = self.records.write().map_err(|_| SessionError::Poisoned)?;
        let before = records.len();
        records.retain(|_, record| record.created_at >= cutoff);
        let purged = before - records.len();
        if purged > 0 {
            info!(purged, "purged expired sessions");
        }
        Ok(purged)
    }
}

/// Splits `secret` and records the split's metadata, returning the session id and the
/// encoded shares.
pub fn split_and_record(
    registry: &SessionRegistry,
    secret: &[u8],
    params: &Parameters,
) -> Result<(String, Vec<String>), SessionError> {
    let shares = split::split_with(secret, params)?;
    let id = registry.record(params, secret.len())?;
    Ok((id, shares))
}

fn unix_seconds(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
