//! Save/load for the clicker session.
//!
//! The record is a flat, versionless JSON object stored under one localStorage key:
//!
//! ```json
//! { "clicks": 1234.5,
//!   "upgradeLevels": { "cursor": 3, "factory": 1 },
//!   "milestonesActivated": [true, false, false, false],
//!   "language": "de" }
//! ```
//!
//! Any subset of fields may be missing (or `null`); missing fields fall back to the values of
//! a fresh session. Costs and derived stats are never stored, they are recomputed from levels.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::catalog::UpgradeType;
use super::session::Session;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not serialize save record: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("could not parse save record: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("localStorage is unavailable")]
    StorageUnavailable,
    #[error("storage operation failed: {0}")]
    Storage(String),
}

/// Persisted projection of a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    #[serde(rename = "clicks", default, deserialize_with = "null_as_default")]
    pub resource_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upgrade_levels: BTreeMap<String, u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub milestones_activated: Vec<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where the encoded record lives.
pub trait SaveStore {
    fn read(&self) -> Result<Option<String>, SaveError>;
    fn write(&mut self, json: &str) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// Pure projection of the session. Does not touch the session.
pub fn extract_save(session: &Session) -> SaveRecord {
    SaveRecord {
        resource_total: session.progression.resource_total,
        upgrade_levels: session
            .progression
            .upgrades
            .iter()
            .map(|u| (u.kind.save_key().to_string(), u.level))
            .collect(),
        milestones_activated: session.milestones.activated_flags(),
        language: session.language.clone(),
    }
}

/// Restore a record onto a fresh session.
///
/// Levels are set first and every cost is recomputed from its level; derived stats are then
/// recomputed once. Milestone flags are copied verbatim and thresholds are *not* re-checked.
/// Spawns already covered by the restored resource are marked as emitted.
pub fn apply_save(session: &mut Session, record: &SaveRecord) {
    let resource = if record.resource_total.is_finite() {
        record.resource_total.max(0.0)
    } else {
        0.0
    };
    session.progression.resource_total = resource;

    for (key, &level) in &record.upgrade_levels {
        match UpgradeType::from_save_key(key) {
            Some(kind) => session.progression.upgrades[kind.index()].set_level(level),
            None => log::warn!("ignoring unknown upgrade '{key}' in save record"),
        }
    }
    session.progression.recalculate_stats();

    session
        .milestones
        .restore_activated(&record.milestones_activated);
    session.milestones.seed_spawns(resource);

    if !record.language.is_empty() {
        session.language = record.language.clone();
    }
}

pub fn encode(record: &SaveRecord) -> Result<String, SaveError> {
    serde_json::to_string(record).map_err(SaveError::Serialize)
}

pub fn decode(json: &str) -> Result<SaveRecord, SaveError> {
    serde_json::from_str(json).map_err(SaveError::Parse)
}

/// Write the session to the store.
pub fn save_game(session: &Session, store: &mut dyn SaveStore) -> Result<(), SaveError> {
    let json = encode(&extract_save(session))?;
    store.write(&json)?;
    log::info!(
        "progress saved ({} clicks)",
        session.progression.resource_total.floor()
    );
    Ok(())
}

/// Read a record from the store. Absent, unreadable or malformed records yield `None`;
/// a malformed record is also removed so the next start is clean.
pub fn load_record(store: &mut dyn SaveStore) -> Option<SaveRecord> {
    let json = match store.read() {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("could not read save, starting fresh: {e}");
            return None;
        }
    };

    match decode(&json) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("discarding broken save: {e}");
            if let Err(e) = store.clear() {
                log::warn!("could not remove broken save: {e}");
            }
            None
        }
    }
}

/// Remove the stored record.
pub fn delete_save(store: &mut dyn SaveStore) {
    if let Err(e) = store.clear() {
        log::warn!("could not delete save: {e}");
    }
}

/// localStorage-backed store. Only functional in the browser.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(SaveError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorage {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Self::storage()?
            .get_item(self.key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        Self::storage()?
            .set_item(self.key, json)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Self::storage()?
            .remove_item(self.key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}

/// In-memory store for native builds and tests.
#[derive(Default)]
pub struct MemoryStore {
    pub data: Option<String>,
    pub fail_writes: bool,
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        if self.fail_writes {
            return Err(SaveError::Storage("quota exceeded".into()));
        }
        self.data = Some(json.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.data = None;
        Ok(())
    }
}
