//! Persisted state of the occurrence report form.
//!
//! The form is saved as one JSON blob under [`FORM_STATE_KEY`] so a
//! half-written report survives a restart. Storage is injected through
//! [`FormStore`].

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

pub const FORM_STATE_KEY: &str = "relatorio_form_state_v1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Date and time are kept as typed; they are parsed when the report is
    /// built.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hora: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub colaborador: String,
    #[serde(default)]
    pub relatorio_bruto: String,
    #[serde(default)]
    pub vtr: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FormState {
    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize form state")
    }

    pub fn deserialize(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse saved form state")
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Key-value storage for persisted UI state.
pub trait FormStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn clear(&self, key: &str) -> Result<()>;
}

pub fn load(store: &dyn FormStore) -> Result<Option<FormState>> {
    match store.read(FORM_STATE_KEY)? {
        Some(raw) if !raw.trim().is_empty() => FormState::deserialize(&raw).map(Some),
        _ => Ok(None),
    }
}

/// Saves the state. An empty form clears the store instead.
pub fn save(store: &dyn FormStore, state: &FormState) -> Result<()> {
    if state.is_empty() {
        return store.clear(FORM_STATE_KEY);
    }
    store.write(FORM_STATE_KEY, &state.serialize()?)
}

pub fn clear(store: &dyn FormStore) -> Result<()> {
    store.clear(FORM_STATE_KEY)
}

/// In-memory store, used by dev mode and tests.
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    entries: Mutex<HashMap<String, String>>,
}

impl FormStore for MemoryFormStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("form store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("form store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("form store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> FormState {
        FormState {
            data: "19/10/2026".to_string(),
            hora: "22:15".to_string(),
            endereco: "Rua das Acácias, 120".to_string(),
            colaborador: "Carlos Silva".to_string(),
            relatorio_bruto: "portão aberto".to_string(),
            vtr: "VTR 05".to_string(),
        }
    }

    #[test]
    fn state_survives_store_roundtrip() {
        let store = MemoryFormStore::default();
        save(&store, &filled()).unwrap();

        assert_eq!(load(&store).unwrap(), Some(filled()));
    }

    #[test]
    fn clear_removes_saved_state() {
        let store = MemoryFormStore::default();
        save(&store, &filled()).unwrap();
        clear(&store).unwrap();

        assert_eq!(load(&store).unwrap(), None);
        assert_eq!(store.read(FORM_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn saving_an_empty_form_clears_the_store() {
        let store = MemoryFormStore::default();
        save(&store, &filled()).unwrap();
        save(&store, &FormState::default()).unwrap();

        assert_eq!(store.read(FORM_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn partial_inputs_are_kept_verbatim() {
        let store = MemoryFormStore::default();
        let partial = FormState {
            data: "5/3/2026".to_string(),
            hora: "22:1".to_string(),
            ..FormState::default()
        };
        save(&store, &partial).unwrap();

        assert_eq!(load(&store).unwrap(), Some(partial));
    }

    #[test]
    fn older_blobs_with_missing_fields_still_load() {
        let state = FormState::deserialize(r#"{"colaborador":"Ana","data":null}"#).unwrap();
        assert_eq!(state.colaborador, "Ana");
        assert_eq!(state.data, "");
        assert!(state.vtr.is_empty());
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        let store = MemoryFormStore::default();
        store.write(FORM_STATE_KEY, "{not json").unwrap();
        assert!(load(&store).is_err());
    }
}
