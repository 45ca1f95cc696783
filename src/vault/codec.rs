use crate::core::error::VaultError;
use crate::core::ports::VaultCodec;
use crate::vault::models::{VaultDocument, REQUIRED_KEYS};
use anyhow::Result;
use serde_yaml::Value;

pub struct YamlCodec;

impl VaultCodec for YamlCodec {
    fn encode(&self, document: &VaultDocument) -> Result<Vec<u8>> {
        let s = serde_yaml::to_string(document)?;
        Ok(s.into_bytes())
    }

    fn decode(&self, data: &[u8]) -> Result<VaultDocument> {
        let text = std::str::from_utf8(data)
            .map_err(|e| VaultError::MalformedStorage(format!("not valid UTF-8: {e}")))?;
        if text.trim().is_empty() {
            return Ok(VaultDocument::default());
        }

        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| VaultError::MalformedStorage(e.to_string()))?;
        if value.is_null() {
            return Ok(VaultDocument::default());
        }
        check_required_keys(&value)?;

        let document: VaultDocument = serde_yaml::from_value(value)
            .map_err(|e| VaultError::MalformedStorage(e.to_string()))?;
        Ok(document)
    }
}

// serde fills absent Option fields with None, so absent keys have to be caught before that.
fn check_required_keys(value: &Value) -> Result<(), VaultError> {
    let Some(root) = value.as_mapping() else {
        return Err(VaultError::MalformedStorage(
            "top level is not a mapping".to_string(),
        ));
    };
    let Some(records) = root.get("credentials").and_then(Value::as_sequence) else {
        return Ok(());
    };
    for record in records {
        let Some(map) = record.as_mapping() else {
            return Err(VaultError::MalformedStorage(
                "credential record is not a mapping".to_string(),
            ));
        };
        if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !map.contains_key(**k)) {
            return Err(VaultError::MissingField(missing.to_string()));
        }
    }
    Ok(())
}
