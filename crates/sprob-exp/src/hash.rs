use serde::Serialize;
use sha2::{Digest, Sha256};
use sprob_core::{ErrorInfo, SprobError};

/// Serializes `value` to JSON with object keys in sorted order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SprobError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| SprobError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_vec(&tree)
        .map_err(|err| SprobError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SprobError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
