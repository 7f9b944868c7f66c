//! Reading & writing deployed contract addresses in the `deployments.json` file
//!
//! The file has the form `{"deployments": {"<contract key>": "0x<address>"}}`,
//! so that later steps can find the contracts produced by earlier ones.

use std::{fs, path::Path, str::FromStr};

use alloy::primitives::Address;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError, utils::parse_address};

/// Read the deployments file as JSON, treating a missing file as empty
fn read_deployments_json(path: &Path) -> Result<Value, String> {
    if !path.exists() {
        return Ok(Value::Object(Map::new()));
    }

    let contents = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&contents).map_err(|e| format!("{}: {e}", path.display()))
}

/// Read the address stored under `contract_key` in the deployments file
pub fn read_deployment(path: &Path, contract_key: &str) -> Result<Address, ScriptError> {
    let parsed_json = read_deployments_json(path).map_err(ScriptError::ReadDeployments)?;

    let address = parsed_json
        .get(DEPLOYMENTS_KEY)
        .and_then(|deployments| deployments.get(contract_key))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!(
                "no {contract_key} address in {}",
                path.display()
            ))
        })?;

    Address::from_str(address).map_err(|e| {
        ScriptError::ReadDeployments(format!(
            "invalid {contract_key} address {address} in {}: {e}",
            path.display()
        ))
    })
}

/// Use the explicitly given address if there is one, otherwise fall back to
/// the deployments file
pub fn resolve_address(
    explicit: Option<&str>,
    path: &Path,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    match explicit {
        Some(address) => parse_address(address),
        None => {
            let address = read_deployment(path, contract_key)?;
            debug!("Using {contract_key} {address} from {}", path.display());
            Ok(address)
        }
    }
}

/// Record `address` under `contract_key` in the deployments file, creating
/// the file if it does not exist and leaving other entries untouched.
///
/// Errors name the address, which is otherwise lost if it was just deployed
pub fn write_deployment(
    path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let write_err = |e: String| {
        ScriptError::WriteDeployments(format!(
            "could not record {contract_key} {address} in {}: {e}",
            path.display()
        ))
    };

    let mut parsed_json = read_deployments_json(path).map_err(write_err)?;

    let deployments = parsed_json
        .as_object_mut()
        .ok_or_else(|| write_err("not a JSON object".to_string()))?
        .entry(DEPLOYMENTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| write_err(format!("`{DEPLOYMENTS_KEY}` is not a JSON object")))?;

    let new_value = Value::String(address.to_string());
    if let Some(old_value) = deployments.insert(contract_key.to_string(), new_value) {
        warn!("Overwriting {contract_key} (was {old_value})");
    }

    let contents =
        serde_json::to_string_pretty(&parsed_json).map_err(|e| write_err(e.to_string()))?;
    fs::write(path, contents).map_err(|e| write_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        let address = Address::repeat_byte(0x42);

        write_deployment(&path, "vault_contract", address).unwrap();
        assert_eq!(read_deployment(&path, "vault_contract").unwrap(), address);
    }

    #[test]
    fn test_write_preserves_other_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        fs::write(
            &path,
            r#"{"network": "fantom", "deployments": {"other_contract": "0x1111111111111111111111111111111111111111"}}"#,
        )
        .unwrap();

        write_deployment(&path, "vault_contract", Address::repeat_byte(0x22)).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["network"], "fantom");
        assert_eq!(
            read_deployment(&path, "other_contract").unwrap(),
            Address::repeat_byte(0x11)
        );
        assert_eq!(
            read_deployment(&path, "vault_contract").unwrap(),
            Address::repeat_byte(0x22)
        );
    }

    #[test]
    fn test_read_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        write_deployment(&path, "vault_contract", Address::ZERO).unwrap();

        let err = read_deployment(&path, "strategy_proxy_contract").unwrap_err();
        assert!(matches!(err, ScriptError::ReadDeployments(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_deployment(&dir.path().join("nope.json"), "vault_contract").unwrap_err();
        assert!(matches!(err, ScriptError::ReadDeployments(_)));
    }

    #[test]
    fn test_read_invalid_address() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        fs::write(&path, r#"{"deployments": {"vault_contract": "0x1234"}}"#).unwrap();

        let err = read_deployment(&path, "vault_contract").unwrap_err();
        let ScriptError::ReadDeployments(msg) = err else {
            panic!("expected a read error, got {err:?}");
        };
        assert!(msg.starts_with("invalid vault_contract address 0x1234"));
    }

    #[test]
    fn test_write_error_names_address() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        fs::write(&path, "[]").unwrap();
        let address = Address::repeat_byte(0x42);

        let err = write_deployment(&path, "vault_contract", address).unwrap_err();
        assert!(matches!(err, ScriptError::WriteDeployments(_)));
        assert!(err.to_string().contains(&address.to_string()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_resolve_prefers_explicit_address() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");
        write_deployment(&path, "vault_contract", Address::repeat_byte(0x01)).unwrap();

        let explicit = Address::repeat_byte(0x02).to_string();
        let resolved = resolve_address(Some(&explicit), &path, "vault_contract").unwrap();
        assert_eq!(resolved, Address::repeat_byte(0x02));

        let resolved = resolve_address(None, &path, "vault_contract").unwrap();
        assert_eq!(resolved, Address::repeat_byte(0x01));
    }
}
