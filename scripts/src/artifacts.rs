//! Loading of compiled contract artifacts from a Hardhat `artifacts` directory

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, OPENZEPPELIN_PROXY_ARTIFACT_DIRS, UNLINKED_LIBRARY_MARKER},
    errors::ScriptError,
};

/// A compiled contract, as emitted by Hardhat
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The hex-encoded creation code, without constructor arguments
    pub bytecode: String,
}

impl ContractArtifact {
    /// Find the artifact for the given contract under `artifacts_dir` and parse it
    pub fn load(artifacts_dir: &Path, contract_name: &str) -> Result<Self, ScriptError> {
        let path = find_artifact(artifacts_dir, contract_name)?;
        Self::from_file(&path)
    }

    /// Load the artifact for the given contract from the first of `dirs` that
    /// holds one. Directories that do not exist are skipped
    pub fn load_first(dirs: &[PathBuf], contract_name: &str) -> Result<Self, ScriptError> {
        for dir in dirs.iter().filter(|dir| dir.is_dir()) {
            if let Ok(path) = find_artifact(dir, contract_name) {
                return Self::from_file(&path);
            }
        }

        let searched: Vec<_> = dirs.iter().map(|dir| dir.display().to_string()).collect();
        Err(ScriptError::ArtifactParsing(format!(
            "no artifact for {contract_name} under any of [{}]",
            searched.join(", ")
        )))
    }

    /// Parse the artifact at the given path
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        debug!("Loading artifact from {}", path.display());

        let file = File::open(path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))?;
        serde_json::from_reader(file)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", path.display())))
    }

    /// The number of arguments the contract's constructor takes
    pub fn num_constructor_args(&self) -> usize {
        self.abi
            .constructor
            .as_ref()
            .map(|constructor| constructor.inputs.len())
            .unwrap_or_default()
    }

    /// Build the creation code for the contract, appending the given
    /// ABI-encoded constructor arguments
    pub fn creation_code(
        &self,
        num_args: usize,
        constructor_args: &[u8],
    ) -> Result<Vec<u8>, ScriptError> {
        let mut creation_code = self.checked_bytecode(num_args)?;
        creation_code.extend_from_slice(constructor_args);
        Ok(creation_code)
    }

    /// The contract's bytecode, without constructor arguments.
    ///
    /// `num_args` is checked against the artifact's constructor so that a
    /// stale or mismatched artifact fails before anything is sent.
    pub fn checked_bytecode(&self, num_args: usize) -> Result<Vec<u8>, ScriptError> {
        if self.bytecode.contains(UNLINKED_LIBRARY_MARKER) {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has unlinked library references",
                self.contract_name
            )));
        }

        let bytecode = Bytes::from_str(&self.bytecode)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no bytecode, is it abstract?",
                self.contract_name
            )));
        }

        let expected_args = self.num_constructor_args();
        if expected_args != num_args {
            return Err(ScriptError::CalldataConstruction(format!(
                "{} constructor takes {expected_args} arguments, got {num_args}",
                self.contract_name
            )));
        }

        Ok(bytecode.to_vec())
    }
}

/// The directories searched for the ERC-1967 proxy artifact, in order: the
/// project's own artifacts, then the prebuilt artifacts shipped with the
/// OpenZeppelin packages in the project's `node_modules`
pub fn proxy_search_dirs(artifacts_dir: &Path) -> Vec<PathBuf> {
    let project_root = artifacts_dir
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut dirs = vec![artifacts_dir.to_path_buf()];
    dirs.extend(
        OPENZEPPELIN_PROXY_ARTIFACT_DIRS
            .iter()
            .map(|dir| project_root.join(dir)),
    );
    dirs
}

/// Search `artifacts_dir` recursively for `<contract_name>.json`.
///
/// Hardhat nests artifacts by source path, e.g.
/// `artifacts/contracts/Vault.sol/ReaperVaultv1_3.json`
pub fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");

    let mut dirs = vec![artifacts_dir.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        let entries = fs::read_dir(&dir)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {e}", dir.display())))?;

        for entry in entries {
            let path = entry
                .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
                .path();
            if path.is_dir() {
                dirs.push(path);
            } else if path.file_name().is_some_and(|name| name == file_name.as_str()) {
                return Ok(path);
            }
        }
    }

    Err(ScriptError::ArtifactParsing(format!(
        "no artifact for {contract_name} under {}",
        artifacts_dir.display()
    )))
}
