//! The deployed split contract: package id and module name.

use crate::config::ConfigError;
use crate::transaction::MoveTarget;

/// Package id of the deployed split contract.
pub const DEFAULT_PACKAGE_ID: &str =
    "0x5a3030666e65f007c0701a0a9b211b2f63a8b3aacb68e16adfe7e69d41241f12";

/// Module holding the split entry points.
pub const MODULE_NAME: &str = "split";

pub const CREATE_SPLIT_FUNCTION: &str = "create_split";
pub const DEPOSIT_FUNCTION: &str = "deposit";
pub const DISTRIBUTE_FUNCTION: &str = "distribute";

/// Length of a package id in hex digits, without the `0x` prefix.
const PACKAGE_ID_HEX_LEN: usize = 64;

/// Where the contract lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    package_id: String,
    module: String,
}

impl Deployment {
    /// Validate and normalise `package_id` (see [`normalize_package_id`]).
    pub fn new(package_id: &str, module: impl Into<String>) -> Result<Self, ConfigError> {
        let module = module.into();
        if module.trim().is_empty() {
            return Err(ConfigError::Invalid("module name must not be empty".into()));
        }
        Ok(Self {
            package_id: normalize_package_id(package_id)?,
            module,
        })
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn target(&self, function: &str) -> MoveTarget {
        MoveTarget::new(self.package_id.as_str(), self.module.as_str(), function)
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self {
            package_id: DEFAULT_PACKAGE_ID.to_string(),
            module: MODULE_NAME.to_string(),
        }
    }
}

/// Normalise a package id to `0x` + 64 lowercase hex digits.
///
/// Short forms such as `0x2` are left-padded with zeros.
pub fn normalize_package_id(raw: &str) -> Result<String, ConfigError> {
    let digits = raw
        .trim()
        .strip_prefix("0x")
        .ok_or_else(|| ConfigError::InvalidPackageId(raw.to_string()))?;
    if digits.is_empty() || digits.len() > PACKAGE_ID_HEX_LEN {
        return Err(ConfigError::InvalidPackageId(raw.to_string()));
    }
    let padded = format!("{digits:0>width$}", width = PACKAGE_ID_HEX_LEN);
    let bytes =
        hex::decode(&padded).map_err(|_| ConfigError::InvalidPackageId(raw.to_string()))?;
    Ok(format!("0x{}", hex::encode(bytes)))
}
