use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::ConfigError;

/// Reads the whole file at `path` and deserializes it as YAML.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_slice(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_yaml`], but writes into an existing value.
///
/// The whole value is replaced, not merged: fields absent from the file do
/// not keep their previous values, they fall back to `#[serde(default)]` or
/// fail to parse if required. `target` is only overwritten when both reading
/// and parsing succeed.
pub fn load_yaml_into<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    target: &mut T,
) -> Result<(), ConfigError> {
    *target = load_yaml(path)?;
    Ok(())
}
