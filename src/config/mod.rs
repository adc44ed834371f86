//! Environment and YAML configuration helpers.
//!
//! Both are stateless: every call reads the environment or the file again.

pub mod env;
pub mod yaml;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("environment variable {name} is not an integer: {value:?}")]
    InvalidInt { name: String, value: String },
}
