// Error types for failures callers need to tell apart.
// Everything else travels as anyhow::Error with context attached at the I/O boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewardsError {
    /// Reward matrix is missing a required column (fatal, nothing is ranked)
    #[error("Matrix CSV must have a '{column}' column.")]
    MissingColumn { column: String },

    /// Required credential not present in the environment
    #[error("Set {var} first.")]
    MissingCredential { var: String },

    /// Place lookup service answered with an error status
    #[error("Place lookup failed: {0}")]
    PlaceLookup(String),

    /// Invalid configuration or rules file contents
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RewardsError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn missing_credential(var: impl Into<String>) -> Self {
        Self::MissingCredential { var: var.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn place_lookup(msg: impl Into<String>) -> Self {
        Self::PlaceLookup(msg.into())
    }
}
