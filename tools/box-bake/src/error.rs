//! Error type for the baker library

use boxbake_shared::FormatError;

/// Errors that abort a bake. No partial output is produced when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    /// Malformed numeric text, wrong element counts or an unexpected document shape
    #[error("parse error: {0}")]
    Parse(String),

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing, unreadable or oversized input file
    #[error("{0:#}")]
    Read(anyhow::Error),

    #[error("mesh format error: {0}")]
    Format(#[from] FormatError),

    #[error("failed to parse config: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl BakeError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
