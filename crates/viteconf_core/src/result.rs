use std::path::PathBuf;

use thiserror::Error;

pub type ViteconfResult<T> = std::result::Result<T, ViteconfError>;

#[derive(Error, Debug)]
pub enum ViteconfError {
  /// A workspace manifest without a `name` field
  #[error("Missing name in {}", .0.display())]
  ManifestMissingName(PathBuf),

  #[error("Failed to read {}: {source}", path.display())]
  ManifestRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Error parsing {}: {source}", path.display())]
  ManifestParse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid pattern {pattern}: {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error(transparent)]
  Unknown(#[from] anyhow::Error),
}

impl ViteconfError {
  /// The manifest path involved in the error, if any
  pub fn manifest_path(&self) -> Option<&PathBuf> {
    match self {
      ViteconfError::ManifestMissingName(path) => Some(path),
      ViteconfError::ManifestRead { path, .. } => Some(path),
      ViteconfError::ManifestParse { path, .. } => Some(path),
      _ => None,
    }
  }
}
