use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// A workspace-internal package and the location of its manifest
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PackageRef {
  pub name: String,
  pub path: PathBuf,
}

impl PackageRef {
  pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    PackageRef {
      name: name.into(),
      path: path.into(),
    }
  }
}
