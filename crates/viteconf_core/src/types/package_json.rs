use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Dependency name to version constraint, in manifest order
pub type DependencyList = IndexMap<String, String>;

/// Version protocols that point at a package inside the workspace rather than the registry
const LOCAL_LINK_PROTOCOLS: [&str; 3] = ["workspace:", "link:", "portal:"];

/// The package.json fields needed to walk a workspace
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
  pub name: Option<String>,
  pub version: Option<String>,
  #[serde(default)]
  pub dependencies: DependencyList,
  #[serde(default)]
  pub dev_dependencies: DependencyList,
  #[serde(default)]
  pub peer_dependencies: DependencyList,
  #[serde(default)]
  pub optional_dependencies: DependencyList,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DependencyKind {
  Runtime,
  Dev,
  Peer,
  Optional,
}

impl PackageJson {
  pub fn dependencies_of(&self, kind: DependencyKind) -> &DependencyList {
    match kind {
      DependencyKind::Runtime => &self.dependencies,
      DependencyKind::Dev => &self.dev_dependencies,
      DependencyKind::Peer => &self.peer_dependencies,
      DependencyKind::Optional => &self.optional_dependencies,
    }
  }

  /// Runtime dependencies resolved from inside the workspace
  pub fn local_dependencies(&self) -> impl Iterator<Item = &str> {
    self
      .dependencies
      .iter()
      .filter(|(_name, version)| is_local_link(version))
      .map(|(name, _version)| name.as_str())
  }
}

/// Returns true when a version constraint links to a local package
///
/// Plain semver ranges, dist-tags, `npm:` aliases, URLs and `file:` tarballs are all treated
/// as registry references.
pub fn is_local_link(version: &str) -> bool {
  let version = version.trim();
  LOCAL_LINK_PROTOCOLS
    .iter()
    .any(|protocol| version.starts_with(protocol))
}
