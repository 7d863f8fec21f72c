use std::path::PathBuf;

use derive_builder::Builder;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use viteconf_core::manifest::load_package_json;
use viteconf_core::types::DependencyKind;
use viteconf_core::ViteconfError;
use viteconf_core::ViteconfResult;
use viteconf_filesystem::FileSystem;

use crate::plugin::PluginNode;
use crate::plugin::NODE_EXTERNALS;
use crate::user_config::UserConfig;

/// Where the externals plugin is listed in a resolved configuration
pub const NODE_EXTERNALS_PLUGINS_POINTER: &str = "/build/rollupOptions/plugins";

/// Options of the externals plugin
///
/// Each enabled dependency kind is read from every manifest in `package_path`. Names matching an
/// `exclude` pattern stay bundled, ids matching an `include` pattern are always external.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(skip), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct NodeExternalsOptions {
  pub deps: bool,
  pub dev_deps: bool,
  pub peer_deps: bool,
  pub opt_deps: bool,
  pub package_path: Vec<PathBuf>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub include: Vec<String>,
  #[serde(default)]
  pub exclude: Vec<String>,
}

impl Default for NodeExternalsOptions {
  fn default() -> Self {
    NodeExternalsOptions {
      deps: true,
      dev_deps: false,
      peer_deps: true,
      opt_deps: true,
      package_path: Vec::new(),
      include: Vec::new(),
      exclude: Vec::new(),
    }
  }
}

impl NodeExternalsOptionsBuilder {
  pub fn build(self) -> NodeExternalsOptions {
    let defaults = NodeExternalsOptions::default();

    NodeExternalsOptions {
      deps: self.deps.unwrap_or(defaults.deps),
      dev_deps: self.dev_deps.unwrap_or(defaults.dev_deps),
      peer_deps: self.peer_deps.unwrap_or(defaults.peer_deps),
      opt_deps: self.opt_deps.unwrap_or(defaults.opt_deps),
      package_path: self.package_path.unwrap_or(defaults.package_path),
      include: self.include.unwrap_or(defaults.include),
      exclude: self.exclude.unwrap_or(defaults.exclude),
    }
  }
}

impl NodeExternalsOptions {
  pub fn enabled_kinds(&self) -> Vec<DependencyKind> {
    [
      (self.deps, DependencyKind::Runtime),
      (self.dev_deps, DependencyKind::Dev),
      (self.peer_deps, DependencyKind::Peer),
      (self.opt_deps, DependencyKind::Optional),
    ]
    .into_iter()
    .filter_map(|(enabled, kind)| enabled.then_some(kind))
    .collect()
  }

  pub fn into_plugin(self) -> ViteconfResult<PluginNode> {
    PluginNode::with_options(NODE_EXTERNALS, &self)
  }

  /// Reads the externals plugin options back out of a resolved configuration
  pub fn from_config(config: &UserConfig) -> ViteconfResult<Option<Self>> {
    config
      .find_plugin(NODE_EXTERNALS_PLUGINS_POINTER, NODE_EXTERNALS)
      .map(|plugin| plugin.parse_options::<NodeExternalsOptions>())
      .transpose()
  }
}

/// Pattern keeping a package, and any of its subpaths, out of the externals
///
/// Only the exact name or `<name>/...` match, so `@acme/ui` leaves `@acme/ui-icons` external.
pub fn exclude_pattern(package_name: &str) -> String {
  format!("^{}(?:/.*)?$", regex::escape(package_name))
}

/// The externals decision computed from the plugin options and the manifests they point at
#[derive(Debug)]
pub struct NodeExternals {
  externals: Vec<String>,
  include: Vec<Regex>,
  exclude: Vec<Regex>,
}

impl NodeExternals {
  pub fn load(fs: &dyn FileSystem, options: &NodeExternalsOptions) -> ViteconfResult<Self> {
    let include = compile(&options.include)?;
    let exclude = compile(&options.exclude)?;
    let kinds = options.enabled_kinds();

    let mut externals: Vec<String> = Vec::new();
    for path in &options.package_path {
      let package_json = load_package_json(fs, path)?;

      for kind in &kinds {
        for name in package_json.dependencies_of(*kind).keys() {
          if !externals.contains(name) && !exclude.iter().any(|pattern| pattern.is_match(name)) {
            externals.push(name.clone());
          }
        }
      }
    }

    tracing::debug!(count = externals.len(), "Collected external dependencies");

    Ok(NodeExternals {
      externals,
      include,
      exclude,
    })
  }

  /// Dependency names treated as external, in manifest order
  pub fn externals(&self) -> impl Iterator<Item = &str> {
    self.externals.iter().map(String::as_str)
  }

  /// Whether an import id is left for the consumer to resolve
  pub fn is_external(&self, id: &str) -> bool {
    if self.exclude.iter().any(|pattern| pattern.is_match(id)) {
      return false;
    }

    if self.include.iter().any(|pattern| pattern.is_match(id)) {
      return true;
    }

    self.externals.iter().any(|name| {
      id == name
        || id
          .strip_prefix(name.as_str())
          .is_some_and(|rest| rest.starts_with('/'))
    })
  }
}

fn compile(patterns: &[String]) -> ViteconfResult<Vec<Regex>> {
  patterns
    .iter()
    .map(|pattern| {
      Regex::new(pattern).map_err(|source| ViteconfError::InvalidPattern {
        pattern: pattern.clone(),
        source,
      })
    })
    .collect()
}
