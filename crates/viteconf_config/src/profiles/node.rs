use std::path::Path;

use serde_json::json;
use viteconf_core::types::PackageRef;
use viteconf_core::ViteconfResult;
use viteconf_filesystem::FileSystemRef;
use viteconf_workspace::find_internal_packages;

use super::path_string;
use super::template::create_template_config;
use crate::merge::merge_configs;
use crate::node_externals::exclude_pattern;
use crate::node_externals::NodeExternalsOptionsBuilder;
use crate::plugin::DtsOptions;
use crate::plugin::PluginNode;
use crate::plugin::DTS;
use crate::user_config::UserConfig;
use crate::user_config::UserConfigFn;

/// Library build profile for Node
///
/// Each evaluation discovers the workspace packages linked from `dirname`. Those are bundled,
/// every other runtime, peer, dev and optional dependency of them is left external. The node
/// defaults are merged onto the template profile, then `override_config` onto the result.
pub fn create_node_config(
  fs: FileSystemRef,
  dirname: &Path,
  override_config: UserConfigFn,
) -> UserConfigFn {
  let dirname = dirname.to_path_buf();

  UserConfigFn::try_from_fn(move |env| {
    let internal_packages = find_internal_packages(&*fs, &dirname)?;
    tracing::debug!(
      dirname = %dirname.display(),
      internal_packages = ?internal_packages.iter().map(|p| &p.name).collect::<Vec<_>>(),
      "Creating node config"
    );

    let node_defaults = node_defaults(&dirname, &internal_packages)?;
    let default_config = create_template_config(&dirname, UserConfigFn::from(node_defaults));

    merge_configs(env, &default_config, &override_config)
  })
}

fn node_defaults(dirname: &Path, internal_packages: &[PackageRef]) -> ViteconfResult<UserConfig> {
  let src = dirname.join("src");

  let node_externals = NodeExternalsOptionsBuilder::default()
    .deps(true)
    .peer_deps(true)
    .dev_deps(true)
    .opt_deps(true)
    .package_path(internal_packages.iter().map(|p| p.path.clone()).collect())
    .exclude(
      internal_packages
        .iter()
        .map(|p| exclude_pattern(&p.name))
        .collect(),
    )
    .build();

  let dts = PluginNode::with_options(
    DTS,
    &DtsOptions {
      exclude: vec![path_string(&src.join("__tests__").join("**"))],
      entry_root: path_string(&src),
    },
  )?;

  UserConfig::try_from(json!({
    "build": {
      "minify": false,
      "sourcemap": true,
      "lib": {
        "formats": ["es"],
        "entry": path_string(&src.join("index")),
        // The build tool appends the extension of each output format
        "fileName": "[name]",
      },
      "rollupOptions": {
        "treeshake": false,
        "output": {
          "preserveModules": true,
          "preserveModulesRoot": path_string(&src),
        },
        "external": [
          ".*__generated__.*",
          ".*__tests__.*",
        ],
        "plugins": [node_externals.into_plugin()?],
      },
    },
    "resolve": {
      "mainFields": ["module", "jsnext:main", "jsnext"],
      "conditions": ["node"],
    },
    "plugins": [dts],
  }))
}
