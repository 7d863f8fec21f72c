use std::path::Path;

use viteconf_filesystem::FileSystemRef;

use crate::user_config::UserConfigFn;

mod node;
mod template;

pub use node::create_node_config;
pub use template::create_template_config;

/// The configuration templates packages can build on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Profile {
  /// Shared output directory, compile target, test runner settings and path aliases
  Template,
  /// Library build for Node, with every non-workspace dependency left external
  Node,
}

impl Profile {
  pub fn create(
    self,
    fs: FileSystemRef,
    dirname: &Path,
    override_config: UserConfigFn,
  ) -> UserConfigFn {
    match self {
      Profile::Template => create_template_config(dirname, override_config),
      Profile::Node => create_node_config(fs, dirname, override_config),
    }
  }
}

fn path_string(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
