use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;
use viteconf_core::manifest::load_named_package_json;
use viteconf_core::manifest::MANIFEST_FILE_NAME;
use viteconf_core::types::PackageRef;
use viteconf_core::ViteconfError;
use viteconf_core::ViteconfResult;
use viteconf_filesystem::resolve_path;
use viteconf_filesystem::FileSystem;

/// Directory linked workspace packages are installed into
pub const NODE_MODULES: &str = "node_modules";

/// Finds every package reachable from `root` through local runtime dependency links
///
/// Packages are visited breadth first and keyed by name. A dependency is registered when it is
/// queued rather than when it is read, so mutually dependent packages cannot queue each other
/// twice. The root package is part of the result.
///
/// Only `dependencies` are followed. Dev, peer and optional dependencies never pull a package
/// into the internal set, and neither does a dependency on a registry version.
///
/// Any manifest that cannot be read, cannot be parsed, or has no name aborts the search.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn find_internal_packages(fs: &dyn FileSystem, root: &Path) -> ViteconfResult<Vec<PackageRef>> {
  let mut visited: IndexMap<String, PathBuf> = IndexMap::new();
  let mut queue: VecDeque<PathBuf> = VecDeque::new();

  queue.push_back(absolute(fs, root)?);

  while let Some(dirname) = queue.pop_front() {
    let package_json_path = dirname.join(MANIFEST_FILE_NAME);
    let (name, package_json) = load_named_package_json(fs, &package_json_path)?;

    tracing::debug!(%name, path = %package_json_path.display(), "Visiting package");
    visited.insert(name, package_json_path);

    for dependency in package_json.local_dependencies() {
      if visited.contains_key(dependency) {
        continue;
      }

      let dependency_dirname = dirname.join(NODE_MODULES).join(dependency);
      tracing::trace!(%dependency, dirname = %dependency_dirname.display(), "Queueing linked package");

      visited.insert(
        dependency.to_string(),
        dependency_dirname.join(MANIFEST_FILE_NAME),
      );
      queue.push_back(dependency_dirname);
    }
  }

  Ok(
    visited
      .into_iter()
      .map(|(name, path)| PackageRef { name, path })
      .collect(),
  )
}

fn absolute(fs: &dyn FileSystem, path: &Path) -> ViteconfResult<PathBuf> {
  if path.is_absolute() {
    return Ok(resolve_path(Path::new(""), path));
  }

  let cwd = fs.cwd().map_err(|source| ViteconfError::ManifestRead {
    path: path.join(MANIFEST_FILE_NAME),
    source,
  })?;

  Ok(resolve_path(&cwd, path))
}
