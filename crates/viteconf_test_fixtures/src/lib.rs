use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use viteconf_filesystem::in_memory_file_system::InMemoryFileSystem;
use viteconf_filesystem::FileSystemRef;

#[doc(hidden)]
pub use serde_json::json;

/// An in-memory workspace rooted at `dirname`
#[derive(Clone)]
pub struct TestFixture {
  pub fs: FileSystemRef,
  pub in_memory_fs: Arc<InMemoryFileSystem>,
  pub dirname: PathBuf,
}

impl TestFixture {
  pub fn with_dirname(dirname: PathBuf) -> Self {
    let in_memory_fs = Arc::new(InMemoryFileSystem::default());

    Self {
      fs: in_memory_fs.clone() as FileSystemRef,
      in_memory_fs,
      dirname,
    }
  }

  fn full_path(&self, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
      PathBuf::from(path)
    } else {
      self.dirname.join(path)
    }
  }

  /// Write a single file, relative paths are resolved from the fixture dirname
  pub fn write_file(&self, path: &str, content: &str) -> &Self {
    self
      .in_memory_fs
      .write_file(&self.full_path(path), content.to_string());
    self
  }

  /// Write `<dir>/package.json`
  ///
  /// Linked packages are installed at `<dependent>/node_modules/<name>`, so a fixture for a
  /// workspace dependency writes its manifest at that location.
  pub fn package_json(&self, dir: &str, manifest: serde_json::Value) -> &Self {
    let path = self.full_path(dir).join("package.json");
    self.in_memory_fs.write_file(&path, manifest.to_string());
    self
  }
}

/// Builds a [`TestFixture`] from package directories and their manifests
///
/// Each manifest is written as `<dir>/package.json`, relative to the dirname.
///
/// ```ignore
/// let fixture = workspace_fixture! {
///   PathBuf::from("/workspace"),
///   "." => { "name": "app", "dependencies": { "ui": "workspace:*" } },
///   "node_modules/ui" => { "name": "ui" },
/// };
/// ```
#[macro_export]
macro_rules! workspace_fixture {
  ($dirname:expr, $($dir:literal => $manifest:tt),* $(,)?) => {{
    let fixture = $crate::TestFixture::with_dirname($dirname);
    $(
      fixture.package_json($dir, $crate::json!($manifest));
    )*
    fixture
  }};
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn workspace_fixture_writes_a_manifest_per_package() {
    let fixture = workspace_fixture! {
      PathBuf::from("/workspace"),
      "." => { "name": "root", "dependencies": { "a": "workspace:*" } },
      "node_modules/a" => { "name": "a" },
    };

    assert_eq!(fixture.dirname, PathBuf::from("/workspace"));
    assert_eq!(
      fixture
        .fs
        .read_to_string(Path::new("/workspace/package.json"))
        .unwrap(),
      r#"{"name":"root","dependencies":{"a":"workspace:*"}}"#
    );
    assert_eq!(
      fixture
        .fs
        .read_to_string(Path::new("/workspace/node_modules/a/package.json"))
        .unwrap(),
      r#"{"name":"a"}"#
    );
  }

  #[test]
  fn write_file_keeps_raw_contents() {
    let fixture = TestFixture::with_dirname(PathBuf::from("/workspace"));
    fixture.write_file("package.json", "{");

    assert_eq!(
      fixture
        .fs
        .read_to_string(Path::new("/workspace/package.json"))
        .unwrap(),
      "{"
    );
  }
  #[test]
  fn test_package_json_writes_serialized_manifests() {
    let fixture = TestFixture::with_dirname(PathBuf::from("/workspace"));
    fixture
      .package_json(".", json!({ "name": "root" }))
      .package_json("/elsewhere", json!({ "name": "other" }));

    assert_eq!(
      fixture
        .fs
        .read_to_string(Path::new("/workspace/package.json"))
        .unwrap(),
      r#"{"name":"root"}"#
    );
    assert_eq!(
      fixture
        .fs
        .read_to_string(Path::new("/elsewhere/package.json"))
        .unwrap(),
      r#"{"name":"other"}"#
    );
  }
}
