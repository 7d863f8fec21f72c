use std::path::Path;

use viteconf_filesystem::FileSystem;

use crate::types::PackageJson;
use crate::ViteconfError;
use crate::ViteconfResult;

pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Reads and parses the package.json at `path`
pub fn load_package_json(fs: &dyn FileSystem, path: &Path) -> ViteconfResult<PackageJson> {
  tracing::trace!(path = %path.display(), "Reading manifest");

  let raw = fs
    .read_to_string(path)
    .map_err(|source| ViteconfError::ManifestRead {
      path: path.to_path_buf(),
      source,
    })?;

  serde_json::from_str::<PackageJson>(&raw).map_err(|source| ViteconfError::ManifestParse {
    path: path.to_path_buf(),
    source,
  })
}

/// Reads a manifest that must declare a package name
pub fn load_named_package_json(
  fs: &dyn FileSystem,
  path: &Path,
) -> ViteconfResult<(String, PackageJson)> {
  let package_json = load_package_json(fs, path)?;

  match package_json.name.clone() {
    Some(name) => Ok((name, package_json)),
    None => Err(ViteconfError::ManifestMissingName(path.to_path_buf())),
  }
}

#[cfg(test)]
mod tests {
  use std::io;
  use std::path::PathBuf;

  use mockall::predicate::eq;
  use viteconf_filesystem::in_memory_file_system::InMemoryFileSystem;
  use viteconf_filesystem::MockFileSystem;

  use super::*;

  mod load_package_json {
    use super::*;

    #[test]
    fn returns_an_error_when_the_manifest_does_not_exist() {
      let fs = InMemoryFileSystem::default();
      let path = PathBuf::from("/project-root/package.json");

      assert_eq!(
        load_package_json(&fs, &path).map_err(|err| err.to_string()),
        Err(format!("Failed to read {}: File not found", path.display()))
      );
    }

    #[test]
    fn returns_an_error_when_the_manifest_is_malformed() {
      let fs = InMemoryFileSystem::default();
      let path = PathBuf::from("/project-root/package.json");

      fs.write_file(&path, String::from("{invalid json"));

      assert_eq!(
        load_package_json(&fs, &path).map_err(|err| err.to_string()),
        Err(format!(
          "Error parsing {}: key must be a string at line 1 column 2",
          path.display()
        ))
      );
    }

    #[test]
    fn returns_an_error_when_a_dependency_list_has_the_wrong_shape() {
      let fs = InMemoryFileSystem::default();
      let path = PathBuf::from("/project-root/package.json");

      fs.write_file(&path, String::from(r#"{"dependencies": ["a"]}"#));

      assert!(matches!(
        load_package_json(&fs, &path),
        Err(ViteconfError::ManifestParse { .. })
      ));
    }

    #[test]
    fn propagates_io_errors_from_the_file_system() {
      let mut fs = MockFileSystem::new();
      let path = PathBuf::from("/project-root/package.json");

      fs.expect_read_to_string()
        .with(eq(path.clone()))
        .return_once(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

      let error = load_package_json(&fs, &path).unwrap_err();

      assert!(matches!(error, ViteconfError::ManifestRead { .. }));
      assert_eq!(error.manifest_path(), Some(&path));
    }

    #[test]
    fn returns_the_parsed_manifest() {
      let fs = InMemoryFileSystem::default();
      let path = PathBuf::from("/project-root/package.json");

      fs.write_file(
        &path,
        String::from(r#"{"name": "root", "dependencies": {"a": "workspace:*"}}"#),
      );

      let package_json = load_package_json(&fs, &path).unwrap();

      assert_eq!(package_json.name.as_deref(), Some("root"));
      assert_eq!(package_json.local_dependencies().collect::<Vec<_>>(), vec!["a"]);
    }
  }

  mod load_named_package_json {
    use super::*;

    #[test]
    fn returns_an_error_when_the_name_is_missing() {
      let fs = InMemoryFileSystem::default();
      let path = PathBuf::from("/project-root/package.json");

      fs.write_file(&path, String::from("{}"));

      assert_eq!(
        load_named_package_json(&fs, &path).map_err(|err| err.to_string()),
        Err(format!("Missing name in {}", path.display()))
      );
    }

    #[test]
    fn returns_the_declared_name() {
      let fs = InMemoryFileSystem::default();
      let path = PathBuf::from("/project-root/package.json");

      fs.write_file(&path, String::from(r#"{"name": "@scope/root"}"#));

      let (name, _package_json) = load_named_package_json(&fs, &path).unwrap();

      assert_eq!(name, "@scope/root");
    }
  }
}
