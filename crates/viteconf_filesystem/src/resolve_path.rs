use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Lexically resolve `path` against `cwd`
pub fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
  let mut result = if path.is_absolute() {
    vec![]
  } else {
    cwd.components().collect()
  };

  for component in path.components() {
    match component {
      Component::Prefix(prefix) => {
        result = vec![Component::Prefix(prefix)];
      }
      Component::RootDir => {
        result.push(Component::RootDir);
      }
      Component::CurDir => {}
      Component::ParentDir => {
        if !matches!(
          result.last(),
          Some(Component::RootDir) | Some(Component::Prefix(_))
        ) {
          result.pop();
        }
      }
      Component::Normal(path) => {
        result.push(Component::Normal(path));
      }
    }
  }

  PathBuf::from_iter(result)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_absolute_paths() {
    assert_eq!(
      resolve_path(Path::new("/cwd"), Path::new("/foo/bar")),
      PathBuf::from("/foo/bar")
    );
  }

  #[test]
  fn joins_relative_paths_onto_cwd() {
    assert_eq!(
      resolve_path(Path::new("/cwd"), Path::new("foo/bar")),
      PathBuf::from("/cwd/foo/bar")
    );
  }

  #[test]
  fn folds_dot_segments() {
    assert_eq!(
      resolve_path(Path::new("/cwd"), Path::new("./foo/./bar/../baz/")),
      PathBuf::from("/cwd/foo/baz")
    );
  }

  #[test]
  fn does_not_walk_above_the_root() {
    assert_eq!(
      resolve_path(Path::new("/"), Path::new("../../foo")),
      PathBuf::from("/foo")
    );
  }
}
