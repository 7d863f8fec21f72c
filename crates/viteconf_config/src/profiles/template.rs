use std::path::Path;
use std::path::PathBuf;

use serde_json::json;
use viteconf_core::ViteconfResult;

use super::path_string;
use crate::merge::merge_configs;
use crate::plugin::PluginNode;
use crate::plugin::TSCONFIG_PATHS;
use crate::user_config::UserConfig;
use crate::user_config::UserConfigFn;

/// The generic profile every other profile is merged onto
pub fn create_template_config(dirname: &Path, override_config: UserConfigFn) -> UserConfigFn {
  let dirname = dirname.to_path_buf();

  UserConfigFn::try_from_fn(move |env| {
    let default_config = UserConfigFn::from(template_defaults(&dirname)?);
    merge_configs(env, &default_config, &override_config)
  })
}

fn template_defaults(dirname: &Path) -> ViteconfResult<UserConfig> {
  let test_include: PathBuf = [dirname, Path::new("src/__tests__/**/*.test.ts?(x)")]
    .iter()
    .collect();

  UserConfig::try_from(json!({
    "build": {
      "outDir": "dist",
      "target": "es2022",
    },
    "test": {
      "watch": false,
      "include": [path_string(&test_include)],
      "sequence": {
        "hooks": "stack",
      },
    },
    "plugins": [PluginNode::new(TSCONFIG_PATHS)],
  }))
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use viteconf_core::types::ConfigEnv;

  use super::*;

  fn config(value: serde_json::Value) -> UserConfig {
    UserConfig::try_from(value).unwrap()
  }

  #[test]
  fn returns_the_template_defaults() -> anyhow::Result<()> {
    let config_fn = create_template_config(Path::new("/workspace/pkg"), UserConfigFn::default());

    assert_eq!(
      config_fn.resolve(&ConfigEnv::build("production"))?,
      config(json!({
        "build": { "outDir": "dist", "target": "es2022" },
        "test": {
          "watch": false,
          "include": ["/workspace/pkg/src/__tests__/**/*.test.ts?(x)"],
          "sequence": { "hooks": "stack" }
        },
        "plugins": [{ "name": "vite-tsconfig-paths" }]
      }))
    );

    Ok(())
  }

  #[test]
  fn merges_the_override_onto_the_defaults() -> anyhow::Result<()> {
    let config_fn = create_template_config(
      Path::new("/workspace/pkg"),
      UserConfigFn::from(config(json!({
        "build": { "outDir": "lib" },
        "test": { "include": ["/workspace/pkg/test/**/*.spec.ts"] },
        "plugins": [{ "name": "vite-plugin-react" }]
      }))),
    );

    let resolved = config_fn.resolve(&ConfigEnv::build("production"))?;

    assert_eq!(resolved.pointer("/build/outDir"), Some(&json!("lib")));
    assert_eq!(resolved.pointer("/build/target"), Some(&json!("es2022")));
    assert_eq!(
      resolved.pointer("/test/include"),
      Some(&json!([
        "/workspace/pkg/src/__tests__/**/*.test.ts?(x)",
        "/workspace/pkg/test/**/*.spec.ts"
      ]))
    );
    assert_eq!(
      resolved.pointer("/plugins"),
      Some(&json!([
        { "name": "vite-tsconfig-paths" },
        { "name": "vite-plugin-react" }
      ]))
    );

    Ok(())
  }

  #[test]
  fn passes_the_environment_to_override_functions() -> anyhow::Result<()> {
    let config_fn = create_template_config(
      Path::new("/workspace/pkg"),
      UserConfigFn::from_fn(|env| {
        UserConfig::try_from(json!({ "test": { "watch": env.mode == "development" } })).unwrap()
      }),
    );

    assert_eq!(
      config_fn
        .resolve(&ConfigEnv::serve("development"))?
        .pointer("/test/watch"),
      Some(&json!(true))
    );
    assert_eq!(
      config_fn
        .resolve(&ConfigEnv::build("production"))?
        .pointer("/test/watch"),
      Some(&json!(false))
    );

    Ok(())
  }
}
