use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use viteconf_core::ViteconfError;
use viteconf_core::ViteconfResult;

/// Resolves imports through tsconfig `paths` aliases
pub const TSCONFIG_PATHS: &str = "vite-tsconfig-paths";

/// Emits type declarations next to the library build
pub const DTS: &str = "vite-plugin-dts";

/// Marks manifest dependencies as external to the bundle
pub const NODE_EXTERNALS: &str = "rollup-plugin-node-externals";

/// A plugin the build tool should apply, with the options it is created with
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PluginNode {
  pub name: String,
  #[serde(default, skip_serializing_if = "Value::is_null")]
  pub options: Value,
}

impl PluginNode {
  pub fn new(name: impl Into<String>) -> Self {
    PluginNode {
      name: name.into(),
      options: Value::Null,
    }
  }

  pub fn with_options<T: Serialize>(name: impl Into<String>, options: &T) -> ViteconfResult<Self> {
    let options =
      serde_json::to_value(options).map_err(|error| ViteconfError::Unknown(error.into()))?;

    Ok(PluginNode {
      name: name.into(),
      options,
    })
  }

  /// Deserializes the plugin options into their typed form
  pub fn parse_options<T: serde::de::DeserializeOwned>(&self) -> ViteconfResult<T> {
    T::deserialize(&self.options).map_err(|error| ViteconfError::Unknown(error.into()))
  }
}

/// Options of the type declaration plugin
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DtsOptions {
  pub exclude: Vec<String>,
  pub entry_root: String,
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn serializes_plugins_without_options_by_name() -> anyhow::Result<()> {
    assert_eq!(
      serde_json::to_value(PluginNode::new(TSCONFIG_PATHS))?,
      json!({ "name": "vite-tsconfig-paths" })
    );

    Ok(())
  }

  #[test]
  fn round_trips_typed_options() -> anyhow::Result<()> {
    let options = DtsOptions {
      exclude: vec![String::from("/pkg/src/__tests__/**")],
      entry_root: String::from("/pkg/src"),
    };

    let plugin = PluginNode::with_options(DTS, &options)?;

    assert_eq!(
      plugin.options,
      json!({ "exclude": ["/pkg/src/__tests__/**"], "entryRoot": "/pkg/src" })
    );
    assert_eq!(plugin.parse_options::<DtsOptions>()?, options);

    Ok(())
  }

  #[test]
  fn fails_to_read_options_of_the_wrong_shape() {
    let plugin = PluginNode::new(DTS);

    assert!(plugin.parse_options::<DtsOptions>().is_err());
  }
}
