use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use viteconf_core::types::ConfigEnv;
use viteconf_core::ViteconfError;
use viteconf_core::ViteconfResult;

use crate::merge::merge_objects;
use crate::merge::MergeOptions;
use crate::plugin::PluginNode;

/// A build-tool configuration object
///
/// Keys follow the build tool's own configuration schema, so the object is kept as untyped JSON.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserConfig(Map<String, Value>);

impl UserConfig {
  pub fn new() -> Self {
    UserConfig::default()
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }

  /// Looks up a value by JSON pointer, e.g. `/build/rollupOptions/external`
  pub fn pointer(&self, pointer: &str) -> Option<&Value> {
    let mut segments = pointer.strip_prefix('/')?.split('/');
    let first = segments.next()?;
    let mut current = self.0.get(&unescape(first))?;

    for segment in segments {
      current = match current {
        Value::Object(map) => map.get(&unescape(segment))?,
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
        _ => return None,
      };
    }

    Some(current)
  }

  /// Returns the plugin named `name` from the plugin list at `pointer`
  pub fn find_plugin(&self, pointer: &str, name: &str) -> Option<PluginNode> {
    self
      .pointer(pointer)?
      .as_array()?
      .iter()
      .filter_map(|plugin| PluginNode::deserialize(plugin).ok())
      .find(|plugin| plugin.name == name)
  }

  /// Deep merges `other` onto this config
  pub fn merge(self, other: UserConfig) -> UserConfig {
    self.merge_with_options(other, &MergeOptions::default())
  }

  pub fn merge_with_options(self, other: UserConfig, options: &MergeOptions) -> UserConfig {
    UserConfig(merge_objects(self.0, other.0, options))
  }
}

fn unescape(segment: &str) -> String {
  segment.replace("~1", "/").replace("~0", "~")
}

impl From<Map<String, Value>> for UserConfig {
  fn from(map: Map<String, Value>) -> Self {
    UserConfig(map)
  }
}

impl TryFrom<Value> for UserConfig {
  type Error = ViteconfError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    match value {
      Value::Object(map) => Ok(UserConfig(map)),
      other => Err(anyhow!("Expected a configuration object, received {other}").into()),
    }
  }
}

type ConfigFn = dyn Fn(&ConfigEnv) -> ViteconfResult<UserConfig> + Send + Sync;

/// A configuration given either as a static object or as a function of the environment
#[derive(Clone)]
pub enum UserConfigFn {
  Static(UserConfig),
  Dynamic(Arc<ConfigFn>),
}

impl UserConfigFn {
  pub fn from_fn<F>(config_fn: F) -> Self
  where
    F: Fn(&ConfigEnv) -> UserConfig + Send + Sync + 'static,
  {
    UserConfigFn::Dynamic(Arc::new(move |env: &ConfigEnv| Ok(config_fn(env))))
  }

  pub fn try_from_fn<F>(config_fn: F) -> Self
  where
    F: Fn(&ConfigEnv) -> ViteconfResult<UserConfig> + Send + Sync + 'static,
  {
    UserConfigFn::Dynamic(Arc::new(config_fn))
  }

  /// Produces the static configuration for `env`
  pub fn resolve(&self, env: &ConfigEnv) -> ViteconfResult<UserConfig> {
    match self {
      UserConfigFn::Static(config) => Ok(config.clone()),
      UserConfigFn::Dynamic(config_fn) => config_fn(env),
    }
  }
}

impl Default for UserConfigFn {
  fn default() -> Self {
    UserConfigFn::Static(UserConfig::default())
  }
}

impl From<UserConfig> for UserConfigFn {
  fn from(config: UserConfig) -> Self {
    UserConfigFn::Static(config)
  }
}

impl fmt::Debug for UserConfigFn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UserConfigFn::Static(config) => f.debug_tuple("Static").field(config).finish(),
      UserConfigFn::Dynamic(_) => f.debug_tuple("Dynamic").finish(),
    }
  }
}
