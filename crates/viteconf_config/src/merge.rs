//! Deep merging of configuration objects
//!
//! - Objects: merged key by key, recursively
//! - Arrays: override items are appended to the base items, scalar duplicates dropped
//! - Anything else: the override value wins, `null` included

use serde_json::Map;
use serde_json::Value;
use viteconf_core::types::ConfigEnv;
use viteconf_core::ViteconfResult;

use crate::user_config::UserConfig;
use crate::user_config::UserConfigFn;

/// Controls how arrays found on both sides of a merge are combined
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MergeOptions {
  /// Concatenate arrays instead of replacing the base array with the override
  pub merge_arrays: bool,
  /// After concatenating, drop repeated strings, numbers, booleans and nulls
  pub unique_array_items: bool,
}

impl Default for MergeOptions {
  fn default() -> Self {
    MergeOptions {
      merge_arrays: true,
      unique_array_items: true,
    }
  }
}

/// Deep merge `overlay` onto `base` with the default [`MergeOptions`]
pub fn deep_merge(base: Value, overlay: Value) -> Value {
  deep_merge_with_options(base, overlay, &MergeOptions::default())
}

pub fn deep_merge_with_options(base: Value, overlay: Value, options: &MergeOptions) -> Value {
  match (base, overlay) {
    (Value::Object(base_map), Value::Object(overlay_map)) => {
      Value::Object(merge_objects(base_map, overlay_map, options))
    }
    (Value::Array(mut base_items), Value::Array(overlay_items)) if options.merge_arrays => {
      base_items.extend(overlay_items);
      if options.unique_array_items {
        dedupe_scalars(&mut base_items);
      }
      Value::Array(base_items)
    }
    (_, overlay) => overlay,
  }
}

pub(crate) fn merge_objects(
  mut base_map: Map<String, Value>,
  overlay_map: Map<String, Value>,
  options: &MergeOptions,
) -> Map<String, Value> {
  for (key, overlay_value) in overlay_map {
    match base_map.get_mut(&key) {
      Some(base_value) => {
        *base_value = deep_merge_with_options(base_value.take(), overlay_value, options);
      }
      None => {
        base_map.insert(key, overlay_value);
      }
    }
  }
  base_map
}

fn dedupe_scalars(items: &mut Vec<Value>) {
  let mut seen: Vec<Value> = Vec::new();
  items.retain(|item| {
    if matches!(item, Value::Object(_) | Value::Array(_)) {
      return true;
    }

    if seen.contains(item) {
      false
    } else {
      seen.push(item.clone());
      true
    }
  });
}

/// Resolves `base` and `override_config` against `env`, then merges the override onto the base
pub fn merge_configs(
  env: &ConfigEnv,
  base: &UserConfigFn,
  override_config: &UserConfigFn,
) -> ViteconfResult<UserConfig> {
  merge_configs_with_options(env, base, override_config, &MergeOptions::default())
}

pub fn merge_configs_with_options(
  env: &ConfigEnv,
  base: &UserConfigFn,
  override_config: &UserConfigFn,
  options: &MergeOptions,
) -> ViteconfResult<UserConfig> {
  let base = base.resolve(env)?;
  let override_config = override_config.resolve(env)?;

  Ok(base.merge_with_options(override_config, options))
}
