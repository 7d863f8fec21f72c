use serde::Deserialize;
use serde::Serialize;

/// The build-tool command a configuration is being evaluated for
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
  #[default]
  Build,
  Serve,
}

/// Describes the context a configuration function is invoked in
///
/// The composer never inspects this value, it is handed as-is to every configuration
/// expressed as a function of the environment.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEnv {
  pub command: Command,
  pub mode: String,
  #[serde(default)]
  pub is_ssr_build: bool,
  #[serde(default)]
  pub is_preview: bool,
}

impl ConfigEnv {
  pub fn build(mode: impl Into<String>) -> Self {
    ConfigEnv {
      command: Command::Build,
      mode: mode.into(),
      ..ConfigEnv::default()
    }
  }

  pub fn serve(mode: impl Into<String>) -> Self {
    ConfigEnv {
      command: Command::Serve,
      mode: mode.into(),
      ..ConfigEnv::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn deserializes_from_the_build_tool_shape() -> anyhow::Result<()> {
    let env: ConfigEnv = serde_json::from_value(json!({
      "command": "serve",
      "mode": "development",
      "isPreview": true
    }))?;

    assert_eq!(
      env,
      ConfigEnv {
        command: Command::Serve,
        mode: String::from("development"),
        is_ssr_build: false,
        is_preview: true,
      }
    );

    Ok(())
  }

  #[test]
  fn serializes_with_camel_case_keys() -> anyhow::Result<()> {
    assert_eq!(
      serde_json::to_value(ConfigEnv::build("production"))?,
      json!({
        "command": "build",
        "mode": "production",
        "isSsrBuild": false,
        "isPreview": false
      })
    );

    Ok(())
  }
}
