use std::sync::Arc;

use jspm_common::UpstreamFormat;
use jspm_plugin::InputItem;
use jspm_plugin_import_map::{
  normalize_input, Generator, GeneratorOptions, PluginConfig, PluginOptions, StaticGenerator,
};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{MemoryFetcher, ScriptedDew};

pub const TEST_BASE_URL: &str = "file:///app/";

fn input_default() -> Vec<String> {
  vec!["./main.js".to_string()]
}

/// A whole build described as JSON: plugin configuration, the import map,
/// format overrides and the source of every module.
#[derive(Debug, Deserialize)]
pub struct TestConfig {
  #[serde(flatten)]
  pub plugin: PluginConfig,
  /// Resolved URL → upstream format, for URLs the extension doesn't tell.
  #[serde(default)]
  pub formats: FxHashMap<String, UpstreamFormat>,
  /// Resolved URL → module source.
  #[serde(default)]
  pub sources: FxHashMap<String, String>,
  #[serde(default = "input_default")]
  pub input: Vec<String>,
}

impl TestConfig {
  pub fn from_json(value: serde_json::Value) -> Self {
    serde_json::from_value(value).unwrap()
  }

  pub fn input(&self) -> Vec<InputItem> {
    normalize_input(self.input.clone())
  }

  /// Options over in-memory collaborators. The base URL defaults to
  /// [TEST_BASE_URL] rather than the working directory.
  pub fn plugin_options(&self) -> PluginOptions {
    let mut config = self.plugin.clone();
    config.base_url.get_or_insert_with(|| TEST_BASE_URL.to_string());
    let formats = self.formats.clone();
    PluginOptions {
      create_generator: Arc::new(
        move |options: &GeneratorOptions| -> jspm_error::Result<Arc<dyn Generator>> {
          Ok(Arc::new(
            StaticGenerator::new(options)?.with_formats(formats.clone()),
          ))
        },
      ),
      fetcher: Arc::new(MemoryFetcher::new(self.sources.clone())),
      dew: Some(Arc::new(ScriptedDew)),
      ..PluginOptions::from_config(config).unwrap()
    }
  }
}
