use std::sync::Arc;

use derivative::Derivative;
use jspm_error::Error;
use jspm_plugin::InputItem;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use url::Url;

use crate::{
  DewTransform, ExternalsOption, Fetcher, FileFetcher, Generator, Minifier, StaticGenerator,
  SwcTypeScript, TypeScriptTransform,
};

pub type CreateGenerator =
  Arc<dyn Fn(&GeneratorOptions) -> jspm_error::Result<Arc<dyn Generator>> + Send + Sync>;

/// What a [Generator] is created from at the start of every build.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
  pub base_url: Url,
  pub env: Vec<String>,
  pub default_provider: String,
  pub input_map: Option<serde_json::Value>,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct PluginOptions {
  pub base_url: Url,
  /// Conditions the import map is generated for, e.g. `browser`, `production`.
  pub env: Vec<String>,
  pub default_provider: String,
  pub externals: Option<ExternalsOption>,
  /// A pre-supplied import map, in its JSON form.
  pub input_map: Option<serde_json::Value>,
  #[derivative(Debug = "ignore")]
  pub create_generator: CreateGenerator,
  pub fetcher: Arc<dyn Fetcher>,
  pub typescript: Arc<dyn TypeScriptTransform>,
  /// None means CommonJS modules can't be rewritten, and transforming one fails.
  pub dew: Option<Arc<dyn DewTransform>>,
  /// None means disable minification
  pub minify: Option<Arc<dyn Minifier>>,
}

pub fn default_base_url() -> Url {
  let cwd = std::env::current_dir().expect("the current directory should be accessible");
  Url::from_directory_path(cwd).expect("the current directory should be an absolute path")
}

pub fn default_env() -> Vec<String> {
  vec!["browser".to_string(), "development".to_string()]
}

pub fn default_provider() -> String {
  "nodemodules".to_string()
}

pub fn static_generator() -> CreateGenerator {
  Arc::new(
    |options: &GeneratorOptions| -> jspm_error::Result<Arc<dyn Generator>> {
      Ok(Arc::new(StaticGenerator::new(options)?))
    },
  )
}

impl Default for PluginOptions {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      env: default_env(),
      default_provider: default_provider(),
      externals: None,
      input_map: None,
      create_generator: static_generator(),
      fetcher: Arc::new(FileFetcher),
      typescript: Arc::new(SwcTypeScript),
      dew: None,
      minify: None,
    }
  }
}

impl PluginOptions {
  /// Apply a deserialized [PluginConfig] on top of the defaults.
  pub fn from_config(config: PluginConfig) -> jspm_error::Result<Self> {
    let defaults = Self::default();
    let base_url = match config.base_url {
      Some(base_url) => Url::parse(&base_url)
        .map_err(|e| Error::panic(format!("Invalid base URL \"{base_url}\": {e}")))?,
      None => defaults.base_url.clone(),
    };
    Ok(Self {
      base_url,
      env: config.env.unwrap_or(defaults.env.clone()),
      default_provider: config
        .default_provider
        .unwrap_or(defaults.default_provider.clone()),
      externals: config.externals,
      input_map: config.input_map,
      ..defaults
    })
  }

  pub(crate) fn generator_options(&self) -> GeneratorOptions {
    GeneratorOptions {
      base_url: self.base_url.clone(),
      env: self.env.clone(),
      default_provider: self.default_provider.clone(),
      input_map: self.input_map.clone(),
    }
  }
}

/// The serializable part of [PluginOptions].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
  pub base_url: Option<String>,
  pub env: Option<Vec<String>>,
  pub default_provider: Option<String>,
  pub externals: Option<ExternalsOption>,
  pub input_map: Option<serde_json::Value>,
}

/// Turn a list of entry specifiers into named inputs.
///
/// Names are the file name without its extension, `main.js` becomes `main`.
/// Clashing names get a numeric suffix starting at 2.
pub fn normalize_input(input: impl IntoIterator<Item = String>) -> Vec<InputItem> {
  let mut seen = FxHashSet::default();
  input
    .into_iter()
    .map(|import| {
      let file_name = import.rsplit('/').next().unwrap_or(&import);
      let stem = match file_name.rfind('.') {
        Some(index) => &file_name[..index],
        None => file_name,
      };
      let mut name = stem.to_string();
      let mut index = 1;
      while seen.contains(&name) {
        index += 1;
        name = format!("{stem}{index}");
      }
      seen.insert(name.clone());
      InputItem { name, import }
    })
    .collect()
}
