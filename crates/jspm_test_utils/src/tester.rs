use std::sync::{Arc, Mutex};

use jspm_common::ModuleId;
use jspm_error::Error as BuildError;
use jspm_plugin::{BuildPlugin, PluginDriver, ResolveArgs, ResolvedId, TransformResult};
use jspm_plugin_import_map::{ImportMapPlugin, Minifier};

use crate::TestConfig;

/// Drives the import map plugin through a [PluginDriver] the way a bundler
/// would, collecting warnings.
pub struct Tester {
  pub config: TestConfig,
  pub plugin: Arc<ImportMapPlugin>,
  pub driver: PluginDriver,
  pub warnings: Arc<Mutex<Vec<BuildError>>>,
}

impl Tester {
  pub fn new(config: TestConfig) -> Self {
    Self::with_minifier(config, None)
  }

  pub fn with_minifier(config: TestConfig, minify: Option<Arc<dyn Minifier>>) -> Self {
    let mut options = config.plugin_options();
    options.minify = minify;
    let warnings: Arc<Mutex<Vec<BuildError>>> = Default::default();
    let warning_collector = warnings.clone();
    let plugin = Arc::new(ImportMapPlugin::new(options));
    let driver = PluginDriver::with_warning_handler(
      vec![Box::new(plugin.clone()) as Box<dyn BuildPlugin>],
      Arc::new(move |err| {
        warning_collector.lock().unwrap().push(err);
      }),
    );
    Self {
      config,
      plugin,
      driver,
      warnings,
    }
  }

  pub fn from_json(value: serde_json::Value) -> Self {
    Self::new(TestConfig::from_json(value))
  }

  pub async fn build_start(&self) -> jspm_error::Result<()> {
    self.driver.build_start(&self.config.input()).await
  }

  pub async fn resolve(
    &self,
    specifier: &str,
    importer: Option<&ModuleId>,
  ) -> jspm_error::Result<ResolvedId> {
    let resolved = self
      .driver
      .resolve(ResolveArgs {
        importer,
        specifier,
      })
      .await?;
    Ok(resolved.unwrap())
  }

  /// Load then transform, the per-module half of a build.
  pub async fn compile(&self, id: &ModuleId) -> jspm_error::Result<TransformResult> {
    let code = self.driver.load(id).await?.unwrap();
    self.driver.transform(id, code).await
  }

  pub fn warnings(&self) -> Vec<String> {
    self
      .warnings
      .lock()
      .unwrap()
      .iter()
      .map(|warning| warning.to_string())
      .collect()
  }
}
