use std::fmt::Debug;

use derivative::Derivative;
use import_map::ImportMap;
use jspm_common::UpstreamFormat;
use jspm_error::Error;
use rustc_hash::FxHashMap;
use url::Url;

use crate::GeneratorOptions;

/// Import map generation and analysis, as seen by the plugin.
///
/// `trace_install` may grow the import map; `resolve` and `analysis` are only
/// called once every trace of the build start has completed.
#[async_trait::async_trait]
pub trait Generator: Debug + Send + Sync {
  async fn trace_install(&self, specifier: &str, parent: &Url) -> jspm_error::Result<()>;

  fn resolve(&self, specifier: &str, parent: &Url) -> Option<Url>;

  fn analysis(&self, resolved: &Url) -> UpstreamFormat;
}

/// A [Generator] backed by a fixed, pre-supplied import map.
///
/// Tracing only checks that the specifier is already mapped. Formats come from
/// explicit overrides, or are guessed from the file extension.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct StaticGenerator {
  #[derivative(Debug = "ignore")]
  import_map: ImportMap,
  formats: FxHashMap<String, UpstreamFormat>,
}

impl StaticGenerator {
  pub fn new(options: &GeneratorOptions) -> jspm_error::Result<Self> {
    let json = options
      .input_map
      .as_ref()
      .map(|map| map.to_string())
      .unwrap_or_else(|| "{}".to_string());
    let import_map = import_map::parse_from_json(&options.base_url, &json)
      .map_err(Error::invalid_import_map)?
      .import_map;
    Ok(Self {
      import_map,
      formats: Default::default(),
    })
  }

  pub fn with_formats(mut self, formats: impl IntoIterator<Item = (String, UpstreamFormat)>) -> Self {
    self.formats.extend(formats);
    self
  }
}

#[async_trait::async_trait]
impl Generator for StaticGenerator {
  async fn trace_install(&self, specifier: &str, parent: &Url) -> jspm_error::Result<()> {
    match self.resolve(specifier, parent) {
      Some(_) => Ok(()),
      None => Err(Error::unresolved_module(specifier, parent.as_str())),
    }
  }

  fn resolve(&self, specifier: &str, parent: &Url) -> Option<Url> {
    self.import_map.resolve(specifier, parent).ok()
  }

  fn analysis(&self, resolved: &Url) -> UpstreamFormat {
    self
      .formats
      .get(resolved.as_str())
      .copied()
      .unwrap_or_else(|| UpstreamFormat::from_extension(resolved.as_str()))
  }
}
