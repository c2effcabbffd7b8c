use std::sync::Arc;

use futures::future::try_join_all;
use jspm_plugin::InputItem;
use url::Url;

use crate::{BuiltinResolution, ExternalsMap, FormatRegistry, Generator, PluginOptions};

/// Everything a build shares between modules. Created at build start and
/// dropped with the next one.
#[derive(Debug)]
pub struct BuildContext {
  pub(crate) base_url: Url,
  pub(crate) env: Vec<String>,
  pub(crate) generator: Arc<dyn Generator>,
  pub(crate) formats: FormatRegistry,
  pub(crate) externals: Option<ExternalsMap>,
  pub(crate) builtins: BuiltinResolution,
}

impl BuildContext {
  /// Trace builtins and entries together, then resolve the externals table.
  ///
  /// Builtin failures are kept for later. Entry failures abort the build.
  pub async fn prime(options: &PluginOptions, input: &[InputItem]) -> jspm_error::Result<Self> {
    let generator = (options.create_generator)(&options.generator_options())?;
    let base_url = options.base_url.clone();

    let (builtins, entries) = futures::join!(
      BuiltinResolution::trace(generator.as_ref(), &base_url),
      try_join_all(
        input
          .iter()
          .map(|item| generator.trace_install(&item.import, &base_url)),
      ),
    );
    entries?;

    let externals = options
      .externals
      .as_ref()
      .map(|externals| ExternalsMap::build(externals, generator.as_ref(), &base_url));

    tracing::debug!(
      entries = input.len(),
      externals = externals.as_ref().map_or(0, |e| e.len()),
      builtins_resolved = builtins.is_resolved(),
      "build context primed"
    );

    Ok(Self {
      base_url,
      env: options.env.clone(),
      generator,
      formats: Default::default(),
      externals,
      builtins,
    })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  pub fn env(&self) -> &[String] {
    &self.env
  }

  pub fn generator(&self) -> &dyn Generator {
    self.generator.as_ref()
  }

  pub fn formats(&self) -> &FormatRegistry {
    &self.formats
  }

  pub fn externals(&self) -> Option<&ExternalsMap> {
    self.externals.as_ref()
  }

  pub fn builtins(&self) -> &BuiltinResolution {
    &self.builtins
  }
}


#[cfg(test)]
mod tests {
  use std::{sync::Arc, time::Duration};

  use jspm_common::{Builtin, UpstreamFormat};
  use tokio::sync::Semaphore;
  use url::Url;

  use super::*;
  use crate::{normalize_input, GeneratorOptions};

  /// Builtin traces only finish once an entry trace has started.
  #[derive(Debug)]
  struct EntryFirstGenerator {
    entry_traced: Semaphore,
  }

  #[async_trait::async_trait]
  impl Generator for EntryFirstGenerator {
    async fn trace_install(&self, specifier: &str, _parent: &Url) -> jspm_error::Result<()> {
      if Builtin::from_specifier(specifier).is_some() {
        if let Ok(permit) = self.entry_traced.acquire().await {
          permit.forget();
        }
      } else {
        self.entry_traced.add_permits(Builtin::ALL.len());
      }
      Ok(())
    }

    fn resolve(&self, specifier: &str, parent: &Url) -> Option<Url> {
      parent.join(specifier).ok()
    }

    fn analysis(&self, _resolved: &Url) -> UpstreamFormat {
      UpstreamFormat::Esm
    }
  }

  #[tokio::test]
  async fn builtins_and_entries_are_traced_together() {
    let options = PluginOptions {
      base_url: Url::parse(test_support::BASE_URL).unwrap(),
      create_generator: Arc::new(
        |_: &GeneratorOptions| -> jspm_error::Result<Arc<dyn Generator>> {
          Ok(Arc::new(EntryFirstGenerator {
            entry_traced: Semaphore::new(0),
          }))
        },
      ),
      ..Default::default()
    };
    let input = normalize_input(["./main.js".to_string()]);

    let ctx = tokio::time::timeout(Duration::from_secs(5), BuildContext::prime(&options, &input))
      .await
      .expect("builtin tracing must not wait for entry tracing to be scheduled")
      .unwrap();
    assert!(ctx.builtins().is_resolved());
    assert_eq!(
      ctx.builtins().get(Builtin::Process).unwrap().as_str(),
      "file:///app/process"
    );
  }
}
