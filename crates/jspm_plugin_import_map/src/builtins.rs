use std::sync::Arc;

use futures::future::try_join_all;
use jspm_common::Builtin;
use jspm_error::Error;
use url::Url;

use crate::Generator;

#[derive(Debug, Clone)]
pub struct BuiltinIds {
  process: Url,
  buffer: Url,
  module: Url,
}

impl BuiltinIds {
  pub fn get(&self, builtin: Builtin) -> &Url {
    match builtin {
      Builtin::Process => &self.process,
      Builtin::Buffer => &self.buffer,
      Builtin::Module => &self.module,
    }
  }
}

/// Builtins resolved once per build, or the error that prevented it.
///
/// A failure doesn't stop the build. It surfaces at every use instead.
#[derive(Debug, Clone)]
pub struct BuiltinResolution(Result<BuiltinIds, Arc<Error>>);

impl BuiltinResolution {
  pub fn resolved(ids: BuiltinIds) -> Self {
    Self(Ok(ids))
  }

  pub fn failed(error: Error) -> Self {
    Self(Err(Arc::new(error)))
  }

  pub async fn trace(generator: &dyn Generator, base_url: &Url) -> Self {
    let traced = try_join_all(
      Builtin::ALL
        .iter()
        .map(|builtin| generator.trace_install(builtin.as_str(), base_url)),
    )
    .await;

    let resolve = |builtin: Builtin| {
      generator
        .resolve(builtin.as_str(), base_url)
        .ok_or_else(|| Error::unresolved_module(builtin.as_str(), base_url.as_str()))
    };

    let ids = traced.and_then(|_| {
      Ok(BuiltinIds {
        process: resolve(Builtin::Process)?,
        buffer: resolve(Builtin::Buffer)?,
        module: resolve(Builtin::Module)?,
      })
    });

    match ids {
      Ok(ids) => Self::resolved(ids),
      Err(err) => {
        tracing::debug!("builtin resolution failed, deferring: {err}");
        Self::failed(err)
      }
    }
  }

  pub fn get(&self, builtin: Builtin) -> jspm_error::Result<&Url> {
    match &self.0 {
      Ok(ids) => Ok(ids.get(builtin)),
      Err(err) => Err(Error::deferred(err.clone())),
    }
  }

  pub fn is_resolved(&self) -> bool {
    self.0.is_ok()
  }
}
