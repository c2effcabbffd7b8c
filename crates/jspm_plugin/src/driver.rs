use std::sync::Arc;

use derivative::Derivative;
use jspm_common::ModuleId;
use jspm_error::Error;

use crate::{
  BuildPlugin, BuildStartArgs, Context, InputItem, LoadArgs, RenderChunkArgs, ResolveArgs,
  ResolveOutput, TransformArgs, TransformResult,
};

pub type WarningHandler = Arc<dyn Fn(Error) + Send + Sync>;

pub fn default_warning_handler() -> WarningHandler {
  Arc::new(|err: Error| {
    tracing::warn!(code = err.code(), "{}", err);
  })
}

/// Runs every hook of the registered plugins in registration order.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct PluginDriver {
  pub plugins: Vec<Box<dyn BuildPlugin>>,
  #[derivative(Debug = "ignore")]
  on_warn: WarningHandler,
}

impl PluginDriver {
  pub fn new(plugins: Vec<Box<dyn BuildPlugin>>) -> Self {
    Self::with_warning_handler(plugins, default_warning_handler())
  }

  pub fn with_warning_handler(plugins: Vec<Box<dyn BuildPlugin>>, on_warn: WarningHandler) -> Self {
    Self { plugins, on_warn }
  }

  fn flush_warnings(&self, ctx: Context) {
    ctx
      .into_warnings()
      .into_iter()
      .for_each(|warning| (self.on_warn)(warning));
  }

  pub async fn build_start(&self, input: &[InputItem]) -> jspm_error::Result<()> {
    for plugin in &self.plugins {
      let mut ctx = Context::new();
      let result = plugin.build_start(&mut ctx, &BuildStartArgs { input }).await;
      self.flush_warnings(ctx);
      result?;
    }
    Ok(())
  }

  pub async fn resolve(&self, mut args: ResolveArgs<'_>) -> ResolveOutput {
    for plugin in &self.plugins {
      let mut ctx = Context::new();
      let output = plugin.resolve(&mut ctx, &mut args).await;
      self.flush_warnings(ctx);
      let output = output?;
      if output.is_some() {
        return Ok(output);
      }
    }
    Ok(None)
  }

  pub async fn load(&self, id: &ModuleId) -> jspm_error::Result<Option<String>> {
    for plugin in &self.plugins {
      let mut ctx = Context::new();
      let output = plugin.load(&mut ctx, &LoadArgs { id }).await;
      self.flush_warnings(ctx);
      let output = output?;
      if output.is_some() {
        return Ok(output);
      }
    }
    Ok(None)
  }

  pub async fn transform(&self, id: &ModuleId, code: String) -> jspm_error::Result<TransformResult> {
    let mut result = TransformResult::code_only(code);
    for plugin in &self.plugins {
      let mut ctx = Context::new();
      let output = plugin
        .transform(
          &mut ctx,
          &mut TransformArgs {
            id,
            code: &result.code,
          },
        )
        .await;
      self.flush_warnings(ctx);
      let output = output.map_err(|err| err.context(format!("transforming {id}")))?;
      if let Some(output) = output {
        result = TransformResult {
          code: output.code,
          map: output.map.or(result.map),
        };
      }
    }
    Ok(result)
  }

  pub async fn render_chunk(
    &self,
    chunk_name: &str,
    code: String,
  ) -> jspm_error::Result<TransformResult> {
    let mut result = TransformResult::code_only(code);
    for plugin in &self.plugins {
      let mut ctx = Context::new();
      let output = plugin
        .render_chunk(
          &mut ctx,
          &RenderChunkArgs {
            chunk_name,
            code: &result.code,
          },
        )
        .await;
      self.flush_warnings(ctx);
      if let Some(output) = output? {
        result = TransformResult {
          code: output.code,
          map: output.map.or(result.map),
        };
      }
    }
    Ok(result)
  }
}
