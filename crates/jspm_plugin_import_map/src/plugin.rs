use std::sync::Arc;

use jspm_error::Error;
use jspm_plugin::{
  BuildPlugin, BuildStartArgs, Context, HookNoReturn, LoadArgs, LoadOutput, PluginName,
  RenderChunkArgs, RenderChunkOutput, ResolveArgs, ResolveOutput, TransformArgs,
  TransformOutput,
};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::{load_module, minify_chunk, resolve_specifier, transform_module, BuildContext, PluginOptions};

/// Resolves every specifier through an import map and turns CommonJS, JSON and
/// TypeScript modules into ESM.
#[derive(Debug)]
pub struct ImportMapPlugin {
  options: PluginOptions,
  build: RwLock<Option<Arc<BuildContext>>>,
}

impl ImportMapPlugin {
  pub fn new(options: PluginOptions) -> Self {
    jspm_tracing::enable_tracing_on_demand();
    Self {
      options,
      build: RwLock::new(None),
    }
  }

  /// The context of the current build.
  pub async fn build_context(&self) -> jspm_error::Result<Arc<BuildContext>> {
    self
      .build
      .read()
      .await
      .clone()
      .ok_or_else(Error::build_not_started)
  }
}

#[async_trait::async_trait]
impl BuildPlugin for ImportMapPlugin {
  fn name(&self) -> PluginName {
    std::borrow::Cow::Borrowed("jspm:import-map")
  }

  #[instrument(skip_all)]
  async fn build_start(&self, _ctx: &mut Context, args: &BuildStartArgs) -> HookNoReturn {
    // nothing from the previous build may leak into this one
    *self.build.write().await = None;
    let context = BuildContext::prime(&self.options, args.input).await?;
    *self.build.write().await = Some(Arc::new(context));
    Ok(())
  }

  async fn resolve(&self, _ctx: &mut Context, args: &mut ResolveArgs) -> ResolveOutput {
    let build = self.build_context().await?;
    resolve_specifier(&build, args.specifier, args.importer).map(Some)
  }

  async fn load(&self, _ctx: &mut Context, args: &LoadArgs) -> LoadOutput {
    load_module(self.options.fetcher.as_ref(), args.id)
      .await
      .map(Some)
  }

  #[instrument(skip_all, fields(id = %args.id))]
  async fn transform(&self, _ctx: &mut Context, args: &mut TransformArgs) -> TransformOutput {
    let build = self.build_context().await?;
    transform_module(&build, &self.options, args.id, args.code).map(Some)
  }

  async fn render_chunk(&self, ctx: &mut Context, args: &RenderChunkArgs) -> RenderChunkOutput {
    let Some(minifier) = &self.options.minify else {
      return Ok(None);
    };
    Ok(minify_chunk(minifier.as_ref(), ctx, args.chunk_name, args.code).await)
  }
}
