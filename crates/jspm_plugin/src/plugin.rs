use std::{borrow::Cow, fmt::Debug, sync::Arc};

use jspm_common::ModuleId;

use crate::{BuildStartArgs, Context, LoadArgs, RenderChunkArgs, ResolveArgs, TransformArgs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
  pub id: ModuleId,
  pub external: bool,
}

impl ResolvedId {
  pub fn internal(id: ModuleId) -> Self {
    Self {
      id,
      external: false,
    }
  }

  pub fn external(id: impl Into<String>) -> Self {
    Self {
      id: ModuleId::raw(id),
      external: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
  pub code: String,
  pub map: Option<String>,
}

impl TransformResult {
  pub fn code_only(code: impl Into<String>) -> Self {
    Self {
      code: code.into(),
      map: None,
    }
  }
}

pub type HookNoReturn = jspm_error::Result<()>;
pub type ResolveOutput = jspm_error::Result<Option<ResolvedId>>;
pub type LoadOutput = jspm_error::Result<Option<String>>;
pub type TransformOutput = jspm_error::Result<Option<TransformResult>>;
pub type RenderChunkOutput = jspm_error::Result<Option<TransformResult>>;
pub type PluginName<'a> = Cow<'a, str>;

#[async_trait::async_trait]
pub trait BuildPlugin: Debug + Send + Sync {
  fn name(&self) -> PluginName;

  async fn build_start(&self, _ctx: &mut Context, _args: &BuildStartArgs) -> HookNoReturn {
    Ok(())
  }

  async fn resolve(&self, _ctx: &mut Context, _args: &mut ResolveArgs) -> ResolveOutput {
    Ok(None)
  }

  async fn load(&self, _ctx: &mut Context, _args: &LoadArgs) -> LoadOutput {
    Ok(None)
  }

  async fn transform(&self, _ctx: &mut Context, _args: &mut TransformArgs) -> TransformOutput {
    Ok(None)
  }

  async fn render_chunk(&self, _ctx: &mut Context, _args: &RenderChunkArgs) -> RenderChunkOutput {
    Ok(None)
  }
}

/// Lets a caller keep a handle on a plugin it hands to a driver.
#[async_trait::async_trait]
impl<T: BuildPlugin + ?Sized> BuildPlugin for Arc<T> {
  fn name(&self) -> PluginName {
    (**self).name()
  }

  async fn build_start(&self, ctx: &mut Context, args: &BuildStartArgs) -> HookNoReturn {
    (**self).build_start(ctx, args).await
  }

  async fn resolve(&self, ctx: &mut Context, args: &mut ResolveArgs) -> ResolveOutput {
    (**self).resolve(ctx, args).await
  }

  async fn load(&self, ctx: &mut Context, args: &LoadArgs) -> LoadOutput {
    (**self).load(ctx, args).await
  }

  async fn transform(&self, ctx: &mut Context, args: &mut TransformArgs) -> TransformOutput {
    (**self).transform(ctx, args).await
  }

  async fn render_chunk(&self, ctx: &mut Context, args: &RenderChunkArgs) -> RenderChunkOutput {
    (**self).render_chunk(ctx, args).await
  }
}
