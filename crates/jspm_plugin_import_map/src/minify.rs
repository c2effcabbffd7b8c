use std::fmt::Debug;

use jspm_error::Error;
use jspm_plugin::{Context, TransformResult};

/// Tags that keep a block comment alive through minification.
pub const PRESERVED_COMMENT_TAGS: &[&str] = &[
  "preserve",
  "license",
  "cc_on",
  "param",
  "returns",
  "typedef",
  "template",
  "type",
  "deprecated",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOptions {
  /// Start from everything disabled, only the flags below apply.
  pub defaults: bool,
  pub computed_props: bool,
  pub conditionals: bool,
  pub dead_code: bool,
  pub directives: bool,
  pub if_return: bool,
  pub properties: bool,
  pub side_effects: bool,
  pub keep_fargs: bool,
  pub keep_infinity: bool,
  pub unused: bool,
  pub evaluate: bool,
  // collapse_vars triples minification time
  pub collapse_vars: bool,
  pub switches: bool,
}

impl Default for CompressOptions {
  fn default() -> Self {
    Self {
      defaults: false,
      computed_props: true,
      conditionals: true,
      dead_code: true,
      directives: true,
      if_return: true,
      properties: true,
      side_effects: false,
      keep_fargs: true,
      keep_infinity: true,
      unused: true,
      evaluate: true,
      collapse_vars: false,
      switches: false,
    }
  }
}

/// The fixed configuration every chunk is minified with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyConfig {
  pub module: bool,
  pub toplevel: bool,
  pub mangle: bool,
  pub keep_fnames: bool,
  pub keep_classnames: bool,
  pub source_map: bool,
  /// Block comments carrying one of these `@` tags are kept.
  pub preserved_comment_tags: &'static [&'static str],
  pub compress: CompressOptions,
}

impl Default for MinifyConfig {
  fn default() -> Self {
    Self {
      module: true,
      toplevel: true,
      mangle: true,
      keep_fnames: true,
      keep_classnames: true,
      source_map: true,
      preserved_comment_tags: PRESERVED_COMMENT_TAGS,
      compress: Default::default(),
    }
  }
}

impl MinifyConfig {
  /// Whether a comment survives minification. Line comments never do, tags
  /// match case insensitively.
  pub fn preserves_comment(&self, comment: &str, is_block: bool) -> bool {
    if !is_block {
      return false;
    }
    let comment = comment.to_ascii_lowercase();
    self
      .preserved_comment_tags
      .iter()
      .any(|tag| comment.contains(&format!("@{tag}")))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinifyOutcome {
  Minified(TransformResult),
  /// The minifier ran but reported an error instead of output.
  Failed(String),
}

#[async_trait::async_trait]
pub trait Minifier: Debug + Send + Sync {
  async fn minify(&self, code: &str, config: &MinifyConfig) -> anyhow::Result<MinifyOutcome>;
}

/// Minify one chunk. Failures never fail the build: they are reported as a
/// warning and `None` keeps the chunk as it was.
pub async fn minify_chunk(
  minifier: &dyn Minifier,
  ctx: &mut Context,
  chunk_name: &str,
  code: &str,
) -> Option<TransformResult> {
  let reason = match minifier.minify(code, &MinifyConfig::default()).await {
    Ok(MinifyOutcome::Minified(result)) => return Some(result),
    Ok(MinifyOutcome::Failed(reason)) => reason,
    Err(err) => err.to_string(),
  };
  tracing::debug!("minification of {chunk_name} skipped");
  ctx.warn(Error::minify_failed(chunk_name, reason));
  None
}
