use jspm_common::ModuleId;

/// A named entry point of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
  pub name: String,
  pub import: String,
}

#[derive(Debug, Clone)]
pub struct BuildStartArgs<'a> {
  pub input: &'a [InputItem],
}

#[derive(Debug, Clone)]
pub struct ResolveArgs<'a> {
  /// `None` for entry points.
  pub importer: Option<&'a ModuleId>,
  pub specifier: &'a str,
}

#[derive(Debug, Clone)]
pub struct LoadArgs<'a> {
  pub id: &'a ModuleId,
}

pub struct TransformArgs<'a> {
  pub id: &'a ModuleId,
  pub code: &'a String,
}

pub struct RenderChunkArgs<'a> {
  pub chunk_name: &'a str,
  pub code: &'a String,
}
