use jspm_common::{ModuleFormat, ModuleId, UpstreamFormat};
use jspm_error::Error;
use jspm_plugin::ResolvedId;
use url::Url;

use crate::BuildContext;

pub(crate) fn parse_module_url(id: &ModuleId) -> jspm_error::Result<Url> {
  Url::parse(id.url()).map_err(|e| Error::panic(format!("Invalid module URL \"{id}\": {e}")))
}

/// Resolve `specifier` imported by `importer` (or by the build itself for entries)
/// and record the format of what it resolves to.
pub fn resolve_specifier(
  ctx: &BuildContext,
  specifier: &str,
  importer: Option<&ModuleId>,
) -> jspm_error::Result<ResolvedId> {
  let (parent, cjs_context) = match importer {
    Some(importer) => (
      parse_module_url(importer)?,
      ctx.formats.format_of(importer).is_commonjs(),
    ),
    None => (ctx.base_url.clone(), false),
  };

  // `require('./dir/')` and `require('./dir')` must reach the import map the same way
  let specifier = match specifier.strip_suffix('/') {
    Some(stripped) if cjs_context => stripped,
    _ => specifier,
  };

  let resolved = ctx
    .generator
    .resolve(specifier, &parent)
    .ok_or_else(|| Error::unresolved_module(specifier, parent.as_str()))?;
  let href = resolved.as_str();

  if href.ends_with('/') {
    return Err(Error::trailing_slash_resolution(specifier, parent.as_str()));
  }
  if href.ends_with('.') {
    return Err(Error::trailing_dot_resolution(specifier, parent.as_str()));
  }

  if let Some(builtin) = href.strip_prefix("node:") {
    tracing::trace!("{specifier} -> node builtin {builtin}");
    return Ok(ResolvedId::external(builtin));
  }

  let id = match ctx.generator.analysis(&resolved) {
    UpstreamFormat::Esm => ModuleId::raw(href),
    UpstreamFormat::Json => register(ctx, ModuleId::raw(href), ModuleFormat::Json),
    UpstreamFormat::TypeScript => register(ctx, ModuleId::raw(href), ModuleFormat::TypeScript),
    UpstreamFormat::CommonJs if cjs_context => {
      register(ctx, ModuleId::raw(href), ModuleFormat::CjsDew)
    }
    UpstreamFormat::CommonJs => register(ctx, ModuleId::entry_wrapper(href), ModuleFormat::Cjs),
  };

  if let Some(alias) = ctx.externals.as_ref().and_then(|externals| externals.get(href)) {
    let external = alias.emit(specifier);
    tracing::trace!("{specifier} -> external {external}");
    return Ok(ResolvedId::external(external));
  }

  tracing::trace!("{specifier} -> {id}");
  Ok(ResolvedId::internal(id))
}

fn register(ctx: &BuildContext, id: ModuleId, format: ModuleFormat) -> ModuleId {
  ctx.formats.register(id.clone(), format);
  id
}
