use std::fmt::Debug;

use jspm_common::{ModuleFormat, ModuleId};
use jspm_compiler::COMPILER;
use jspm_error::Error;
use jspm_plugin::TransformResult;

use crate::{parse_module_url, BuildContext, DependencyInterop, InteropResolver, PluginOptions};

/// Type stripping. Input is parsed as a module.
pub trait TypeScriptTransform: Debug + Send + Sync {
  fn transform(&self, code: &str, filename: &str) -> jspm_error::Result<TransformResult>;
}

/// [TypeScriptTransform] backed by swc.
#[derive(Debug, Default)]
pub struct SwcTypeScript;

impl TypeScriptTransform for SwcTypeScript {
  fn transform(&self, code: &str, filename: &str) -> jspm_error::Result<TransformResult> {
    let output = COMPILER
      .strip_types(filename, code.to_string())
      .map_err(|e| Error::transform_failed(filename, e))?;
    Ok(TransformResult {
      code: output.code,
      map: Some(output.map),
    })
  }
}

/// Rewrites a CommonJS module into an ESM module exporting a `dew` factory.
///
/// Input is parsed as a script, with top-level `return` allowed. Every dependency
/// found goes through `interop` before it is emitted as an import.
pub trait DewTransform: Debug + Send + Sync {
  fn transform(
    &self,
    code: &str,
    config: &DewConfig,
    interop: &dyn DependencyInterop,
  ) -> jspm_error::Result<TransformResult>;
}

pub const WILDCARD_EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

pub const FILENAME_EXPRESSION: &str = "import.meta.url.startsWith('file:') ? decodeURI(import.meta.url.slice(7 + (typeof process !== 'undefined' && process.platform === 'win32'))) : new URL(import.meta.url).pathname";

pub const DIRNAME_EXPRESSION: &str = "import.meta.url.startsWith('file:') ? decodeURI(import.meta.url.slice(0, import.meta.url.lastIndexOf('/')).slice(7 + (typeof process !== 'undefined' && process.platform === 'win32'))) : new URL(import.meta.url.slice(0, import.meta.url.lastIndexOf('/'))).pathname";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DewConfig {
  pub filename: String,
  /// Drop branches only reachable outside a browser.
  pub browser_only: bool,
  /// Expressions replaced verbatim, e.g. `process.env.NODE_ENV`.
  pub define: Vec<(String, String)>,
  pub wildcard_extensions: &'static [&'static str],
  /// Replacement for `__filename`.
  pub filename_expression: &'static str,
  /// Replacement for `__dirname`.
  pub dirname_expression: &'static str,
}

impl DewConfig {
  pub fn new(filename: impl Into<String>, env: &[String]) -> Self {
    let has = |condition: &str| env.iter().any(|c| c == condition);
    let node_env = if has("production") {
      "\"production\""
    } else {
      "\"dev\""
    };
    Self {
      filename: filename.into(),
      browser_only: has("browser"),
      define: vec![("process.env.NODE_ENV".to_string(), node_env.to_string())],
      wildcard_extensions: WILDCARD_EXTENSIONS,
      filename_expression: FILENAME_EXPRESSION,
      dirname_expression: DIRNAME_EXPRESSION,
    }
  }
}

/// Route `code` through the transform matching the registered format of `id`.
pub fn transform_module(
  ctx: &BuildContext,
  options: &PluginOptions,
  id: &ModuleId,
  code: &str,
) -> jspm_error::Result<TransformResult> {
  let format = ctx.formats.format_of(id);
  match (id, format) {
    // the wrapper is generated ESM
    (ModuleId::EntryWrapper(_), ModuleFormat::Cjs) => Ok(TransformResult::code_only(code)),
    (ModuleId::EntryWrapper(_), format) | (ModuleId::Raw(_), format @ ModuleFormat::Cjs) => {
      Err(Error::unexpected_format(id, format))
    }
    (ModuleId::Raw(_), ModuleFormat::Esm) => Ok(TransformResult::code_only(code)),
    (ModuleId::Raw(_), ModuleFormat::Json) => {
      Ok(TransformResult::code_only(format!("export default {code}")))
    }
    (ModuleId::Raw(url), ModuleFormat::TypeScript) => options.typescript.transform(code, url),
    (ModuleId::Raw(url), ModuleFormat::CjsDew) => {
      let dew = options
        .dew
        .as_ref()
        .ok_or_else(|| Error::missing_transform("CommonJS", id))?;
      let interop = InteropResolver::new(ctx, parse_module_url(id)?);
      dew.transform(code, &DewConfig::new(url.as_str(), &ctx.env), &interop)
    }
  }
}
