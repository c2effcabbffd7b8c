use std::ops::Range;

use jspm_error::Error;
use jspm_plugin::TransformResult;
use jspm_plugin_import_map::{
  DependencyInterop, DependencyKind, DependencyRewrite, DewConfig, DewTransform, Fetcher,
  Minifier, MinifyConfig, MinifyOutcome,
};
use rustc_hash::FxHashMap;
use url::Url;

/// Serves module sources from memory, keyed by URL.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
  sources: FxHashMap<String, String>,
}

impl MemoryFetcher {
  pub fn new(sources: FxHashMap<String, String>) -> Self {
    Self { sources }
  }
}

#[async_trait::async_trait]
impl Fetcher for MemoryFetcher {
  async fn fetch(&self, url: &Url) -> jspm_error::Result<String> {
    self
      .sources
      .get(url.as_str())
      .cloned()
      .ok_or_else(|| Error::fetch_failed(url.as_str(), "no such module"))
  }
}

/// Every `require("...")` call with a string literal argument.
fn find_requires(code: &str) -> Vec<(Range<usize>, &str)> {
  let mut found = vec![];
  let mut cursor = 0;
  while let Some(offset) = code[cursor..].find("require(") {
    let start = cursor + offset;
    cursor = start + "require(".len();
    let Some(quote @ ('"' | '\'')) = code[cursor..].chars().next() else {
      continue;
    };
    let literal = cursor + 1;
    let Some(len) = code[literal..].find(quote) else {
      continue;
    };
    let end = literal + len + 1;
    if code[end..].starts_with(')') {
      found.push((start..end + 1, &code[literal..literal + len]));
      cursor = end + 1;
    }
  }
  found
}

/// A tiny stand-in for the real CommonJS rewrite: it only understands literal
/// `require` calls, but drives [DependencyInterop] exactly like the real one.
#[derive(Debug, Default)]
pub struct ScriptedDew;

impl DewTransform for ScriptedDew {
  fn transform(
    &self,
    code: &str,
    config: &DewConfig,
    interop: &dyn DependencyInterop,
  ) -> jspm_error::Result<TransformResult> {
    let mut imports = String::new();
    let mut body = String::new();
    let mut last = 0;
    for (index, (range, specifier)) in find_requires(code).into_iter().enumerate() {
      body.push_str(&code[last..range.start]);
      last = range.end;
      match interop.resolve_dependency(specifier, DependencyKind::Plain)? {
        Some(DependencyRewrite::Specifier(target)) if interop.is_esm_dependency(specifier)? => {
          imports.push_str(&format!("import * as _dep{index} from \"{target}\";\n"));
          body.push_str(&format!("_dep{index}"));
        }
        Some(DependencyRewrite::Specifier(target)) => {
          imports.push_str(&format!(
            "import {{ dew as _dep{index}Dew }} from \"{target}\";\n"
          ));
          body.push_str(&format!("_dep{index}Dew()"));
        }
        _ => body.push_str(&code[range]),
      }
    }
    body.push_str(&code[last..]);
    for (expression, replacement) in &config.define {
      body = body.replace(expression.as_str(), replacement);
    }

    Ok(TransformResult::code_only(format!(
      "{imports}var exports = {{}}, module = {{ exports }};\n\nexport function dew() {{\n{}\n  return module.exports;\n}}\n",
      body.trim_end()
    )))
  }
}

/// Collapses whitespace, or fails in one of the two ways a minifier can.
#[derive(Debug, Clone, Copy)]
pub enum FakeMinifier {
  Collapse,
  ReportsError,
  Throws,
}

#[async_trait::async_trait]
impl Minifier for FakeMinifier {
  async fn minify(&self, code: &str, _config: &MinifyConfig) -> anyhow::Result<MinifyOutcome> {
    match self {
      FakeMinifier::Collapse => Ok(MinifyOutcome::Minified(TransformResult::code_only(
        code.split_whitespace().collect::<Vec<_>>().join(" "),
      ))),
      FakeMinifier::ReportsError => Ok(MinifyOutcome::Failed("Unexpected token (1:4)".to_string())),
      FakeMinifier::Throws => Err(anyhow::format_err!("minifier worker exited")),
    }
  }
}
