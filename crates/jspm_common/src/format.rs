use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The format a module has been classified into for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleFormat {
  #[default]
  Esm,
  /// CommonJS seen through its entry wrapper. The wrapper carries the interop,
  /// so the module itself passes through untouched.
  Cjs,
  /// CommonJS rewritten into ESM (the "dew" form).
  CjsDew,
  Json,
  TypeScript,
}

impl ModuleFormat {
  pub fn is_commonjs(&self) -> bool {
    matches!(self, ModuleFormat::Cjs | ModuleFormat::CjsDew)
  }
}

impl Display for ModuleFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      ModuleFormat::Esm => "esm",
      ModuleFormat::Cjs => "cjs",
      ModuleFormat::CjsDew => "cjs-dew",
      ModuleFormat::Json => "json",
      ModuleFormat::TypeScript => "typescript",
    };
    f.write_str(name)
  }
}

/// The format reported by the module graph analyzer for a resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamFormat {
  #[default]
  Esm,
  CommonJs,
  Json,
  TypeScript,
}

impl UpstreamFormat {
  /// Guess the format from the file extension of a URL.
  pub fn from_extension(url: &str) -> Self {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit_once('.').map(|(_, ext)| ext) {
      Some("json") => Self::Json,
      Some("ts" | "mts" | "cts" | "tsx") => Self::TypeScript,
      Some("cjs") => Self::CommonJs,
      _ => Self::Esm,
    }
  }
}

impl FromStr for UpstreamFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "esm" => Ok(Self::Esm),
      "commonjs" => Ok(Self::CommonJs),
      "json" => Ok(Self::Json),
      "typescript" => Ok(Self::TypeScript),
      _ => Err(format!("Unknown module format \"{s}\"")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extension_heuristic() {
    assert_eq!(
      UpstreamFormat::from_extension("file:///a/data.json"),
      UpstreamFormat::Json
    );
    assert_eq!(
      UpstreamFormat::from_extension("file:///a/main.ts?x=1"),
      UpstreamFormat::TypeScript
    );
    assert_eq!(
      UpstreamFormat::from_extension("file:///a/lib.cjs"),
      UpstreamFormat::CommonJs
    );
    assert_eq!(
      UpstreamFormat::from_extension("file:///a/lib"),
      UpstreamFormat::Esm
    );
  }

  #[test]
  fn parses_analyzer_names() {
    assert_eq!(
      "commonjs".parse::<UpstreamFormat>(),
      Ok(UpstreamFormat::CommonJs)
    );
    assert!("amd".parse::<UpstreamFormat>().is_err());
  }
}
