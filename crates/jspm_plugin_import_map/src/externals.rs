use rustc_hash::FxHashMap;
use serde::Deserialize;
use url::Url;

use crate::Generator;

/// What an external dependency is emitted as.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawExternalAlias")]
pub enum ExternalAlias {
  /// `true` in the externals table: keep the specifier text as written.
  Passthrough,
  Alias(String),
}

impl ExternalAlias {
  pub fn emit(&self, specifier: &str) -> String {
    match self {
      ExternalAlias::Passthrough => specifier.to_string(),
      ExternalAlias::Alias(alias) => alias.clone(),
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExternalAlias {
  Flag(bool),
  Alias(String),
}

impl TryFrom<RawExternalAlias> for ExternalAlias {
  type Error = String;

  fn try_from(value: RawExternalAlias) -> Result<Self, Self::Error> {
    match value {
      RawExternalAlias::Flag(true) => Ok(ExternalAlias::Passthrough),
      RawExternalAlias::Flag(false) => {
        Err("an external must be `true` or an alias string, found `false`".to_string())
      }
      RawExternalAlias::Alias(alias) => Ok(ExternalAlias::Alias(alias)),
    }
  }
}

/// The user-supplied externals table, either a list of names or a name → alias map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExternalsOption {
  List(Vec<String>),
  Map(FxHashMap<String, ExternalAlias>),
}

impl ExternalsOption {
  pub fn into_map(self) -> FxHashMap<String, ExternalAlias> {
    match self {
      ExternalsOption::List(names) => names
        .into_iter()
        .map(|name| (name, ExternalAlias::Passthrough))
        .collect(),
      ExternalsOption::Map(map) => map,
    }
  }
}

/// Resolved URL → alias, built once per build.
#[derive(Debug, Default)]
pub struct ExternalsMap {
  by_url: FxHashMap<String, ExternalAlias>,
}

impl ExternalsMap {
  /// Resolve every name of the table from `base_url`. Names the import map
  /// doesn't know are skipped.
  pub fn build(externals: &ExternalsOption, generator: &dyn Generator, base_url: &Url) -> Self {
    let by_url = externals
      .clone()
      .into_map()
      .into_iter()
      .filter_map(|(name, alias)| match generator.resolve(&name, base_url) {
        Some(resolved) => Some((resolved.to_string(), alias)),
        None => {
          tracing::debug!("external {name} is not in the import map, ignored");
          None
        }
      })
      .collect();
    Self { by_url }
  }

  pub fn get(&self, url: &str) -> Option<&ExternalAlias> {
    self.by_url.get(url)
  }

  pub fn len(&self) -> usize {
    self.by_url.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_url.is_empty()
  }
}
