use std::fmt::Display;
use std::str::FromStr;

/// Suffix used when a [ModuleId::EntryWrapper] has to travel through a host as a plain string.
pub const ENTRY_MARKER: &str = "?entry";

/// The key of every per-module state in a build.
///
/// A CommonJS file is seen through two views: the raw file, which gets rewritten into
/// ESM, and a synthesized wrapper that re-exports the rewritten factory's result as
/// `default`. Both views share the same underlying URL, but they are different modules.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum ModuleId {
  Raw(String),
  EntryWrapper(String),
}

impl ModuleId {
  pub fn raw(value: impl Into<String>) -> Self {
    Self::Raw(value.into())
  }

  pub fn entry_wrapper(value: impl Into<String>) -> Self {
    Self::EntryWrapper(value.into())
  }

  /// The underlying URL, without any view tag.
  pub fn url(&self) -> &str {
    match self {
      ModuleId::Raw(url) | ModuleId::EntryWrapper(url) => url,
    }
  }

  pub fn is_entry_wrapper(&self) -> bool {
    matches!(self, ModuleId::EntryWrapper(_))
  }

  /// Drop the view tag, keeping the underlying URL.
  pub fn into_raw(self) -> Self {
    match self {
      ModuleId::EntryWrapper(url) => ModuleId::Raw(url),
      raw => raw,
    }
  }
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ModuleId::Raw(url) => write!(f, "{url}"),
      ModuleId::EntryWrapper(url) => write!(f, "{url}{ENTRY_MARKER}"),
    }
  }
}

impl FromStr for ModuleId {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s.strip_suffix(ENTRY_MARKER) {
      Some(url) => ModuleId::EntryWrapper(url.to_string()),
      None => ModuleId::Raw(s.to_string()),
    })
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self.url()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrapper_and_raw_are_distinct_keys() {
    let raw = ModuleId::raw("file:///app/lib.js");
    let wrapper = ModuleId::entry_wrapper("file:///app/lib.js");
    assert_ne!(raw, wrapper);
    assert_eq!(raw.url(), wrapper.url());
    assert_eq!(wrapper.clone().into_raw(), raw);
  }

  #[test]
  fn string_form_keeps_the_view() {
    let wrapper = ModuleId::entry_wrapper("file:///app/lib.js");
    assert_eq!(wrapper.to_string(), "file:///app/lib.js?entry");
    assert_eq!(
      "file:///app/lib.js?entry".parse::<ModuleId>().unwrap(),
      wrapper
    );
    assert_eq!(
      "file:///app/lib.js".parse::<ModuleId>().unwrap(),
      ModuleId::raw("file:///app/lib.js")
    );
  }
}
