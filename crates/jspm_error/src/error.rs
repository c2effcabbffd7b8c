use std::{fmt::Display, sync::Arc};

use jspm_common::ModuleFormat;

use crate::ErrorKind;

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  /// The kind of this error, looking through deferred errors.
  pub fn root_kind(&self) -> &ErrorKind {
    match &self.kind {
      ErrorKind::Deferred(error) => error.root_kind(),
      kind => kind,
    }
  }

  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  // --- Resolution

  pub fn unresolved_module(specifier: impl Into<String>, parent: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedModule {
      specifier: specifier.into(),
      parent: parent.into(),
    })
  }

  pub fn trailing_slash_resolution(
    specifier: impl Into<String>,
    parent: impl Into<String>,
  ) -> Self {
    Self::with_kind(ErrorKind::TrailingSlashResolution {
      specifier: specifier.into(),
      parent: parent.into(),
    })
  }

  pub fn trailing_dot_resolution(specifier: impl Into<String>, parent: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::TrailingDotResolution {
      specifier: specifier.into(),
      parent: parent.into(),
    })
  }

  pub fn ambiguous_parent_resolution(
    specifier: impl Into<String>,
    referrer: impl Into<String>,
  ) -> Self {
    Self::with_kind(ErrorKind::AmbiguousParentResolution {
      specifier: specifier.into(),
      referrer: referrer.into(),
    })
  }

  pub fn unresolved_optional_dependency(
    specifier: impl Into<String>,
    referrer: impl Into<String>,
  ) -> Self {
    Self::with_kind(ErrorKind::UnresolvedOptionalDependency {
      specifier: specifier.into(),
      referrer: referrer.into(),
    })
  }

  pub fn unresolved_dependency(specifier: impl Into<String>, referrer: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedDependency {
      specifier: specifier.into(),
      referrer: referrer.into(),
    })
  }

  pub fn unimplemented_wildcard(glob: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::UnimplementedWildcard { glob: glob.into() })
  }

  // --- Transform

  pub fn unexpected_format(id: impl Display, format: ModuleFormat) -> Self {
    Self::with_kind(ErrorKind::UnexpectedFormat {
      id: id.to_string(),
      format: format.to_string().into(),
    })
  }

  pub fn missing_transform(transform: &'static str, id: impl Display) -> Self {
    Self::with_kind(ErrorKind::MissingTransform {
      transform,
      id: id.to_string(),
    })
  }

  pub fn transform_failed(id: impl Display, source: impl Into<anyhow::Error>) -> Self {
    Self::with_kind(ErrorKind::TransformFailed {
      id: id.to_string(),
      source: source.into(),
    })
  }

  pub fn minify_failed(chunk: impl Into<String>, reason: impl Display) -> Self {
    Self::with_kind(ErrorKind::MinifyFailed {
      chunk: chunk.into(),
      reason: reason.to_string(),
    })
  }

  pub fn deferred(error: Arc<Error>) -> Self {
    Self::with_kind(ErrorKind::Deferred(error))
  }

  // --- Build

  pub fn fetch_failed(url: impl Into<String>, reason: impl Display) -> Self {
    Self::with_kind(ErrorKind::FetchFailed {
      url: url.into(),
      reason: reason.to_string(),
    })
  }

  pub fn invalid_import_map(reason: impl Display) -> Self {
    Self::with_kind(ErrorKind::InvalidImportMap {
      reason: reason.to_string(),
    })
  }

  pub fn build_not_started() -> Self {
    Self::with_kind(ErrorKind::BuildNotStarted)
  }

  pub fn io_error(e: std::io::Error) -> Self {
    Self::with_kind(ErrorKind::IoError(e))
  }

  pub fn panic(msg: String) -> Self {
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::convert::From<std::io::Error> for Error {
  fn from(value: std::io::Error) -> Self {
    Self::io_error(value)
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      ErrorKind::TransformFailed { source, .. } => Some(source.as_ref()),
      ErrorKind::Deferred(error) => Some(error.as_ref()),
      ErrorKind::IoError(e) => Some(e),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error_code;

  #[test]
  fn deferred_error_keeps_message_and_code() {
    let captured = Arc::new(Error::unresolved_module("process", "file:///app/"));
    let first = Error::deferred(captured.clone());
    let second = Error::deferred(captured.clone());

    assert_eq!(first.to_string(), captured.to_string());
    assert_eq!(first, second);
    assert_eq!(first.code(), error_code::UNRESOLVED_MODULE);
    assert!(matches!(
      first.root_kind(),
      ErrorKind::UnresolvedModule { specifier, .. } if specifier == "process"
    ));
  }

  #[test]
  fn context_is_printed_before_the_message() {
    let err = Error::unresolved_dependency("./a", "file:///app/b.js")
      .context("transforming file:///app/b.js".to_string());
    let message = err.to_string();
    assert!(message.ends_with("Could not resolve ./a in file:///app/b.js"));
    assert!(message.contains("transforming file:///app/b.js"));
  }

  #[test]
  fn anyhow_errors_become_panics() {
    let err: Error = anyhow::format_err!("Errored").into();
    assert_eq!(err.code(), error_code::PANIC);
    assert_eq!(err.to_string(), "Errored");
  }
}
