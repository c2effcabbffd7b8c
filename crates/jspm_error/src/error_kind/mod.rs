use std::{fmt::Display, sync::Arc};

use jspm_common::StaticStr;

use crate::Error;

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Resolution
  UnresolvedModule {
    specifier: String,
    parent: String,
  },
  TrailingSlashResolution {
    specifier: String,
    parent: String,
  },
  TrailingDotResolution {
    specifier: String,
    parent: String,
  },
  AmbiguousParentResolution {
    specifier: String,
    referrer: String,
  },
  UnresolvedOptionalDependency {
    specifier: String,
    referrer: String,
  },
  UnresolvedDependency {
    specifier: String,
    referrer: String,
  },
  UnimplementedWildcard {
    glob: String,
  },

  // --- Transform
  UnexpectedFormat {
    id: String,
    format: StaticStr,
  },
  MissingTransform {
    transform: &'static str,
    id: String,
  },
  TransformFailed {
    id: String,
    source: anyhow::Error,
  },
  /// Non-fatal, reported as a warning. The chunk keeps its original code.
  MinifyFailed {
    chunk: String,
    reason: String,
  },

  /// An error captured once and surfaced again at every site that depends on it.
  ///
  /// Message and code are the ones of the captured error.
  Deferred(Arc<Error>),

  // --- Build
  FetchFailed {
    url: String,
    reason: String,
  },
  InvalidImportMap {
    reason: String,
  },
  BuildNotStarted,

  /// Unrecoverable error coming from a collaborator that has no dedicated kind.
  ///
  /// For `throw new Error("Errored")` in js, you can use `ErrorKind::Panic { source: anyhow::format_err!("Errored") }`.
  Panic {
    source: anyhow::Error,
  },
  IoError(std::io::Error),
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::UnresolvedModule { specifier, parent } => write!(f, "Module not found: {specifier} imported from {parent}"),
      ErrorKind::TrailingSlashResolution { specifier, parent } => write!(f, "Trailing slash resolution for {specifier} in {parent}"),
      ErrorKind::TrailingDotResolution { specifier, parent } => write!(f, "Trailing dot resolution for {specifier} in {parent}"),
      ErrorKind::AmbiguousParentResolution { specifier, referrer } => write!(
        f,
        "Unable to resolve {specifier} in {referrer} as the final segment mapping is unknown."
      ),
      ErrorKind::UnresolvedOptionalDependency { specifier, referrer } => write!(f, "Could not resolve optional {specifier} in {referrer}"),
      ErrorKind::UnresolvedDependency { specifier, referrer } => write!(f, "Could not resolve {specifier} in {referrer}"),
      ErrorKind::UnimplementedWildcard { glob } => write!(f, "CommonJS wildcard requires are not implemented: {glob}"),
      ErrorKind::UnexpectedFormat { id, format } => write!(f, "Unexpected format \"{format}\" for {id}"),
      ErrorKind::MissingTransform { transform, id } => write!(f, "No {transform} transform is configured to process {id}"),
      ErrorKind::TransformFailed { id, source } => write!(f, "Failed to transform {id}: {source}"),
      ErrorKind::MinifyFailed { chunk, reason } => write!(
        f,
        "Minification error during build, skipping minification of chunk \"{chunk}\".\n{reason}"
      ),
      ErrorKind::Deferred(error) => error.fmt(f),
      ErrorKind::FetchFailed { url, reason } => write!(f, "Unable to fetch {url}: {reason}"),
      ErrorKind::InvalidImportMap { reason } => write!(f, "Invalid import map: {reason}"),
      ErrorKind::BuildNotStarted => write!(f, "The build has not been started, call buildStart first"),
      ErrorKind::Panic { source } => source.fmt(f),
      ErrorKind::IoError(e) => e.fmt(f),
    }
  }
}

impl ErrorKind {
  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::UnresolvedModule { .. } => error_code::UNRESOLVED_MODULE,
      ErrorKind::TrailingSlashResolution { .. } => error_code::INVALID_RESOLUTION,
      ErrorKind::TrailingDotResolution { .. } => error_code::INVALID_RESOLUTION,
      ErrorKind::AmbiguousParentResolution { .. } => error_code::AMBIGUOUS_PARENT_RESOLUTION,
      ErrorKind::UnresolvedOptionalDependency { .. } => error_code::UNRESOLVED_OPTIONAL_DEPENDENCY,
      ErrorKind::UnresolvedDependency { .. } => error_code::UNRESOLVED_DEPENDENCY,
      ErrorKind::UnimplementedWildcard { .. } => error_code::NOT_IMPLEMENTED,
      ErrorKind::UnexpectedFormat { .. } => error_code::UNEXPECTED_FORMAT,
      ErrorKind::MissingTransform { .. } => error_code::MISSING_TRANSFORM,
      ErrorKind::TransformFailed { .. } => error_code::TRANSFORM_FAILED,
      ErrorKind::MinifyFailed { .. } => error_code::MINIFY_FAILED,
      ErrorKind::Deferred(error) => error.kind.code(),
      ErrorKind::FetchFailed { .. } => error_code::FETCH_FAILED,
      ErrorKind::InvalidImportMap { .. } => error_code::INVALID_IMPORT_MAP,
      ErrorKind::BuildNotStarted => error_code::BUILD_NOT_STARTED,
      ErrorKind::Panic { .. } => error_code::PANIC,
      ErrorKind::IoError(_) => error_code::IO_ERROR,
    }
  }
}
