use std::borrow::Cow;

use jspm_common::{Builtin, UpstreamFormat};
use jspm_error::Error;
use url::Url;

use crate::BuildContext;

/// How a dependency is referenced inside a CommonJS module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyKind {
  #[default]
  Plain,
  /// Guarded by a `try`/`catch` or otherwise allowed to be missing.
  Optional,
  /// A computed path, e.g. `require('./locale/' + name)`.
  Wildcard,
}

/// The specifier(s) a rewritten `require` should point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRewrite {
  Specifier(String),
  /// Every concrete module a wildcard require can expand to. Reserved: relative
  /// wildcards currently fail with `UnimplementedWildcard` and nothing returns
  /// this yet.
  Expanded(Vec<String>),
}

/// Callbacks a CommonJS rewrite engine calls, synchronously, for every
/// dependency of the module it is rewriting.
pub trait DependencyInterop {
  /// `None` leaves the reference as a runtime `require`.
  fn resolve_dependency(
    &self,
    specifier: &str,
    kind: DependencyKind,
  ) -> jspm_error::Result<Option<DependencyRewrite>>;

  /// Whether the dependency is imported as a namespace (`true`) or through its
  /// default export (`false`).
  fn is_esm_dependency(&self, specifier: &str) -> jspm_error::Result<bool>;
}

/// [DependencyInterop] for one CommonJS module of the current build.
#[derive(Debug)]
pub struct InteropResolver<'a> {
  ctx: &'a BuildContext,
  referrer: Url,
}

impl<'a> InteropResolver<'a> {
  pub fn new(ctx: &'a BuildContext, referrer: Url) -> Self {
    Self { ctx, referrer }
  }
}

fn is_relative(specifier: &str) -> bool {
  specifier.starts_with("./") || specifier.starts_with("../")
}

/// Normalize a CommonJS dependency specifier before it reaches the import map.
///
/// `../` style parent references get the parent directory name appended, and
/// directory requires lose their trailing slash.
pub fn normalize_dependency<'s>(
  specifier: &'s str,
  referrer: &Url,
) -> jspm_error::Result<Cow<'s, str>> {
  if specifier == "../" || specifier.ends_with("/../") {
    if !(specifier.starts_with('/') || is_relative(specifier)) {
      return Err(Error::ambiguous_parent_resolution(
        specifier,
        referrer.as_str(),
      ));
    }
    let resolved = referrer
      .join(specifier)
      .map_err(|_| Error::unresolved_dependency(specifier, referrer.as_str()))?;
    let href = resolved.as_str();
    let directory = href.strip_suffix('/').unwrap_or(href);
    let last_segment = directory.rfind('/').map_or("", |index| &directory[index..]);
    return Ok(Cow::Owned(format!("{specifier}..{last_segment}")));
  }

  Ok(match specifier.strip_suffix('/') {
    Some(stripped) => Cow::Borrowed(stripped),
    None => Cow::Borrowed(specifier),
  })
}

impl DependencyInterop for InteropResolver<'_> {
  fn resolve_dependency(
    &self,
    specifier: &str,
    kind: DependencyKind,
  ) -> jspm_error::Result<Option<DependencyRewrite>> {
    let specifier = normalize_dependency(specifier, &self.referrer)?;

    if let Some(builtin) = Builtin::from_specifier(&specifier) {
      let resolved = self.ctx.builtins.get(builtin)?;
      return Ok(Some(DependencyRewrite::Specifier(resolved.to_string())));
    }

    match kind {
      DependencyKind::Optional => {
        if self
          .ctx
          .generator
          .resolve(&specifier, &self.referrer)
          .is_none()
        {
          return Err(Error::unresolved_optional_dependency(
            specifier,
            self.referrer.as_str(),
          ));
        }
        Ok(Some(DependencyRewrite::Specifier(specifier.into_owned())))
      }
      DependencyKind::Wildcard => {
        // only requires internal to the package can be expanded
        if !is_relative(&specifier) {
          return Ok(None);
        }
        let glob = self
          .referrer
          .join(&specifier)
          .map_or_else(|_| specifier.to_string(), |url| url.to_string());
        Err(Error::unimplemented_wildcard(glob))
      }
      DependencyKind::Plain => Ok(Some(DependencyRewrite::Specifier(specifier.into_owned()))),
    }
  }

  fn is_esm_dependency(&self, specifier: &str) -> jspm_error::Result<bool> {
    let specifier = normalize_dependency(specifier, &self.referrer)?;

    if Builtin::from_specifier(&specifier).is_some() {
      return Ok(true);
    }

    let resolved = self
      .ctx
      .generator
      .resolve(&specifier, &self.referrer)
      .ok_or_else(|| Error::unresolved_dependency(specifier.as_ref(), self.referrer.as_str()))?;

    Ok(matches!(
      self.ctx.generator.analysis(&resolved),
      UpstreamFormat::Esm | UpstreamFormat::Json
    ))
  }
}
