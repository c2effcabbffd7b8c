use std::hash::BuildHasherDefault;

use dashmap::DashMap;
use jspm_common::{ModuleFormat, ModuleId};
use rustc_hash::FxHasher;

type FxDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Module identity → classified format, for one build.
///
/// Entries are written once. Later registrations of the same identity keep the
/// first format. Identities that were never registered are ESM.
#[derive(Debug, Default)]
pub struct FormatRegistry {
  formats: FxDashMap<ModuleId, ModuleFormat>,
}

impl FormatRegistry {
  /// Returns the format actually recorded for `id`.
  pub fn register(&self, id: ModuleId, format: ModuleFormat) -> ModuleFormat {
    *self.formats.entry(id).or_insert(format)
  }

  pub fn get(&self, id: &ModuleId) -> Option<ModuleFormat> {
    self.formats.get(id).map(|format| *format)
  }

  pub fn format_of(&self, id: &ModuleId) -> ModuleFormat {
    self.get(id).unwrap_or_default()
  }

  pub fn len(&self) -> usize {
    self.formats.len()
  }

  pub fn is_empty(&self) -> bool {
    self.formats.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_registration_wins() {
    let registry = FormatRegistry::default();
    let id = ModuleId::raw("file:///app/lib.js");
    assert_eq!(registry.register(id.clone(), ModuleFormat::CjsDew), ModuleFormat::CjsDew);
    assert_eq!(registry.register(id.clone(), ModuleFormat::Json), ModuleFormat::CjsDew);
    assert_eq!(registry.get(&id), Some(ModuleFormat::CjsDew));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn unknown_identities_are_esm() {
    let registry = FormatRegistry::default();
    let id = ModuleId::raw("file:///app/main.js");
    assert_eq!(registry.get(&id), None);
    assert_eq!(registry.format_of(&id), ModuleFormat::Esm);
  }

  #[test]
  fn views_of_one_file_are_separate_entries() {
    let registry = FormatRegistry::default();
    registry.register(ModuleId::entry_wrapper("file:///app/lib.js"), ModuleFormat::Cjs);
    registry.register(ModuleId::raw("file:///app/lib.js"), ModuleFormat::CjsDew);
    assert_eq!(
      registry.format_of(&ModuleId::entry_wrapper("file:///app/lib.js")),
      ModuleFormat::Cjs
    );
    assert_eq!(
      registry.format_of(&ModuleId::raw("file:///app/lib.js")),
      ModuleFormat::CjsDew
    );
  }
}
