/// Bare specifiers that are always traced at build start and resolved from the
/// precomputed cache instead of going through the import map again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
  Process,
  Buffer,
  Module,
}

impl Builtin {
  pub const ALL: [Builtin; 3] = [Builtin::Process, Builtin::Buffer, Builtin::Module];

  pub fn from_specifier(specifier: &str) -> Option<Self> {
    match specifier {
      "process" => Some(Self::Process),
      "buffer" => Some(Self::Buffer),
      "module" => Some(Self::Module),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Builtin::Process => "process",
      Builtin::Buffer => "buffer",
      Builtin::Module => "module",
    }
  }
}
