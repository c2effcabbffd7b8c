use jspm_error::Error;

/// Per-hook-call context handed to plugins.
#[derive(Debug, Default)]
pub struct Context {
  warnings: Vec<Error>,
}

impl Context {
  pub fn new() -> Self {
    Self::default()
  }

  /// Report a non-fatal problem. The build keeps going.
  pub fn warn(&mut self, warning: Error) {
    self.warnings.push(warning);
  }

  pub fn warnings(&self) -> &[Error] {
    &self.warnings
  }

  pub fn into_warnings(self) -> Vec<Error> {
    self.warnings
  }
}
