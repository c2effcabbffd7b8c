use jspm_common::ModuleId;

use crate::{parse_module_url, Fetcher};

/// The module standing in for a CommonJS file imported from ESM: it runs the
/// rewritten factory and exposes its result as the default export.
pub fn entry_wrapper_source(url: &str) -> String {
  let file_name = url.rsplit('/').next().unwrap_or(url);
  format!("import {{ dew }} from \"./{file_name}\";\nexport default dew();")
}

pub async fn load_module(fetcher: &dyn Fetcher, id: &ModuleId) -> jspm_error::Result<String> {
  match id {
    ModuleId::EntryWrapper(url) => Ok(entry_wrapper_source(url)),
    ModuleId::Raw(_) => fetcher.fetch(&parse_module_url(id)?).await,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrapper_imports_the_sibling_file() {
    insta::assert_snapshot!(
      entry_wrapper_source("file:///app/node_modules/lodash/lodash.js"),
      @r###"
    import { dew } from "./lodash.js";
    export default dew();
    "###
    );
  }
}
