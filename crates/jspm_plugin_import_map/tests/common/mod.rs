use jspm_common::ModuleId;
use jspm_test_utils::Tester;
use serde_json::{json, Value};

pub const MAIN: &str = "file:///app/main.js";
pub const LODASH: &str = "file:///app/node_modules/lodash/lodash.js";
pub const LEFT_PAD: &str = "file:///app/node_modules/left-pad/index.js";

pub fn builtin_imports() -> Value {
  json!({
    "process": "file:///builtins/process.js",
    "buffer": "file:///builtins/buffer.js",
    "module": "file:///builtins/module.js",
  })
}

/// An ESM entry importing CommonJS `lodash`, which requires CommonJS `left-pad`
/// and the `process` builtin.
pub fn app() -> Value {
  let mut imports = builtin_imports();
  imports["lodash"] = json!(LODASH);
  imports["left-pad"] = json!(LEFT_PAD);
  imports["dir/"] = json!("file:///app/dir/");
  json!({
    "inputMap": { "imports": imports },
    "formats": {
      LODASH: "commonjs",
      LEFT_PAD: "commonjs",
    },
    "sources": {
      MAIN: "import lodash from 'lodash';\nconsole.log(lodash);\n",
      LODASH: "var pad = require(\"left-pad/\");\nvar proc = require('process');\nmodule.exports = process.env.NODE_ENV;\n",
      LEFT_PAD: "module.exports = function pad() {};\n",
      "file:///app/util.ts": "export const add = (a: number, b: number): number => a + b;\n",
      "file:///app/data.json": "{\"answer\":42}",
    },
  })
}

/// Extend a config value with more top-level keys.
pub fn with(mut base: Value, extra: Value) -> Value {
  if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
    base.extend(extra);
  }
  base
}

pub async fn started(config: Value) -> Tester {
  let tester = Tester::from_json(config);
  tester.build_start().await.unwrap();
  tester
}

/// Resolve the chain main → lodash wrapper → lodash, returning the rewritten
/// CommonJS identity.
pub async fn resolve_lodash(tester: &Tester) -> ModuleId {
  let main = ModuleId::raw(MAIN);
  let wrapper = tester.resolve("lodash", Some(&main)).await.unwrap().id;
  tester
    .resolve("./lodash.js", Some(&wrapper))
    .await
    .unwrap()
    .id
}
