use std::sync::Arc;

use common::{app, resolve_lodash, started, with, LEFT_PAD, LODASH, MAIN};
use jspm_common::{ModuleFormat, ModuleId};
use jspm_error::ErrorKind;
use jspm_plugin::ResolvedId;
use jspm_test_utils::{FakeMinifier, TestConfig, Tester};
use serde_json::json;

mod common;

#[tokio::test]
async fn esm_entry_passes_through() {
  let tester = started(app()).await;
  let main = tester.resolve("./main.js", None).await.unwrap();
  assert_eq!(main, ResolvedId::internal(ModuleId::raw(MAIN)));

  let compiled = tester.compile(&main.id).await.unwrap();
  assert_eq!(compiled.code, "import lodash from 'lodash';\nconsole.log(lodash);\n");
}

#[tokio::test]
async fn commonjs_entry_is_wrapped() {
  let tester = started(with(app(), json!({ "input": ["lodash"] }))).await;
  let resolved = tester.resolve("lodash", None).await.unwrap();
  assert_eq!(resolved.id, ModuleId::entry_wrapper(LODASH));
  assert_eq!(resolved.id.to_string(), format!("{LODASH}?entry"));

  let build = tester.plugin.build_context().await.unwrap();
  assert_eq!(build.formats().get(&resolved.id), Some(ModuleFormat::Cjs));

  let inner = tester.resolve("./lodash.js", Some(&resolved.id)).await.unwrap();
  assert_eq!(build.formats().get(&inner.id), Some(ModuleFormat::CjsDew));

  let wrapper = tester.compile(&resolved.id).await.unwrap();
  insta::assert_snapshot!(wrapper.code, @r###"
  import { dew } from "./lodash.js";
  export default dew();
  "###);
}

#[tokio::test]
async fn nested_commonjs_import_keeps_its_url() {
  let tester = started(app()).await;
  let main = ModuleId::raw(MAIN);
  let resolved = tester.resolve("lodash", Some(&main)).await.unwrap();
  assert!(resolved.id.is_entry_wrapper());
  assert_eq!(resolved.id.url(), LODASH);
  assert!(!resolved.external);

  let inner = tester.resolve("./lodash.js", Some(&resolved.id)).await.unwrap();
  assert_eq!(inner, ResolvedId::internal(ModuleId::raw(LODASH)));
}

#[tokio::test]
async fn commonjs_module_is_rewritten() {
  let tester = started(app()).await;
  let lodash = resolve_lodash(&tester).await;

  let compiled = tester.compile(&lodash).await.unwrap();
  insta::assert_snapshot!(compiled.code.trim_end(), @r###"
  import { dew as _dep0Dew } from "left-pad";
  import * as _dep1 from "file:///builtins/process.js";
  var exports = {}, module = { exports };

  export function dew() {
  var pad = _dep0Dew();
  var proc = _dep1;
  module.exports = "dev";
    return module.exports;
  }
  "###);

  // the rewritten import is resolved in CommonJS context
  let left_pad = tester.resolve("left-pad", Some(&lodash)).await.unwrap();
  assert_eq!(left_pad, ResolvedId::internal(ModuleId::raw(LEFT_PAD)));
}

#[tokio::test]
async fn production_env_defines_node_env() {
  let tester = started(with(app(), json!({ "env": ["browser", "production"] }))).await;
  let lodash = resolve_lodash(&tester).await;
  let compiled = tester.compile(&lodash).await.unwrap();
  assert!(compiled.code.contains("module.exports = \"production\";"));
}

#[tokio::test]
async fn trailing_slash_is_stripped_in_commonjs_context() {
  let tester = started(app()).await;
  let lodash = resolve_lodash(&tester).await;

  let with_slash = tester.resolve("./a/", Some(&lodash)).await.unwrap();
  let without_slash = tester.resolve("./a", Some(&lodash)).await.unwrap();
  assert_eq!(with_slash, without_slash);
  assert_eq!(with_slash.id.url(), "file:///app/node_modules/lodash/a");
}

#[tokio::test]
async fn resolutions_ending_in_slash_or_dot_fail() {
  let tester = started(app()).await;
  let main = ModuleId::raw(MAIN);

  let err = tester.resolve("dir/", Some(&main)).await.unwrap_err();
  assert!(
    matches!(err.root_kind(), ErrorKind::TrailingSlashResolution { .. }),
    "{err}"
  );

  let err = tester.resolve("./x.", Some(&main)).await.unwrap_err();
  assert!(
    matches!(err.root_kind(), ErrorKind::TrailingDotResolution { .. }),
    "{err}"
  );
}

#[tokio::test]
async fn unmapped_specifiers_fail() {
  let tester = started(app()).await;
  let err = tester
    .resolve("react", Some(&ModuleId::raw(MAIN)))
    .await
    .unwrap_err();
  assert_eq!(
    err.to_string(),
    "Module not found: react imported from file:///app/main.js"
  );
}

#[tokio::test]
async fn node_prefixed_specifiers_are_external() {
  let tester = started(app()).await;
  let resolved = tester
    .resolve("node:fs", Some(&ModuleId::raw(MAIN)))
    .await
    .unwrap();
  assert_eq!(resolved, ResolvedId::external("fs"));
}

#[tokio::test]
async fn passthrough_externals_keep_the_specifier() {
  let tester = started(with(app(), json!({ "externals": { "lodash": true } }))).await;
  let main = ModuleId::raw(MAIN);
  for importer in [None, Some(&main)] {
    let resolved = tester.resolve("lodash", importer).await.unwrap();
    assert_eq!(resolved, ResolvedId::external("lodash"));
  }
}

#[tokio::test]
async fn aliased_and_listed_externals() {
  let tester = started(with(app(), json!({ "externals": { "lodash": "lodash-es" } }))).await;
  let resolved = tester
    .resolve("lodash", Some(&ModuleId::raw(MAIN)))
    .await
    .unwrap();
  assert_eq!(resolved, ResolvedId::external("lodash-es"));

  let tester = started(with(app(), json!({ "externals": ["left-pad"] }))).await;
  let lodash = resolve_lodash(&tester).await;
  let resolved = tester.resolve("left-pad/", Some(&lodash)).await.unwrap();
  assert_eq!(resolved, ResolvedId::external("left-pad"));
}

#[tokio::test]
async fn json_and_typescript_are_converted() {
  let tester = started(app()).await;
  let main = ModuleId::raw(MAIN);

  let data = tester.resolve("./data.json", Some(&main)).await.unwrap();
  let compiled = tester.compile(&data.id).await.unwrap();
  assert_eq!(compiled.code, "export default {\"answer\":42}");

  let util = tester.resolve("./util.ts", Some(&main)).await.unwrap();
  assert_eq!(util.id, ModuleId::raw("file:///app/util.ts"));
  let compiled = tester.compile(&util.id).await.unwrap();
  assert!(compiled.code.contains("export const add"), "{}", compiled.code);
  assert!(!compiled.code.contains(": number"), "{}", compiled.code);
}

#[tokio::test]
async fn missing_builtins_fail_only_where_used() {
  let mut config = app();
  config["inputMap"]["imports"]
    .as_object_mut()
    .unwrap()
    .remove("process");
  let tester = started(config).await;
  let lodash = resolve_lodash(&tester).await;

  let err = tester.compile(&lodash).await.unwrap_err();
  assert!(matches!(err.kind, ErrorKind::Deferred(_)), "{err}");
  assert!(
    matches!(err.root_kind(), ErrorKind::UnresolvedModule { specifier, .. } if specifier == "process"),
    "{err}"
  );
}

#[tokio::test]
async fn unresolvable_entries_abort_the_build() {
  let tester = Tester::new(TestConfig::from_json(with(
    app(),
    json!({ "input": ["./main.js", "react"] }),
  )));
  let err = tester.build_start().await.unwrap_err();
  assert!(
    matches!(err.root_kind(), ErrorKind::UnresolvedModule { specifier, .. } if specifier == "react"),
    "{err}"
  );
}

#[tokio::test]
async fn hooks_require_a_started_build() {
  let tester = Tester::from_json(app());
  let err = tester.resolve("./main.js", None).await.unwrap_err();
  assert!(matches!(err.kind, ErrorKind::BuildNotStarted), "{err}");
}

#[tokio::test]
async fn minification_failures_keep_the_chunk() {
  let chunk = "export const answer  =  42;\n";
  for minifier in [FakeMinifier::ReportsError, FakeMinifier::Throws] {
    let tester = Tester::with_minifier(TestConfig::from_json(app()), Some(Arc::new(minifier)));
    tester.build_start().await.unwrap();
    let rendered = tester
      .driver
      .render_chunk("main", chunk.to_string())
      .await
      .unwrap();
    assert_eq!(rendered.code, chunk);
    let warnings = tester.warnings();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("skipping minification of chunk \"main\""));
  }
}

#[tokio::test]
async fn minification_is_optional() {
  let chunk = "export const answer  =  42;\n";

  let tester = Tester::with_minifier(
    TestConfig::from_json(app()),
    Some(Arc::new(FakeMinifier::Collapse)),
  );
  let rendered = tester
    .driver
    .render_chunk("main", chunk.to_string())
    .await
    .unwrap();
  assert_eq!(rendered.code, "export const answer = 42;");

  let tester = Tester::new(TestConfig::from_json(app()));
  let rendered = tester
    .driver
    .render_chunk("main", chunk.to_string())
    .await
    .unwrap();
  assert_eq!(rendered.code, chunk);
  assert!(tester.warnings().is_empty());
}
