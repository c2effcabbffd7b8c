use std::sync::Arc;

use ast::EsVersion;
use once_cell::sync::Lazy;
use swc_common::{FileName, SourceMap};
use swc_core::{
  common::{self as swc_common, chain, Globals, Mark, SourceFile, GLOBALS},
  ecma::{
    ast, codegen as swc_ecma_codegen,
    parser::{self as swc_ecma_parser, error::SyntaxError, TsConfig},
    transforms::{
      base::{fixer::fixer, hygiene::hygiene, resolver},
      typescript::strip,
    },
    visit::FoldWith,
  },
};
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax};

pub static COMPILER: Lazy<Arc<Compiler>> = Lazy::new(|| Arc::new(Compiler::default()));

/// Output of a compilation: generated code plus its JSON source map.
#[derive(Debug, Clone)]
pub struct CompiledOutput {
  pub code: String,
  pub map: String,
}

#[derive(Default)]
pub struct Compiler {
  pub cm: Arc<SourceMap>,
}

impl Compiler {
  pub fn create_source_file(&self, filename: &str, code: String) -> Arc<SourceFile> {
    self
      .cm
      .new_source_file(FileName::Custom(filename.to_string()), code)
  }

  /// Strip TypeScript syntax from `code`, keeping the module shape intact.
  pub fn strip_types(&self, filename: &str, code: String) -> anyhow::Result<CompiledOutput> {
    let source_file = self.create_source_file(filename, code);
    let syntax = Syntax::Typescript(TsConfig {
      tsx: filename.ends_with(".tsx"),
      decorators: true,
      ..Default::default()
    });
    let ast = self.parse(source_file, syntax)?;
    self.print_with_source_map(&erase_types(ast))
  }

  pub fn print_with_source_map(&self, ast: &ast::Module) -> anyhow::Result<CompiledOutput> {
    let mut output = Vec::new();
    let mut mappings = Vec::new();

    {
      let mut emitter = swc_ecma_codegen::Emitter {
        cfg: swc_ecma_codegen::Config {
          ..Default::default()
        },
        cm: self.cm.clone(),
        comments: None,
        wr: Box::new(JsWriter::new(
          self.cm.clone(),
          "\n",
          &mut output,
          Some(&mut mappings),
        )),
      };
      emitter.emit_module(ast)?;
    }

    let mut map = Vec::new();
    self
      .cm
      .build_source_map(&mut mappings)
      .to_writer(&mut map)?;

    Ok(CompiledOutput {
      code: String::from_utf8(output)?,
      map: String::from_utf8(map)?,
    })
  }

  /// Parse `source_file` as a module.
  ///
  /// Top-level `return` is accepted. Any other error, including the ones the
  /// parser recovers from, fails the parse.
  pub fn parse(&self, source_file: Arc<SourceFile>, syntax: Syntax) -> anyhow::Result<ast::Module> {
    let lexer = Lexer::new(
      syntax,
      EsVersion::latest(),
      StringInput::from(source_file.as_ref()),
      None,
    );
    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module();
    let mut errors = parser
      .take_errors()
      .into_iter()
      .filter(|e| !matches!(e.kind(), SyntaxError::ReturnNotAllowed))
      .chain(module.as_ref().err().cloned())
      .map(|e| e.kind().msg().to_string())
      .peekable();
    if errors.peek().is_some() {
      anyhow::bail!("{}", errors.collect::<Vec<_>>().join("\n"));
    }
    module.map_err(|e| anyhow::format_err!("{}", e.kind().msg()))
  }
}

/// Marks only have to be unique within one call, so every call gets its own globals.
fn erase_types(module: ast::Module) -> ast::Module {
  GLOBALS.set(&Globals::new(), || {
    let top_level_mark = Mark::new();
    let mut pass = chain!(
      resolver(Mark::new(), top_level_mark, true),
      strip(top_level_mark),
      // hygiene also clears the contexts the resolver assigned
      hygiene(),
      fixer(None),
    );
    module.fold_with(&mut pass)
  })
}
