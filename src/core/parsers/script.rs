use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap, Span};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

const BOM: char = '\u{feff}';

pub struct ParsedScript {
    pub module: Module,
    /// Position of the first byte of the file in the source map.
    pub start_pos: BytePos,
    /// Length of a leading byte order mark, which the source map drops.
    pub bom_len: usize,
}

impl ParsedScript {
    /// Byte offset of a position relative to the start of the file text, BOM included.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start_pos.0) as usize + self.bom_len
    }

    pub fn range(&self, span: Span) -> std::ops::Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }
}

/// Parse a script file. `.ts`/`.tsx` files use the TypeScript grammar, everything else the
/// ECMAScript one.
pub fn parse_script_source(code: String, file_path: &Path) -> Result<ParsedScript> {
    use swc_common::GLOBALS;

    let source_map = Arc::new(SourceMap::default());
    let bom_len = if code.starts_with(BOM) {
        BOM.len_utf8()
    } else {
        0
    };
    let code = if bom_len > 0 {
        code[bom_len..].to_string()
    } else {
        code
    };

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let extension = file_path.extension().and_then(|e| e.to_str());
        let syntax = match extension {
            Some("ts") | Some("tsx") => Syntax::Typescript(TsSyntax {
                tsx: extension == Some("tsx"),
                decorators: true,
                ..Default::default()
            }),
            _ => Syntax::Es(EsSyntax {
                jsx: extension == Some("jsx"),
                decorators: true,
                ..Default::default()
            }),
        };

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse script: {:?}", e.kind()))?;

        Ok(ParsedScript {
            module,
            start_pos: source_file.start_pos,
            bom_len,
        })
    })
}
