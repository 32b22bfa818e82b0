//! Script parsing and syntax error reporting.

use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Spanned};
use swc_core::ecma::ast::Script;
use swc_core::ecma::parser::error::Error as ParseError;
use swc_core::ecma::parser::{parse_file_as_script, EsSyntax, Syntax};

use super::TARGET;
use crate::error::{ElmpackError, ElmpackResult};

/// Parses `src` as a classic (non-module) script.
///
/// Errors the parser recovered from are reported too: the output of a script
/// that only parsed with recovery is not trustworthy.
pub(super) fn parse_script(cm: &Lrc<SourceMap>, name: &str, src: &str) -> ElmpackResult<Script> {
    let fm = cm.new_source_file(FileName::Custom(name.to_string()).into(), src.to_string());
    let mut recovered = Vec::new();
    let script = parse_file_as_script(
        &fm,
        Syntax::Es(EsSyntax::default()),
        TARGET,
        None,
        &mut recovered,
    )
    .map_err(|err| syntax_error(cm, err))?;

    if let Some(err) = recovered.into_iter().next() {
        return Err(syntax_error(cm, err));
    }
    Ok(script)
}

fn syntax_error(cm: &SourceMap, err: ParseError) -> ElmpackError {
    let loc = cm.lookup_char_pos(err.span().lo);
    ElmpackError::SyntaxError {
        message: err.kind().msg().to_string(),
        line: loc.line,
        column: loc.col.0,
    }
}
