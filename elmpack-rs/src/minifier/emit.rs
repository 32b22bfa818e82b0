//! Code generation for the minified program.

use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::Program;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as CodegenConfig, Emitter};

use super::TARGET;
use crate::error::{ElmpackError, ElmpackResult};

/// Emits `program` as minified JavaScript for the target version.
pub(super) fn emit_program(cm: &Lrc<SourceMap>, program: &Program) -> ElmpackResult<String> {
    let mut buf = Vec::new();
    {
        // can't use struct expr because Config has #[non_exhaustive]
        let mut cfg = CodegenConfig::default();
        cfg.minify = true;
        cfg.ascii_only = false;
        cfg.target = TARGET;
        cfg.omit_last_semi = false;

        let mut emitter = Emitter {
            cfg,
            cm: cm.clone(),
            comments: None,
            wr: Box::new(JsWriter::new(cm.clone(), "\n", &mut buf, None)),
        };
        emitter
            .emit_program(program)
            .map_err(|err| ElmpackError::Emit(err.to_string()))?;
    }
    Ok(String::from_utf8(buf)?)
}
