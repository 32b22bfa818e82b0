//! The IIFE wrapper around the minified output.

use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::{Function, Program, Stmt};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use super::parse::parse_script;
use crate::error::{ElmpackError, ElmpackResult};

const ENVELOPE: &str = "(function(){})();";

/// Places `body` inside `(function(){ ... })();`.
pub(super) fn wrap_in_iife(cm: &Lrc<SourceMap>, body: Vec<Stmt>) -> ElmpackResult<Program> {
    let mut envelope = parse_script(cm, "envelope.js", ENVELOPE)?;
    let mut filler = FillBody { stmts: Some(body) };
    envelope.visit_mut_with(&mut filler);
    if filler.stmts.is_some() {
        return Err(ElmpackError::Internal(
            "IIFE envelope has no function body".to_string(),
        ));
    }
    Ok(Program::Script(envelope))
}

/// Moves the statements into the first function body it visits.
struct FillBody {
    stmts: Option<Vec<Stmt>>,
}

impl VisitMut for FillBody {
    fn visit_mut_function(&mut self, function: &mut Function) {
        if let Some(body) = function.body.as_mut() {
            if let Some(stmts) = self.stmts.take() {
                body.stmts = stmts;
            }
        }
    }
}
