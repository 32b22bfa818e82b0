//! Language baseline check for the assembled script.
//!
//! The output is shipped as ES2015. Nothing is down-levelled, so a script
//! using newer syntax is rejected before it reaches the minifier.

use swc_core::common::{SourceMap, Span, Spanned};
use swc_core::ecma::ast::{
    ArrowExpr, AssignExpr, AssignOp, AwaitExpr, BigInt, BinExpr, BinaryOp, Callee, CatchClause,
    ClassMember, ForOfStmt, Function, ObjectPatProp, OptChainExpr, PropOrSpread, Regex, Script,
};
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::error::{ElmpackError, ElmpackResult};

/// Regular expression flags available in ES2015.
const REGEX_FLAGS: &str = "gimuy";

/// Fails with [`ElmpackError::UnsupportedSyntax`] at the first construct of
/// `script` that is newer than ES2015.
pub(super) fn check_es2015(cm: &SourceMap, script: &Script) -> ElmpackResult<()> {
    let mut finder = NewerSyntax::default();
    script.visit_with(&mut finder);

    match finder.found {
        Some((feature, span)) => {
            let loc = cm.lookup_char_pos(span.lo);
            Err(ElmpackError::UnsupportedSyntax {
                feature,
                line: loc.line,
                column: loc.col.0,
            })
        }
        None => Ok(()),
    }
}

#[derive(Default)]
struct NewerSyntax {
    found: Option<(&'static str, Span)>,
}

impl NewerSyntax {
    fn report(&mut self, feature: &'static str, span: Span) {
        if self.found.is_none() {
            self.found = Some((feature, span));
        }
    }
}

impl Visit for NewerSyntax {
    fn visit_bin_expr(&mut self, node: &BinExpr) {
        match node.op {
            BinaryOp::Exp => self.report("exponentiation operator (ES2016)", node.span),
            BinaryOp::NullishCoalescing => {
                self.report("nullish coalescing operator (ES2020)", node.span)
            }
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        match node.op {
            AssignOp::ExpAssign => self.report("exponentiation assignment (ES2016)", node.span),
            AssignOp::AndAssign | AssignOp::OrAssign | AssignOp::NullishAssign => {
                self.report("logical assignment (ES2021)", node.span)
            }
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_opt_chain_expr(&mut self, node: &OptChainExpr) {
        self.report("optional chaining (ES2020)", node.span);
        node.visit_children_with(self);
    }

    fn visit_function(&mut self, node: &Function) {
        if node.is_async {
            self.report("async function (ES2017)", node.span);
        }
        node.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        if node.is_async {
            self.report("async arrow function (ES2017)", node.span);
        }
        node.visit_children_with(self);
    }

    fn visit_await_expr(&mut self, node: &AwaitExpr) {
        self.report("await expression (ES2017)", node.span);
        node.visit_children_with(self);
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        if node.is_await {
            self.report("for await loop (ES2018)", node.span);
        }
        node.visit_children_with(self);
    }

    fn visit_prop_or_spread(&mut self, node: &PropOrSpread) {
        if let PropOrSpread::Spread(spread) = node {
            self.report("object spread (ES2018)", spread.span());
        }
        node.visit_children_with(self);
    }

    fn visit_object_pat_prop(&mut self, node: &ObjectPatProp) {
        if let ObjectPatProp::Rest(rest) = node {
            self.report("object rest pattern (ES2018)", rest.span);
        }
        node.visit_children_with(self);
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        if node.param.is_none() {
            self.report("optional catch binding (ES2019)", node.span);
        }
        node.visit_children_with(self);
    }

    fn visit_big_int(&mut self, node: &BigInt) {
        self.report("BigInt literal (ES2020)", node.span);
    }

    fn visit_callee(&mut self, node: &Callee) {
        if let Callee::Import(import) = node {
            self.report("dynamic import (ES2020)", import.span);
        }
        node.visit_children_with(self);
    }

    fn visit_class_member(&mut self, node: &ClassMember) {
        match node {
            ClassMember::ClassProp(_)
            | ClassMember::PrivateProp(_)
            | ClassMember::PrivateMethod(_)
            | ClassMember::StaticBlock(_)
            | ClassMember::AutoAccessor(_) => self.report("class field (ES2022)", node.span()),
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_regex(&mut self, node: &Regex) {
        if !node.flags.chars().all(|flag| REGEX_FLAGS.contains(flag)) {
            self.report("regular expression flag newer than ES2015", node.span);
        }
    }
}
