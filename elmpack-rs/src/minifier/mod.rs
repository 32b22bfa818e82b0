//! JavaScript minification for the assembled script.
//!
//! The assembled text is minified with the SWC minifier and re-wrapped as a
//! single IIFE:
//! 1. Parsing the text as a classic script (syntax errors abort here) and
//!    rejecting syntax the ES2015 output target cannot express
//! 2. Resolving scopes and compressing/mangling with the top level treated as
//!    function scope, so unused bindings can be dropped
//! 3. Moving the minified statements into a `(function(){ ... })();` envelope
//! 4. Emitting minified ES2015 code and prepending the provenance banner
//!
//! # Architecture
//!
//! - `parse`: Script parsing and syntax error reporting
//! - `baseline`: Rejection of syntax newer than ES2015
//! - `compress`: Compressor and mangler configuration
//! - `envelope`: The IIFE wrapper around the output
//! - `emit`: Code generation

mod baseline;
mod compress;
mod emit;
mod envelope;
mod parse;

use serde::{Deserialize, Serialize};
use swc_core::common::sync::Lrc;
use swc_core::common::{Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::{EsVersion, Program};
use swc_core::ecma::minifier::optimize;
use swc_core::ecma::minifier::option::ExtraOptions;
use swc_core::ecma::transforms::base::fixer::fixer;
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::VisitMutWith;

use crate::banner::BuildDescriptor;
use crate::error::{ElmpackError, ElmpackResult};

pub use compress::PURE_CALLS;

/// Language version the output must run on.
pub const TARGET: EsVersion = EsVersion::Es2015;

/// File name the assembled script is registered under in the source map.
const SOURCE_NAME: &str = "assembled.js";

/// The result of a minify operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// The bannered, minified, IIFE-wrapped JavaScript code.
    pub code: String,
}

/// Minifies `code` into a single IIFE and prepends the banner for `descriptor`.
///
/// Calls to the helpers in [`PURE_CALLS`] are treated as side-effect free, so
/// unused curried applications are removed.
///
/// # Errors
/// Returns [`ElmpackError::SyntaxError`] when `code` is not a valid script and
/// [`ElmpackError::UnsupportedSyntax`] when it uses syntax newer than ES2015.
pub fn minify(code: &str, descriptor: &BuildDescriptor) -> ElmpackResult<TransformResult> {
    let globals = Globals::new();
    GLOBALS.set(&globals, || {
        let cm: Lrc<SourceMap> = Default::default();
        let script = parse::parse_script(&cm, SOURCE_NAME, code)?;
        baseline::check_es2015(&cm, &script)?;

        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();
        let mut program = Program::Script(script);
        program.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, false));

        let options = compress::minify_options(&cm)?;
        let program = optimize(
            program,
            cm.clone(),
            None,
            None,
            &options,
            &ExtraOptions {
                unresolved_mark,
                top_level_mark,
                mangle_name_cache: None,
            },
        );
        let body = match program {
            Program::Script(script) => script.body,
            Program::Module(_) => {
                return Err(ElmpackError::Internal(
                    "minifier turned a script into a module".to_string(),
                ))
            }
        };

        let mut wrapped = envelope::wrap_in_iife(&cm, body)?;
        wrapped.visit_mut_with(&mut fixer(None));
        let minified = emit::emit_program(&cm, &wrapped)?;

        log::info!(
            "Minified {} v{}: {} bytes in, {} bytes out",
            descriptor.name,
            descriptor.version,
            code.len(),
            minified.len()
        );

        Ok(TransformResult {
            code: format!("{}\n{}", descriptor.banner(), minified),
        })
    })
}
