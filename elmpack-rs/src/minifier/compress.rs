//! Compressor and mangler configuration.

use serde_json::json;
use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::minifier::option::terser::TerserCompressorOptions;
use swc_core::ecma::minifier::option::{MangleOptions, MinifyOptions};

use crate::error::ElmpackResult;

/// Call names the compressor may treat as free of side effects.
///
/// These are the Elm compiler's curried helpers: `F2`..`F9` build functions of
/// a given arity and `A2`..`A9` apply them. The list is closed and tied to the
/// compiler's output; it is matched by callee name only.
pub const PURE_CALLS: &[&str] = &[
    "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9",
];

/// Builds the fixed minifier options.
///
/// The top level is compressed and mangled as if it were a function body:
/// the output is wrapped in an IIFE afterwards, so nothing declared here is
/// visible to other scripts.
pub(super) fn minify_options(cm: &Lrc<SourceMap>) -> ElmpackResult<MinifyOptions> {
    let compress: TerserCompressorOptions = serde_json::from_value(json!({
        "ecma": 2015,
        "passes": 2,
        "pure_funcs": PURE_CALLS,
        "toplevel": true,
    }))?;

    Ok(MinifyOptions {
        compress: Some(compress.into_config(cm.clone())),
        mangle: Some(MangleOptions {
            top_level: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    })
}
