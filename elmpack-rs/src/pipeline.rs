use crate::assemble::assemble;
use crate::banner::BuildDescriptor;
use crate::error::ElmpackResult;
use crate::minifier::{minify, TransformResult};
use crate::unwrap::{unwrap, DEFAULT_GLOBAL_OBJECT};

/// The three input texts of one build.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    /// Generated metadata snippet, executed first.
    pub metadata: &'a str,
    /// The Elm compiler's generated bundle, still wrapped.
    pub bundle: &'a str,
    /// Hand-written starter script, executed last.
    pub runtime: &'a str,
}

/// Options of [`transform_sources`] that are independent of the build descriptor.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Global object the unwrapped bundle's `scope` is bound to.
    pub global_object: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            global_object: DEFAULT_GLOBAL_OBJECT.to_string(),
        }
    }
}

/// Unwraps the bundle, assembles the three sources and minifies the result.
///
/// Any failure aborts the whole transform; no partial output is produced.
pub fn transform_sources(
    sources: Sources<'_>,
    descriptor: &BuildDescriptor,
    options: &PipelineOptions,
) -> ElmpackResult<TransformResult> {
    let unwrapped = unwrap(sources.bundle, &options.global_object)?;
    let assembled = assemble(sources.metadata, &unwrapped, sources.runtime);
    log::debug!("Assembled script is {} bytes", assembled.len());
    minify(&assembled, descriptor)
}
