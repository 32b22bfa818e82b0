#![doc = include_str!("../README.md")]

pub mod assemble;
pub mod banner;
pub mod error;
pub mod minifier;
pub mod pipeline;
pub mod text;
pub mod unwrap;

pub use assemble::assemble;
pub use banner::BuildDescriptor;
pub use error::{ElmpackError, ElmpackResult};
pub use minifier::{minify, TransformResult, PURE_CALLS};
pub use pipeline::{transform_sources, PipelineOptions, Sources};
pub use unwrap::{unwrap, DEFAULT_GLOBAL_OBJECT};
