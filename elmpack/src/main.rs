use anyhow::Context;
use clap::Parser;
use elmpack_rs::{transform_sources, BuildDescriptor, PipelineOptions, Sources};
use std::path::{Path, PathBuf};

/// elmpack: Assemble a compiled Elm application into a single minified browser script
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Application name printed in the banner
    pub name: String,

    /// Application version printed in the banner
    #[clap(id = "app_version", value_name = "VERSION")]
    pub version: String,

    /// Additional build information printed in the banner
    pub additional_info: String,

    /// Elm compiler output, relative to the generated directory
    pub bundle: PathBuf,

    /// Starter script, relative to the public directory
    pub starter: PathBuf,

    /// Output file to be created, relative to the generated directory
    pub output: PathBuf,

    /// Directory holding generated files (metadata, Elm output, result)
    #[clap(long, default_value = "build-generated")]
    pub generated_dir: PathBuf,

    /// Directory holding the hand-written starter scripts
    #[clap(long, default_value = "public")]
    pub public_dir: PathBuf,

    /// Generated metadata snippet, relative to the generated directory
    #[clap(long, default_value = "GENERATED-meta.js")]
    pub meta_file: PathBuf,

    /// Omit the copyright line from the banner
    #[clap(long)]
    pub no_copyright: bool,

    /// Global object the Elm bundle is bound to
    #[clap(long, default_value = elmpack_rs::DEFAULT_GLOBAL_OBJECT)]
    pub global_object: String,
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Args = Args::parse();

    let meta_path = args.generated_dir.join(&args.meta_file);
    let bundle_path = args.generated_dir.join(&args.bundle);
    let starter_path = args.public_dir.join(&args.starter);
    let output_path = args.generated_dir.join(&args.output);

    let metadata = read_source(&meta_path)?;
    let bundle = read_source(&bundle_path)?;
    let runtime = read_source(&starter_path)?;

    let descriptor = BuildDescriptor::new(args.name, args.version, args.additional_info)
        .with_copyright(!args.no_copyright);
    let options = PipelineOptions {
        global_object: args.global_object,
    };

    let result = transform_sources(
        Sources {
            metadata: &metadata,
            bundle: &bundle,
            runtime: &runtime,
        },
        &descriptor,
        &options,
    )
    .with_context(|| format!("Failed to transform {}", bundle_path.display()))?;

    std::fs::write(&output_path, result.code).with_context(|| {
        format!(
            "Failed to write minified output to {}",
            output_path.display()
        )
    })?;
    log::info!("Wrote {}", output_path.display());
    Ok(())
}
