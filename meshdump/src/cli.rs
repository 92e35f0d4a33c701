use std::path::PathBuf;

use clap::Parser;

/// Represents CLI arguments.
#[derive(Debug, Parser)]
#[clap(author, version, about = "Prints the meshes and materials of a Wavefront OBJ file")]
pub struct Arguments {
    /// Specifies the OBJ file path.
    pub obj: PathBuf,

    /// Specifies an extra MTL file, merged before the OBJ's own `mtllib`s.
    #[clap(short, long)]
    pub mtl: Option<PathBuf>,

    /// Logs at debug level unless RUST_LOG is set.
    #[clap(short, long)]
    pub verbose: bool,
}
