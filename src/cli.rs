use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, about, long_about = None, arg_required_else_help(true))]
pub struct Cli {
    /// Peach source files to compile.
    #[clap(required = true)]
    pub files: Vec<PathBuf>,

    #[clap(
        short,
        long,
        help = "Output name (executable default `a.out`; with -s or -c, renames the single product)"
    )]
    pub output: Option<PathBuf>,

    #[clap(
        short = 's',
        long = "source",
        help = "Emit C source only; do not compile",
        conflicts_with = "compile"
    )]
    pub source: bool,

    #[clap(
        short = 'c',
        long = "compile",
        help = "Compile each input to an object file; do not link"
    )]
    pub compile: bool,

    #[clap(
        short = 'E',
        long = "preprocess",
        help = "Run preprocessor only (not implemented yet)"
    )]
    pub preprocess: bool,

    #[clap(short, long, help = "Emit progress to stdout")]
    pub verbose: bool,
}
