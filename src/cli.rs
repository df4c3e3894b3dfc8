//! Command line interface definition using clap.

use camino::Utf8PathBuf;
use clap::Parser;

/// Translate a libtool-style build description into an `Android.mk`.
///
/// Everything after the options is the token stream: `-:NAME` mode
/// switches followed by their data tokens, exactly as a build system
/// would pass them on a link or compile line.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Path for the generated makefile; `-` streams to standard output.
    #[arg(short, long, value_name = "FILE", default_value = "Android.mk")]
    pub output: Utf8PathBuf,

    /// Dump the translated project model as JSON instead of a makefile.
    #[arg(long)]
    pub dump_model: bool,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Build-description tokens, starting with a mode switch such as
    /// `-:PROJECT`.
    #[arg(
        value_name = "TOKEN",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}
