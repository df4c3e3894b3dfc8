//! Translation orchestration.
//!
//! Reads the environment configuration, drives the compiler over the
//! token stream, and writes the rendered makefile (or the JSON model
//! dump). This module is the only place the process environment and the
//! filesystem are touched; the compiler and renderer stay pure.

use crate::cli::Cli;
use crate::compile::{self, BuildEnv};
use crate::mk_gen;
use crate::model::BuildKind;
use anyhow::{Context, Result};
use camino::Utf8Path;
use std::env;
use std::fs;
use std::io::Write;

/// Environment variable naming the platform source tree root.
pub const ANDROID_BUILD_TOP: &str = "ANDROID_BUILD_TOP";
/// Environment variable naming the NDK installation root.
pub const NDK_ROOT: &str = "NDK_ROOT";

/// Read the build environment that seeds translation defaults.
///
/// A set, non-empty `ANDROID_BUILD_TOP` selects a platform-tree build
/// with that value as the strippable root; otherwise the build targets
/// the NDK and `NDK_ROOT`, when present and non-empty, supplies the root.
#[must_use]
pub fn build_env() -> BuildEnv {
    non_empty_var(ANDROID_BUILD_TOP).map_or_else(
        || BuildEnv {
            build: BuildKind::Ndk,
            root_path: non_empty_var(NDK_ROOT),
        },
        |root| BuildEnv {
            build: BuildKind::External,
            root_path: Some(root),
        },
    )
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Execute the parsed [`Cli`].
///
/// # Errors
///
/// Returns an error when the token stream violates an ordering rule or
/// the output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let build_env = build_env();
    tracing::debug!(
        build = ?build_env.build,
        root = ?build_env.root_path,
        tokens = cli.tokens.len(),
        "starting translation"
    );
    let Some(project) = compile::compile(&cli.tokens, build_env)? else {
        tracing::debug!("no project defined; nothing to emit");
        return Ok(());
    };
    if cli.dump_model {
        let mut json =
            serde_json::to_string_pretty(&project).context("serialise project model")?;
        json.push('\n');
        return write_output(&cli.output, &json);
    }
    write_output(&cli.output, &mk_gen::generate(&project))
}

/// Write `content` to `path`, streaming to stdout when the path is `-`.
fn write_output(path: &Utf8Path, content: &str) -> Result<()> {
    if path.as_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .context("write output to stdout")?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("write output to {path}"))?;
    tracing::debug!(%path, "wrote makefile");
    Ok(())
}
