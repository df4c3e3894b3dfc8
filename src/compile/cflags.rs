//! Compiler-flag normalisation.
//!
//! `-I` and `-include` may carry their argument as the following token;
//! that continuation is remembered by the caller between tokens. Include
//! paths always land in the module's dedicated include set so the renderer
//! can emit them as search paths rather than raw flags.

use super::paths;
use crate::model::{FlagSet, Module, Project};

/// Which language's flag set a token belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FlagLang {
    C,
    Cpp,
    Cxx,
}

/// A two-token flag waiting for its path argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Pending {
    /// `-I <path>`: the argument is an include search path.
    IncludeDir,
    /// `-include <path>`: the argument is a forced include.
    ForcedInclude,
}

impl Pending {
    /// Prefix glued onto the rewritten argument.
    const fn prefix(self) -> &'static str {
        match self {
            Self::IncludeDir => "",
            Self::ForcedInclude => "-include ",
        }
    }
}

/// Normalise one compiler-flag token into `module`.
///
/// The check order is load-bearing: two-token openers and the
/// unconditional drops are recognised even while a continuation is
/// pending, and a glued `-I<path>` never consumes the pending argument
/// slot.
pub(crate) fn add_flag(
    project: &Project,
    module: &mut Module,
    lang: FlagLang,
    pending: &mut Option<Pending>,
    flag: &str,
) {
    match flag {
        "-I" => {
            *pending = Some(Pending::IncludeDir);
            return;
        }
        "-include" => {
            *pending = Some(Pending::ForcedInclude);
            return;
        }
        // Not portable across build systems; dropped outright.
        "-Werror" | "-pthread" => return,
        _ => {}
    }

    if let Some(path) = flag.strip_prefix("-I") {
        let rewritten = paths::rewrite(project, "", path);
        module.includes.insert(rewritten);
        return;
    }

    if let Some(continuation) = pending.take() {
        let rewritten = paths::rewrite(project, continuation.prefix(), flag);
        match continuation {
            Pending::IncludeDir => module.includes.insert(rewritten),
            Pending::ForcedInclude => lang_set(module, lang).insert(rewritten),
        };
        return;
    }

    lang_set(module, lang).insert(flag.to_owned());
}

fn lang_set(module: &mut Module, lang: FlagLang) -> &mut FlagSet {
    match lang {
        FlagLang::C => &mut module.cflags,
        FlagLang::Cpp => &mut module.cppflags,
        FlagLang::Cxx => &mut module.cxxflags,
    }
}
