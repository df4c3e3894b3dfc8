//! Linker-token interpretation.
//!
//! A libtool link line mixes genuine libraries with wrapper artefacts and
//! host-only flags. The rule table drops what the generated makefile must
//! not see; what remains becomes library references in the model.

use super::libraries;
use crate::model::{Library, LibraryKind, Module};

/// How a dropped flag carries its argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ArgForm {
    /// The flag stands alone.
    None,
    /// The argument is the following token.
    Separate,
    /// The argument may be glued on (`-Lpath`); a bare match takes the
    /// following token instead.
    Joined,
}

/// Linker flags that never reach the generated makefile.
const DROPPED: &[(&str, ArgForm)] = &[
    ("-pthread", ArgForm::None),
    ("-lpthread", ArgForm::None),
    ("-lrt", ArgForm::None),
    ("-no-undefined", ArgForm::None),
    ("-avoid-version", ArgForm::None),
    ("-module", ArgForm::None),
    ("-dlopen", ArgForm::Separate),
    ("-version-info", ArgForm::Separate),
    ("-L", ArgForm::Joined),
    ("-R", ArgForm::Joined),
];

/// Outcome of checking a `-` token against the drop table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FlagAction {
    Keep,
    Skip,
    SkipWithArg,
}

fn flag_action(flag: &str) -> FlagAction {
    for &(name, form) in DROPPED {
        let matched = match form {
            ArgForm::Joined => flag.starts_with(name),
            ArgForm::None | ArgForm::Separate => flag == name,
        };
        if !matched {
            continue;
        }
        return match form {
            ArgForm::None => FlagAction::Skip,
            ArgForm::Separate => FlagAction::SkipWithArg,
            ArgForm::Joined => {
                if flag.len() == name.len() {
                    FlagAction::SkipWithArg
                } else {
                    FlagAction::Skip
                }
            }
        };
    }
    FlagAction::Keep
}

/// Interpret one linker token against `module`.
///
/// Returns `true` when the following token is this flag's argument and
/// must be discarded by the caller.
pub(crate) fn interpret(module: &mut Module, token: &str) -> bool {
    if token.len() < 2 {
        return false;
    }
    if token.starts_with('-') {
        match flag_action(token) {
            FlagAction::Skip => return false,
            FlagAction::SkipWithArg => return true,
            FlagAction::Keep => {}
        }
        if let Some(name) = token.strip_prefix("-l") {
            let kind = libraries::classify(name);
            module.libraries.push(Library::new(name.to_owned(), kind));
        } else {
            module
                .libraries
                .push(Library::new(token.to_owned(), LibraryKind::Flag));
        }
        return false;
    }
    if let Some(name) = archive_reference(token) {
        module
            .libraries
            .push(Library::new(name.to_owned(), LibraryKind::External));
    }
    false
}

/// Extract the library name from a `.la` or `.a` archive path.
///
/// `.lo` intermediates, other extensions, and paths whose final segment
/// carries no `lib` marker yield nothing; those tokens are build-tool
/// artefacts rather than dependencies.
fn archive_reference(token: &str) -> Option<&str> {
    let (stem, extension) = token.rsplit_once('.')?;
    if !matches!(extension, "la" | "a") {
        return None;
    }
    let segment = stem
        .rfind('/')
        .and_then(|slash| stem.get(slash..))
        .unwrap_or(stem);
    let start = segment.find("lib")?;
    segment.get(start + 3..)
}
