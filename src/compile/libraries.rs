//! Library classification.

use crate::model::LibraryKind;

/// Libraries the NDK supplies with the platform: the C runtime, math,
/// dynamic loader, graphics, logging, C++ runtime, threading, and
/// compression.
const NDK_LIBS: &[&str] = &[
    "c",
    "m",
    "dl",
    "jnigraphics",
    "log",
    "stdc++",
    "thread_db",
    "z",
];

/// Classify a bare library name (no `-l`, no `lib` prefix).
///
/// Membership is a case-sensitive exact match; everything outside the
/// fixed set is external.
#[must_use]
pub fn classify(name: &str) -> LibraryKind {
    if NDK_LIBS.contains(&name) {
        LibraryKind::Ndk
    } else {
        LibraryKind::External
    }
}
