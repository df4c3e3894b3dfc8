//! `Android.mk` generator.
//!
//! Converts a [`crate::model::Project`] into makefile text. Output follows
//! model order throughout; insertion order is meaningful both to make and
//! to humans diffing the result, so nothing here sorts.

use crate::model::{BuildKind, Library, LibraryKind, Module, Project};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Generate an `Android.mk` for the project.
#[must_use]
pub fn generate(project: &Project) -> String {
    DisplayProject { project }.to_string()
}

/// Emit a `KEY := values` line, or nothing when there are no values.
fn write_var<'a, I>(f: &mut Formatter<'_>, key: &str, values: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = values.into_iter().join(" ");
    if joined.is_empty() {
        return Ok(());
    }
    writeln!(f, "{key} := {joined}")
}

/// Wrapper struct to display a whole project.
struct DisplayProject<'a> {
    project: &'a Project,
}

impl Display for DisplayProject<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Android.mk for {}, generated by droidgen", self.project.name)?;
        writeln!(f, "LOCAL_PATH := $(call my-dir)")?;
        writeln!(f)?;
        for module in &self.project.modules {
            write!(
                f,
                "{}",
                DisplayModule {
                    module,
                    build: self.project.build,
                }
            )?;
        }
        for subdir in &self.project.subdirs {
            writeln!(f, "include $(LOCAL_PATH)/{subdir}/Android.mk")?;
        }
        Ok(())
    }
}

/// Wrapper struct to display one module section.
struct DisplayModule<'a> {
    module: &'a Module,
    build: BuildKind,
}

impl Display for DisplayModule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let module = self.module;
        writeln!(f, "include $(CLEAR_VARS)")?;
        writeln!(f, "LOCAL_MODULE := {}", module.name)?;
        write_var(f, "LOCAL_MODULE_TAGS", module.tags.names())?;
        write_var(
            f,
            "LOCAL_SRC_FILES",
            module.sources.iter().map(|source| source.name.as_str()),
        )?;
        // Preprocessor flags ride along with the C flags; the makefile has
        // no separate variable for them.
        write_var(
            f,
            "LOCAL_CFLAGS",
            module.cppflags.iter().chain(module.cflags.iter()),
        )?;
        write_var(f, "LOCAL_CPPFLAGS", module.cxxflags.iter())?;
        write_var(f, "LOCAL_C_INCLUDES", module.includes.iter())?;
        if let Some(target) = &module.header_target {
            writeln!(f, "LOCAL_COPY_HEADERS_TO := {target}")?;
        }
        write_var(
            f,
            "LOCAL_COPY_HEADERS",
            module.headers.iter().map(String::as_str),
        )?;
        let groups = group_libraries(module, self.build);
        write_var(
            f,
            "LOCAL_SHARED_LIBRARIES",
            groups.shared.iter().map(String::as_str),
        )?;
        write_var(
            f,
            "LOCAL_STATIC_LIBRARIES",
            groups.static_archives.iter().map(String::as_str),
        )?;
        write_var(
            f,
            "LOCAL_WHOLE_STATIC_LIBRARIES",
            groups.whole_archives.iter().map(String::as_str),
        )?;
        write_var(f, "LOCAL_LDLIBS", groups.ldlibs.iter().map(String::as_str))?;
        write_var(f, "LOCAL_LDFLAGS", groups.ldflags.iter().copied())?;
        for line in &module.passthrough {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "include $({})", module.kind.build_include())?;
        writeln!(f)
    }
}

/// Library names and flags bucketed by the makefile variable that carries
/// them.
#[derive(Default)]
struct LibraryGroups<'a> {
    shared: Vec<String>,
    static_archives: Vec<String>,
    whole_archives: Vec<String>,
    ldlibs: Vec<String>,
    ldflags: Vec<&'a str>,
}

fn group_libraries(module: &Module, build: BuildKind) -> LibraryGroups<'_> {
    let mut groups = LibraryGroups::default();
    for library in &module.libraries {
        match effective_kind(library, &module.libfilters) {
            LibraryKind::Ndk => match build {
                // The NDK links its bundled libraries straight from the
                // toolchain; a platform tree builds them as prebuilts.
                BuildKind::Ndk => groups.ldlibs.push(format!("-l{}", library.name)),
                BuildKind::External => groups.shared.push(format!("lib{}", library.name)),
            },
            LibraryKind::External => groups.shared.push(format!("lib{}", library.name)),
            LibraryKind::Static => groups.static_archives.push(format!("lib{}", library.name)),
            LibraryKind::WholeStatic => {
                groups.whole_archives.push(format!("lib{}", library.name));
            }
            LibraryKind::Flag => groups.ldflags.push(library.name.as_str()),
            LibraryKind::Unsupported => {
                tracing::warn!(name = %library.name, "skipping unsupported library");
            }
        }
    }
    groups
}

/// Classification after applying the module's static / whole-static
/// filters; the first filter naming the library wins.
fn effective_kind(library: &Library, filters: &[Library]) -> LibraryKind {
    filters
        .iter()
        .find(|filter| filter.name == library.name)
        .map_or(library.kind, |filter| filter.kind)
}
