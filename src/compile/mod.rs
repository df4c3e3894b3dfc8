//! Token-stream to project-model compiler.
//!
//! [`Compiler`] consumes build-description tokens one at a time: `-:NAME`
//! switches select the active [`Mode`], every other token is data for that
//! mode. Data tokens are escaped (outside the verbatim modes), then
//! dispatched to the flag normaliser, the linker-flag interpreter, or a
//! plain model append. The machine owns the model while it is being
//! populated and releases it from [`Compiler::finish`].
//!
//! All cross-token state (the pending `-I` continuation, the pending
//! linker-argument skip, the open module) lives on the machine instance so
//! translation is reentrant and testable per call.

mod cflags;
mod error;
mod escape;
mod ldflags;
pub mod libraries;
mod mode;
mod paths;

pub use error::CompileError;
pub use mode::Mode;

use cflags::{FlagLang, Pending};

use crate::model::{BuildKind, Library, LibraryKind, Module, Project, Source, Tags};

/// Environment-derived configuration for one translation run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BuildEnv {
    /// Which build flavour the generated makefile targets.
    pub build: BuildKind,
    /// Source-tree root stripped from absolute paths, when known.
    pub root_path: Option<String>,
}

/// Suffixes that mark a sources-list entry as a non-compiled declaration.
const NON_SOURCE_SUFFIXES: &[&str] = &[".h", ".d", ".asn", ".map", ".list"];

/// Translate a full token stream into a project model.
///
/// Returns `Ok(None)` when the stream defines no project (nothing but mode
/// switches), which is vacuous rather than an error.
///
/// # Errors
///
/// Returns a [`CompileError`] when the stream violates an ordering rule;
/// the partially built model is discarded.
pub fn compile<I, S>(tokens: I, env: BuildEnv) -> Result<Option<Project>, CompileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut compiler = Compiler::new(env);
    for token in tokens {
        compiler.push(token.as_ref())?;
    }
    Ok(compiler.finish())
}

/// Mode-driven state machine translating tokens into the model.
#[derive(Debug)]
pub struct Compiler {
    env: BuildEnv,
    mode: Mode,
    /// The previous linker flag claimed the next data token as its
    /// argument.
    skip_ld_arg: bool,
    /// A `-I`/`-include` opener waiting for its path argument.
    pending: Option<Pending>,
    project: Option<Project>,
    module: Option<Module>,
}

impl Compiler {
    /// Create a machine with no project and no mode selected.
    #[must_use]
    pub const fn new(env: BuildEnv) -> Self {
        Self {
            env,
            mode: Mode::Undefined,
            skip_ld_arg: false,
            pending: None,
            project: None,
            module: None,
        }
    }

    /// Feed one token.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the token violates an ordering
    /// rule.
    pub fn push(&mut self, token: &str) -> Result<(), CompileError> {
        if let Some(mode) = Mode::from_token(token) {
            self.skip_ld_arg = false;
            self.mode = mode;
            return Ok(());
        }
        let data = if self.mode.verbatim() {
            token.to_owned()
        } else {
            escape::escape_token(token)
        };
        if self.skip_ld_arg {
            self.skip_ld_arg = false;
            return Ok(());
        }
        self.dispatch(data)
    }

    /// Seal the open module and hand the model over.
    #[must_use]
    pub fn finish(mut self) -> Option<Project> {
        self.seal_module();
        self.project
    }

    fn dispatch(&mut self, data: String) -> Result<(), CompileError> {
        match self.mode {
            Mode::Undefined => Err(CompileError::MissingModeSwitch),
            Mode::Project => {
                self.open_project(data);
                Ok(())
            }
            Mode::Subdir => {
                self.project_mut("-:SUBDIR")?.subdirs.push(data);
                Ok(())
            }
            Mode::Module(kind) => {
                self.project_mut("a module type")?;
                self.seal_module();
                self.module = Some(Module::new(data, kind));
                Ok(())
            }
            Mode::Sources => {
                let module = self.module_mut("-:SOURCES")?;
                if !is_non_source(&data) {
                    module.sources.push(Source {
                        name: data,
                        generator: None,
                    });
                }
                Ok(())
            }
            Mode::LdFlags => {
                let module = self.module_mut("-:LDFLAGS")?;
                self.skip_ld_arg = ldflags::interpret(module, &data);
                Ok(())
            }
            Mode::CFlags => self.add_compiler_flag(FlagLang::C, &data, "-:CFLAGS"),
            Mode::CppFlags => self.add_compiler_flag(FlagLang::Cpp, &data, "-:CPPFLAGS"),
            Mode::CxxFlags => self.add_compiler_flag(FlagLang::Cxx, &data, "-:CXXFLAGS"),
            Mode::Tags => {
                let module = self.module_mut("-:TAGS")?;
                module.tags.insert(Tags::from_name(&data));
                Ok(())
            }
            Mode::HeaderTarget => {
                // Last write wins.
                self.module_mut("-:HEADER_TARGET")?.header_target = Some(data);
                Ok(())
            }
            Mode::Headers => {
                self.module_mut("-:HEADERS")?.headers.push(data);
                Ok(())
            }
            Mode::Passthrough => {
                self.module_mut("-:PASSTHROUGH")?.passthrough.push(data);
                Ok(())
            }
            Mode::RelTop => {
                self.project_mut("-:REL_TOP")?.rel_top = Some(data);
                Ok(())
            }
            Mode::AbsTop => {
                set_abs_top(self.project_mut("-:ABS_TOP")?, &data);
                Ok(())
            }
            Mode::LibfilterStatic => {
                self.module_mut("-:LIBFILTER_STATIC")?
                    .libfilters
                    .push(Library::new(data, LibraryKind::Static));
                Ok(())
            }
            Mode::LibfilterWhole => {
                self.module_mut("-:LIBFILTER_WHOLE")?
                    .libfilters
                    .push(Library::new(data, LibraryKind::WholeStatic));
                Ok(())
            }
            Mode::End => Ok(()),
        }
    }

    /// A later `-:PROJECT` data token starts over; the open module, if
    /// any, is sealed into the final project at end of stream.
    fn open_project(&mut self, name: String) {
        self.project = Some(Project::new(
            name,
            self.env.build,
            self.env.root_path.clone(),
        ));
    }

    fn seal_module(&mut self) {
        if let (Some(project), Some(module)) = (&mut self.project, self.module.take()) {
            project.modules.push(module);
        }
    }

    fn add_compiler_flag(
        &mut self,
        lang: FlagLang,
        flag: &str,
        mode: &'static str,
    ) -> Result<(), CompileError> {
        let (Some(project), Some(module)) = (&self.project, &mut self.module) else {
            return Err(CompileError::ModuleRequired { mode });
        };
        cflags::add_flag(project, module, lang, &mut self.pending, flag);
        Ok(())
    }

    fn project_mut(&mut self, mode: &'static str) -> Result<&mut Project, CompileError> {
        self.project
            .as_mut()
            .ok_or(CompileError::ProjectRequired { mode })
    }

    fn module_mut(&mut self, mode: &'static str) -> Result<&mut Module, CompileError> {
        self.module
            .as_mut()
            .ok_or(CompileError::ModuleRequired { mode })
    }
}

/// Record the absolute top, trimming the configured build root.
fn set_abs_top(project: &mut Project, value: &str) {
    if let Some(root) = project.root_path.as_deref() {
        if !value.starts_with(root) {
            tracing::warn!(root, value, "build root is not part of -:ABS_TOP");
        }
    }
    let stripped = paths::strip_root(project.root_path.as_deref(), value);
    project.abs_top = Some(stripped.to_owned());
}

/// Whether a sources-list entry names a non-compiled declaration.
fn is_non_source(name: &str) -> bool {
    NON_SOURCE_SUFFIXES
        .iter()
        .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.h")]
    #[case("b.d")]
    #[case("c.asn")]
    #[case("d.map")]
    #[case("e.list")]
    fn declarations_are_not_sources(#[case] name: &str) {
        assert!(is_non_source(name));
    }

    #[rstest]
    #[case("f.c")]
    #[case("g.cpp")]
    #[case("h.s")]
    #[case(".h")]
    fn compiled_sources_pass_the_filter(#[case] name: &str) {
        assert!(!is_non_source(name));
    }

    #[rstest]
    fn abs_top_outside_the_root_is_kept_with_a_warning() {
        let mut project = Project::new("p".into(), BuildKind::External, Some("/root".into()));
        set_abs_top(&mut project, "/elsewhere/top");
        assert_eq!(project.abs_top.as_deref(), Some("/elsewhere/top"));
    }

    #[rstest]
    fn abs_top_under_the_root_is_stripped() {
        let mut project = Project::new("p".into(), BuildKind::External, Some("/root".into()));
        set_abs_top(&mut project, "/root/external/foo");
        assert_eq!(project.abs_top.as_deref(), Some("external/foo"));
    }
}
