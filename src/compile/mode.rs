//! Closed set of parsing modes selected by `-:NAME` switch tokens.

use crate::model::ModuleKind;

/// Current section of the token stream.
///
/// A `-:NAME` token switches the compiler into the matching mode and is
/// itself discarded; every other token is data for whichever mode is
/// active. The six module-kind switches fold into one payload-carrying
/// variant so dispatch stays an exhaustive match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// No mode switch has been seen yet; data here is fatal.
    Undefined,
    /// Naming the project.
    Project,
    /// Collecting subdirectories to recurse into.
    Subdir,
    /// Opening a module of the given kind.
    Module(ModuleKind),
    /// Collecting compiled sources.
    Sources,
    /// Interpreting linker flags.
    LdFlags,
    /// Collecting C compiler flags.
    CFlags,
    /// Collecting C preprocessor flags.
    CppFlags,
    /// Collecting C++ compiler flags.
    CxxFlags,
    /// Collecting build-variant tags.
    Tags,
    /// Naming the header installation target.
    HeaderTarget,
    /// Collecting installable headers.
    Headers,
    /// Collecting verbatim makefile lines.
    Passthrough,
    /// Setting the relative top-directory marker.
    RelTop,
    /// Setting the absolute top-directory marker.
    AbsTop,
    /// Collecting static link overrides.
    LibfilterStatic,
    /// Collecting whole-static link overrides.
    LibfilterWhole,
    /// Explicit stream terminator; data here is ignored.
    End,
}

impl Mode {
    /// Parse a mode-switch token.
    ///
    /// Returns `None` for anything that is not an exact `-:NAME` switch;
    /// unrecognised `-:` forms are data for the current mode, not errors.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let name = token.strip_prefix("-:")?;
        let mode = match name {
            "PROJECT" => Self::Project,
            "SUBDIR" => Self::Subdir,
            "SHARED" => Self::Module(ModuleKind::SharedLibrary),
            "STATIC" => Self::Module(ModuleKind::StaticLibrary),
            "EXECUTABLE" => Self::Module(ModuleKind::Executable),
            "HOST_SHARED" => Self::Module(ModuleKind::HostSharedLibrary),
            "HOST_STATIC" => Self::Module(ModuleKind::HostStaticLibrary),
            "HOST_EXECUTABLE" => Self::Module(ModuleKind::HostExecutable),
            "SOURCES" => Self::Sources,
            "LDFLAGS" => Self::LdFlags,
            "CFLAGS" => Self::CFlags,
            "CPPFLAGS" => Self::CppFlags,
            "CXXFLAGS" => Self::CxxFlags,
            "TAGS" => Self::Tags,
            "HEADER_TARGET" => Self::HeaderTarget,
            "HEADERS" => Self::Headers,
            "PASSTHROUGH" => Self::Passthrough,
            "REL_TOP" => Self::RelTop,
            "ABS_TOP" => Self::AbsTop,
            "LIBFILTER_STATIC" => Self::LibfilterStatic,
            "LIBFILTER_WHOLE" => Self::LibfilterWhole,
            "END" => Self::End,
            _ => return None,
        };
        Some(mode)
    }

    /// Whether data tokens in this mode bypass the escaping transform.
    #[must_use]
    pub const fn verbatim(self) -> bool {
        matches!(self, Self::Passthrough | Self::RelTop | Self::AbsTop)
    }
}
