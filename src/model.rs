//! Project model produced by the token-stream compiler.
//!
//! These structures are the contract between the compiler and the
//! `Android.mk` renderer: the compiler populates them in stream order and
//! the renderer traverses them read-only. Everything serialises with
//! `serde` so the finished model can be dumped as JSON for inspection.

use indexmap::IndexSet;
use serde::Serialize;

/// Build flavour of the surrounding source tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum BuildKind {
    /// Standalone build against the NDK.
    #[default]
    Ndk,
    /// Build inside a full platform source tree.
    External,
}

/// Kind of build target a [`Module`] describes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ModuleKind {
    /// Target-side shared library.
    SharedLibrary,
    /// Target-side static library.
    StaticLibrary,
    /// Target-side executable.
    Executable,
    /// Shared library built for the build host.
    HostSharedLibrary,
    /// Static library built for the build host.
    HostStaticLibrary,
    /// Executable built for the build host.
    HostExecutable,
}

impl ModuleKind {
    /// Makefile variable whose inclusion finalises a module of this kind.
    #[must_use]
    pub const fn build_include(self) -> &'static str {
        match self {
            Self::SharedLibrary => "BUILD_SHARED_LIBRARY",
            Self::StaticLibrary => "BUILD_STATIC_LIBRARY",
            Self::Executable => "BUILD_EXECUTABLE",
            Self::HostSharedLibrary => "BUILD_HOST_SHARED_LIBRARY",
            Self::HostStaticLibrary => "BUILD_HOST_STATIC_LIBRARY",
            Self::HostExecutable => "BUILD_HOST_EXECUTABLE",
        }
    }
}

/// Classification of a link-time dependency.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum LibraryKind {
    /// Bundled with the NDK; linked via the platform, never built here.
    Ndk,
    /// Known to be unavailable for the target; dropped with a warning at
    /// render time.
    Unsupported,
    /// An ordinary external library, linked shared unless a filter says
    /// otherwise.
    External,
    /// Linked as a static archive.
    Static,
    /// Linked as a whole static archive (no symbol pruning).
    WholeStatic,
    /// Not a library at all: an opaque linker flag preserved verbatim.
    Flag,
}

/// A link-time dependency reference.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Library {
    /// Bare library name (no `lib` prefix, no extension), or the verbatim
    /// flag text for [`LibraryKind::Flag`].
    pub name: String,
    /// How the renderer must treat this reference.
    pub kind: LibraryKind,
}

impl Library {
    /// Create a reference with the given classification.
    #[must_use]
    pub const fn new(name: String, kind: LibraryKind) -> Self {
        Self { name, kind }
    }
}

/// One compiled source file plus the tool that generates it, if any.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Source {
    /// Path of the source file, relative to the makefile.
    pub name: String,
    /// Generator tag for derived sources; never set by the token stream
    /// today but carried so the renderer can grow support without a model
    /// change.
    pub generator: Option<String>,
}

/// Insertion-ordered set of unique flag strings.
///
/// Duplicate inserts are silently dropped; the first occurrence keeps its
/// position. Order is meaningful to the generated makefile, so iteration
/// always follows insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FlagSet(IndexSet<String>);

impl FlagSet {
    /// Insert a flag, returning whether it was newly added.
    pub fn insert(&mut self, flag: String) -> bool {
        self.0.insert(flag)
    }

    /// Iterate flags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bitset of module tags controlling which build variants include a module.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tags(u8);

impl Tags {
    /// No tags set.
    pub const NONE: Self = Self(0);
    /// Included in user builds.
    pub const USER: Self = Self(1);
    /// Included in engineering builds.
    pub const ENG: Self = Self(1 << 1);
    /// Built as part of the test suite.
    pub const TESTS: Self = Self(1 << 2);
    /// Built only when explicitly requested.
    pub const OPTIONAL: Self = Self(1 << 3);
    /// Included in debug builds.
    pub const DEBUG: Self = Self(1 << 4);

    const TABLE: &'static [(&'static str, Self)] = &[
        ("user", Self::USER),
        ("eng", Self::ENG),
        ("tests", Self::TESTS),
        ("optional", Self::OPTIONAL),
        ("debug", Self::DEBUG),
    ];

    /// Bits for a tag name.
    ///
    /// Every table entry equal to `name` contributes its bit, so the lookup
    /// stays additive rather than first-match. Unknown names contribute
    /// nothing and are not an error.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::TABLE
            .iter()
            .filter(|(tag_name, _)| *tag_name == name)
            .fold(Self::NONE, |acc, &(_, tag)| acc.union(tag))
    }

    /// OR another tag set into this one.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Union of two tag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no tag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of the set tags, in canonical order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        Self::TABLE
            .iter()
            .filter(|&&(_, tag)| self.contains(tag))
            .map(|&(tag_name, _)| tag_name)
            .collect()
    }
}

impl Serialize for Tags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.names())
    }
}

/// One build target within a [`Project`].
///
/// A module is mutable only while it is the compiler's current module; the
/// next module-kind switch (or end of stream) seals it into the project.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Module {
    /// Module name, which becomes the makefile's module variable.
    pub name: String,
    /// What gets built.
    pub kind: ModuleKind,
    /// Installation target for headers; the last write wins.
    pub header_target: Option<String>,
    /// Headers installed alongside the module, in stream order.
    pub headers: Vec<String>,
    /// Compiled sources, in stream order, already filtered of non-compiled
    /// declarations.
    pub sources: Vec<Source>,
    /// C compiler flags.
    pub cflags: FlagSet,
    /// C preprocessor flags.
    pub cppflags: FlagSet,
    /// C++ compiler flags.
    pub cxxflags: FlagSet,
    /// Include search paths, kept apart from the general flag sets.
    pub includes: FlagSet,
    /// Link-time dependencies, in stream order.
    pub libraries: Vec<Library>,
    /// Static / whole-static overrides applied to `libraries` at render
    /// time.
    pub libfilters: Vec<Library>,
    /// Opaque lines copied verbatim into the module's makefile section.
    pub passthrough: Vec<String>,
    /// Build-variant tags.
    pub tags: Tags,
}

impl Module {
    /// Open a new, empty module of the given kind.
    #[must_use]
    pub fn new(name: String, kind: ModuleKind) -> Self {
        Self {
            name,
            kind,
            header_target: None,
            headers: Vec::new(),
            sources: Vec::new(),
            cflags: FlagSet::default(),
            cppflags: FlagSet::default(),
            cxxflags: FlagSet::default(),
            includes: FlagSet::default(),
            libraries: Vec::new(),
            libfilters: Vec::new(),
            passthrough: Vec::new(),
            tags: Tags::NONE,
        }
    }
}

/// Root of a translated build description.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Project {
    /// Project name, used in the generated makefile banner.
    pub name: String,
    /// Which build flavour the makefile targets.
    pub build: BuildKind,
    /// Source-tree root stripped from absolute paths, when known.
    pub root_path: Option<String>,
    /// Absolute form of the project's top directory; substituted for
    /// `rel_top` during path rewriting.
    pub abs_top: Option<String>,
    /// Relative form of the project's top directory. Substitution only
    /// applies while both `abs_top` and `rel_top` are set.
    pub rel_top: Option<String>,
    /// Sealed modules, in stream order.
    pub modules: Vec<Module>,
    /// Subdirectories the generated makefile recurses into, in stream
    /// order.
    pub subdirs: Vec<String>,
}

impl Project {
    /// Create an empty project for the given build environment.
    #[must_use]
    pub const fn new(name: String, build: BuildKind, root_path: Option<String>) -> Self {
        Self {
            name,
            build,
            root_path,
            abs_top: None,
            rel_top: None,
            modules: Vec::new(),
            subdirs: Vec::new(),
        }
    }
}
