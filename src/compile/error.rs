//! Fatal ordering errors raised while consuming the token stream.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort translation with no usable model.
///
/// Every variant names the ordering rule the stream violated. Anomalies
/// the translation can survive (unknown tag names, odd linker tokens, an
/// absolute top outside the build root) are absorbed or logged instead of
/// raised here.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    /// A data token arrived before any mode switch.
    #[error("build description must start with a mode switch such as -:PROJECT")]
    #[diagnostic(code(droidgen::compile::missing_mode_switch))]
    MissingModeSwitch,

    /// A token needing a project arrived before `-:PROJECT` named one.
    #[error("-:PROJECT must come before {mode}")]
    #[diagnostic(code(droidgen::compile::project_required))]
    ProjectRequired {
        /// The mode switch whose data needed the project.
        mode: &'static str,
    },

    /// A token needing an open module arrived before any module-kind
    /// switch.
    #[error("a module type such as -:SHARED must come before {mode}")]
    #[diagnostic(code(droidgen::compile::module_required))]
    ModuleRequired {
        /// The mode switch whose data needed the module.
        mode: &'static str,
    },
}
