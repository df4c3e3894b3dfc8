//! Droidgen core library.
//!
//! Translates a stream of libtool-style build-description tokens into a
//! project model and renders it as an `Android.mk` makefile. The
//! [`compile`] module owns all token interpretation, [`model`] holds the
//! result, [`mk_gen`] renders it, and [`runner`] wires everything
//! together for the binary.

pub mod cli;
pub mod compile;
pub mod mk_gen;
pub mod model;
pub mod runner;
