#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Generates TypeScript/React source that wires a generated HTTP client into
//! TanStack React Query.
//!
//! The input is a service descriptor (interfaces, methods, HTTP bindings and
//! type declarations) produced by a host framework; the output is a set of
//! in-memory source files:
//!
//! - one hooks module per interface (options factories plus hook wrappers)
//! - a shared `hooks/runtime.ts` (error guard, cursor pagination helpers)
//! - a `hooks/context.tsx` Provider/accessor module
//! - a typed `hooks/keys.ts` query-key map (flat key runs)
//! - a `hooks/README.md` usage guide

pub mod generator;
pub mod model;

pub use generator::{EmissionMode, GeneratorOptions, KeyConvention, SourceFile, generate};
