//! Core handler infrastructure.
//!
//! - [`context`]: the per-request [`Context`], [`Request`], [`Outcome`] and
//!   the [`Handler`] trait
//! - [`registry`]: the startup-built, read-only [`Registry`]

pub mod context;
pub mod registry;

pub use context::{Context, Handler, Outcome, Request};
pub use registry::{Registry, RegistryBuilder};
