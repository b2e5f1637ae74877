//! Module component resolution for the admin console.
//!
//! Maps a module id to the UI component that renders it. Components are
//! registered at startup in a [`ComponentRegistry`] under one of several
//! authoring conventions; the [`ModuleComponentResolver`] tries those
//! conventions in a fixed order and memoizes the first hit.
//!
//! # Modules
//!
//! - [`component`] — Render contract and the shared [`ComponentHandle`]
//! - [`loader`] — Candidate locations, module exports, and the loader seam
//! - [`registry`] — Startup-populated location → factory registry
//! - [`resolver`] — Ordered-lookup resolver with an unbounded resolution cache
//! - [`naming`] — Technical/display module name mapping

#![warn(clippy::unwrap_used)]

pub mod component;
pub mod loader;
pub mod naming;
pub mod registry;
pub mod resolver;

pub use component::{ComponentHandle, ModuleComponent, RenderContext, RenderOutput};
pub use loader::{
    CandidateLayout, CandidateLocation, ComponentLoader, Convention, ExportValue, LoadError,
    ModuleExports, PathBase,
};
pub use registry::ComponentRegistry;
pub use resolver::ModuleComponentResolver;
