//! Shared test utilities for the rmx extension tools workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for extension
//!   project trees, and [`TestWorkspace`](project::TestWorkspace) for
//!   builds with sibling projects

pub mod project;

pub use project::{TestProject, TestWorkspace};
