//! Command implementations for rmx-cli

pub mod exclusions;
pub mod install;
pub mod manifest;

pub use exclusions::run_exclusions;
pub use install::run_install_dir;
pub use manifest::run_manifest;
