//! Filesystem abstraction for RapidMiner extension builds
//!
//! Provides the project layout conventions, normalized path handling and the
//! read-only directory scanning the descriptor engine is built on.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod scan;

pub use config::ConfigStore;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use layout::ProjectLayout;
pub use path::NormalizedPath;
pub use scan::{FileScan, ScanFilter};
