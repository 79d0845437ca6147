//! Web application archive (WAR) assembly.
//!
//! `warpack-core` packages compiled classes, source and resource trees and
//! a generated `WEB-INF/web.xml` deployment descriptor into a single
//! deployable archive for a servlet container.
//!
//! # Examples
//!
//! ```no_run
//! use warpack_core::BuildConfig;
//! use warpack_core::assemble_war;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", ".")?;
//! let report = assemble_war(&config)?;
//! println!("Added {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod assembly;
pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod error;

// Re-export main API types
pub use api::assemble_war;
pub use api::build_war;
pub use assembly::BuildReport;
pub use assembly::ExclusionRules;
pub use assembly::Manifest;
pub use assembly::WarWriter;
pub use compiler::CompilerService;
pub use config::ArchiveKind;
pub use config::BuildConfig;
pub use config::ProjectFile;
pub use error::Result;
pub use error::WarError;
