//! Core data types for manifests, scanner findings and report entries.
//!
//! - [`ManifestFile`] - A known dependency manifest name
//! - [`Manifest`] - A manifest located on disk
//! - [`RegistryFamily`] - The package registry a manifest resolves against
//! - [`Finding`] - One raw entry from the vulnerability scanner
//! - [`Vulnerability`] - An assembled report entry
//!
//! # Example
//!
//! ```
//! use depscan::model::{ManifestFile, RegistryFamily};
//!
//! assert_eq!(ManifestFile::ALL[0].file_name(), "requirements.txt");
//! assert_eq!(ManifestFile::CargoLock.registry(), Some(RegistryFamily::Crates));
//! assert_eq!(ManifestFile::Podfile.registry(), None);
//! ```

mod manifest;
mod vulnerability;

pub use manifest::*;
pub use vulnerability::*;
