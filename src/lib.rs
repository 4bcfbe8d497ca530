pub mod assembler;
pub mod audit;
pub mod config;
pub mod error;
pub mod http;
pub mod locator;
pub mod model;
pub mod output;
pub mod registry;
pub mod scan;
pub mod translate;

pub use config::Config;
pub use error::ScanError;
pub use model::{ManifestFile, RegistryFamily, SuggestedVersion, Vulnerability};
pub use scan::DependencyScan;
