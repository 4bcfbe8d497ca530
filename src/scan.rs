//! The end-to-end scan: locate, audit, parse, assemble.

use crate::assembler::Assembler;
use crate::audit::{parse_scan_output, SafetyAudit, VulnerabilityAudit};
use crate::config::Config;
use crate::error::ScanError;
use crate::http::build_client;
use crate::locator::locate_manifest;
use crate::model::Vulnerability;
use crate::registry::{LatestVersionLookup, RegistryResolver};
use crate::translate::{GoogleTranslator, Translator};
use std::path::Path;
use tracing::info;

/// A dependency scan with all of its collaborators injected.
///
/// # Example
///
/// ```no_run
/// use depscan::{Config, DependencyScan};
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let scan = DependencyScan::from_config(&Config::default())?;
///     let vulnerabilities = scan.run(Path::new("./my-project"), "es").await?;
///     println!("{} vulnerable packages", vulnerabilities.len());
///     Ok(())
/// }
/// ```
pub struct DependencyScan {
    auditor: Box<dyn VulnerabilityAudit>,
    translator: Box<dyn Translator>,
    versions: Box<dyn LatestVersionLookup>,
    source_language: String,
    strict_translation: bool,
}

impl DependencyScan {
    pub fn new(
        auditor: Box<dyn VulnerabilityAudit>,
        translator: Box<dyn Translator>,
        versions: Box<dyn LatestVersionLookup>,
    ) -> Self {
        Self {
            auditor,
            translator,
            versions,
            source_language: "en".to_string(),
            strict_translation: true,
        }
    }

    /// Wires the `safety` scanner, Google translation and the public
    /// registries (or their configured replacements).
    pub fn from_config(config: &Config) -> Result<Self, ScanError> {
        let client = build_client(config.request_timeout())?;

        Ok(Self::new(
            Box::new(SafetyAudit::new(&config.scanner_command)),
            Box::new(GoogleTranslator::new(client.clone(), &config.translate_url)),
            Box::new(RegistryResolver::new(client, config.registries.clone())),
        )
        .with_source_language(&config.source_language)
        .with_strict_translation(config.strict_translation))
    }

    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    pub fn with_strict_translation(mut self, strict: bool) -> Self {
        self.strict_translation = strict;
        self
    }

    /// Scans `project_dir` and returns one entry per finding, in scanner order.
    ///
    /// # Errors
    ///
    /// Fails if no known manifest exists, the scanner cannot run or its output
    /// cannot be parsed, or an advisory cannot be translated.
    pub async fn run(&self, project_dir: &Path, language: &str) -> Result<Vec<Vulnerability>, ScanError> {
        let manifest = locate_manifest(project_dir).ok_or_else(|| ScanError::ManifestNotFound {
            dir: project_dir.to_path_buf(),
        })?;

        info!(
            manifest = %manifest.path.display(),
            scanner = self.auditor.name(),
            "running vulnerability scan"
        );
        let raw = self.auditor.audit(&manifest.path)?;
        let findings = parse_scan_output(&raw)?;
        info!(findings = findings.len(), "vulnerability scan parsed");

        Assembler::new(self.translator.as_ref(), self.versions.as_ref())
            .with_source_language(&self.source_language)
            .with_strict_translation(self.strict_translation)
            .assemble(findings, &manifest.path, language)
            .await
    }
}
