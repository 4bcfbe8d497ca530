use crate::error::ScanError;
use crate::model::{Finding, SuggestedVersion, Vulnerability};
use crate::registry::LatestVersionLookup;
use crate::translate::Translator;
use std::path::Path;
use tracing::warn;

/// Turns scanner findings into report entries.
///
/// Findings are processed one at a time and the output keeps their order.
pub struct Assembler<'a> {
    translator: &'a dyn Translator,
    versions: &'a dyn LatestVersionLookup,
    source_language: &'a str,
    strict_translation: bool,
}

impl<'a> Assembler<'a> {
    pub fn new(translator: &'a dyn Translator, versions: &'a dyn LatestVersionLookup) -> Self {
        Self {
            translator,
            versions,
            source_language: "en",
            strict_translation: true,
        }
    }

    pub fn with_source_language(mut self, language: &'a str) -> Self {
        self.source_language = language;
        self
    }

    /// When disabled, an advisory that fails to translate is kept verbatim.
    pub fn with_strict_translation(mut self, strict: bool) -> Self {
        self.strict_translation = strict;
        self
    }

    /// Translates each advisory to `target_language` and attaches the latest
    /// version known to the manifest's registry.
    ///
    /// # Errors
    ///
    /// Fails on the first advisory that cannot be translated, unless strict
    /// translation is disabled. Registry failures never fail the assembly.
    pub async fn assemble(
        &self,
        findings: Vec<Finding>,
        manifest: &Path,
        target_language: &str,
    ) -> Result<Vec<Vulnerability>, ScanError> {
        let mut vulnerabilities = Vec::with_capacity(findings.len());

        for finding in findings {
            let description = self.describe(&finding, target_language).await?;
            let latest = self
                .versions
                .latest_version(&finding.package_name, manifest)
                .await;

            vulnerabilities.push(Vulnerability {
                package_name: finding.package_name,
                affected_version: finding.vulnerable_spec,
                description,
                cve: finding.cve,
                suggested_version: SuggestedVersion::from(latest),
            });
        }

        Ok(vulnerabilities)
    }

    async fn describe(&self, finding: &Finding, target_language: &str) -> Result<String, ScanError> {
        match self
            .translator
            .translate(&finding.advisory, self.source_language, target_language)
            .await
        {
            Ok(text) => Ok(text),
            Err(e) if !self.strict_translation => {
                warn!(package = %finding.package_name, error = %e, "keeping untranslated advisory");
                Ok(finding.advisory.clone())
            }
            Err(e) => Err(e.into()),
        }
    }
}
