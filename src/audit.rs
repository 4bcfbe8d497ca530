//! Vulnerability scanner integration.
//!
//! The scanner itself is an external program; this module only launches it
//! and decodes its JSON output into [`Finding`]s.

use crate::error::ScanError;
use crate::model::Finding;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Runs a vulnerability scan over a manifest and returns the raw report.
pub trait VulnerabilityAudit: Send + Sync {
    fn name(&self) -> &str;

    fn audit(&self, manifest: &Path) -> Result<String, ScanError>;
}

/// Runs the `safety` CLI: `safety check --file=<manifest> --json`.
pub struct SafetyAudit {
    command: String,
}

impl SafetyAudit {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl VulnerabilityAudit for SafetyAudit {
    fn name(&self) -> &str {
        &self.command
    }

    fn audit(&self, manifest: &Path) -> Result<String, ScanError> {
        let output = Command::new(&self.command)
            .arg("check")
            .arg(format!("--file={}", manifest.display()))
            .arg("--json")
            .output()
            .map_err(|source| ScanError::AuditLaunch {
                command: self.command.clone(),
                source,
            })?;

        // safety exits non-zero when it finds vulnerabilities; the output is
        // judged by parsing it, not by the exit status.
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(status = %output.status, %stdout, %stderr, "vulnerability scan finished");

        Ok(stdout)
    }
}

#[derive(Deserialize)]
struct ScanOutput {
    #[serde(default)]
    vulnerabilities: Vec<Finding>,
}

/// Decodes scanner output into findings, preserving their order.
///
/// A document without a `vulnerabilities` list has no findings. Anything that
/// is not JSON, or whose entries lack the expected fields, is fatal.
pub fn parse_scan_output(raw: &str) -> Result<Vec<Finding>, ScanError> {
    let output: ScanOutput = serde_json::from_str(raw).map_err(ScanError::ScanOutputUnparseable)?;
    Ok(output.vulnerabilities)
}
