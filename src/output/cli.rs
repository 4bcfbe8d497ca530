use crate::model::{SuggestedVersion, Vulnerability};
use chrono::Utc;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct VulnRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Affected")]
    affected: String,
    #[tabled(rename = "CVE")]
    cve: String,
    #[tabled(rename = "Suggested")]
    suggested: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Renders the findings as a table, one row per vulnerability.
pub fn vulnerability_table(vulnerabilities: &[Vulnerability]) -> String {
    let rows: Vec<VulnRow> = vulnerabilities
        .iter()
        .map(|v| VulnRow {
            package: truncate(&v.package_name, 40),
            affected: truncate(&v.affected_version.to_string(), 30),
            cve: v.cve.clone().unwrap_or_else(|| "-".to_string()),
            suggested: format_suggested(&v.suggested_version),
            description: truncate(&v.description, 60),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn print_summary(vulnerabilities: &[Vulnerability], report: &Path) {
    println!();
    println!(
        "Scan completed at: {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Report generated: {}", report.display());
    println!();
    println!("Found {} vulnerabilities:", vulnerabilities.len());
    println!();
    println!("{}", vulnerability_table(vulnerabilities));
}

fn format_suggested(version: &SuggestedVersion) -> String {
    match version {
        SuggestedVersion::Latest(v) => format!("\x1b[32m{}\x1b[0m", v),
        SuggestedVersion::Unavailable => version.to_string(),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
