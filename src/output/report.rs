use crate::error::ScanError;
use crate::model::Vulnerability;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Picks a report path inside `project_dir` that does not exist yet.
///
/// Tries `<name>-report.json`, then `<name>-report-2.json`, `-3`, ... where
/// `<name>` is the project directory's base name.
pub fn report_path(project_dir: &Path) -> PathBuf {
    let project_name = project_name(project_dir);

    let mut path = project_dir.join(format!("{}-report.json", project_name));
    let mut suffix = 2;
    while path.exists() {
        path = project_dir.join(format!("{}-report-{}.json", project_name, suffix));
        suffix += 1;
    }
    path
}

fn project_name(project_dir: &Path) -> String {
    // `..` components only resolve against the filesystem.
    let resolved = fs::canonicalize(project_dir)
        .or_else(|_| std::path::absolute(project_dir))
        .unwrap_or_else(|_| project_dir.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

/// Encodes the vulnerabilities as a 4-space indented JSON array.
///
/// Non-ASCII text is written as-is.
pub fn render_report(vulnerabilities: &[Vulnerability]) -> Result<String, ScanError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    vulnerabilities
        .serialize(&mut ser)
        .map_err(ScanError::ReportEncode)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the report next to the project and returns its path.
pub fn write_report(vulnerabilities: &[Vulnerability], project_dir: &Path) -> Result<PathBuf, ScanError> {
    let content = render_report(vulnerabilities)?;
    let path = report_path(project_dir);
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SuggestedVersion, VersionSpec};
    use tempfile::TempDir;

    fn project() -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("proj");
        fs::create_dir(&dir).unwrap();
        (root, dir)
    }

    fn sample() -> Vec<Vulnerability> {
        vec![Vulnerability {
            package_name: "flask".to_string(),
            affected_version: VersionSpec::Single("<0.12.3".to_string()),
            description: "Hizmet reddi açığı".to_string(),
            cve: Some("CVE-2018-1000656".to_string()),
            suggested_version: SuggestedVersion::Latest("3.0.2".to_string()),
        }]
    }

    #[test]
    fn test_report_path_first() {
        let (_root, dir) = project();
        assert_eq!(report_path(&dir), dir.join("proj-report.json"));
    }

    #[test]
    fn test_report_path_never_overwrites() {
        let (_root, dir) = project();
        fs::write(dir.join("proj-report.json"), "[]").unwrap();
        fs::write(dir.join("proj-report-2.json"), "[]").unwrap();

        assert_eq!(report_path(&dir), dir.join("proj-report-3.json"));
    }

    #[test]
    fn test_report_path_trailing_slash() {
        let (_root, dir) = project();
        let with_slash = PathBuf::from(format!("{}/", dir.display()));
        assert_eq!(report_path(&with_slash), dir.join("proj-report.json"));
    }

    #[test]
    fn test_report_path_parent_component() {
        let (_root, dir) = project();
        fs::create_dir(dir.join("sub")).unwrap();

        let report = report_path(&dir.join("sub").join(".."));
        assert_eq!(report.file_name().unwrap(), "proj-report.json");
        assert!(report.parent().unwrap().join("sub").is_dir());
    }

    #[test]
    fn test_report_path_current_dir_component() {
        let (_root, dir) = project();
        let report = report_path(&dir.join("."));
        assert_eq!(report.file_name().unwrap(), "proj-report.json");
    }

    #[test]
    fn test_render_report_format() {
        let json = render_report(&sample()).unwrap();

        assert_eq!(
            json,
            r#"[
    {
        "package_name": "flask",
        "affected_version": "<0.12.3",
        "description": "Hizmet reddi açığı",
        "CVE": "CVE-2018-1000656",
        "suggested_version": "3.0.2"
    }
]"#
        );
    }

    #[test]
    fn test_write_report_sequence() {
        let (_root, dir) = project();

        let first = write_report(&sample(), &dir).unwrap();
        let second = write_report(&sample(), &dir).unwrap();

        assert_eq!(first, dir.join("proj-report.json"));
        assert_eq!(second, dir.join("proj-report-2.json"));

        let written: Vec<Vulnerability> =
            serde_json::from_str(&fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(written, sample());
    }
}
