use serde::{Deserialize, Deserializer, Serialize};

/// Marker written in place of a version the registry could not provide.
pub const UNAVAILABLE_MARKER: &str = "N/A";

/// Affected version range as reported by the vulnerability scanner.
///
/// Some scanner versions emit a single specifier string, others a list of
/// them; either shape is kept verbatim in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionSpec {
    Single(String),
    Multiple(Vec<String>),
}

impl std::fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionSpec::Single(spec) => write!(f, "{}", spec),
            VersionSpec::Multiple(specs) => write!(f, "{}", specs.join(", ")),
        }
    }
}

/// One raw finding from the vulnerability scanner output.
///
/// Every field must be present; `CVE` may be `null` but not absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Finding {
    pub package_name: String,
    pub vulnerable_spec: VersionSpec,
    pub advisory: String,
    #[serde(rename = "CVE", deserialize_with = "required_nullable")]
    pub cve: Option<String>,
}

// A field with `deserialize_with` gets no implicit `None` for a missing key.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Upgrade suggestion for a vulnerable package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SuggestedVersion {
    Latest(String),
    Unavailable,
}

impl From<Option<String>> for SuggestedVersion {
    fn from(version: Option<String>) -> Self {
        version.map_or(SuggestedVersion::Unavailable, SuggestedVersion::Latest)
    }
}

impl From<String> for SuggestedVersion {
    fn from(version: String) -> Self {
        if version == UNAVAILABLE_MARKER {
            SuggestedVersion::Unavailable
        } else {
            SuggestedVersion::Latest(version)
        }
    }
}

impl From<SuggestedVersion> for String {
    fn from(version: SuggestedVersion) -> Self {
        match version {
            SuggestedVersion::Latest(v) => v,
            SuggestedVersion::Unavailable => UNAVAILABLE_MARKER.to_string(),
        }
    }
}

impl std::fmt::Display for SuggestedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedVersion::Latest(v) => write!(f, "{}", v),
            SuggestedVersion::Unavailable => write!(f, "{}", UNAVAILABLE_MARKER),
        }
    }
}

/// An assembled report entry.
///
/// Field order is the key order of the written JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub package_name: String,
    pub affected_version: VersionSpec,
    /// Advisory text in the report language.
    pub description: String,
    #[serde(rename = "CVE")]
    pub cve: Option<String>,
    pub suggested_version: SuggestedVersion,
}
