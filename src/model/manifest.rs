use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A dependency manifest file name recognised by the locator.
///
/// Variants are declared in lookup priority order; [`ManifestFile::ALL`]
/// mirrors that order and is what the locator walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManifestFile {
    Requirements,
    PackageJson,
    PackageLock,
    Pipfile,
    PipfileLock,
    SetupPy,
    PyProject,
    Gemfile,
    GemfileLock,
    ComposerJson,
    ComposerLock,
    GoMod,
    GoSum,
    CargoToml,
    CargoLock,
    Podfile,
    PodfileLock,
    BuildGradle,
    BuildGradleKts,
    PomXml,
    YarnLock,
    MixExs,
    MixLock,
}

impl ManifestFile {
    /// Every known manifest, highest priority first.
    pub const ALL: [ManifestFile; 23] = [
        ManifestFile::Requirements,
        ManifestFile::PackageJson,
        ManifestFile::PackageLock,
        ManifestFile::Pipfile,
        ManifestFile::PipfileLock,
        ManifestFile::SetupPy,
        ManifestFile::PyProject,
        ManifestFile::Gemfile,
        ManifestFile::GemfileLock,
        ManifestFile::ComposerJson,
        ManifestFile::ComposerLock,
        ManifestFile::GoMod,
        ManifestFile::GoSum,
        ManifestFile::CargoToml,
        ManifestFile::CargoLock,
        ManifestFile::Podfile,
        ManifestFile::PodfileLock,
        ManifestFile::BuildGradle,
        ManifestFile::BuildGradleKts,
        ManifestFile::PomXml,
        ManifestFile::YarnLock,
        ManifestFile::MixExs,
        ManifestFile::MixLock,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestFile::Requirements => "requirements.txt",
            ManifestFile::PackageJson => "package.json",
            ManifestFile::PackageLock => "package-lock.json",
            ManifestFile::Pipfile => "Pipfile",
            ManifestFile::PipfileLock => "Pipfile.lock",
            ManifestFile::SetupPy => "setup.py",
            ManifestFile::PyProject => "pyproject.toml",
            ManifestFile::Gemfile => "Gemfile",
            ManifestFile::GemfileLock => "Gemfile.lock",
            ManifestFile::ComposerJson => "composer.json",
            ManifestFile::ComposerLock => "composer.lock",
            ManifestFile::GoMod => "go.mod",
            ManifestFile::GoSum => "go.sum",
            ManifestFile::CargoToml => "Cargo.toml",
            ManifestFile::CargoLock => "Cargo.lock",
            ManifestFile::Podfile => "Podfile",
            ManifestFile::PodfileLock => "Podfile.lock",
            ManifestFile::BuildGradle => "build.gradle",
            ManifestFile::BuildGradleKts => "build.gradle.kts",
            ManifestFile::PomXml => "pom.xml",
            ManifestFile::YarnLock => "yarn.lock",
            ManifestFile::MixExs => "mix.exs",
            ManifestFile::MixLock => "mix.lock",
        }
    }

    /// The registry this manifest's packages are resolved against, if any.
    pub fn registry(&self) -> Option<RegistryFamily> {
        RegistryFamily::for_manifest(Path::new(self.file_name()))
    }
}

impl std::fmt::Display for ManifestFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A manifest found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub kind: ManifestFile,
    pub path: PathBuf,
}

/// Package registries that can report a latest version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryFamily {
    PyPi,
    Npm,
    RubyGems,
    Packagist,
    GoProxy,
    Crates,
    Maven,
}

/// Manifest file-name suffix to registry. Suffixes are checked in order and
/// none of them overlap for the known manifest names.
const SUFFIX_TABLE: &[(&str, RegistryFamily)] = &[
    (".txt", RegistryFamily::PyPi),
    (".py", RegistryFamily::PyPi),
    ("package.json", RegistryFamily::Npm),
    ("package-lock.json", RegistryFamily::Npm),
    ("yarn.lock", RegistryFamily::Npm),
    ("Gemfile", RegistryFamily::RubyGems),
    ("Gemfile.lock", RegistryFamily::RubyGems),
    ("composer.json", RegistryFamily::Packagist),
    ("composer.lock", RegistryFamily::Packagist),
    ("go.mod", RegistryFamily::GoProxy),
    ("go.sum", RegistryFamily::GoProxy),
    ("Cargo.toml", RegistryFamily::Crates),
    ("Cargo.lock", RegistryFamily::Crates),
    ("build.gradle", RegistryFamily::Maven),
    ("pom.xml", RegistryFamily::Maven),
];

impl RegistryFamily {
    /// Picks the registry for a manifest path by its file-name suffix.
    ///
    /// Returns `None` for manifests the resolver has no registry for
    /// (`Pipfile`, `pyproject.toml`, `Podfile`, `build.gradle.kts`, `mix.exs`, ...).
    pub fn for_manifest(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        SUFFIX_TABLE
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, family)| *family)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RegistryFamily::PyPi => "PyPI",
            RegistryFamily::Npm => "NPM",
            RegistryFamily::RubyGems => "RubyGems",
            RegistryFamily::Packagist => "Packagist",
            RegistryFamily::GoProxy => "Go Proxy",
            RegistryFamily::Crates => "Crates.io",
            RegistryFamily::Maven => "Maven",
        }
    }
}

impl std::fmt::Display for RegistryFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let names: Vec<&str> = ManifestFile::ALL.iter().map(|m| m.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "requirements.txt",
                "package.json",
                "package-lock.json",
                "Pipfile",
                "Pipfile.lock",
                "setup.py",
                "pyproject.toml",
                "Gemfile",
                "Gemfile.lock",
                "composer.json",
                "composer.lock",
                "go.mod",
                "go.sum",
                "Cargo.toml",
                "Cargo.lock",
                "Podfile",
                "Podfile.lock",
                "build.gradle",
                "build.gradle.kts",
                "pom.xml",
                "yarn.lock",
                "mix.exs",
                "mix.lock",
            ]
        );
    }

    #[test]
    fn test_registry_for_supported_manifests() {
        assert_eq!(ManifestFile::Requirements.registry(), Some(RegistryFamily::PyPi));
        assert_eq!(ManifestFile::SetupPy.registry(), Some(RegistryFamily::PyPi));
        assert_eq!(ManifestFile::PackageJson.registry(), Some(RegistryFamily::Npm));
        assert_eq!(ManifestFile::PackageLock.registry(), Some(RegistryFamily::Npm));
        assert_eq!(ManifestFile::YarnLock.registry(), Some(RegistryFamily::Npm));
        assert_eq!(ManifestFile::Gemfile.registry(), Some(RegistryFamily::RubyGems));
        assert_eq!(ManifestFile::GemfileLock.registry(), Some(RegistryFamily::RubyGems));
        assert_eq!(ManifestFile::ComposerJson.registry(), Some(RegistryFamily::Packagist));
        assert_eq!(ManifestFile::ComposerLock.registry(), Some(RegistryFamily::Packagist));
        assert_eq!(ManifestFile::GoMod.registry(), Some(RegistryFamily::GoProxy));
        assert_eq!(ManifestFile::GoSum.registry(), Some(RegistryFamily::GoProxy));
        assert_eq!(ManifestFile::CargoToml.registry(), Some(RegistryFamily::Crates));
        assert_eq!(ManifestFile::CargoLock.registry(), Some(RegistryFamily::Crates));
        assert_eq!(ManifestFile::BuildGradle.registry(), Some(RegistryFamily::Maven));
        assert_eq!(ManifestFile::PomXml.registry(), Some(RegistryFamily::Maven));
    }

    #[test]
    fn test_registry_for_unsupported_manifests() {
        for manifest in [
            ManifestFile::Pipfile,
            ManifestFile::PipfileLock,
            ManifestFile::PyProject,
            ManifestFile::Podfile,
            ManifestFile::PodfileLock,
            ManifestFile::BuildGradleKts,
            ManifestFile::MixExs,
            ManifestFile::MixLock,
        ] {
            assert_eq!(manifest.registry(), None, "{manifest}");
        }
    }

    #[test]
    fn test_for_manifest_uses_file_name() {
        let path = Path::new("/projects/api/requirements.txt");
        assert_eq!(RegistryFamily::for_manifest(path), Some(RegistryFamily::PyPi));
        assert_eq!(RegistryFamily::for_manifest(Path::new("/")), None);
    }
}
