//! Latest-version lookups against package registries.
//!
//! | Registry | Manifests | Endpoint | Field |
//! |----------|-----------|----------|-------|
//! | PyPI | `*.txt`, `*.py` | `/pypi/{name}/json` | `info.version` |
//! | NPM | `package.json`, `package-lock.json`, `yarn.lock` | `/{name}` | `dist-tags.latest` |
//! | RubyGems | `Gemfile`, `Gemfile.lock` | `/api/v1/gems/{name}.json` | `version` |
//! | Packagist | `composer.json`, `composer.lock` | `/p/{name}.json` | last key of `packages.{name}` |
//! | Go Proxy | `go.mod`, `go.sum` | `/{name}/@latest` (case-encoded) | `Version` |
//! | Crates.io | `Cargo.toml`, `Cargo.lock` | `/api/v1/crates/{name}` | `crate.max_version` |
//! | Maven | `build.gradle`, `pom.xml` | `/solrsearch/select?q=g:{name}` | `response.docs[0].latestVersion` |

mod resolver;

pub use resolver::RegistryResolver;

use async_trait::async_trait;
use std::path::Path;

/// Source of latest published versions.
///
/// Lookups never fail the caller: any problem resolving a version yields
/// `None`.
#[async_trait]
pub trait LatestVersionLookup: Send + Sync {
    async fn latest_version(&self, package: &str, manifest: &Path) -> Option<String>;
}
