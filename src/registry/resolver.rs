use crate::config::RegistryEndpoints;
use crate::model::RegistryFamily;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Resolves latest versions by issuing one GET per lookup to the registry
/// matching the manifest. Nothing is cached and nothing is retried.
pub struct RegistryResolver {
    client: reqwest::Client,
    endpoints: RegistryEndpoints,
}

impl RegistryResolver {
    pub fn new(client: reqwest::Client, endpoints: RegistryEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Looks up `package` in a specific registry.
    ///
    /// `Ok(None)` means the registry answered with something other than 200.
    pub async fn lookup(&self, family: RegistryFamily, package: &str) -> Result<Option<String>> {
        match family {
            RegistryFamily::PyPi => self.get_pypi_latest(package).await,
            RegistryFamily::Npm => self.get_npm_latest(package).await,
            RegistryFamily::RubyGems => self.get_rubygems_latest(package).await,
            RegistryFamily::Packagist => self.get_packagist_latest(package).await,
            RegistryFamily::GoProxy => self.get_goproxy_latest(package).await,
            RegistryFamily::Crates => self.get_crates_latest(package).await,
            RegistryFamily::Maven => self.get_maven_latest(package).await,
        }
    }

    /// Sends the request and decodes the body if the status is exactly 200.
    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), url = %response.url(), "registry lookup not successful");
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    async fn get_pypi_latest(&self, name: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct PypiPackage {
            info: PypiInfo,
        }

        #[derive(Deserialize)]
        struct PypiInfo {
            version: String,
        }

        let url = format!("{}/pypi/{}/json", base(&self.endpoints.pypi), name);
        let package: Option<PypiPackage> = self.get_json(self.client.get(&url)).await?;
        Ok(package.map(|p| p.info.version))
    }

    async fn get_npm_latest(&self, name: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct NpmPackageInfo {
            #[serde(rename = "dist-tags")]
            dist_tags: DistTags,
        }

        #[derive(Deserialize)]
        struct DistTags {
            latest: String,
        }

        let url = format!("{}/{}", base(&self.endpoints.npm), name);
        let request = self.client.get(&url).header("Accept", "application/json");
        let info: Option<NpmPackageInfo> = self.get_json(request).await?;
        Ok(info.map(|i| i.dist_tags.latest))
    }

    async fn get_rubygems_latest(&self, name: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct Gem {
            version: String,
        }

        let url = format!("{}/api/v1/gems/{}.json", base(&self.endpoints.rubygems), name);
        let gem: Option<Gem> = self.get_json(self.client.get(&url)).await?;
        Ok(gem.map(|g| g.version))
    }

    /// Takes the last version key listed under `packages.{name}`.
    ///
    /// Relies on the registry emitting versions oldest first; the key order of
    /// the document is kept as-is and not compared as versions.
    async fn get_packagist_latest(&self, name: &str) -> Result<Option<String>> {
        let url = format!("{}/p/{}.json", base(&self.endpoints.packagist), name);
        let document: Option<serde_json::Value> = self.get_json(self.client.get(&url)).await?;

        let Some(document) = document else {
            return Ok(None);
        };

        let versions = document
            .get("packages")
            .and_then(|packages| packages.get(name))
            .and_then(|versions| versions.as_object())
            .with_context(|| format!("missing packages.{} in response", name))?;

        let latest = versions
            .keys()
            .last()
            .with_context(|| format!("no versions listed for {}", name))?;

        Ok(Some(latest.clone()))
    }

    async fn get_goproxy_latest(&self, name: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct ModuleInfo {
            #[serde(rename = "Version")]
            version: String,
        }

        let url = format!(
            "{}/{}/@latest",
            base(&self.endpoints.go_proxy),
            encode_module_path(name)
        );
        let info: Option<ModuleInfo> = self.get_json(self.client.get(&url)).await?;
        Ok(info.map(|i| i.version))
    }

    async fn get_crates_latest(&self, name: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct CrateResponse {
            #[serde(rename = "crate")]
            krate: CrateInfo,
        }

        #[derive(Deserialize)]
        struct CrateInfo {
            max_version: String,
        }

        let url = format!("{}/api/v1/crates/{}", base(&self.endpoints.crates), name);
        let response: Option<CrateResponse> = self.get_json(self.client.get(&url)).await?;
        Ok(response.map(|r| r.krate.max_version))
    }

    /// Queries Maven Central by group id; an empty result set is not an error.
    async fn get_maven_latest(&self, name: &str) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            response: SearchResult,
        }

        #[derive(Default, Deserialize)]
        struct SearchResult {
            #[serde(default)]
            docs: Vec<SearchDoc>,
        }

        #[derive(Deserialize)]
        struct SearchDoc {
            #[serde(rename = "latestVersion")]
            latest_version: Option<String>,
        }

        let url = format!("{}/solrsearch/select", base(&self.endpoints.maven));
        let query = format!("g:{}", name);
        let request = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("rows", "1"), ("wt", "json")]);

        let search: Option<SearchResponse> = self.get_json(request).await?;
        Ok(search.and_then(|s| s.response.docs.into_iter().next()?.latest_version))
    }
}

#[async_trait]
impl super::LatestVersionLookup for RegistryResolver {
    async fn latest_version(&self, package: &str, manifest: &Path) -> Option<String> {
        let family = RegistryFamily::for_manifest(manifest)?;

        match self.lookup(family, package).await {
            Ok(version) => version,
            Err(e) => {
                warn!(
                    package,
                    registry = %family,
                    error = %e,
                    "could not retrieve the latest version"
                );
                None
            }
        }
    }
}

fn base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Applies the Go module proxy case encoding: each uppercase letter becomes
/// `!` followed by its lowercase form (`github.com/Azure` → `github.com/!azure`).
fn encode_module_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            encoded.push('!');
            encoded.push(c.to_ascii_lowercase());
        } else {
            encoded.push(c);
        }
    }
    encoded
}
