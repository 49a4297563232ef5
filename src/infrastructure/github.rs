//! GitHub REST client
//!
//! Implements [`SecretsApi`] against the organization secrets endpoint:
//! `GET {api}/orgs/{org}/actions/secrets?per_page=100&page=N`.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::domain::ports::SecretsApi;
use crate::domain::value_objects::SecretName;
use crate::error::{GosmError, GosmResult};

/// Default REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    pub api_url: String,
    pub token: String,
    pub timeout: Duration,
}

/// One page of `GET /orgs/{org}/actions/secrets`
#[derive(Debug, Clone, Deserialize)]
pub struct SecretsPage {
    pub total_count: usize,
    #[serde(default)]
    pub secrets: Vec<SecretEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecretEntry {
    pub name: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct GithubClient {
    client: Client,
    config: GithubClientConfig,
}

impl GithubClient {
    pub fn new(config: GithubClientConfig) -> GosmResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("gosm/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn secrets_url(&self, org: &str, page: u32) -> String {
        format!(
            "{}/orgs/{}/actions/secrets?per_page={}&page={}",
            self.config.api_url.trim_end_matches('/'),
            org,
            PER_PAGE,
            page
        )
    }

    fn fetch_page(&self, org: &str, page: u32) -> GosmResult<SecretsPage> {
        let url = self.secrets_url(org, page);
        tracing::debug!(%url, page, "listing organization secrets");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()?;

        parse_page(response)
    }
}

impl SecretsApi for GithubClient {
    fn list_secret_names(&self, org: &str) -> GosmResult<Vec<SecretName>> {
        let names = collect_pages(|page| self.fetch_page(org, page))?;
        tracing::info!(org, count = names.len(), "listed organization secrets");
        names.iter().map(|name| SecretName::new(name)).collect()
    }
}

fn parse_page(response: Response) -> GosmResult<SecretsPage> {
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|err| err.message)
            .unwrap_or(body);
        return Err(GosmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Follow pages until `total_count` names are collected or a page comes
/// back empty.
fn collect_pages<F>(mut fetch: F) -> GosmResult<Vec<String>>
where
    F: FnMut(u32) -> GosmResult<SecretsPage>,
{
    let mut names = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch(page)?;
        if batch.secrets.is_empty() {
            break;
        }
        names.extend(batch.secrets.into_iter().map(|entry| entry.name));
        if names.len() >= batch.total_count {
            break;
        }
        page += 1;
    }

    Ok(names)
}
