//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.

use crate::application::DumpUseCase;
use crate::config::{Config, GithubConfig};
use crate::error::{GosmError, GosmResult};
use crate::infrastructure::{GithubClient, GithubClientConfig, LocalWorkflowWriter};

/// Type alias for the concrete DumpUseCase with all dependencies
pub type ConcreteDumpUseCase = DumpUseCase<GithubClient, LocalWorkflowWriter>;

/// Read the token from the variable named by `token_env`
pub fn github_token(config: &GithubConfig) -> GosmResult<String> {
    token_from(config, |var| std::env::var(var).ok())
}

fn token_from<F>(config: &GithubConfig, lookup: F) -> GosmResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(&config.token_env)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| GosmError::MissingToken {
            var: config.token_env.clone(),
        })
}

/// Build the GitHub client from `[github]` settings
pub fn create_github_client(config: &GithubConfig) -> GosmResult<GithubClient> {
    GithubClient::new(GithubClientConfig {
        api_url: config.api_url.clone(),
        token: github_token(config)?,
        timeout: config.timeout(),
    })
}

/// Create a dump use case; the GitHub client is only built when the
/// organization listing is needed, so explicit names work without a token.
pub fn create_dump_use_case(config: &Config, needs_listing: bool) -> GosmResult<ConcreteDumpUseCase> {
    let api = if needs_listing {
        Some(create_github_client(&config.github)?)
    } else {
        None
    };

    Ok(DumpUseCase::new(api, LocalWorkflowWriter::new()))
}
