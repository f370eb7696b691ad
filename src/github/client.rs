use anyhow::Result;
use octocrab::Octocrab;
use serde::Serialize;
use super::types::Repository;

pub const DEFAULT_USERNAME: &str = "google";
pub const DEFAULT_PER_PAGE: u8 = 12;

#[derive(Serialize)]
struct ListParams {
    sort: &'static str,
    per_page: u8,
}

pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Builds an unauthenticated client unless `token` is given. `base_uri`
    /// overrides `https://api.github.com`.
    pub fn new(token: Option<String>, base_uri: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        if let Some(base_uri) = base_uri {
            builder = builder.base_uri(base_uri)?;
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Most recently updated public repositories of `username`.
    ///
    /// Failures are logged and reported as an empty list.
    pub async fn list_user_repositories(&self, username: &str, limit: u8) -> Vec<Repository> {
        match self.fetch_user_repositories(username, limit).await {
            Ok(repos) => {
                tracing::debug!("Fetched {} repositories for {}", repos.len(), username);
                repos
            }
            Err(e) => {
                tracing::warn!("Failed to fetch repositories for {}: {}", username, e);
                Vec::new()
            }
        }
    }

    async fn fetch_user_repositories(&self, username: &str, limit: u8) -> Result<Vec<Repository>> {
        let params = ListParams {
            sort: "updated",
            per_page: limit,
        };
        let repos: Vec<Repository> = self
            .client
            .get(format!("/users/{}/repos", username), Some(&params))
            .await?;
        Ok(repos)
    }
}
