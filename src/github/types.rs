use serde::{Deserialize, Serialize};

/// Repository as returned by `GET /users/{user}/repos`, reduced to what the
/// picker shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(rename(serialize = "fullName", deserialize = "full_name"))]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
}
