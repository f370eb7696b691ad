use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Session file is not valid: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    GitHub,
    Google,
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthProvider::GitHub => write!(f, "GitHub"),
            AuthProvider::Google => write!(f, "Google"),
        }
    }
}

impl std::str::FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" | "gh" => Ok(AuthProvider::GitHub),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unknown sign-in provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub avatar_url: String,
    pub provider: AuthProvider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: User,
}

/// A sign-in that has been started but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSignIn {
    pub provider: AuthProvider,
}

#[async_trait]
pub trait SignInProvider: Send + Sync {
    fn begin_sign_in(&self, provider: AuthProvider) -> PendingSignIn;
    async fn complete_sign_in(&self, pending: PendingSignIn) -> Result<AuthSession, AuthError>;
}

/// Stand-in for a real OAuth round trip: waits a moment, then signs in a
/// fixed demo account for the requested provider.
pub struct SimulatedSignIn {
    github_delay: Duration,
    google_delay: Duration,
}

impl Default for SimulatedSignIn {
    fn default() -> Self {
        Self {
            github_delay: Duration::from_millis(2000),
            google_delay: Duration::from_millis(1500),
        }
    }
}

impl SimulatedSignIn {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            github_delay: delay,
            google_delay: delay,
        }
    }

    fn demo_user(provider: AuthProvider) -> User {
        match provider {
            AuthProvider::GitHub => User {
                id: "gh_12345".to_string(),
                name: "Alex Rivera".to_string(),
                username: "arivera_dev".to_string(),
                avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=Alex".to_string(),
                provider,
            },
            AuthProvider::Google => User {
                id: "goog_67890".to_string(),
                name: "Alex Rivera".to_string(),
                username: "alex.rivera@gmail.com".to_string(),
                avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=GoogleAlex".to_string(),
                provider,
            },
        }
    }
}

#[async_trait]
impl SignInProvider for SimulatedSignIn {
    fn begin_sign_in(&self, provider: AuthProvider) -> PendingSignIn {
        tracing::info!("Connecting to {}...", provider);
        PendingSignIn { provider }
    }

    async fn complete_sign_in(&self, pending: PendingSignIn) -> Result<AuthSession, AuthError> {
        let delay = match pending.provider {
            AuthProvider::GitHub => self.github_delay,
            AuthProvider::Google => self.google_delay,
        };
        tokio::time::sleep(delay).await;

        Ok(AuthSession {
            user: Self::demo_user(pending.provider),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_sign_in_returns_provider_account() {
        let provider = SimulatedSignIn::with_delay(Duration::ZERO);

        let pending = provider.begin_sign_in(AuthProvider::GitHub);
        let session = provider.complete_sign_in(pending).await.unwrap();
        assert_eq!(session.user.id, "gh_12345");
        assert_eq!(session.user.username, "arivera_dev");

        let pending = provider.begin_sign_in(AuthProvider::Google);
        let session = provider.complete_sign_in(pending).await.unwrap();
        assert_eq!(session.user.id, "goog_67890");
        assert_eq!(session.user.provider, AuthProvider::Google);
    }

    #[tokio::test]
    async fn sign_in_waits_for_the_configured_delay() {
        let provider = SimulatedSignIn::with_delay(Duration::from_millis(50));
        let started = std::time::Instant::now();

        let pending = provider.begin_sign_in(AuthProvider::GitHub);
        provider.complete_sign_in(pending).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn user_serializes_with_camel_case_avatar() {
        let user = SimulatedSignIn::demo_user(AuthProvider::GitHub);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["avatarUrl"], user.avatar_url);
        assert_eq!(value["provider"], "github");
    }
}
