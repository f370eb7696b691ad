use crate::auth::{AuthError, AuthProvider, SessionStore, SignInProvider, User};
use crate::changelog::error::Result as GenerationResult;
use crate::changelog::{ChangelogClient, ChangelogInput, GeneratedChangelog, ReleaseCategory, TextGenerator};
use crate::github::{GitHubClient, Repository};

pub const NO_ENTRIES_MESSAGE: &str = "Please add at least one change entry.";

/// Headless state behind the generator form.
///
/// Holds the form, the last generated changelog and the last error message.
/// A new result replaces the previous one; nothing is kept beyond that.
pub struct AppState<T> {
    client: ChangelogClient<T>,
    sessions: SessionStore,
    pub form: ChangelogInput,
    pub result: Option<GeneratedChangelog>,
    pub error: Option<String>,
    pub user: Option<User>,
    pub repositories: Vec<Repository>,
}

impl<T: TextGenerator> AppState<T> {
    /// Starts with a blank form and whatever session was stored.
    pub fn new(client: ChangelogClient<T>, sessions: SessionStore, form: ChangelogInput) -> Self {
        let user = sessions.load();
        Self {
            client,
            sessions,
            form,
            result: None,
            error: None,
            user,
            repositories: Vec::new(),
        }
    }

    pub fn client(&self) -> &ChangelogClient<T> {
        &self.client
    }

    /// The prompt the current form would be sent with.
    pub fn prompt(&self) -> GenerationResult<String> {
        self.client.render_prompt(&self.form)
    }

    /// Submits the form. Returns whether a changelog was produced.
    pub async fn submit(&mut self) -> bool {
        if !self.form.has_content() {
            self.error = Some(NO_ENTRIES_MESSAGE.to_string());
            return false;
        }

        self.error = None;
        match self.client.generate(&self.form).await {
            Ok(changelog) => {
                self.result = Some(changelog);
                true
            }
            Err(e) => {
                tracing::error!("Changelog generation failed ({:?}): {}", e.kind(), e);
                self.error = Some(e.user_message().to_string());
                false
            }
        }
    }

    pub async fn sign_in(
        &mut self,
        provider: AuthProvider,
        sign_in: &dyn SignInProvider,
    ) -> Result<&User, AuthError> {
        let pending = sign_in.begin_sign_in(provider);
        let session = sign_in.complete_sign_in(pending).await?;
        self.sessions.save(&session.user)?;
        tracing::info!("Signed in as {} via {}", session.user.username, provider);
        Ok(self.user.insert(session.user))
    }

    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.user = None;
        self.result = None;
        self.repositories.clear();
        self.sessions.clear()
    }

    /// Loads the repository picker. Does nothing while signed out.
    pub async fn load_repositories(&mut self, github: &GitHubClient, username: &str, limit: u8) -> &[Repository] {
        if self.user.is_some() {
            self.repositories = github.list_user_repositories(username, limit).await;
        }
        &self.repositories
    }

    /// Fills the features entry with starter notes for `repo`.
    pub fn import_repository(&mut self, repo: &Repository) {
        tracing::info!("Importing notes from {}", repo.full_name);
        self.form.set_category(
            ReleaseCategory::Features,
            format!("feat: sync data from {0}\nfeat: update schema for {0}", repo.name),
        );
    }

    /// Looks `name` up among the loaded repositories, by short or full name.
    pub fn find_repository(&self, name: &str) -> Option<&Repository> {
        self.repositories
            .iter()
            .find(|repo| repo.name == name || repo.full_name == name)
    }
}
