use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use logspark::app::AppState;
use logspark::auth::{AuthProvider, SessionStore, SimulatedSignIn};
use logspark::changelog::output::OutputFormat;
use logspark::changelog::{
    ChangelogClient, ChangelogInput, GeminiTransport, PromptBuilder, ReleaseCategory, TemplateType,
};
use logspark::config::Config;
use logspark::github::GitHubClient;

#[derive(Parser)]
#[command(name = "logspark")]
#[command(about = "Turn raw release notes into polished changelogs")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "LOGSPARK_CONFIG")]
    config: Option<PathBuf>,

    /// Generative Language API key (can also be set via GEMINI_API_KEY env var)
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for generation
    #[arg(long, global = true, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a changelog from raw notes
    Generate {
        /// Version label of the release
        #[arg(long = "version", short = 'V')]
        release_version: Option<String>,

        /// Release date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Style template: standard, marketing, technical or minimal
        #[arg(short, long)]
        template: Option<TemplateType>,

        /// New features
        #[arg(long)]
        features: Option<String>,

        /// Bug fixes
        #[arg(long)]
        fixes: Option<String>,

        /// Improvements
        #[arg(long)]
        improvements: Option<String>,

        /// Breaking changes
        #[arg(long)]
        breaking: Option<String>,

        /// Read the whole form from a JSON file instead
        #[arg(short, long, conflicts_with_all = ["release_version", "features", "fixes", "improvements", "breaking"])]
        input: Option<PathBuf>,

        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "markdown")]
        format: OutputFormat,

        /// Custom Handlebars prompt template
        #[arg(long)]
        prompt_template: Option<PathBuf>,

        /// Fill the features entry from one of your GitHub repositories
        #[arg(long, conflicts_with = "features")]
        from_repo: Option<String>,

        /// Print the prompt without calling the model
        #[arg(long)]
        print_prompt: bool,
    },

    /// List repositories to pick release notes from
    Repos {
        /// GitHub user whose repositories are listed
        #[arg(short, long)]
        user: Option<String>,

        /// Maximum number of repositories to list
        #[arg(long)]
        limit: Option<u8>,
    },

    /// Sign in
    Login {
        /// Sign-in provider: github or google
        #[arg(short, long, default_value = "github")]
        provider: AuthProvider,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the available templates
    Templates,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "logspark=debug" } else { "logspark=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();
}

fn build_state(config: &Config, form: ChangelogInput, prompt_builder: PromptBuilder) -> AppState<GeminiTransport> {
    let client = ChangelogClient::with_prompt_builder(config.gemini.settings(), config.gemini.transport(), prompt_builder);
    let sessions = SessionStore::new(config.session.path.clone().unwrap_or_else(SessionStore::default_path));
    AppState::new(client, sessions, form)
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if cli.api_key.is_some() {
        config.gemini.api_key = cli.api_key.clone();
    }
    if let Some(model) = cli.model.clone() {
        config.gemini.model = model;
    }

    match cli.command {
        Commands::Generate {
            release_version,
            date,
            template,
            features,
            fixes,
            improvements,
            breaking,
            input,
            output,
            format,
            prompt_template,
            from_repo,
            print_prompt,
        } => {
            let mut form = match input {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?
                }
                None => {
                    let mut form = ChangelogInput::new_form(today());
                    form.template = config.defaults.template;
                    form
                }
            };
            if let Some(version) = release_version {
                form.version = version;
            }
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(template) = template {
                form.template = template;
            }
            let notes = [
                (ReleaseCategory::Features, features),
                (ReleaseCategory::Fixes, fixes),
                (ReleaseCategory::Improvements, improvements),
                (ReleaseCategory::Breaking, breaking),
            ];
            for (category, content) in notes {
                if let Some(content) = content {
                    form.set_category(category, content);
                }
            }

            let prompt_builder = match prompt_template.or_else(|| config.defaults.prompt_template.clone()) {
                Some(path) => PromptBuilder::with_template_file(&path)?,
                None => PromptBuilder::new()?,
            };

            let mut state = build_state(&config, form, prompt_builder);

            if let Some(name) = from_repo {
                if state.user.is_none() {
                    eprintln!("✗ Sign in first with `logspark login`");
                    std::process::exit(1);
                }
                let github = GitHubClient::new(config.github.token.clone(), config.github.base_uri.clone())?;
                state
                    .load_repositories(&github, &config.github.username, config.github.per_page)
                    .await;
                let repo = state
                    .find_repository(&name)
                    .cloned()
                    .with_context(|| format!("repository {} not found for {}", name, config.github.username))?;
                state.import_repository(&repo);
            }

            if print_prompt {
                println!("{}", state.prompt()?);
                return Ok(());
            }
            if !state.submit().await {
                let message = state.error.unwrap_or_default();
                eprintln!("✗ {}", message);
                std::process::exit(1);
            }

            if let Some(changelog) = &state.result {
                let content = format.render(changelog)?;
                if let Some(output_path) = output {
                    std::fs::write(&output_path, content)
                        .with_context(|| format!("writing {}", output_path.display()))?;
                    println!("Changelog written to {}", output_path.display());
                } else {
                    println!("{}", content);
                }
            }
        }
        Commands::Repos { user, limit } => {
            let mut state = build_state(&config, ChangelogInput::new_form(today()), PromptBuilder::new()?);
            if state.user.is_none() {
                eprintln!("✗ Sign in first with `logspark login`");
                std::process::exit(1);
            }

            let github = GitHubClient::new(config.github.token.clone(), config.github.base_uri.clone())?;
            let username = user.unwrap_or_else(|| config.github.username.clone());
            let limit = limit.unwrap_or(config.github.per_page);
            let repos = state.load_repositories(&github, &username, limit).await;

            if repos.is_empty() {
                println!("No repositories found");
            }
            for repo in repos {
                println!(
                    "{} (★ {}){}",
                    repo.full_name,
                    repo.stargazers_count.unwrap_or_default(),
                    repo.description.as_deref().map(|d| format!(" - {}", d)).unwrap_or_default()
                );
            }
        }
        Commands::Login { provider } => {
            let mut state = build_state(&config, ChangelogInput::new_form(today()), PromptBuilder::new()?);
            let user = state.sign_in(provider, &SimulatedSignIn::default()).await?;
            println!("✓ Signed in as {} ({})", user.name, user.username);
        }
        Commands::Logout => {
            let mut state = build_state(&config, ChangelogInput::new_form(today()), PromptBuilder::new()?);
            state.sign_out()?;
            println!("Signed out");
        }
        Commands::Whoami => {
            let state = build_state(&config, ChangelogInput::new_form(today()), PromptBuilder::new()?);
            match &state.user {
                Some(user) => println!("{} ({}) via {}", user.name, user.username, user.provider),
                None => println!("Not signed in"),
            }
        }
        Commands::Templates => {
            for template in TemplateType::ALL {
                println!("{:<10} {:<12} {}", template.as_str(), template.display_name(), template.description());
            }
        }
    }

    Ok(())
}
