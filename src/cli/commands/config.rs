//! Config command implementations.

use super::{runtime, Workspace};
use crate::cli::{ConfigCommands, ConfigSetArgs};
use crate::config::{
    is_configured, load_config, load_token, save_config, save_token, AppConfig, TOKEN_ENV,
};
use crate::error::{Error, Result};
use crate::remote::{ContentStore, GitHubClient, RepoCoords};
use serde::Serialize;

/// Output for config show. The token itself is never printed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigShowOutput<'a> {
    #[serde(flatten)]
    config: &'a AppConfig,
    token_set: bool,
    token_source: Option<&'static str>,
    configured: bool,
}

/// Execute config commands.
///
/// # Errors
///
/// Returns an error if settings cannot be saved or, for `test`, if the
/// repository is unreachable.
pub fn execute(command: &ConfigCommands, workspace: &Workspace, json: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(workspace, json),
        ConfigCommands::Set(args) => set(workspace, args, json),
        ConfigCommands::Token { value } => token(workspace, value.as_deref(), json),
        ConfigCommands::Test => test(workspace, json),
    }
}

fn show(workspace: &Workspace, json: bool) -> Result<()> {
    let config = load_config(&workspace.home);
    let token = load_token(&workspace.home);
    let token_source = if token.is_empty() {
        None
    } else if std::env::var(TOKEN_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        Some("env")
    } else {
        Some("file")
    };

    let output = ConfigShowOutput {
        config: &config,
        token_set: !token.is_empty(),
        token_source,
        configured: is_configured(&config, &token),
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let or_unset = |s: &str| if s.is_empty() { "(unset)".to_string() } else { s.to_string() };
    println!("owner:    {}", or_unset(&config.owner));
    println!("repo:     {}", or_unset(&config.repo));
    println!("branch:   {}", config.branch);
    println!("path:     {}", config.file_path);
    println!("api url:  {}", config.api_base_url);
    println!("timeout:  {}s", config.timeout_secs);
    match token_source {
        Some(source) => println!("token:    set ({source})"),
        None => println!("token:    (unset)"),
    }
    Ok(())
}

/// Apply `args` on top of `config`.
fn apply(mut config: AppConfig, args: &ConfigSetArgs) -> Result<AppConfig> {
    fn required(label: &str, value: &str) -> Result<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::InvalidArgument(format!("{label} cannot be empty")));
        }
        Ok(value.to_string())
    }

    if args.is_empty() {
        return Err(Error::InvalidArgument(
            "Nothing to set. Pass --owner, --repo, --branch, --path, --api-url or --timeout".into(),
        ));
    }
    if let Some(owner) = &args.owner {
        config.owner = required("owner", owner)?;
    }
    if let Some(repo) = &args.repo {
        config.repo = required("repo", repo)?;
    }
    if let Some(branch) = &args.branch {
        config.branch = required("branch", branch)?;
    }
    if let Some(path) = &args.path {
        config.file_path = required("path", path)?.trim_start_matches('/').to_string();
    }
    if let Some(url) = &args.api_url {
        let url = required("api url", url)?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::InvalidArgument(format!(
                "API URL must start with http:// or https://: {url}"
            )));
        }
        config.api_base_url = url;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err(Error::InvalidArgument("timeout must be at least 1 second".into()));
        }
        config.timeout_secs = timeout;
    }
    Ok(config)
}

fn set(workspace: &Workspace, args: &ConfigSetArgs, json: bool) -> Result<()> {
    let config = apply(load_config(&workspace.home), args)?;
    save_config(&workspace.home, &config)?;

    if json {
        println!("{}", serde_json::to_string(&config)?);
    } else if !crate::is_silent() {
        println!("Saved configuration to {}", workspace.home.display());
    }
    Ok(())
}

fn token(workspace: &Workspace, value: Option<&str>, json: bool) -> Result<()> {
    let value = value.map(str::trim).unwrap_or_default();
    save_token(&workspace.home, value)?;

    if json {
        println!("{}", serde_json::json!({ "tokenSet": !value.is_empty() }));
    } else if value.is_empty() {
        println!("Token removed");
    } else {
        println!("Token saved");
    }
    Ok(())
}

fn test(workspace: &Workspace, json: bool) -> Result<()> {
    let config = load_config(&workspace.home);
    let token = load_token(&workspace.home);
    if !is_configured(&config, &token) {
        return Err(Error::NotConfigured);
    }

    let client = GitHubClient::from_config(&config, &token)?;
    let coords = RepoCoords::from_config(&config);
    let check = runtime()?.block_on(client.test_connection(&coords));

    if !check.ok {
        let reason = check.error.unwrap_or_else(|| "unknown error".to_string());
        return Err(Error::Config(format!(
            "Cannot reach {}/{}: {reason}",
            coords.owner, coords.repo
        )));
    }

    if json {
        println!("{}", serde_json::to_string(&check)?);
    } else {
        println!("Connected to {}/{}", coords.owner, coords.repo);
    }
    Ok(())
}
