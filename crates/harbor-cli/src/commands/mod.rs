//! CLI commands and argument parsing.

pub mod member;
pub mod metadata;
pub mod project;
pub mod quota;
pub mod retention;
pub mod system;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use harbor_client::{AuthInfo, ClientConfig, HarborClient, RequestOptions, TlsConfig};
use serde::Serialize;

/// Harbor - Command-line client for the Harbor container registry
#[derive(Parser)]
#[command(name = "harbor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    Project(project::ProjectArgs),

    /// Manage project members
    Member(member::MemberArgs),

    /// Read and change project metadata
    Metadata(metadata::MetadataArgs),

    /// Show storage quotas
    Quota(quota::QuotaArgs),

    /// Show tag retention policies
    Retention(retention::RetentionArgs),

    /// Show the health of the instance
    Health,

    /// Ping the instance
    Ping,

    /// Print version information
    Version,
}

/// How to reach and authenticate against Harbor.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Harbor URL, e.g. https://harbor.example.com
    #[arg(long, env = "HARBOR_URL", global = true)]
    pub url: Option<String>,

    /// Username for basic authentication
    #[arg(short, long, env = "HARBOR_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, env = "HARBOR_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Bearer token, used instead of username and password
    #[arg(long, env = "HARBOR_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, env = "HARBOR_INSECURE", global = true)]
    pub insecure: bool,

    /// Items fetched per page by list commands
    #[arg(long, env = "HARBOR_PAGE_SIZE", default_value = "100", global = true)]
    pub page_size: i64,

    /// Per-request timeout in seconds
    #[arg(long, env = "HARBOR_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

impl ConnectionArgs {
    /// Builds a client from the connection arguments.
    pub fn client(&self) -> Result<HarborClient> {
        let url = self
            .url
            .as_deref()
            .context("No Harbor URL given; use --url or HARBOR_URL")?;
        let timeout = Duration::from_secs(self.timeout);

        let mut config = ClientConfig::new(url)
            .with_auth(self.auth())
            .with_timeout(timeout)
            .with_options(
                RequestOptions::default()
                    .with_page_size(self.page_size)
                    .with_timeout(timeout),
            );
        if self.insecure {
            config = config.with_tls(TlsConfig::new().insecure());
        }

        HarborClient::new(config).with_context(|| format!("Failed to create client for {url}"))
    }

    fn auth(&self) -> AuthInfo {
        match (&self.token, &self.username, &self.password) {
            (Some(token), _, _) => AuthInfo::bearer(token),
            (None, Some(username), password) => {
                AuthInfo::basic(username, password.clone().unwrap_or_default())
            }
            _ => AuthInfo::None,
        }
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
