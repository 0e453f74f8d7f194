use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use okcomputer_client::{ChannelReader, Deployment, ReaderConfig};
use okcomputer_transport::{HttpTransport, RpcConfig, DEFAULT_RPC_URL};

use crate::exit::{transport_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod build;
pub mod channels;
pub mod read;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the wallet that owns a token.
    Owner(TokenArgs),
    /// Read the latest messages of a channel.
    Read(ReadArgs),
    /// Read a token's inbox.
    Emails(EmailsArgs),
    /// Show a token's webpage HTML.
    Page(TokenArgs),
    /// Show a token's display name.
    Username(TokenArgs),
    /// Show data stored under a key.
    Data(DataArgs),
    /// Check whether anything is stored under a key.
    HasData(KeyArgs),
    /// Message counts of the public channels.
    Stats,
    /// Owner, name, channel stats and recent board posts for a token.
    Summary(TokenArgs),
    /// Build a transaction posting to a channel.
    Post(PostArgs),
    /// Build a transaction sending a direct message.
    Email(EmailArgs),
    /// Build a transaction setting the display name.
    SetUsername(SetUsernameArgs),
    /// Build a transaction setting the webpage.
    SetPage(SetPageArgs),
    /// Build a transaction storing data under a key.
    StoreData(StoreDataArgs),
    /// Build a transaction removing data under a key.
    RemoveData(KeyArgs),
    /// List well-known channels.
    Channels,
    /// Show version information.
    Version(VersionArgs),
}

/// Connection settings shared by every read command.
#[derive(Args, Debug, Clone)]
pub struct RpcArgs {
    /// JSON-RPC endpoint.
    #[arg(long, global = true, env = "OKCOMPUTER_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,
    /// Request timeout (e.g. 15s, 500ms).
    #[arg(long, global = true, env = "OKCOMPUTER_RPC_TIMEOUT", default_value = "15s")]
    pub rpc_timeout: String,
}

impl RpcArgs {
    pub fn config(&self) -> CliResult<RpcConfig> {
        Ok(RpcConfig {
            timeout: parse_duration(&self.rpc_timeout)?,
            ..RpcConfig::new(self.rpc_url.clone())
        })
    }

    pub fn reader(&self, concurrency: usize) -> CliResult<ChannelReader<HttpTransport>> {
        let transport = HttpTransport::new(self.config()?)
            .map_err(|err| transport_error("failed to create HTTP client", err))?;
        Ok(ChannelReader::with_config(
            transport,
            Deployment::default(),
            ReaderConfig {
                max_concurrency: concurrency,
            },
        ))
    }
}

pub fn run(command: Command, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Owner(args) => read::owner(args, rpc, format),
        Command::Read(args) => read::channel(args, rpc, format),
        Command::Emails(args) => read::emails(args, rpc, format),
        Command::Page(args) => read::page(args, rpc, format),
        Command::Username(args) => read::username(args, rpc, format),
        Command::Data(args) => read::data(args, rpc, format),
        Command::HasData(args) => read::has_data(args, rpc, format),
        Command::Stats => read::stats(rpc, format),
        Command::Summary(args) => read::summary(args, rpc, format),
        Command::Post(args) => build::post(args, format),
        Command::Email(args) => build::email(args, format),
        Command::SetUsername(args) => build::set_username(args, format),
        Command::SetPage(args) => build::set_page(args, format),
        Command::StoreData(args) => build::store_data(args, format),
        Command::RemoveData(args) => build::remove_data(args, format),
        Command::Channels => channels::run(format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Token ID (0-4999).
    #[arg(long, short = 't', env = "OKCOMPUTER_TOKEN_ID")]
    pub token: u64,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Storage key name.
    pub key: String,
    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Channel name (board, gm, ok, suggest, announcement, email_<id>).
    pub channel: String,
    /// Number of most recent messages.
    #[arg(long, short = 'n', default_value = "10")]
    pub count: usize,
    /// Print in ascending index order.
    #[arg(long)]
    pub oldest_first: bool,
    /// Parallel message fetches.
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..=64))]
    pub concurrency: u16,
}

#[derive(Args, Debug)]
pub struct EmailsArgs {
    #[command(flatten)]
    pub token: TokenArgs,
    /// Number of most recent messages.
    #[arg(long, short = 'n', default_value = "10")]
    pub count: usize,
}

#[derive(Args, Debug)]
pub struct DataArgs {
    /// Storage key name.
    pub key: String,
    #[command(flatten)]
    pub token: TokenArgs,
    /// Value printed when nothing is stored.
    #[arg(long, default_value = "")]
    pub default: String,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Channel to post to.
    pub channel: String,
    /// Message text.
    pub text: String,
    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Recipient token ID.
    pub target: u64,
    /// Message text.
    pub text: String,
    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct SetUsernameArgs {
    /// Display name (max 16 characters).
    pub name: String,
    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct SetPageArgs {
    /// Inline HTML.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub html: Option<String>,
    /// Read HTML from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct StoreDataArgs {
    /// Storage key name.
    pub key: String,
    /// Inline value.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub data: Option<String>,
    /// Read value from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    let (number, millis) = match input.strip_suffix("ms") {
        Some(num) => (num, true),
        None => (input.strip_suffix('s').unwrap_or(input), false),
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input:?}")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(if millis {
        Duration::from_millis(value)
    } else {
        Duration::from_secs(value)
    })
}
