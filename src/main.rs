mod client;
mod creative;
mod error;
mod params;
mod printer;
mod utils;

use client::{ApiError, CreativesApi, RealTimeBiddingClient, DEFAULT_ENDPOINT};
use creative::VideoCreativeRequest;
use error::{Error, Result};
use params::ParamValues;

use clap::{CommandFactory, FromArgMatches};
use eyre::WrapErr;
use std::io::{self, Write};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Create a video creative for an Authorized Buyers account.
#[derive(clap::Parser, Debug)]
#[command(name = "create_video_creative", author, version, about, long_about = None)]
struct CliArguments {
    /// OAuth2 access token authorized for the realtime-bidding scope
    #[clap(long, env = "RTB_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Real-time Bidding API base URL (protocol://host[:port]/[path])
    #[clap(long, env = "RTB_API_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[clap(
        long,
        env = "RTB_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

fn command() -> clap::Command {
    params::register(CliArguments::command())
}

async fn run<C, W>(client: &C, request: &VideoCreativeRequest, out: W) -> Result<()>
where
    C: CreativesApi + ?Sized,
    W: Write,
{
    log::info!(
        "Creating video creative for buyer account '{}'",
        request.parent
    );
    log::debug!("creative {:?}", request.creative);

    let created = client
        .create_creative(&request.parent, &request.creative)
        .await?;
    printer::print_creative(&created, out)?;

    Ok(())
}

fn report(err: Error) -> eyre::Report {
    let context = match &err {
        Error::Api(ApiError::Server { .. }) => "The following server error occurred",
        Error::Api(ApiError::Client { .. }) => "Invalid client request",
        Error::Api(ApiError::Authorization { .. }) => "Authorization error occurred",
        Error::MissingAccessToken => "Unable to create service, was an access token provided?",
        Error::Setup(_) => "Unable to create service",
        Error::MissingParameter(_)
        | Error::InvalidParameter { .. }
        | Error::CreativeIdTooLong(_) => "Invalid input",
        _ => "Unable to create creative",
    };
    eyre::Report::new(err).wrap_err(context)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    // Values from .env fill in anything not already set in the environment
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let matches = command().get_matches();
    let args = CliArguments::from_arg_matches(&matches).wrap_err("Invalid arguments")?;

    let request = ParamValues::from_matches(&matches)
        .and_then(|values| VideoCreativeRequest::from_values(&values))
        .map_err(report)?;

    let client = RealTimeBiddingClient::new(
        &args.endpoint,
        args.access_token.as_deref(),
        Duration::from_secs(args.timeout),
    )
    .map_err(report)?;

    run(&client, &request, io::stdout()).await.map_err(report)
}
