//! Issue a member access token with the configured JWT settings.
//!
//! Reads the same `DIARY_*` settings as the server, so a token printed here
//! is accepted by a server sharing that configuration.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use backend::domain::ports::MemberTokenCodec;
use backend::outbound::token::JwtHandler;
use backend::settings::AppSettings;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;

/// `issue-token` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "issue-token",
    about = "Print a signed access token for a member",
    version
)]
struct CliArgs {
    /// Member the token authenticates.
    #[arg(long = "member-id", value_name = "id")]
    member_id: i64,
    /// Lifetime override; defaults to `DIARY_ACCESS_TOKEN_TTL_SECONDS`.
    #[arg(long = "ttl-seconds", value_name = "seconds")]
    ttl_seconds: Option<u64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    // Settings come from the environment and config files only; the command
    // line belongs to this tool.
    let settings = AppSettings::load_from_iter([OsString::from("issue-token")])
        .wrap_err("failed to load settings")?;
    let handler = JwtHandler::new(&settings.jwt_properties()?).wrap_err("invalid JWT settings")?;
    let ttl = args
        .ttl_seconds
        .unwrap_or_else(|| settings.access_token_ttl_seconds());

    let token = handler
        .create_token(args.member_id, ttl, DefaultClock.utc())
        .wrap_err_with(|| format!("cannot issue a token for member {}", args.member_id))?;
    println!("{token}");
    Ok(())
}
