use anyhow::Context;
use clap::{Args, ValueEnum};
use serde_json::json;

use crate::auth::{JwtKeys, Role};
use crate::cli::OutputFormat;
use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "Email placed in the token subject")]
    pub email: String,

    #[arg(long, value_enum, default_value_t = RoleArg::User, help = "Role to grant")]
    pub role: RoleArg,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let hours = args.hours.unwrap_or(security.jwt_expiry_hours);
    let keys = JwtKeys::from_secret(&security.jwt_secret, hours)
        .context("JWT_SECRET must be set to mint tokens")?;

    let role = Role::from(args.role);
    let token = keys.issue(&args.email, role)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "token": token, "email": args.email, "roles": role.grants(), "expires_in_hours": hours })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
