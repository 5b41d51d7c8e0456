use beeline_api::types::{Login, Password};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional path to credentials JSON file
    #[arg(short, long, value_name = "FILE")]
    pub credentials: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the CLI
    Config(ConfigArgs),

    /// Print the balance and data allowance of your account
    Status(StatusArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Your login (phone number without +7)
    #[arg(short, long, value_name = "LOGIN")]
    pub login: Login,

    /// Save the session cookies and reuse them on the next runs
    #[arg(long)]
    pub persist_session: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Your login, defaults to the configured one
    #[arg(value_name = "LOGIN")]
    pub login: Option<Login>,

    /// Your password, asked interactively when omitted. Ignored while a saved session is valid
    #[arg(value_name = "PASSWORD")]
    pub password: Option<Password>,

    /// Save the session cookies and reuse them on the next runs
    #[arg(long)]
    pub persist_session: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
