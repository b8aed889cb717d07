use clap::{value_parser, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod commands;

/// The main Vireo CLI interface
#[derive(Debug, Parser)]
#[command(author, version, about = "Vireo", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(long, short, global = true, default_value_t = 2, value_parser = value_parser!(u8).range(..=4))]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }

    /// Log filter: `RUST_LOG` directives followed by the verbosity of the vireo crates
    pub fn log_filter(&self) -> String {
        match std::env::var("RUST_LOG") {
            Ok(val) if !val.is_empty() => format!("{val},vireo={}", self.get_log_level()),
            _ => format!("vireo={}", self.get_log_level()),
        }
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the smart account address
    #[command(name = "address")]
    Address(commands::AddressCommand),

    /// Send native currency from the smart account
    #[command(name = "transfer")]
    Transfer(commands::TransferCommand),

    /// Deploy an ERC-20 token through the token factory (sponsored)
    #[command(name = "create-token")]
    CreateToken(commands::CreateTokenCommand),

    /// Enable a validation module on the smart account (sponsored)
    #[command(name = "enable-module")]
    EnableModule(commands::EnableModuleCommand),

    /// Deploy an ERC-20 token with a signature checked by another validation module
    #[command(name = "use-new-module")]
    UseNewModule(Box<commands::UseNewModuleCommand>),
}

pub fn run() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(cli.log_filter())).init();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(async move {
        match cli.command {
            Commands::Address(command) => command.execute().await,
            Commands::Transfer(command) => command.execute().await,
            Commands::CreateToken(command) => command.execute().await,
            Commands::EnableModule(command) => command.execute().await,
            Commands::UseNewModule(command) => command.execute().await,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn verbosity_levels() {
        let cli = Cli::try_parse_from(vec!["vireo", "address", "--private-key", KEY]).unwrap();
        assert_eq!(cli.get_log_level(), "info");

        let cli = Cli::try_parse_from(vec!["vireo", "-v", "4", "address", "--private-key", KEY])
            .unwrap();
        assert_eq!(cli.get_log_level(), "trace");

        assert!(Cli::try_parse_from(vec!["vireo", "-v", "5", "address", "--private-key", KEY])
            .is_err());
    }

    #[test]
    fn subcommands() {
        let cli =
            Cli::try_parse_from(vec!["vireo", "enable-module", "--private-key", KEY]).unwrap();
        assert!(matches!(cli.command, Commands::EnableModule(_)));

        assert!(Cli::try_parse_from(vec!["vireo", "bundle"]).is_err());
    }
}
