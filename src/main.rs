//! nais-agent CLI binary entry point.

use nais_agent::cli::{commands, Cli, Commands};
use nais_agent::config::AgentConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let result = match AgentConfig::load(cli.config.as_deref()) {
        Ok(config) => match &cli.command {
            Commands::Tools(args) => commands::handle_tools(&config, args),
            Commands::Validate(args) => match commands::handle_validate(args) {
                Ok(true) => Ok(()),
                Ok(false) => std::process::exit(2),
                Err(e) => Err(e),
            },
            Commands::Call(args) => commands::handle_call(&config, args).await,
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
