use gh_actions_output::{commands, EnvFileSink};
use gh_client::OctocrabClient;
use gh_pr_action::{ActionError, Outcome};
use gh_pr_config::ActionConfig;
use log::{debug, error, info};
use std::process::ExitCode;

mod logger;

const BANNER: &str = "####################################################";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Before the logger so RUST_LOG from .env is honoured
    let dotenv = dotenvy::dotenv();
    logger::init();

    match dotenv {
        Ok(path) => debug!("Loaded .env file from: {:?}", path),
        Err(_) => debug!(".env file not found, will rely on environment variables"),
    }

    info!("{}", BANNER);
    info!("# START gh-pr-action v{}", env!("CARGO_PKG_VERSION"));
    info!("{}", BANNER);

    let code = match run().await {
        Ok(outcome) => {
            info!("Finished: {}", outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            commands::error(&err);
            ExitCode::FAILURE
        }
    };

    info!("{}", BANNER);
    info!("# END gh-pr-action");
    info!("{}", BANNER);

    code
}

async fn run() -> Result<Outcome, ActionError> {
    let config = ActionConfig::from_env()?;
    debug!("Configuration: {:?}", config);

    let client = OctocrabClient::connect(
        &config.api.url,
        &config.api.token,
        &config.api.owner,
        &config.api.repo,
    )
    .map_err(ActionError::Client)?;

    let mut outputs = EnvFileSink::from_env();
    gh_pr_action::run(&config, &client, &mut outputs).await
}
