use anyhow::Context;
use clap::Parser;
use freedom_audit::api::{self, Cli, Command};
use freedom_audit::core::score_lead;
use freedom_audit::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Command::Serve { port } => {
            api::run_http_server(port)
                .await
                .with_context(|| format!("server error on port {port}"))?;
        }
        Command::Audit(args) => {
            tracing::debug!(?args, "running audit");
            let request = api::build_audit_request(args)?;
            let response = api::build_audit_response(&request);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Score(args) => {
            tracing::debug!(?args, "scoring lead");
            let inputs = api::build_scoring_inputs(args)?;
            println!("{}", serde_json::to_string_pretty(&score_lead(&inputs))?);
        }
    }

    Ok(())
}
