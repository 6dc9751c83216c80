use clap::Parser;
use hospital_crm_server::{init_process_logging, run, ServerConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    if let Err(err) = init_process_logging(&config) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_start module=server status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
