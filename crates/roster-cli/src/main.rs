//! `roster` binary: parse flags, set up logging, render one page

use clap::Parser;
use roster_cli::{exit_code, run, Cli};
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut stdout = std::io::stdout().lock();
    let result = run(&cli, &mut stdout).await;
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
    }
    std::process::exit(exit_code(&result));
}
