//! Roster CLI - render directory pages in the terminal
//!
//! `roster show /companies/1` navigates to the page, waits for its single read
//! to settle and prints the result as HTML or plain text. `roster search`
//! builds the `/` location from flags and behaves the same way.
//!
//! Exit codes: 0 when the page loaded, 1 for an error or unknown page, 2 for a
//! configuration problem.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;

pub use cli::{Cli, Command, OutputFormat, SearchArgs};

use anyhow::Context;
use roster_client::{ClientConfig, ConfigError, HttpRecordSource};
use roster_view::{App, Phase};
use std::io::Write;
use std::sync::Arc;

pub const EXIT_LOADED: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

/// Effective client configuration: defaults, file, environment, then flags
///
/// # Errors
/// - `ConfigError` if the file cannot be read or a value is invalid
pub fn client_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config = config.with_timeout_secs(timeout_secs);
    }
    config.validate()?;
    Ok(config)
}

/// Render the requested page into `out` and report the phase it settled in
///
/// # Errors
/// - `ConfigError` (wrapped) for configuration problems
/// - I/O errors writing the output
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<Phase> {
    let config = client_config(cli)?;
    tracing::debug!("Using API root {}", config.api_root());

    let source = HttpRecordSource::new(&config)?;
    let mut app = App::new(Arc::new(source));
    let location = cli.command.location()?;

    if let Some(fetch) = app.navigate(&location) {
        let settlement = fetch.settled().await;
        tracing::debug!(?settlement, "{} settled", location);
    }

    let markup = app.render();
    let rendered = match cli.format {
        OutputFormat::Html => markup.to_html(),
        OutputFormat::Text => markup.to_text(),
    };
    out.write_all(rendered.as_bytes())
        .context("failed to write output")?;
    out.flush().context("failed to write output")?;

    Ok(app.phase().unwrap_or(Phase::Error))
}

/// Process exit code for the result of [`run`]
#[must_use]
pub fn exit_code(result: &anyhow::Result<Phase>) -> i32 {
    match result {
        Ok(Phase::Loaded) => EXIT_LOADED,
        Ok(Phase::Loading | Phase::Error) => EXIT_FAILED,
        Err(err) if err.downcast_ref::<ConfigError>().is_some() => EXIT_CONFIG,
        Err(_) => EXIT_FAILED,
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
