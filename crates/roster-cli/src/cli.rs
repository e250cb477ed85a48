//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_client::Url;
use std::path::PathBuf;

/// Browse the company/employee directory
#[derive(Debug, Parser)]
#[command(name = "roster", version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "FILE", env = "ROSTER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides file and ROSTER_BASE_URL)
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html, global = true)]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the page at PATH (e.g. /companies/1 or /employees/2)
    Show {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Search companies and employees
    Search(SearchArgs),
}

#[derive(Debug, Default, Args)]
pub struct SearchArgs {
    /// Free-text query
    #[arg(long)]
    pub q: Option<String>,

    /// Result type: all, companies or employees (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Maximum hits per section
    #[arg(long)]
    pub size: Option<u32>,

    /// ISO country code filter (repeatable)
    #[arg(long = "country", value_name = "CC")]
    pub countries: Vec<String>,

    #[arg(long, value_name = "FIELD")]
    pub sort_by: Option<String>,

    /// asc or desc
    #[arg(long, value_name = "ORDER")]
    pub sort_order: Option<String>,
}

impl SearchArgs {
    /// Query pairs in flag order; values are validated by the search view
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs.extend(self.types.iter().map(|t| ("type", t.clone())));
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs.extend(self.countries.iter().map(|c| ("country", c.clone())));
        if let Some(field) = &self.sort_by {
            pairs.push(("sort_by", field.clone()));
        }
        if let Some(order) = &self.sort_order {
            pairs.push(("sort_order", order.clone()));
        }
        pairs
    }

    /// `/` location carrying the encoded query
    ///
    /// # Errors
    /// Only if URL encoding itself fails
    pub fn location(&self) -> anyhow::Result<String> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return Ok("/".to_string());
        }
        let url = Url::parse_with_params("http://roster.local/", &pairs)?;
        Ok(format!("/?{}", url.query().unwrap_or_default()))
    }
}

impl Command {
    /// Location the command navigates to
    ///
    /// # Errors
    /// Only if URL encoding itself fails
    pub fn location(&self) -> anyhow::Result<String> {
        match self {
            Self::Show { path } => Ok(path.clone()),
            Self::Search(args) => args.location(),
        }
    }
}
