use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sitegrab",
    version,
    about = "Extract elements from a web page and save them to a file"
)]
#[command(group(ArgGroup::new("query").required(true).args(["selector", "xpath"])))]
pub struct Args {
    /// Target page URL; also the base for relative link resolution
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// CSS selector to extract (e.g. "a.article")
    #[arg(long, value_name = "SELECTOR")]
    pub selector: Option<String>,

    /// XPath expression to extract
    #[arg(long, value_name = "EXPR")]
    pub xpath: Option<String>,

    /// Attribute to extract (e.g. href, src, data-id)
    #[arg(long, value_name = "NAME")]
    pub attr: Option<String>,

    /// Also extract element text content
    #[arg(long)]
    pub text: bool,

    /// Render the page in a headless browser before extracting
    #[arg(long)]
    pub headless: bool,

    /// Impersonate a Chrome TLS fingerprint for plain HTTP fetches
    #[arg(long)]
    pub impersonate: bool,

    /// Output file; a .json extension selects JSON, anything else CSV
    #[arg(long, default_value = "results.csv", value_name = "FILE")]
    pub output: PathBuf,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = 20, value_name = "SECS")]
    pub timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,

    /// Also write logs to daily-rolling files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<String>,
}
