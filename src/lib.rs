//! Extract structured records from a single web page.
//!
//! The pipeline is a strict sequence: fetch the page ([`fetch`]), match
//! nodes with a CSS selector or XPath expression ([`query`]), flatten each
//! match into a record ([`record`]), and write the batch to a `.json` or
//! tabular file ([`output`]). One page per invocation; no crawling.

pub mod cli;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod query;
pub mod record;

use crate::cli::Args;
use crate::error::Result;
use crate::fetch::{BrowserSource, HttpSource, PageSource};
use crate::output::{write_records, WriteReport};
use crate::query::{QueryStrategy, SelectorQuery, XpathQuery};
use crate::record::{build_records, ExtractOptions};
use std::time::Duration;
use url::Url;

/// Runs the whole pipeline for one invocation. Fetch and parse failures
/// short-circuit before any output is written; zero matches is a success.
pub async fn run(args: Args) -> Result<()> {
    // The target URL doubles as the base for relative link resolution.
    let base_url = Url::parse(&args.url)?;

    let source: Box<dyn PageSource> = if args.headless {
        crate::log_info!("[main] Using browser-rendered fetch");
        Box::new(BrowserSource::new(Duration::from_secs(args.timeout)))
    } else {
        let http = HttpSource::builder()
            .timeout(Duration::from_secs(args.timeout))
            .header(
                "user-agent",
                concat!("sitegrab/", env!("CARGO_PKG_VERSION")),
            )?
            .chrome_impersonation(args.impersonate)
            .build()?;
        Box::new(http)
    };

    crate::log_info!("[main] Fetching {}", args.url);
    let markup = source.fetch(base_url.as_str()).await?;
    crate::log_info!("[main] Received {} bytes of markup", markup.len());

    let (strategy, query): (Box<dyn QueryStrategy>, &str) =
        match (args.selector.as_deref(), args.xpath.as_deref()) {
            (Some(query), None) => (Box::new(SelectorQuery), query),
            (None, Some(query)) => (Box::new(XpathQuery), query),
            _ => unreachable!("clap enforces exactly one of --selector/--xpath"),
        };

    let nodes = strategy.matches(&markup, query)?;
    crate::log_info!("[main] Query matched {} node(s)", nodes.len());

    let records = build_records(
        nodes,
        &ExtractOptions {
            attribute: args.attr.clone(),
            text: args.text,
            base_url: Some(base_url),
        },
    );

    match write_records(&records, &args.output)? {
        WriteReport::NoItems => crate::log_info!("No items to write."),
        WriteReport::Written(count) => {
            crate::log_info!("Wrote {} items to {}", count, args.output.display())
        }
    }

    Ok(())
}
