//! Reads a conversation page's HTML from stdin and prints the relay's JSON
//! response to stdout.
//!
//! Usage: `extract_stdin [url]`. The page is opened as the active tab at
//! `url` (default `https://www.linkedin.com/messaging/`), so addresses
//! outside the messaging section produce an empty response. Logs go to
//! stderr and honour `RUST_LOG`.

use std::io::{self, Read};
use std::process::ExitCode;

use rs_lastmessage::relay::local::LocalBrowser;
use rs_lastmessage::relay::{Relay, RelayOptions};
use rs_lastmessage::{Options, Page, Request};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_URL: &str = "https://www.linkedin.com/messaging/";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .init();

    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    // Static input never re-renders, so waiting only delays the fallback.
    let options = Options {
        container_wait_ms: 0,
        fallback_grace_ms: 0,
        ..Options::default()
    };
    let browser = LocalBrowser::new(options);
    browser.open(Page::from_bytes(url, &html));

    let relay = match Relay::new(browser, RelayOptions::default()) {
        Ok(relay) => relay,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match relay.handle(&Request::FetchLastMessage).await {
        Some(Ok(response)) => {
            println!("{}", serde_json::to_string(&response).unwrap_or_default());
            ExitCode::SUCCESS
        }
        Some(Err(err)) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        None => ExitCode::FAILURE,
    }
}
