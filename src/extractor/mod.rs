//! Last-message extraction.
//!
//! # Module Structure
//!
//! - `waiter`: wait for the first container selector to match a live page
//! - `cascade`: scan matched containers newest first
//! - `fallback`: heuristic search when no selector matches
//! - `strategy`: the `Strategy` trait and the two built-in strategies
//! - `pipeline`: the `Engine` that runs strategies in order
//!
//! # Usage
//!
//! ```rust
//! use rs_lastmessage::extractor::Engine;
//! use rs_lastmessage::{Options, Page};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rs_lastmessage::Result<()> {
//! let page = Page::new(
//!     "https://www.linkedin.com/messaging/thread/1/",
//!     r#"<li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">See you at ten tomorrow</p></li>"#,
//! );
//! let engine = Engine::new(Options::default())?;
//! assert_eq!(engine.last_message(&page).await, "See you at ten tomorrow");
//! # Ok(())
//! # }
//! ```

pub mod cascade;
pub mod fallback;
pub mod pipeline;
pub mod strategy;
pub mod waiter;

pub use cascade::extract_from_containers;
pub use fallback::{generic_search, RankingPolicy, TextCandidate};
pub use pipeline::Engine;
pub use strategy::{Context, GenericSearch, SelectorCascade, Strategy};
pub use waiter::{wait_for_any, Matches};
