//! snub: a high-throughput recursive file-search engine.
//!
//! ```text
//!                    ┌─────────────┐
//!                    │   cli/embed  │  criteria builder
//!                    └──────┬──────┘
//!                           │ SearchCriteria
//!                           ▼
//!                    ┌─────────────┐
//!                    │   session   │  validates, owns pool + sink
//!                    └──────┬──────┘
//!                           │
//!              ┌────────────┼────────────┐
//!              ▼            ▼            ▼
//!         ┌────────┐   ┌─────────┐  ┌──────────┐
//!         │  pool  │◄──┤traversal├─►│predicate │
//!         └────────┘   └────┬────┘  └────┬─────┘
//!                           │            │
//!                      platform/      pattern
//!                      dir_iter
//!                           │
//!                           ▼
//!                      ┌────────┐
//!                      │  sink  │  append-only match collector
//!                      └────────┘
//! ```
//!
//! The public entry point is [`session::search`]; everything else is a
//! supporting module an embedder can also use piecemeal (e.g. `pattern` and
//! `predicate` standalone, without running a full traversal).

pub mod cli;
pub mod error;
pub mod output;
pub mod pattern;
pub mod platform;
pub mod pool;
pub mod predicate;
pub mod session;
pub mod sink;
pub mod traversal;
pub mod types;
