//! Device registry, reconciliation, ledger persistence and support modules.

pub mod config;
pub mod feed;
pub mod history;
pub mod ledger;
pub mod ledger_pg;
pub mod link;
pub mod logger;
pub mod reconciler;
pub mod registry;
pub mod stats;
