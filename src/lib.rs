//! Library entry for the in-place translator exposing core logic for the binary and integration tests.

pub mod config;
pub mod controller;
pub mod dom;
pub mod inventory;
pub mod logging;
pub mod prefs;
pub mod proxy;
pub mod resolver;
pub mod rewriter;
