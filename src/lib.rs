//! instance-flavor-check - PAYG / BYOS detection for cloud instances
//!
//! This library gathers local evidence about a running instance, asks the
//! update server it is registered with whether the instance is billed through
//! the marketplace, and falls back to the last known answer when no server can
//! be reached.

pub mod address;
pub mod cache;
pub mod cli;
pub mod command;
pub mod config;
pub mod decision;
pub mod evidence;
pub mod flavor;
pub mod logging;
pub mod proxy;
pub mod query;
pub mod reachability;
