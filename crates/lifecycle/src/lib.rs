//! Runtime lifecycle resolution.
//!
//! Joins the curated catalog with the plugins installed on this machine,
//! derives install/update state per plugin, ranks plugins against a query,
//! and turns a chosen action into a request for the host to carry out.
//! Everything except [`Handler::init`] and [`installed::discover`] is pure.

pub mod actions;
pub mod cache;
pub mod display;
pub mod error;
pub mod handler;
pub mod installed;
pub mod pair;
pub mod ranker;
pub mod resolver;

pub use {
    actions::{ActionExecutor, ActionRequest, PluginAction, available_actions, dispatch},
    cache::{MemoryCache, PairCache},
    error::{Error, Result},
    handler::{ActionType, Handler},
    pair::Pair,
    ranker::QueryRanker,
    resolver::LifecycleResolver,
};
