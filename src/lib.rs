//! Schema-driven meetup API server.
//!
//! Exposes the `meetups` query and the `createMeetup` mutation over
//! JSON-RPC 2.0 stdio transport. Operations are resolved by a [`resolver::Resolver`]
//! root that hands out a query and a mutation capability group, both bound to
//! the same storage collaborator.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod resolver;
pub mod schema;
pub mod server;
pub mod store;
