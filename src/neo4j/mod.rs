//! Neo4j client and stored-record models for the property graph

pub mod client;
mod impl_graph_store;
pub mod models;
pub mod traits;

pub use client::Neo4jClient;
pub use models::*;
pub use traits::{DisconnectedGraphStore, GraphStore};

#[cfg(test)]
pub(crate) mod mock;
