//! Graph query and aggregation layer.
//!
//! Everything here is read-only over a [`GraphStore`](crate::neo4j::GraphStore):
//!
//! ```text
//! GraphStore ──► normalize ──► GraphNode / GraphEdge
//!      │
//!      ├──► traversal ──► Subgraph (center first, deduplicated)
//!      │
//!      └──► coupling ──► CouplingMatrix ──► CouplingRow / CouplingTable
//! ```
//!
//! ## Modules
//!
//! - [`models`]: wire shapes
//! - [`normalize`]: stored record → wire record, defaults filled
//! - [`traversal`]: bounded-depth neighborhood assembly
//! - [`coupling`]: cross-cluster coupling analytics
//! - [`engine`]: `GraphService`, the entry point for handlers
//! - [`error`]: `GraphError`

pub mod coupling;
pub mod engine;
pub mod error;
pub mod models;
pub mod normalize;
pub mod traversal;

pub use engine::GraphService;
pub use error::GraphError;
pub use models::*;
pub use traversal::TraversalDepth;
