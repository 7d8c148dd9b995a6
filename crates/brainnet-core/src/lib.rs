//! Brainnet core types
//!
//! Shared vocabulary for the conversion pipeline:
//! - `region`: the fixed 100-node atlas partition into seven networks
//! - `graph`: one subject's connectivity graph for a single time bucket
//!
//! Ingestion (`brainnet-ingest-edgelist`) builds these graphs and the GEXF
//! codec (`brainnet-gexf`) serializes them; neither owns the model.

pub mod graph;
pub mod region;

pub use graph::{BrainGraph, Edge, GraphError, Node, NodeId};
pub use region::{classify, InvalidNodeError, ParseRegionError, Region, MAX_NODE, MIN_NODE};
