//! GEXF serialization for Brainnet graphs
//!
//! Writes GEXF 1.2draft documents that standard graph tools (Gephi,
//! NetworkX `read_gexf`) open directly:
//! - graph: `defaultedgetype="undirected" mode="static"`
//! - one static node attribute, `area` (string), id `"0"`
//! - node `id` and `label` are both the atlas id
//! - edge `weight` uses the native GEXF edge weight
//!
//! `reader` parses that subset back into a [`BrainGraph`].

pub mod reader;
pub mod writer;

use brainnet_core::{GraphError, NodeId, ParseRegionError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use reader::{read_gexf, read_gexf_file};
pub use writer::{write_gexf, write_gexf_file, write_gexf_with_meta, GexfMeta};

pub const GEXF_NAMESPACE: &str = "http://www.gexf.net/1.2draft";
pub const GEXF_VERSION: &str = "1.2";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const GEXF_SCHEMA_LOCATION: &str =
    "http://www.gexf.net/1.2draft http://www.gexf.net/1.2draft/gexf.xsd";

/// Attribute id declared for the node `area` column.
pub const AREA_ATTRIBUTE_ID: &str = "0";
pub const AREA_ATTRIBUTE_TITLE: &str = "area";

#[derive(Debug, Error)]
pub enum GexfError {
    #[error("I/O error on {}: {source}", path.display())]
    File { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("<{element}> is missing attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("invalid {attribute} `{value}`")]
    InvalidValue {
        attribute: &'static str,
        value: String,
    },
    #[error("node {node} has no area attribute value")]
    MissingArea { node: NodeId },
    #[error(transparent)]
    Region(#[from] ParseRegionError),
    #[error("unsupported edge type `{0}` (expected undirected)")]
    EdgeType(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
