//! Parse the GEXF subset produced by `writer` (and by NetworkX for graphs
//! with the same attributes).
//!
//! Elements outside `attributes`, `node`, `attvalue`, `edge` and `graph` are
//! skipped. Edges without a `weight` get the GEXF default of 1.0.

use crate::{GexfError, AREA_ATTRIBUTE_TITLE};
use brainnet_core::{BrainGraph, NodeId, Region};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, GexfError> {
    for a in e.attributes() {
        let a = a.map_err(quick_xml::Error::from)?;
        if a.key.as_ref() == name.as_bytes() {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn required(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, GexfError> {
    attr(e, attribute)?.ok_or(GexfError::MissingAttribute { element, attribute })
}

fn node_id(value: String, attribute: &'static str) -> Result<NodeId, GexfError> {
    value
        .parse::<NodeId>()
        .map_err(|_| GexfError::InvalidValue { attribute, value })
}

struct PendingNode {
    id: NodeId,
    area: Option<Region>,
}

fn finish_node(graph: &mut BrainGraph, pending: Option<PendingNode>) -> Result<(), GexfError> {
    if let Some(node) = pending {
        let area = node.area.ok_or(GexfError::MissingArea { node: node.id })?;
        graph.add_node(node.id, area);
    }
    Ok(())
}

pub fn read_gexf(text: &str) -> Result<BrainGraph, GexfError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut graph = BrainGraph::new();
    let mut in_node_attributes = false;
    let mut area_attribute: Option<String> = None;
    let mut pending: Option<PendingNode> = None;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"graph" => {
                        if let Some(kind) = attr(e, "defaultedgetype")? {
                            if kind != "undirected" {
                                return Err(GexfError::EdgeType(kind));
                            }
                        }
                    }
                    b"attributes" => {
                        in_node_attributes = !empty && attr(e, "class")?.as_deref() == Some("node");
                    }
                    b"attribute" if in_node_attributes => {
                        if attr(e, "title")?.as_deref() == Some(AREA_ATTRIBUTE_TITLE) {
                            area_attribute = Some(required(e, "attribute", "id")?);
                        }
                    }
                    b"node" => {
                        let id = node_id(required(e, "node", "id")?, "node id")?;
                        pending = Some(PendingNode { id, area: None });
                        if empty {
                            finish_node(&mut graph, pending.take())?;
                        }
                    }
                    b"attvalue" => {
                        if let Some(node) = pending.as_mut() {
                            let key = required(e, "attvalue", "for")?;
                            if area_attribute.as_deref() == Some(key.as_str()) {
                                node.area = Some(required(e, "attvalue", "value")?.parse::<Region>()?);
                            }
                        }
                    }
                    b"edge" => {
                        let source = node_id(required(e, "edge", "source")?, "edge source")?;
                        let target = node_id(required(e, "edge", "target")?, "edge target")?;
                        let weight = match attr(e, "weight")? {
                            Some(value) => value.parse::<f64>().map_err(|_| GexfError::InvalidValue {
                                attribute: "edge weight",
                                value,
                            })?,
                            None => 1.0,
                        };
                        graph.add_edge(source, target, weight)?;
                    }
                    _ => {}
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"attributes" => in_node_attributes = false,
                b"node" => finish_node(&mut graph, pending.take())?,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(graph)
}

pub fn read_gexf_file(path: &Path) -> Result<BrainGraph, GexfError> {
    let text = fs::read_to_string(path).map_err(|source| GexfError::File {
        path: path.to_path_buf(),
        source,
    })?;
    read_gexf(&text)
}
