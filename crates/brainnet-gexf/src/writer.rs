use crate::{
    GexfError, AREA_ATTRIBUTE_ID, AREA_ATTRIBUTE_TITLE, GEXF_NAMESPACE, GEXF_SCHEMA_LOCATION,
    GEXF_VERSION, XSI_NAMESPACE,
};
use brainnet_core::BrainGraph;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Document-level `<meta>` content.
#[derive(Debug, Clone)]
pub struct GexfMeta {
    pub creator: String,
    pub last_modified: NaiveDate,
}

impl Default for GexfMeta {
    fn default() -> Self {
        Self {
            creator: format!("brainnet {}", env!("CARGO_PKG_VERSION")),
            last_modified: chrono::Utc::now().date_naive(),
        }
    }
}

// xsd:double spelling; Rust prints infinities as `inf`.
fn format_weight(weight: f64) -> String {
    if weight == f64::INFINITY {
        "INF".to_string()
    } else if weight == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{weight:?}")
    }
}

/// Serialize with today's date and the default creator.
pub fn write_gexf<W: Write>(graph: &BrainGraph, out: W) -> Result<(), GexfError> {
    write_gexf_with_meta(graph, &GexfMeta::default(), out)
}

pub fn write_gexf_with_meta<W: Write>(
    graph: &BrainGraph,
    meta: &GexfMeta,
    out: W,
) -> Result<(), GexfError> {
    let mut w = Writer::new_with_indent(out, b' ', 2);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.write_event(Event::Start(BytesStart::new("gexf").with_attributes([
        ("xmlns", GEXF_NAMESPACE),
        ("xmlns:xsi", XSI_NAMESPACE),
        ("xsi:schemaLocation", GEXF_SCHEMA_LOCATION),
        ("version", GEXF_VERSION),
    ])))?;

    let date = meta.last_modified.format("%Y-%m-%d").to_string();
    w.write_event(Event::Start(
        BytesStart::new("meta").with_attributes([("lastmodifieddate", date.as_str())]),
    ))?;
    w.write_event(Event::Start(BytesStart::new("creator")))?;
    w.write_event(Event::Text(BytesText::new(&meta.creator)))?;
    w.write_event(Event::End(BytesEnd::new("creator")))?;
    w.write_event(Event::End(BytesEnd::new("meta")))?;

    w.write_event(Event::Start(BytesStart::new("graph").with_attributes([
        ("defaultedgetype", "undirected"),
        ("mode", "static"),
        ("name", ""),
    ])))?;

    w.write_event(Event::Start(
        BytesStart::new("attributes").with_attributes([("mode", "static"), ("class", "node")]),
    ))?;
    w.write_event(Event::Empty(BytesStart::new("attribute").with_attributes([
        ("id", AREA_ATTRIBUTE_ID),
        ("title", AREA_ATTRIBUTE_TITLE),
        ("type", "string"),
    ])))?;
    w.write_event(Event::End(BytesEnd::new("attributes")))?;

    w.write_event(Event::Start(BytesStart::new("nodes")))?;
    for node in graph.nodes() {
        let id = node.id.to_string();
        w.write_event(Event::Start(
            BytesStart::new("node").with_attributes([("id", id.as_str()), ("label", id.as_str())]),
        ))?;
        w.write_event(Event::Start(BytesStart::new("attvalues")))?;
        w.write_event(Event::Empty(BytesStart::new("attvalue").with_attributes([
            ("for", AREA_ATTRIBUTE_ID),
            ("value", node.area.as_str()),
        ])))?;
        w.write_event(Event::End(BytesEnd::new("attvalues")))?;
        w.write_event(Event::End(BytesEnd::new("node")))?;
    }
    w.write_event(Event::End(BytesEnd::new("nodes")))?;

    w.write_event(Event::Start(BytesStart::new("edges")))?;
    for (idx, edge) in graph.edges().enumerate() {
        let id = idx.to_string();
        let source = edge.source.to_string();
        let target = edge.target.to_string();
        let weight = format_weight(edge.weight);
        w.write_event(Event::Empty(BytesStart::new("edge").with_attributes([
            ("source", source.as_str()),
            ("target", target.as_str()),
            ("id", id.as_str()),
            ("weight", weight.as_str()),
        ])))?;
    }
    w.write_event(Event::End(BytesEnd::new("edges")))?;

    w.write_event(Event::End(BytesEnd::new("graph")))?;
    w.write_event(Event::End(BytesEnd::new("gexf")))?;

    let mut out = w.into_inner();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Create (or overwrite) `path` and write the graph to it.
pub fn write_gexf_file(graph: &BrainGraph, path: &Path) -> Result<(), GexfError> {
    let file = File::create(path).map_err(|source| GexfError::File {
        path: path.to_path_buf(),
        source,
    })?;
    write_gexf(graph, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainnet_core::Region;

    fn render(graph: &BrainGraph) -> String {
        let meta = GexfMeta {
            creator: "test".to_string(),
            last_modified: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let mut buf = Vec::new();
        write_gexf_with_meta(graph, &meta, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_meta() {
        let xml = render(&BrainGraph::new());
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#), "{xml}");
        assert!(xml.contains(r#"xmlns="http://www.gexf.net/1.2draft""#));
        assert!(xml.contains(r#"lastmodifieddate="2024-03-01""#));
        assert!(xml.contains("<creator>test</creator>"));
        assert!(xml.contains(r#"defaultedgetype="undirected""#));
        assert!(xml.contains(r#"<attribute id="0" title="area" type="string"/>"#));
    }

    #[test]
    fn writes_nodes_and_weighted_edges() {
        let mut g = BrainGraph::new();
        g.add_node(3, Region::Vis);
        g.add_node(12, Region::Somot);
        g.add_edge(3, 12, 1.0).unwrap();

        let xml = render(&g);
        assert!(xml.contains(r#"<node id="3" label="3">"#), "{xml}");
        assert!(xml.contains(r#"<attvalue for="0" value="somot"/>"#));
        assert!(xml.contains(r#"<edge source="3" target="12" id="0" weight="1.0"/>"#));
    }

    #[test]
    fn weight_spelling() {
        assert_eq!(format_weight(0.75), "0.75");
        assert_eq!(format_weight(f64::INFINITY), "INF");
        assert_eq!(format_weight(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_weight(f64::NAN), "NaN");
    }
}
