//! One data line of an edge-list file: `node1 node2 time weight`.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

pub const FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub node1: i64,
    pub node2: i64,
    pub time: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected {FIELD_COUNT} fields (node1 node2 time weight), found {found}")]
    FieldCount { found: usize },
    #[error("invalid {field} `{value}`: {source}")]
    Int {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },
    #[error("invalid weight `{value}`: {source}")]
    Weight {
        value: String,
        source: ParseFloatError,
    },
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, RecordError> {
    value.parse::<i64>().map_err(|source| RecordError::Int {
        field,
        value: value.to_string(),
        source,
    })
}

/// Parse a whitespace-delimited data line.
pub fn parse_record(line: &str) -> Result<EdgeRecord, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [node1, node2, time, weight] = fields[..] else {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    };

    Ok(EdgeRecord {
        node1: parse_int("node1", node1)?,
        node2: parse_int("node2", node2)?,
        time: parse_int("time", time)?,
        weight: weight.parse::<f64>().map_err(|source| RecordError::Weight {
            value: weight.to_string(),
            source,
        })?,
    })
}
