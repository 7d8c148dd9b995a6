//! Edge-list ingestion for Brainnet
//!
//! Reads one subject's connectivity recording and splits it into one graph
//! per time bucket:
//! - the first line is a header and is skipped unread
//! - every other non-blank line is `node1 node2 time weight`
//! - `time` (1..=8) selects the bucket
//! - the first record for a node pair in a bucket wins; repeats are dropped
//!
//! Every failure is fatal for the whole file.

pub mod record;

use brainnet_core::{classify, BrainGraph, GraphError, InvalidNodeError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use record::{parse_record, EdgeRecord, RecordError};

/// Number of time buckets per subject recording.
pub const TIME_BUCKETS: usize = 8;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read line {line}: {source}")]
    Read { line: usize, source: io::Error },
    #[error("line {line}: {source}")]
    Parse { line: usize, source: RecordError },
    #[error("line {line}: time {time} outside 1..={TIME_BUCKETS}")]
    TimeRange { line: usize, time: i64 },
    #[error("line {line}: {source}")]
    InvalidNode {
        line: usize,
        source: InvalidNodeError,
    },
    /// Not produced by well-formed loading: the pair is checked and both
    /// endpoints are inserted before the edge is added.
    #[error("line {line}: {source}")]
    Graph { line: usize, source: GraphError },
}

/// Counters collected while loading one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data lines parsed (header and blank lines excluded).
    pub records: usize,
    /// Records dropped because their bucket already had that node pair.
    pub duplicates: usize,
}

/// The eight per-bucket graphs of one subject.
#[derive(Debug, Clone)]
pub struct SubjectGraphs {
    graphs: [BrainGraph; TIME_BUCKETS],
    pub stats: LoadStats,
}

impl Default for SubjectGraphs {
    fn default() -> Self {
        Self {
            graphs: std::array::from_fn(|_| BrainGraph::new()),
            stats: LoadStats::default(),
        }
    }
}

impl SubjectGraphs {
    /// Graph for a 1-based time bucket.
    pub fn bucket(&self, time: usize) -> Option<&BrainGraph> {
        time.checked_sub(1).and_then(|idx| self.graphs.get(idx))
    }

    /// `(time, graph)` pairs, time starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BrainGraph)> {
        self.graphs.iter().enumerate().map(|(idx, g)| (idx + 1, g))
    }

    fn insert(&mut self, line: usize, rec: &EdgeRecord) -> Result<(), LoadError> {
        let graph = usize::try_from(rec.time)
            .ok()
            .and_then(|t| t.checked_sub(1))
            .and_then(|idx| self.graphs.get_mut(idx))
            .ok_or(LoadError::TimeRange {
                line,
                time: rec.time,
            })?;

        if graph.has_edge(rec.node1, rec.node2) {
            self.stats.duplicates += 1;
            return Ok(());
        }

        for node in [rec.node1, rec.node2] {
            let area = classify(node).map_err(|source| LoadError::InvalidNode { line, source })?;
            graph.add_node(node, area);
        }
        graph
            .add_edge(rec.node1, rec.node2, rec.weight)
            .map_err(|source| LoadError::Graph { line, source })
    }
}

/// Load a subject recording from any buffered reader.
pub fn load_subject_graphs<R: BufRead>(mut reader: R) -> Result<SubjectGraphs, LoadError> {
    let mut subject = SubjectGraphs::default();
    // The header is consumed as raw bytes; its encoding is never checked.
    reader
        .read_until(b'\n', &mut Vec::new())
        .map_err(|source| LoadError::Read { line: 1, source })?;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 2;
        let line = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let rec = parse_record(&line).map_err(|source| LoadError::Parse {
            line: line_no,
            source,
        })?;
        subject.stats.records += 1;
        subject.insert(line_no, &rec)?;
    }
    Ok(subject)
}

/// Load a subject recording from disk.
pub fn load_subject_graphs_from_path(path: &Path) -> Result<SubjectGraphs, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let subject = load_subject_graphs(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        records = subject.stats.records,
        duplicates = subject.stats.duplicates,
        "loaded edge list"
    );
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainnet_core::Region;

    fn load(text: &str) -> Result<SubjectGraphs, LoadError> {
        load_subject_graphs(text.as_bytes())
    }

    #[test]
    fn header_is_skipped_unread() {
        let subject = load("this header is 1 2 3 garbage\n1 2 1 0.5\n").unwrap();
        assert_eq!(subject.stats.records, 1);
        assert_eq!(subject.bucket(1).unwrap().edge_count(), 1);
    }

    #[test]
    fn non_utf8_header_is_skipped() {
        let subject = load_subject_graphs(&b"n\xe9ud1 n2 time weight\n1 2 1 0.5\n"[..]).unwrap();
        assert_eq!(subject.iter().count(), TIME_BUCKETS);
        assert_eq!(subject.bucket(1).unwrap().edge(1, 2).map(|e| e.weight), Some(0.5));
    }

    #[test]
    fn non_utf8_data_line_is_fatal() {
        let err = load_subject_graphs(&b"h\n1 2 1 0.5\n1 \xe9 1 0.5\n"[..]).unwrap_err();
        assert!(matches!(err, LoadError::Read { line: 3, .. }), "{err:?}");
    }

    #[test]
    fn empty_file_gives_eight_empty_buckets() {
        let subject = load("").unwrap();
        assert_eq!(subject.iter().count(), TIME_BUCKETS);
        assert!(subject.iter().all(|(_, g)| g.is_empty()));
    }

    #[test]
    fn first_weight_wins_within_bucket() {
        let subject = load("h\n3 7 2 0.25\n3 7 2 0.99\n7 3 2 0.5\n").unwrap();
        let g = subject.bucket(2).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(3, 7).map(|e| e.weight), Some(0.25));
        assert_eq!(subject.stats.duplicates, 2);
    }

    #[test]
    fn same_pair_in_other_bucket_is_independent() {
        let subject = load("h\n3 7 2 0.25\n3 7 5 0.75\n").unwrap();
        assert_eq!(subject.bucket(2).unwrap().edge(3, 7).unwrap().weight, 0.25);
        assert_eq!(subject.bucket(5).unwrap().edge(3, 7).unwrap().weight, 0.75);
        assert!(subject.bucket(1).unwrap().is_empty());
    }

    #[test]
    fn nodes_carry_their_region() {
        let subject = load("h\n5 95 1 0.1\n").unwrap();
        let g = subject.bucket(1).unwrap();
        assert_eq!(g.node(5).unwrap().area, Region::Vis);
        assert_eq!(g.node(95).unwrap().area, Region::Default);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let subject = load("h\n\n1 2 1 0.5\n   \n").unwrap();
        assert_eq!(subject.stats.records, 1);
    }

    #[test]
    fn time_out_of_range_is_fatal() {
        for bad in ["0", "9", "-1"] {
            let err = load(&format!("h\n1 2 1 0.5\n1 2 {bad} 0.5\n")).unwrap_err();
            assert!(
                matches!(err, LoadError::TimeRange { line: 3, .. }),
                "time={bad} err={err:?}"
            );
        }
    }

    #[test]
    fn invalid_node_is_fatal() {
        let err = load("h\n1 101 1 0.5\n").unwrap_err();
        match err {
            LoadError::InvalidNode { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source.node, 101);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = load("h\n1 2 1 0.5\n1 2 x 0.5\n").unwrap_err();
        assert!(err.to_string().starts_with("line 3:"), "{err}");
    }

    #[test]
    fn bucket_lookup_is_one_based() {
        let subject = load("h\n").unwrap();
        assert!(subject.bucket(0).is_none());
        assert!(subject.bucket(1).is_some());
        assert!(subject.bucket(8).is_some());
        assert!(subject.bucket(9).is_none());
    }
}
