//! Batch conversion of subject recordings to GEXF
//!
//! For each condition (movie, then story) every entry of the input directory
//! is treated as one subject's edge list. Each subject yields eight files,
//! `{prefix}_{subject:03}_{bucket}.gexf`, in the output directory.
//!
//! The first error aborts the whole run. Files already written stay on disk.

pub mod config;

use brainnet_gexf::{write_gexf_file, GexfError};
use brainnet_ingest_edgelist::{load_subject_graphs_from_path, LoadError};
use colored::Colorize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub use config::ConverterConfig;

/// Experimental condition a recording was made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Movie,
    Story,
}

impl Condition {
    /// Processing order.
    pub const ALL: [Condition; 2] = [Condition::Movie, Condition::Story];

    /// Output file name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Condition::Movie => "m",
            Condition::Story => "s",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Condition::Movie => "movie",
            Condition::Story => "story",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot derive subject id from `{}` (expected `<number>_...`)", path.display())]
    FilenameFormat { path: PathBuf },
    #[error("failed to list {}: {source}", dir.display())]
    ListDir {
        dir: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to create {}: {source}", dir.display())]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("failed to load {}: {source}", path.display())]
    Load { path: PathBuf, source: LoadError },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: GexfError },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Outcome of converting one condition's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionReport {
    pub condition: Condition,
    /// Subject ids in processing order
    pub subjects: Vec<u64>,
    pub files_written: usize,
    pub duplicates_dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub reports: Vec<ConditionReport>,
}

impl ConversionSummary {
    pub fn subjects(&self) -> usize {
        self.reports.iter().map(|r| r.subjects.len()).sum()
    }

    pub fn files_written(&self) -> usize {
        self.reports.iter().map(|r| r.files_written).sum()
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.reports.iter().map(|r| r.duplicates_dropped).sum()
    }
}

/// Subject id: the file stem up to the first underscore, as a number.
pub fn subject_id_from_path(path: &Path) -> Result<u64> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.split_once('_'))
        .and_then(|(id, _)| id.parse::<u64>().ok())
        .ok_or_else(|| ConvertError::FilenameFormat {
            path: path.to_path_buf(),
        })
}

/// `m_012_3.gexf` for movie subject 12, bucket 3.
pub fn output_file_name(condition: Condition, subject_id: u64, bucket: usize) -> String {
    format!("{}_{:03}_{}.gexf", condition.prefix(), subject_id, bucket)
}

/// Directory entries in file-name order. Nothing is filtered out.
fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry
                .map(|e| e.into_path())
                .map_err(|source| ConvertError::ListDir {
                    dir: dir.to_path_buf(),
                    source,
                })
        })
        .collect()
}

/// Convert one subject file. Returns the subject id and the number of
/// duplicate records dropped.
fn convert_file(condition: Condition, path: &Path, out_dir: &Path) -> Result<(u64, usize)> {
    println!("{} {}", "Processing".green().bold(), path.display());

    let subject_id = subject_id_from_path(path)?;
    let subject = load_subject_graphs_from_path(path).map_err(|source| ConvertError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    for (bucket, graph) in subject.iter() {
        let out = out_dir.join(output_file_name(condition, subject_id, bucket));
        write_gexf_file(graph, &out).map_err(|source| ConvertError::Write { path: out, source })?;
    }

    tracing::info!(
        condition = %condition,
        subject = subject_id,
        records = subject.stats.records,
        duplicates = subject.stats.duplicates,
        "wrote subject graphs"
    );
    Ok((subject_id, subject.stats.duplicates))
}

/// Convert every entry of `input_dir`. `out_dir` must already exist.
pub fn convert_condition(
    condition: Condition,
    input_dir: &Path,
    out_dir: &Path,
) -> Result<ConditionReport> {
    let mut report = ConditionReport {
        condition,
        subjects: Vec::new(),
        files_written: 0,
        duplicates_dropped: 0,
    };

    for path in list_inputs(input_dir)? {
        let (subject_id, duplicates) = convert_file(condition, &path, out_dir)?;
        report.subjects.push(subject_id);
        report.duplicates_dropped += duplicates;
        report.files_written += brainnet_ingest_edgelist::TIME_BUCKETS;
    }

    tracing::debug!(
        condition = %condition,
        dir = %input_dir.display(),
        subjects = report.subjects.len(),
        "condition converted"
    );
    Ok(report)
}

/// Run the full movie + story conversion.
pub fn convert_all(config: &ConverterConfig) -> Result<ConversionSummary> {
    fs::create_dir_all(&config.out_dir).map_err(|source| ConvertError::CreateDir {
        dir: config.out_dir.clone(),
        source,
    })?;

    let mut summary = ConversionSummary::default();
    for condition in Condition::ALL {
        summary.reports.push(convert_condition(
            condition,
            config.input_dir(condition),
            &config.out_dir,
        )?);
    }
    Ok(summary)
}
