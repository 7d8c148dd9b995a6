use crate::Condition;
use std::path::{Path, PathBuf};

/// Where subject recordings are read from and graphs are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Recordings for the movie condition
    pub movie_dir: PathBuf,
    /// Recordings for the story condition
    pub story_dir: PathBuf,
    /// Destination for all `.gexf` files (created if missing)
    pub out_dir: PathBuf,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            movie_dir: PathBuf::from("./brain_networks/movie/"),
            story_dir: PathBuf::from("./brain_networks/story/"),
            out_dir: PathBuf::from("./graphs/"),
        }
    }
}

impl ConverterConfig {
    pub fn input_dir(&self, condition: Condition) -> &Path {
        match condition {
            Condition::Movie => &self.movie_dir,
            Condition::Story => &self.story_dir,
        }
    }
}
