use std::fmt;

use crate::series::SeriesError;
use crate::writer::WriterError;

/// Pipeline stage that can abort a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Loading and validating the electrical series
    LoadElectrical,
    /// Loading and validating the optical series
    LoadOptical,
    /// Writing the combined table
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::LoadElectrical => write!(f, "loading electrical data"),
            Stage::LoadOptical => write!(f, "loading optical data"),
            Stage::Write => write!(f, "writing combined data"),
        }
    }
}

/// Fatal pipeline errors; nothing is written when one occurs
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An input could not be loaded or failed validation
    #[error("{stage} failed: {source}")]
    Input {
        /// Stage that failed
        stage: Stage,
        /// Underlying error
        #[source]
        source: SeriesError,
    },

    /// The combined table could not be written
    #[error("writing combined data failed: {0}")]
    Output(#[from] WriterError),
}

impl PipelineError {
    /// Stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Input { stage, .. } => *stage,
            PipelineError::Output(_) => Stage::Write,
        }
    }
}
