use crate::condition::ConditionUid;
use serde::{Deserialize, Serialize};

pub const FILE_TYPE_FASTQ: &str = "FASTQ";
pub const FILE_TYPE_FASTA: &str = "FASTA";

/// Sequencing metadata guessed from the file name. `strand` is 1 (forward)
/// or 2 (reversed) for pair-end reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strand: Option<u8>,
}

/// One input file record. Sources are supplied by the embedding page and
/// only ever mutated in place (`selected`, `sample`, `condition`); the state
/// layer never creates or destroys them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSource {
    pub pk: i64,
    pub file_path: String,
    pub file_type: String,
    /// Label grouping sources into one biological sample. Empty means the
    /// source has not been assigned to a sample yet.
    pub sample: String,
    pub metadata: SourceMetadata,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionUid>,
}

impl DataSource {
    pub fn new(pk: i64, file_path: &str) -> Self {
        Self {
            pk,
            file_path: file_path.to_owned(),
            ..Self::default()
        }
    }

    pub fn is_fastq(&self) -> bool {
        self.file_type == FILE_TYPE_FASTQ
    }
}
