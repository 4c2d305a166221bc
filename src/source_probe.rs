//! Guesses data source fields from a file path.

use crate::data_source::{DataSource, SourceMetadata, FILE_TYPE_FASTA, FILE_TYPE_FASTQ};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    // Sample stem with a pair-end read suffix, e.g. "liver_R1" or "s2_2".
    static ref FASTAQ_STEM: Regex =
        Regex::new(r"^(?P<sample>\w+)_[rR]?(?P<strand>[12])$").expect("Invalid stem regex");
}

/// Builds a `DataSource` for `file_path`, detecting the file type from the
/// suffix and, for FASTA/Q files, pre-filling the sample name and pair-end
/// metadata guessed from the file name.
pub fn guess(pk: i64, file_path: &str) -> DataSource {
    let mut source = DataSource::new(pk, file_path);
    let path = Path::new(file_path);
    let suffix = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match suffix {
        "fastq" | "fq" => {
            source.file_type = FILE_TYPE_FASTQ.to_owned();
            complete_fastaq_info(&mut source, path);
        }
        "fasta" | "fa" => {
            source.file_type = FILE_TYPE_FASTA.to_owned();
            complete_fastaq_info(&mut source, path);
        }
        _ => {}
    }
    source
}

fn complete_fastaq_info(source: &mut DataSource, path: &Path) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if let Some(captures) = FASTAQ_STEM.captures(stem) {
        source.sample = captures["sample"].to_owned();
        source.metadata = SourceMetadata {
            paired: Some(true),
            strand: captures["strand"].parse().ok(),
        };
    }
}
