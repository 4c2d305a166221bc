use crate::data_source::DataSource;
use serde::{Deserialize, Serialize};

/// Filter criteria over the data source listing. Every field defaults to the
/// empty string, meaning "no constraint"; matching is case-sensitive
/// substring containment per field. Filtering is pure and never mutates the
/// sources it inspects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceFilter {
    pub file_path: String,
    pub file_type: String,
    pub sample: String,
}

impl SourceFilter {
    pub fn matches(&self, source: &DataSource) -> bool {
        source.file_path.contains(&self.file_path)
            && source.file_type.contains(&self.file_type)
            && source.sample.contains(&self.sample)
    }

    /// True only when no filter field is empty. Bulk sample renames are
    /// gated on this at the UI layer: the filter has to be specific enough
    /// that renaming everything it matches is safe.
    pub fn is_fully_specified(&self) -> bool {
        !self.file_path.is_empty() && !self.file_type.is_empty() && !self.sample.is_empty()
    }

    pub fn clear(&mut self) {
        self.file_path.clear();
        self.file_type.clear();
        self.sample.clear();
    }
}
