//! Condition and sample selection state behind the experiment form.
//!
//! One `ConditionManager` owns the whole page state: the condition list, the
//! data source listing, and the filter criteria. The embedding UI renders
//! from the derived views, calls the mutation methods on user interaction,
//! and asks for the submission payload when the form is posted. Derived
//! views are recomputed from current state on every call, so they can never
//! go stale.

use crate::condition::{default_conditions, Condition, ConditionUid};
use crate::data_source::DataSource;
use crate::error::StateError;
use crate::filter::SourceFilter;
use crate::group_by::group_by;
use crate::source_probe;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// State shared with the embedding page: supplied once at load time and
/// handed back verbatim as the submission payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperimentState {
    pub conditions: Vec<Condition>,
    pub num_condition_created: i64,
    pub data_sources: Vec<DataSource>,
}

/// Per-file projection used by the grouped views.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub pk: i64,
    pub file_path: String,
}

impl FileEntry {
    fn from_source(source: &DataSource) -> Self {
        Self {
            pk: source.pk,
            file_path: source.file_path.clone(),
        }
    }
}

/// Selected sources of one sample. `condition` is set only when every member
/// carries the identical assigned condition; `None` signals the mixed or
/// unassigned state to the UI.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleGroup {
    pub sample: String,
    pub files: Vec<FileEntry>,
    pub condition: Option<ConditionUid>,
}

/// Samples whose sources were all assigned to one condition.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    pub condition: Condition,
    pub samples: Vec<String>,
}

/// FASTQ sources of one sample. `selected` is set only when every member
/// shares the same selection state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastqSampleGroup {
    pub sample: String,
    pub files: Vec<FileEntry>,
    pub selected: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ConditionManager {
    state: ExperimentState,
    filter: SourceFilter,
    editable: bool,
    new_sample_name: String,
}

impl Default for ConditionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionManager {
    pub fn new() -> Self {
        Self::from_sources(vec![])
    }

    /// Seeds the default condition set over externally supplied sources.
    pub fn from_sources(data_sources: Vec<DataSource>) -> Self {
        let conditions = default_conditions();
        let num_condition_created = next_uid(&conditions);
        Self {
            state: ExperimentState {
                conditions,
                num_condition_created,
                data_sources,
            },
            filter: SourceFilter::default(),
            editable: false,
            new_sample_name: String::new(),
        }
    }

    /// Probes each `(pk, path)` pair into a source record, guessing file
    /// type, sample name and pair-end metadata from the path.
    pub fn from_file_paths(files: &[(i64, &str)]) -> Self {
        Self::from_sources(
            files
                .iter()
                .map(|(pk, path)| source_probe::guess(*pk, path))
                .collect(),
        )
    }

    /// Restores a manager from page-supplied state with pre-existing
    /// conditions. The creation counter is reconciled so that a uid handed
    /// out earlier in the session can never be reused.
    pub fn from_state(state: ExperimentState) -> Result<Self, StateError> {
        let mut uids = state.conditions.iter().map(|c| c.uid).collect::<Vec<_>>();
        uids.sort_unstable();
        if let Some((uid, _)) = uids.iter().tuple_windows().find(|(a, b)| a == b) {
            return Err(StateError::State(format!(
                "Duplicate condition uid {uid} in supplied state"
            )));
        }
        let mut ret = Self {
            state,
            filter: SourceFilter::default(),
            editable: false,
            new_sample_name: String::new(),
        };
        ret.state.num_condition_created = ret
            .state
            .num_condition_created
            .max(next_uid(&ret.state.conditions));
        Ok(ret)
    }

    pub fn from_json(text: &str) -> Result<Self, StateError> {
        Self::from_state(serde_json::from_str(text)?)
    }

    pub fn state(&self) -> &ExperimentState {
        &self.state
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.state.conditions
    }

    /// Conditions shown in user-facing listings; the reserved sentinel is
    /// excluded by convention.
    pub fn user_conditions(&self) -> Vec<&Condition> {
        self.state
            .conditions
            .iter()
            .filter(|c| !c.is_reserved())
            .collect()
    }

    pub fn condition_by_uid(&self, uid: ConditionUid) -> Option<&Condition> {
        self.state.conditions.iter().find(|c| c.uid == uid)
    }

    pub fn data_sources(&self) -> &[DataSource] {
        &self.state.data_sources
    }

    pub fn num_condition_created(&self) -> i64 {
        self.state.num_condition_created
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn new_sample_name(&self) -> &str {
        &self.new_sample_name
    }

    pub fn set_new_sample_name(&mut self, name: &str) {
        self.new_sample_name = name.to_owned();
    }

    pub fn filter(&self) -> &SourceFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut SourceFilter {
        &mut self.filter
    }

    /// Appends a new condition. An empty or whitespace-only label falls back
    /// to a generated one. The counter moves exactly once per creation and
    /// is never decremented, even when the condition is removed again later.
    pub fn add_condition(&mut self, label: &str) {
        let uid = self.state.num_condition_created;
        let label = label.trim();
        let label = if label.is_empty() {
            format!("New condition {uid}")
        } else {
            label.to_owned()
        };
        self.state.conditions.push(Condition { uid, label });
        self.state.num_condition_created += 1;
    }

    /// Removes the condition at `index`. Out-of-range indices and the
    /// reserved sentinel are silent no-ops. Sources referencing the removed
    /// uid keep their dangling reference.
    pub fn remove_condition(&mut self, index: usize) {
        match self.state.conditions.get(index) {
            Some(condition) if !condition.is_reserved() => {
                self.state.conditions.remove(index);
            }
            _ => {}
        }
    }

    pub fn enter_edit_mode(&mut self) {
        self.editable = true;
    }

    /// Leaves edit mode and trims every condition label in place.
    pub fn leave_edit_mode(&mut self) {
        self.editable = false;
        for condition in &mut self.state.conditions {
            condition.label = condition.label.trim().to_owned();
        }
    }

    pub fn clear_all_filters(&mut self) {
        self.filter.clear();
    }

    pub fn filtered_data_sources(&self) -> Vec<&DataSource> {
        self.state
            .data_sources
            .iter()
            .filter(|s| self.filter.matches(s))
            .collect()
    }

    pub fn can_rename_sample(&self) -> bool {
        self.filter.is_fully_specified()
    }

    /// Sets `selected` on every source matching the current filter, not just
    /// the ones visible in a grouped view.
    pub fn update_filtered_sources_selected_status(&mut self, status: bool) {
        let filter = &self.filter;
        for source in self
            .state
            .data_sources
            .iter_mut()
            .filter(|s| filter.matches(s))
        {
            source.selected = status;
        }
    }

    /// Renames every filtered source to the scratch sample name. The
    /// `can_rename_sample` gate lives at the UI layer and is not enforced
    /// here.
    pub fn rename_filtered_sources_name(&mut self) {
        let filter = &self.filter;
        let name = &self.new_sample_name;
        for source in self
            .state
            .data_sources
            .iter_mut()
            .filter(|s| filter.matches(s))
        {
            source.sample = name.clone();
        }
    }

    /// Assigns `uid` to every selected source of the given sample; sources
    /// left unselected are untouched.
    pub fn update_source_condition(&mut self, sample: &str, uid: ConditionUid) {
        for source in self
            .state
            .data_sources
            .iter_mut()
            .filter(|s| s.selected && s.sample == sample)
        {
            source.condition = Some(uid);
        }
    }

    /// Sets `selected` on every FASTQ source of the given sample.
    pub fn toggle_source_by_sample(&mut self, sample: &str, checked: bool) {
        for source in self
            .state
            .data_sources
            .iter_mut()
            .filter(|s| s.is_fastq() && s.sample == sample)
        {
            source.selected = checked;
        }
    }

    pub fn selected_data_sources(&self) -> Vec<&DataSource> {
        self.state
            .data_sources
            .iter()
            .filter(|s| s.selected)
            .collect()
    }

    /// Selected sources grouped by sample. Sources without a sample label
    /// are excluded.
    pub fn data_sources_by_sample(&self) -> Vec<SampleGroup> {
        let members = self
            .state
            .data_sources
            .iter()
            .filter(|s| s.selected && !s.sample.is_empty());
        group_by(members, |s| s.sample.clone())
            .into_iter()
            .map(|group| {
                let condition = uniform_condition(group.items.iter().map(|s| s.condition));
                SampleGroup {
                    sample: group.key,
                    files: group
                        .items
                        .iter()
                        .map(|s| FileEntry::from_source(s))
                        .collect(),
                    condition,
                }
            })
            .collect()
    }

    /// Sample groups with a uniform condition, grouped by that condition.
    /// Mixed and unassigned samples are absent, as are samples whose uid no
    /// longer resolves to a live condition.
    pub fn data_sources_by_condition(&self) -> Vec<ConditionGroup> {
        let assigned = self
            .data_sources_by_sample()
            .into_iter()
            .filter_map(|group| Some((group.condition?, group.sample)));
        group_by(assigned, |(uid, _)| *uid)
            .into_iter()
            .filter_map(|group| {
                let condition = self.condition_by_uid(group.key)?.clone();
                Some(ConditionGroup {
                    condition,
                    samples: group
                        .items
                        .into_iter()
                        .map(|(_, sample)| sample)
                        .collect(),
                })
            })
            .collect()
    }

    /// FASTQ sources grouped by sample, for the per-sample selection
    /// checkboxes. Sources without a sample label are excluded.
    pub fn fastq_sources_by_sample(&self) -> Vec<FastqSampleGroup> {
        let members = self
            .state
            .data_sources
            .iter()
            .filter(|s| s.is_fastq() && !s.sample.is_empty());
        group_by(members, |s| s.sample.clone())
            .into_iter()
            .map(|group| {
                let selected = uniform_flag(group.items.iter().map(|s| s.selected));
                FastqSampleGroup {
                    sample: group.key,
                    files: group
                        .items
                        .iter()
                        .map(|s| FileEntry::from_source(s))
                        .collect(),
                    selected,
                }
            })
            .collect()
    }

    /// All distinct sample names, sorted.
    pub fn sample_names(&self) -> Vec<String> {
        self.state
            .data_sources
            .iter()
            .filter(|s| !s.sample.is_empty())
            .map(|s| s.sample.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Labels of the user-facing conditions, in list order.
    pub fn condition_names(&self) -> Vec<String> {
        self.user_conditions()
            .iter()
            .map(|c| c.label.clone())
            .collect()
    }

    pub fn summary(&self) -> String {
        let samples = self.sample_names();
        let conditions = self.condition_names();
        format!(
            "Involves {} data sources. It defines {} samples: {}, and {} conditions: {}.",
            self.state.data_sources.len(),
            samples.len(),
            samples.iter().join(", "),
            conditions.len(),
            conditions.iter().join(", "),
        )
    }

    /// Snapshot handed to the hidden form field on submit.
    pub fn submission_payload(&self) -> &ExperimentState {
        &self.state
    }

    pub fn submission_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(&self.state)?)
    }
}

fn next_uid(conditions: &[Condition]) -> i64 {
    conditions
        .iter()
        .map(|c| c.uid + 1)
        .max()
        .unwrap_or(0)
        .max(1)
}

fn uniform_condition(
    mut items: impl Iterator<Item = Option<ConditionUid>>,
) -> Option<ConditionUid> {
    let first = items.next()??;
    items.all(|c| c == Some(first)).then_some(first)
}

fn uniform_flag(mut items: impl Iterator<Item = bool>) -> Option<bool> {
    let first = items.next()?;
    items.all(|f| f == first).then_some(first)
}
