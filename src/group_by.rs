//! Stable grouping of a sequence by a derived key.

use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Group<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

/// Groups `items` by the key extracted with `key_fn`, preserving the first
/// occurrence order of distinct keys and the original relative order of
/// items inside each group.
///
/// Key identity is the canonical JSON serialization of the extracted key,
/// so structurally equal keys collapse into one group even when they are
/// distinct instances. A missing key is expressed as `Option::None`, which
/// serializes to `null` and stays distinct from the empty string key. The
/// stored `key` of a group is the first-seen original value.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<Group<K, T>>
where
    K: Serialize,
    F: Fn(&T) -> K,
{
    let mut group_of_key: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group<K, T>> = Vec::new();
    for item in items {
        let key = key_fn(&item);
        let canonical = serde_json::to_string(&key).unwrap_or_else(|_| "null".to_string());
        match group_of_key.get(&canonical) {
            Some(&at) => groups[at].items.push(item),
            None => {
                group_of_key.insert(canonical, groups.len());
                groups.push(Group {
                    key,
                    items: vec![item],
                });
            }
        }
    }
    groups
}
