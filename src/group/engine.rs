// src/group/engine.rs
use std::{cmp::Ordering, collections::BTreeMap};
use tracing::{debug, instrument};

use super::{
    forest::Forest,
    index::{ColumnIndex, UnionStats},
};
use crate::load::{RowId, RowTable};

/// Ordering key of a finished group: larger sets first, then the set whose
/// representative has the smaller identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub size: usize,
    pub representative: RowId,
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| self.representative.cmp(&other.representative))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: GroupKey,
    /// Member rows in ascending identifier order.
    pub rows: Vec<RowId>,
}

impl Group {
    pub fn size(&self) -> usize {
        self.key.size
    }
}

/// Ranked groups plus the one aggregate callers report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub groups: Vec<Group>,
    pub multi_row_groups: usize,
    pub unions: UnionStats,
}

impl Grouping {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }
}

/// Partition `table` into groups of rows connected by shared column values.
#[instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn group_rows(table: &RowTable) -> Grouping {
    let index = ColumnIndex::build(table);
    debug!(
        columns = index.column_count(),
        entries = index.entry_count(),
        "built column index"
    );

    let mut forest = Forest::new(table.len());
    let unions = index.apply(&mut forest);
    debug!(
        duplicates = unions.duplicates,
        merges = unions.merges,
        sets = forest.set_count(),
        "applied unions"
    );

    let mut grouping = extract_groups(&mut forest);
    grouping.unions = unions;
    grouping
}

/// Walk every element once and bucket it under its final set.
pub fn extract_groups(forest: &mut Forest) -> Grouping {
    let mut buckets: BTreeMap<GroupKey, Vec<RowId>> = BTreeMap::new();
    for id in 0..forest.len() {
        let representative = forest.find(id);
        let size = forest.set_size(representative);
        buckets
            .entry(GroupKey {
                size,
                representative,
            })
            .or_insert_with(|| Vec::with_capacity(size))
            .push(id);
    }

    let groups: Vec<Group> = buckets
        .into_iter()
        .map(|(key, rows)| Group { key, rows })
        .collect();
    let multi_row_groups = groups.iter().filter(|g| g.size() > 1).count();

    Grouping {
        groups,
        multi_row_groups,
        unions: UnionStats::default(),
    }
}
