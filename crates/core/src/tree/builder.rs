//! Tree builder - folds reduced records into a building/floor/area tree
//!
//! Each record is routed by the non-empty levels of its location key,
//! outermost first: building, then floor, then area. The record becomes a
//! work item under the deepest of those levels. Records with no location are
//! dropped.
//!
//! Every level is an insertion-ordered map, so nodes are emitted in the order
//! their label was first seen. A node holding both work items and child
//! nodes (e.g. `B1 - ...` next to `B1 F01 - ...`) lists its work items
//! first; with grouper output that is also first-seen order, because an
//! empty level sorts before any label.
//!
//! Nodes are keyed by label alone at every depth: a building and an area
//! that share a label share one top-level node, and under one building the
//! floor `Ext` (`FX`) and the area `Ext` (`AX`) share one child node.

use indexmap::IndexMap;
use sitecode_domain::{ClassifiedRecord, Result, SiteCodeError, TreeChild, TreeNode, WorkItem};
use tracing::debug;

#[derive(Debug, Default)]
struct Branch {
    items: Vec<WorkItem>,
    children: IndexMap<String, Branch>,
}

impl Branch {
    fn insert(&mut self, path: &[&str], item: WorkItem) {
        match path.split_first() {
            None => self.items.push(item),
            Some((head, rest)) => {
                self.children.entry((*head).to_string()).or_default().insert(rest, item);
            }
        }
    }

    fn into_children(self) -> Vec<TreeChild> {
        let items = self.items.into_iter().map(TreeChild::Item);
        let nodes = self
            .children
            .into_iter()
            .map(|(label, branch)| TreeChild::Node(branch.into_node(label)));
        items.chain(nodes).collect()
    }

    fn into_node(self, label: String) -> TreeNode {
        TreeNode { label, children: self.into_children() }
    }
}

/// Incremental tree builder
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Branch,
    dropped: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one record into the tree
    ///
    /// Returns `false` if the record has no location and was dropped.
    ///
    /// # Errors
    /// Returns `SiteCodeError::InvalidInput` if the hour field is neither
    /// empty nor an integer.
    pub fn push(&mut self, record: &ClassifiedRecord) -> Result<bool> {
        let path = record.location.path();
        if path.is_empty() {
            self.dropped += 1;
            return Ok(false);
        }

        let item = WorkItem {
            label: record.label.clone(),
            hours: parse_hours(record)?,
            full_code: record.full_code.clone(),
        };
        self.root.insert(&path, item);
        Ok(true)
    }

    /// Records dropped so far for having no location
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Top-level nodes in first-seen order
    pub fn build(self) -> Vec<TreeNode> {
        self.root
            .children
            .into_iter()
            .map(|(label, branch)| branch.into_node(label))
            .collect()
    }
}

/// Build the tree for a record list in one go
///
/// # Errors
/// See [`TreeBuilder::push`].
pub fn build_tree(records: &[ClassifiedRecord]) -> Result<Vec<TreeNode>> {
    let mut builder = TreeBuilder::new();
    for record in records {
        builder.push(record)?;
    }
    if builder.dropped() > 0 {
        debug!(dropped = builder.dropped(), "records without a location left out of the tree");
    }
    Ok(builder.build())
}

/// Parse a record's hour field: empty is `None`, otherwise an integer
///
/// # Errors
/// Returns `SiteCodeError::InvalidInput` naming the record's code.
pub fn parse_hours(record: &ClassifiedRecord) -> Result<Option<i64>> {
    let hour = record.hour.trim();
    if hour.is_empty() {
        return Ok(None);
    }

    hour.parse::<i64>().map(Some).map_err(|e| {
        SiteCodeError::InvalidInput(format!(
            "hour '{hour}' of '{}' is not an integer: {e}",
            record.full_code
        ))
    })
}

#[cfg(test)]
mod tests {
    use sitecode_domain::{count_work_items, LocationKey};

    use super::*;

    fn record(
        building: &str,
        floor: &str,
        area: &str,
        label: &str,
        hour: &str,
    ) -> ClassifiedRecord {
        ClassifiedRecord::new(LocationKey::new(building, floor, area), hour, "code ", label)
    }

    fn item_labels(node: &TreeNode) -> Vec<&str> {
        node.direct_items().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_full_path_nests_three_levels() {
        let tree = build_tree(&[record("Building 1 North", "Floor 01", "Area A", "Pour Slab", "8")])
            .unwrap();

        assert_eq!(tree.len(), 1);
        let area = tree[0].child("Floor 01").and_then(|f| f.child("Area A")).unwrap();
        let item = area.direct_items().next().unwrap();
        assert_eq!(item.label, "Pour Slab");
        assert_eq!(item.hours, Some(8));
        assert_eq!(item.full_code, "code ");
    }

    #[test]
    fn test_each_shape_routes_to_its_deepest_level() {
        let tree = build_tree(&[
            record("", "", "Area B", "area-only", "1"),
            record("", "Roof", "", "floor-only", "1"),
            record("", "Roof", "Area C", "floor+area", "1"),
            record("Building 0", "", "", "build-only", "1"),
            record("Building 0", "", "Area D", "build+area", "1"),
            record("Building 0", "Floor 02", "", "build+floor", "1"),
            record("Building 0", "Floor 02", "Area A", "all", "1"),
        ])
        .unwrap();

        let top: Vec<_> = tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(top, vec!["Area B", "Roof", "Building 0"]);

        assert_eq!(item_labels(&tree[0]), vec!["area-only"]);
        assert_eq!(item_labels(&tree[1]), vec!["floor-only"]);
        assert_eq!(item_labels(tree[1].child("Area C").unwrap()), vec!["floor+area"]);

        let building = &tree[2];
        assert_eq!(item_labels(building), vec!["build-only"]);
        assert_eq!(item_labels(building.child("Area D").unwrap()), vec!["build+area"]);
        let floor = building.child("Floor 02").unwrap();
        assert_eq!(item_labels(floor), vec!["build+floor"]);
        assert_eq!(item_labels(floor.child("Area A").unwrap()), vec!["all"]);

        assert_eq!(count_work_items(&tree), 7);
    }

    #[test]
    fn test_items_precede_child_nodes() {
        let tree = build_tree(&[
            record("Building 3", "Floor 01", "", "nested", "2"),
            record("Building 3", "", "", "direct", "3"),
        ])
        .unwrap();

        assert!(matches!(tree[0].children[0], TreeChild::Item(_)));
        assert!(matches!(tree[0].children[1], TreeChild::Node(_)));
    }

    #[test]
    fn test_unlocated_records_are_dropped() {
        let mut builder = TreeBuilder::new();
        assert!(!builder.push(&record("", "", "", "nowhere", "5")).unwrap());
        assert!(builder.push(&record("Building 4", "", "", "somewhere", "5")).unwrap());
        assert_eq!(builder.dropped(), 1);

        let tree = builder.build();
        assert_eq!(count_work_items(&tree), 1);
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let tree = build_tree(&[
            record("Building 2 South", "", "", "a", "1"),
            record("Building 1 North", "", "", "b", "1"),
            record("Building 2 South", "", "", "c", "1"),
        ])
        .unwrap();

        let top: Vec<_> = tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(top, vec!["Building 2 South", "Building 1 North"]);
        assert_eq!(item_labels(&tree[0]), vec!["a", "c"]);
    }

    #[test]
    fn test_shared_top_level_label_merges() {
        let tree = build_tree(&[
            record("", "", "General Conditions", "area", "1"),
            record("General Conditions", "", "", "building", "1"),
        ])
        .unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(item_labels(&tree[0]), vec!["area", "building"]);
    }

    #[test]
    fn test_floor_and_area_with_same_label_share_a_node() {
        let tree = build_tree(&[
            record("Building 1 North", "Ext", "", "floor ext", "1"),
            record("Building 1 North", "", "Ext", "area ext", "2"),
        ])
        .unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        let ext = tree[0].child("Ext").unwrap();
        assert_eq!(item_labels(ext), vec!["floor ext", "area ext"]);
    }

    #[test]
    fn test_hours_parsing() {
        assert_eq!(parse_hours(&record("B", "", "", "x", "")).unwrap(), None);
        assert_eq!(parse_hours(&record("B", "", "", "x", " 12\r")).unwrap(), Some(12));
        assert_eq!(parse_hours(&record("B", "", "", "x", "-3")).unwrap(), Some(-3));

        let err = parse_hours(&record("B", "", "", "x", "eight")).unwrap_err();
        assert!(matches!(err, SiteCodeError::InvalidInput(_)));
        assert!(err.to_string().contains("'eight'"));
    }

    #[test]
    fn test_bad_hour_fails_the_build() {
        let result = build_tree(&[
            record("Building 0", "", "", "ok", "1"),
            record("Building 0", "", "", "bad", "1.5"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_hour_on_dropped_record_is_ignored() {
        let tree = build_tree(&[record("", "", "", "bad", "x")]).unwrap();
        assert!(tree.is_empty());
    }
}
