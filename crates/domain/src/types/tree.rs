//! Output tree: location nodes with work items at the leaves

use serde::{Deserialize, Serialize};

/// Leaf entry holding one record's final label, hours and original code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub label: String,
    pub hours: Option<i64>,
    #[serde(rename = "fullCode")]
    pub full_code: String,
}

/// A building, floor or area node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeChild>,
}

/// Child of a [`TreeNode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeChild {
    Node(TreeNode),
    Item(WorkItem),
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), children: Vec::new() }
    }

    /// Work items anywhere below this node, depth-first in emission order
    pub fn work_items(&self) -> Vec<&WorkItem> {
        let mut items = Vec::new();
        collect_items(self, &mut items);
        items
    }

    /// Child node with the given label, if any
    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        self.children.iter().find_map(|child| match child {
            TreeChild::Node(node) if node.label == label => Some(node),
            _ => None,
        })
    }

    /// Work items directly under this node
    pub fn direct_items(&self) -> impl Iterator<Item = &WorkItem> {
        self.children.iter().filter_map(|child| match child {
            TreeChild::Item(item) => Some(item),
            TreeChild::Node(_) => None,
        })
    }
}

fn collect_items<'a>(node: &'a TreeNode, out: &mut Vec<&'a WorkItem>) {
    for child in &node.children {
        match child {
            TreeChild::Node(inner) => collect_items(inner, out),
            TreeChild::Item(item) => out.push(item),
        }
    }
}

/// Number of work items across a whole forest
pub fn count_work_items(roots: &[TreeNode]) -> usize {
    roots.iter().map(|root| root.work_items().len()).sum()
}
