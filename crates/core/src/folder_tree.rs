//! Folder hierarchy: flat list to sorted forest, descendant sets, parent
//! selector options and cycle detection.
//!
//! Everything here is pure and recomputed from the flat list on each call.
//! The parent relation is expected to be acyclic, but stored data is not
//! trusted: every walk carries a visited set so a cycle can neither loop
//! forever nor drop records.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::EntityId;

/// Colors a folder may be tagged with.
pub const FOLDER_COLORS: &[&str] = &[
    "gray", "red", "orange", "yellow", "green", "blue", "indigo", "purple", "pink",
];

/// Color a new folder gets when none is chosen.
pub const DEFAULT_FOLDER_COLOR: &str = "blue";

/// A record that lives in a parent/child hierarchy.
pub trait Hierarchical {
    fn id(&self) -> EntityId;
    fn parent_id(&self) -> Option<EntityId>;
    fn position(&self) -> i32;
}

/// One folder and its sorted children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

/// Indices of `items` sorted by position; ties keep input order.
fn sorted_indices<T: Hierarchical>(items: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| items[i].position());
    order
}

/// Build the sorted forest.
///
/// Roots are records with no parent, plus records whose parent is not in
/// `items`. Records reachable only through a parent cycle are added as extra
/// roots in (position, input order); each cycle is cut at the first member
/// reached.
pub fn build_tree<T: Hierarchical + Clone>(items: &[T]) -> Vec<TreeNode<T>> {
    let ids: HashSet<EntityId> = items.iter().map(Hierarchical::id).collect();
    let order = sorted_indices(items);

    let mut children: HashMap<EntityId, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for &i in &order {
        match items[i].parent_id().filter(|p| ids.contains(p)) {
            Some(parent) => children.entry(parent).or_default().push(i),
            None => roots.push(i),
        }
    }

    let mut visited = HashSet::with_capacity(items.len());
    let mut forest: Vec<TreeNode<T>> = roots
        .into_iter()
        .filter_map(|i| attach(items, i, &children, &mut visited))
        .collect();

    for &i in &order {
        if let Some(node) = attach(items, i, &children, &mut visited) {
            forest.push(node);
        }
    }

    forest
}

fn attach<T: Hierarchical + Clone>(
    items: &[T],
    index: usize,
    children: &HashMap<EntityId, Vec<usize>>,
    visited: &mut HashSet<usize>,
) -> Option<TreeNode<T>> {
    if !visited.insert(index) {
        return None;
    }
    let kids = children
        .get(&items[index].id())
        .map(|kids| {
            kids.iter()
                .filter_map(|&k| attach(items, k, children, visited))
                .collect()
        })
        .unwrap_or_default();
    Some(TreeNode {
        item: items[index].clone(),
        children: kids,
    })
}

/// Every id below `id` in the hierarchy. `id` itself is never included.
pub fn descendant_ids<T: Hierarchical>(items: &[T], id: EntityId) -> HashSet<EntityId> {
    let mut children: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for item in items {
        if let Some(parent) = item.parent_id() {
            children.entry(parent).or_default().push(item.id());
        }
    }

    let mut found = HashSet::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        for &child in children.get(&current).into_iter().flatten() {
            if child != id && found.insert(child) {
                stack.push(child);
            }
        }
    }
    found
}

/// Folders eligible as the parent of `editing`, in position order.
///
/// Excludes `editing` itself and all of its descendants. With no folder
/// being edited every folder is eligible.
pub fn parent_options<T: Hierarchical>(items: &[T], editing: Option<EntityId>) -> Vec<&T> {
    let excluded = match editing {
        Some(id) => {
            let mut set = descendant_ids(items, id);
            set.insert(id);
            set
        }
        None => HashSet::new(),
    };
    sorted_indices(items)
        .into_iter()
        .map(|i| &items[i])
        .filter(|item| !excluded.contains(&item.id()))
        .collect()
}

/// Whether re-parenting `id` under `new_parent` would close a cycle.
pub fn would_create_cycle<T: Hierarchical>(
    items: &[T],
    id: EntityId,
    new_parent: Option<EntityId>,
) -> bool {
    match new_parent {
        None => false,
        Some(parent) => parent == id || descendant_ids(items, id).contains(&parent),
    }
}

/// Validate a folder color against [`FOLDER_COLORS`].
pub fn validate_folder_color(color: &str) -> Result<(), crate::error::CoreError> {
    if !FOLDER_COLORS.contains(&color) {
        return Err(crate::error::CoreError::Validation(format!(
            "Invalid folder color '{}'. Valid colors: {}",
            color,
            FOLDER_COLORS.join(", ")
        )));
    }
    Ok(())
}
