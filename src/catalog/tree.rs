use std::collections::{HashMap, HashSet};

use crate::entity::categories::Model as CategoryModel;

#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub parent: Option<usize>,
}

/// Category hierarchy held as an arena; `parent` is an index into `nodes`.
#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
    index: HashMap<i32, usize>,
}

impl CategoryTree {
    pub fn from_models<'a>(models: impl IntoIterator<Item = &'a CategoryModel>) -> Self {
        let mut tree = CategoryTree::default();
        let mut parents = Vec::new();

        for model in models {
            tree.index.insert(model.id, tree.nodes.len());
            tree.nodes.push(CategoryNode {
                id: model.id,
                name: model.name_zh.clone(),
                level: model.level,
                parent: None,
            });
            parents.push(model.parent_id);
        }

        // A parent id that is not part of the set leaves the node as a root.
        for (node, parent_id) in tree.nodes.iter_mut().zip(parents) {
            node.parent = parent_id.and_then(|pid| tree.index.get(&pid).copied());
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&CategoryNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn parent(&self, id: i32) -> Option<&CategoryNode> {
        self.get(id)
            .and_then(|node| node.parent)
            .map(|i| &self.nodes[i])
    }

    /// Nodes from `id` up to its root. The walk stops at the first repeated
    /// node, so a corrupted parent chain cannot loop.
    pub fn ancestors(&self, id: i32) -> Vec<&CategoryNode> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.index.get(&id).copied();

        while let Some(i) = cursor {
            if !seen.insert(i) {
                tracing::warn!(category_id = id, "cycle in category parent chain");
                break;
            }
            let node = &self.nodes[i];
            chain.push(node);
            cursor = node.parent;
        }

        chain
    }

    /// Breadcrumb names from the root down to `id`.
    pub fn path(&self, id: i32) -> Vec<String> {
        let mut names: Vec<String> = self
            .ancestors(id)
            .into_iter()
            .map(|node| node.name.clone())
            .collect();
        names.reverse();
        names
    }

    pub fn has_cycle(&self, id: i32) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = self.index.get(&id).copied();
        while let Some(i) = cursor {
            if !seen.insert(i) {
                return true;
            }
            cursor = self.nodes[i].parent;
        }
        false
    }
}
