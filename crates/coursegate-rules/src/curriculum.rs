//! Curriculum forest and ordering helpers.
//!
//! Modules form a forest ordered by `order_index` within each parent. The tree
//! is an arena with index lists; parents must exist and cycles are rejected.

use std::collections::HashMap;

use coursegate_common::ModuleId;
use thiserror::Error;

/// Anything positioned by an order index inside its container.
pub trait Ordered {
    fn order_index(&self) -> i32;
}

/// Item with the greatest order index strictly below `before`.
pub fn preceding<T: Ordered>(items: &[T], before: i32) -> Option<&T> {
    items
        .iter()
        .filter(|item| item.order_index() < before)
        .max_by_key(|item| item.order_index())
}

/// Item with the greatest order index.
pub fn last<T: Ordered>(items: &[T]) -> Option<&T> {
    items.iter().max_by_key(|item| item.order_index())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurriculumError {
    #[error("Module {0} appears more than once")]
    DuplicateModule(ModuleId),

    #[error("Module {module} references unknown parent {parent}")]
    UnknownParent { module: ModuleId, parent: ModuleId },

    #[error("Module {0} not found")]
    UnknownModule(ModuleId),

    #[error("Module {0} is part of a parent cycle")]
    Cycle(ModuleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleNode {
    pub id: ModuleId,
    pub parent_id: Option<ModuleId>,
    pub order_index: i32,
}

impl Ordered for ModuleNode {
    fn order_index(&self) -> i32 {
        self.order_index
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurriculumTree {
    nodes: Vec<ModuleNode>,
    index: HashMap<ModuleId, usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl CurriculumTree {
    pub fn build(modules: impl IntoIterator<Item = ModuleNode>) -> Result<Self, CurriculumError> {
        let nodes: Vec<ModuleNode> = modules.into_iter().collect();

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(CurriculumError::DuplicateModule(node.id));
            }
        }

        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            match node.parent_id {
                None => roots.push(i),
                Some(parent) => {
                    let &p = index.get(&parent).ok_or(CurriculumError::UnknownParent {
                        module: node.id,
                        parent,
                    })?;
                    children[p].push(i);
                }
            }
        }

        let sort_key = |&i: &usize| (nodes[i].order_index, nodes[i].id);
        roots.sort_by_key(sort_key);
        for list in &mut children {
            list.sort_by_key(sort_key);
        }

        let tree = Self {
            nodes,
            index,
            children,
            roots,
        };

        // Every node on a cycle is unreachable from the roots.
        let reached = tree.walk();
        if let Some(node) = tree.nodes.iter().find(|n| !reached.contains(&n.id)) {
            return Err(CurriculumError::Cycle(node.id));
        }

        Ok(tree)
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn children(&self, id: &ModuleId) -> Vec<&ModuleNode> {
        self.index
            .get(id)
            .map(|&i| self.children[i].iter().map(|&c| &self.nodes[c]).collect())
            .unwrap_or_default()
    }

    /// Sibling under the same parent with the greatest order index below this one.
    pub fn previous_sibling(&self, id: &ModuleId) -> Option<&ModuleNode> {
        let node = self.get(id)?;
        let siblings: Vec<ModuleNode> = match node.parent_id {
            Some(parent) => self.children(&parent).into_iter().copied().collect(),
            None => self.roots.iter().map(|&i| self.nodes[i]).collect(),
        };
        let prev = preceding(&siblings, node.order_index)?.id;
        self.get(&prev)
    }

    /// Module ids depth-first, parents before children, siblings by order.
    pub fn display_order(&self) -> Vec<ModuleId> {
        self.walk()
    }

    /// Parent chain from the immediate parent up to the root.
    pub fn ancestors(&self, id: &ModuleId) -> Vec<ModuleId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent_id);
        while let Some(parent) = current {
            if chain.contains(&parent) || chain.len() > self.nodes.len() {
                break;
            }
            chain.push(parent);
            current = self.get(&parent).and_then(|n| n.parent_id);
        }
        chain
    }

    /// Reject moving `id` under `new_parent` when that would create a cycle.
    pub fn check_reparent(&self, id: &ModuleId, new_parent: Option<&ModuleId>) -> Result<(), CurriculumError> {
        if self.get(id).is_none() {
            return Err(CurriculumError::UnknownModule(*id));
        }
        let Some(parent) = new_parent else {
            return Ok(());
        };
        if self.get(parent).is_none() {
            return Err(CurriculumError::UnknownParent {
                module: *id,
                parent: *parent,
            });
        }
        if parent == id || self.ancestors(parent).contains(id) {
            return Err(CurriculumError::Cycle(*id));
        }
        Ok(())
    }

    fn walk(&self) -> Vec<ModuleId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            order.push(self.nodes[i].id);
            stack.extend(self.children[i].iter().rev());
        }
        order
    }
}
