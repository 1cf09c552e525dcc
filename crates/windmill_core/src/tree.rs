//! Element tree
//!
//! A parent/child registry of rendered elements. Hosts register the
//! elements they render so that input targets can be tested for containment,
//! which is what "a click inside the dropdown" means.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, LazyLock, RwLock};

new_key_type! {
    /// Unique identifier for an element
    pub struct NodeId;
}

struct ElementNode {
    role: Option<String>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Registry of elements and their parent links
pub struct ElementTree {
    nodes: SlotMap<NodeId, ElementNode>,
}

/// Shared tree handle
pub type SharedElementTree = Arc<RwLock<ElementTree>>;

static GLOBAL_TREE: LazyLock<SharedElementTree> = LazyLock::new(ElementTree::shared);

/// The process-wide element tree
pub fn global_tree() -> SharedElementTree {
    Arc::clone(&GLOBAL_TREE)
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create an empty tree behind a shared handle
    pub fn shared() -> SharedElementTree {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Create a detached element with an optional role
    pub fn create_node(&mut self, role: Option<&str>) -> NodeId {
        self.nodes.insert(ElementNode {
            role: role.map(str::to_string),
            parent: None,
            children: SmallVec::new(),
        })
    }

    /// Attach `child` under `parent`, detaching it from any previous parent
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.node_exists(parent) || !self.node_exists(child) {
            return;
        }
        // Refuse to create a cycle
        if self.contains(child, parent) {
            return;
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Create an element directly under `parent`
    pub fn create_child(&mut self, parent: NodeId, role: Option<&str>) -> NodeId {
        let child = self.create_node(role);
        self.add_child(parent, child);
        child
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }

    pub fn node_exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.children.to_vec())
            .unwrap_or_default()
    }

    pub fn role(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.role.as_deref())
    }

    /// Whether `node` is `ancestor` or lies somewhere beneath it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.node_exists(ancestor) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove an element and everything beneath it
    pub fn remove_subtree(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}
