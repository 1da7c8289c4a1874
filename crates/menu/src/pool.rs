//! Fixed-capacity node arena.
//!
//! Nodes are stored in slots of a `heapless::Vec`; a freed slot is reused by
//! the next [`NodePool::create`] with its generation bumped. Ownership is
//! expressed structurally: a node owns the ids in its `children` list, while
//! `parent` is a plain back-reference. Deleting a node frees its whole
//! subtree.

use heapless::Vec;
use platform::config::MAX_NODES;

use crate::behavior::PageBehavior;
use crate::error::MenuError;
use crate::node::{Content, Geometry, MenuNode, NodeId, NodeKind};

struct Slot<'a, E> {
    generation: u16,
    node: Option<MenuNode<'a, E>>,
}

/// Iterator over the ids of live nodes, see [`NodePool::ids`].
pub struct LiveIds<'p, 'a, E> {
    slots: core::iter::Enumerate<core::slice::Iter<'p, Slot<'a, E>>>,
}

impl<E> Iterator for LiveIds<'_, '_, E> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        for (index, slot) in self.slots.by_ref() {
            if slot.node.is_none() {
                continue;
            }
            let index = u16::try_from(index).ok()?;
            return Some(NodeId::new(index, slot.generation));
        }
        None
    }
}

/// Arena holding up to `N` menu nodes.
pub struct NodePool<'a, E, const N: usize = MAX_NODES> {
    slots: Vec<Slot<'a, E>, N>,
    live: usize,
}

impl<'a, E, const N: usize> NodePool<'a, E, N> {
    /// Empty pool.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// No live nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Maximum number of live nodes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Allocate a detached node with default flags and kind-dependent geometry.
    pub fn create(
        &mut self,
        label: &str,
        kind: NodeKind,
        content: Content,
    ) -> Result<NodeId, MenuError> {
        let node = MenuNode::new(label, kind, content);
        let free = self.slots.iter().position(|slot| slot.node.is_none());
        let id = match free {
            Some(index) => {
                let slot = self.slots.get_mut(index).ok_or(MenuError::OutOfMemory)?;
                slot.node = Some(node);
                NodeId::new(slot_index(index)?, slot.generation)
            }
            None => {
                let index = self.slots.len();
                self.slots
                    .push(Slot {
                        generation: 0,
                        node: Some(node),
                    })
                    .map_err(|_| MenuError::OutOfMemory)?;
                NodeId::new(slot_index(index)?, 0)
            }
        };
        self.live = self.live.saturating_add(1);
        Ok(id)
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    /// Borrow a live node.
    pub fn get(&self, id: NodeId) -> Result<&MenuNode<'a, E>, MenuError> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
            .ok_or(MenuError::StaleNode)
    }

    /// Mutably borrow a live node.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut MenuNode<'a, E>, MenuError> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .ok_or(MenuError::StaleNode)
    }

    /// Ids of all live nodes, in slot order.
    pub fn ids(&self) -> LiveIds<'_, 'a, E> {
        LiveIds {
            slots: self.slots.iter().enumerate(),
        }
    }

    /// Attach a page behavior, replacing any previous one.
    pub fn set_behavior(
        &mut self,
        id: NodeId,
        behavior: &'a mut (dyn PageBehavior<E> + 'a),
    ) -> Result<(), MenuError> {
        self.get_mut(id)?.behavior = Some(behavior);
        Ok(())
    }

    /// Override the default geometry.
    pub fn set_position(&mut self, id: NodeId, geometry: Geometry) -> Result<(), MenuError> {
        self.get_mut(id)?.geometry = geometry;
        Ok(())
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Fails with `DuplicateChild` if `child` is already attached anywhere,
    /// `CycleDetected` if `child` is `parent` or one of its ancestors, and
    /// `OutOfMemory` if the child list is full. On failure nothing changes.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), MenuError> {
        if parent == child {
            return Err(MenuError::CycleDetected);
        }
        let parent_node = self.get(parent)?;
        let child_node = self.get(child)?;
        if parent_node.children.contains(&child) || child_node.parent.is_some() {
            return Err(MenuError::DuplicateChild);
        }
        if self.is_ancestor(child, parent)? {
            return Err(MenuError::CycleDetected);
        }
        self.get_mut(parent)?
            .children
            .push(child)
            .map_err(|_| MenuError::OutOfMemory)?;
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent`, keeping the selection on a valid index.
    ///
    /// A selection on the removed slot moves to the previous item (or 0); a
    /// selection after it shifts down by one. The child stays allocated.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), MenuError> {
        let node = self.get_mut(parent)?;
        let pos = node
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(MenuError::NotFound)?;
        node.children.remove(pos);
        node.selected = if node.children.is_empty() {
            0
        } else if node.selected == pos {
            pos.saturating_sub(1)
        } else if node.selected > pos {
            node.selected.saturating_sub(1)
        } else {
            node.selected
        };
        if let Ok(child_node) = self.get_mut(child) {
            child_node.parent = None;
        }
        Ok(())
    }

    /// Whether `ancestor` is `node` or lies on `node`'s parent chain.
    ///
    /// A chain longer than the pool capacity can only be a loop and yields
    /// `CycleDetected`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> Result<bool, MenuError> {
        let mut cursor = Some(node);
        for _ in 0..=N {
            match cursor {
                None => return Ok(false),
                Some(id) if id == ancestor => return Ok(true),
                Some(id) => cursor = self.get(id)?.parent,
            }
        }
        Err(MenuError::CycleDetected)
    }

    /// Free `node` and every descendant, iteratively.
    ///
    /// The whole subtree is collected with an explicit stack before anything
    /// is freed, so a corrupted tree (a node reachable twice) is rejected with
    /// `CycleDetected` and left untouched. The stack never holds more than `N`
    /// distinct ids. Returns the number of nodes freed.
    pub fn delete_subtree(&mut self, node: NodeId) -> Result<usize, MenuError> {
        let mut order: Vec<NodeId, N> = Vec::new();
        let mut stack: Vec<NodeId, N> = Vec::new();
        self.get(node)?;
        stack.push(node).map_err(|_| MenuError::OutOfMemory)?;

        while let Some(id) = stack.pop() {
            order.push(id).map_err(|_| MenuError::CycleDetected)?;
            for &child in &self.get(id)?.children {
                if order.contains(&child) || stack.contains(&child) {
                    return Err(MenuError::CycleDetected);
                }
                stack.push(child).map_err(|_| MenuError::CycleDetected)?;
            }
        }

        if let Some(parent) = self.get(node)?.parent {
            match self.remove_child(parent, node) {
                // A temporary parent link (alarm page) has no matching child entry.
                Ok(()) | Err(MenuError::NotFound | MenuError::StaleNode) => {}
                Err(e) => return Err(e),
            }
        }

        for &id in order.iter().rev() {
            self.free(id);
        }
        Ok(order.len())
    }

    fn free(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if slot.generation == id.generation() && slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.live = self.live.saturating_sub(1);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn force_child(&mut self, parent: NodeId, child: NodeId) {
        if let Ok(node) = self.get_mut(parent) {
            let _ = node.children.push(child);
        }
    }
}

impl<E, const N: usize> Default for NodePool<'_, E, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_index(index: usize) -> Result<u16, MenuError> {
    u16::try_from(index).map_err(|_| MenuError::OutOfMemory)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Pool = NodePool<'static, (), 8>;

    fn leaf(pool: &mut Pool, name: &str) -> NodeId {
        pool.create(name, NodeKind::Custom, Content::Empty).unwrap()
    }

    #[test]
    fn create_fails_when_full() {
        let mut pool = Pool::new();
        for i in 0..8 {
            leaf(&mut pool, if i % 2 == 0 { "a" } else { "b" });
        }
        assert_eq!(
            pool.create("x", NodeKind::Custom, Content::Empty),
            Err(MenuError::OutOfMemory)
        );
        assert_eq!(pool.len(), 8);
    }

    #[test]
    fn freed_slot_is_reused_and_old_id_goes_stale() {
        let mut pool = Pool::new();
        let a = leaf(&mut pool, "a");
        assert_eq!(pool.delete_subtree(a), Ok(1));
        let b = leaf(&mut pool, "b");
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert_eq!(pool.get(a).err(), Some(MenuError::StaleNode));
        assert_eq!(pool.get(b).unwrap().label(), "b");
    }

    #[test]
    fn ids_skip_freed_slots() {
        let mut pool = Pool::new();
        let a = leaf(&mut pool, "a");
        let b = leaf(&mut pool, "b");
        let c = leaf(&mut pool, "c");
        pool.delete_subtree(b).unwrap();
        let ids: heapless::Vec<NodeId, 8> = pool.ids().collect();
        assert_eq!(ids.as_slice(), &[a, c]);
    }

    #[test]
    fn add_child_sets_parent_and_rejects_duplicates() {
        let mut pool = Pool::new();
        let p = leaf(&mut pool, "p");
        let c = leaf(&mut pool, "c");
        pool.add_child(p, c).unwrap();
        assert_eq!(pool.get(c).unwrap().parent(), Some(p));
        assert_eq!(pool.add_child(p, c), Err(MenuError::DuplicateChild));
        assert_eq!(pool.get(p).unwrap().children(), &[c]);
    }

    #[test]
    fn add_child_rejects_second_parent_and_cycles() {
        let mut pool = Pool::new();
        let a = leaf(&mut pool, "a");
        let b = leaf(&mut pool, "b");
        let c = leaf(&mut pool, "c");
        pool.add_child(a, b).unwrap();
        assert_eq!(pool.add_child(c, b), Err(MenuError::DuplicateChild));
        assert_eq!(pool.add_child(b, a), Err(MenuError::CycleDetected));
        assert_eq!(pool.add_child(a, a), Err(MenuError::CycleDetected));
    }

    #[test]
    fn remove_child_adjusts_selection() {
        let mut pool = Pool::new();
        let p = leaf(&mut pool, "p");
        let kids: std::vec::Vec<NodeId> = (0..4).map(|_| leaf(&mut pool, "k")).collect();
        for &k in &kids {
            pool.add_child(p, k).unwrap();
        }

        pool.get_mut(p).unwrap().selected = 2;
        pool.remove_child(p, kids[2]).unwrap();
        assert_eq!(pool.get(p).unwrap().selected_index(), 1, "selected slot removed");

        pool.get_mut(p).unwrap().selected = 2;
        pool.remove_child(p, kids[0]).unwrap();
        assert_eq!(pool.get(p).unwrap().selected_index(), 1, "slot before selection removed");

        pool.get_mut(p).unwrap().selected = 0;
        pool.remove_child(p, kids[1]).unwrap();
        assert_eq!(pool.get(p).unwrap().selected_index(), 0);
        pool.remove_child(p, kids[3]).unwrap();
        assert_eq!(pool.get(p).unwrap().selected_index(), 0, "empty list");
        assert_eq!(pool.get(kids[3]).unwrap().parent(), None);
        assert_eq!(pool.remove_child(p, kids[3]), Err(MenuError::NotFound));
    }

    #[test]
    fn delete_subtree_frees_descendants_and_detaches() {
        let mut pool = Pool::new();
        let root = leaf(&mut pool, "root");
        let mid = leaf(&mut pool, "mid");
        let a = leaf(&mut pool, "a");
        let b = leaf(&mut pool, "b");
        pool.add_child(root, mid).unwrap();
        pool.add_child(mid, a).unwrap();
        pool.add_child(mid, b).unwrap();

        assert_eq!(pool.delete_subtree(mid), Ok(3));
        assert_eq!(pool.len(), 1);
        assert!(pool.get(root).unwrap().children().is_empty());
        assert!(!pool.contains(a));
    }

    #[test]
    fn delete_subtree_rejects_corrupted_tree_untouched() {
        let mut pool = Pool::new();
        let a = leaf(&mut pool, "a");
        let b = leaf(&mut pool, "b");
        pool.add_child(a, b).unwrap();
        pool.force_child(b, a);

        assert_eq!(pool.delete_subtree(a), Err(MenuError::CycleDetected));
        assert_eq!(pool.len(), 2);
        assert!(pool.contains(a) && pool.contains(b));
    }

    #[test]
    fn delete_subtree_rejects_shared_child() {
        let mut pool = Pool::new();
        let root = leaf(&mut pool, "root");
        let x = leaf(&mut pool, "x");
        pool.add_child(root, x).unwrap();
        pool.force_child(root, x);
        assert_eq!(pool.delete_subtree(root), Err(MenuError::CycleDetected));
        assert_eq!(pool.len(), 2);
    }
}
