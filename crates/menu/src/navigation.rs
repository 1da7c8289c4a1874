//! Navigation controller: moving the active node around the tree.
//!
//! Every transition runs the same sequence: `on_exit` of the node being left,
//! swap in the layout defaults of the new node's kind, reset pagination,
//! `on_enter` of the new node. Each hook runs exactly once per transition.

use platform::Display;

use crate::error::MenuError;
use crate::layout::{wrap_next, wrap_prev, LayoutConfig, Pagination};
use crate::node::{NodeId, NodeKind};
use crate::system::MenuSystem;

/// Direction of a selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Previous,
    Next,
}

impl<D: Display, E, const N: usize> MenuSystem<'_, D, E, N> {
    /// Make `root` the tree root and enter it.
    ///
    /// The root must not have a parent.
    pub fn start(&mut self, root: NodeId) -> Result<(), MenuError> {
        if self.pool.get(root)?.parent.is_some() {
            return Err(MenuError::Protected);
        }
        self.root = Some(root);
        #[cfg(feature = "defmt")]
        defmt::info!("menu: started at node {}", root.index());
        self.enter(root)
    }

    /// Make `node` the active node.
    ///
    /// `node` must be reachable from the root; a detached node (or any node
    /// before [`MenuSystem::start`]) is `NotFound` and changes nothing.
    pub fn enter(&mut self, node: NodeId) -> Result<(), MenuError> {
        let kind = self.pool.get(node)?.kind;
        let root = self.root.ok_or(MenuError::NotFound)?;
        if !self.pool.is_ancestor(root, node)? {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: node {} is not in the tree", node.index());
            return Err(MenuError::NotFound);
        }
        if let Some(previous) = self.current {
            self.invoke(previous, |page, cx| page.on_exit(cx));
        }
        self.activate(node, kind);
        self.invoke(node, |page, cx| page.on_enter(cx));
        #[cfg(feature = "defmt")]
        defmt::debug!("menu: entered node {}", node.index());
        Ok(())
    }

    /// Return to the active node's parent, blanking the display.
    ///
    /// Fails with `NoParent` (and changes nothing) when there is no active
    /// node or it has no parent.
    pub fn back_to_parent(&mut self) -> Result<(), MenuError> {
        let current = self.current.ok_or(MenuError::NoParent)?;
        let parent = self.pool.get(current)?.parent.ok_or(MenuError::NoParent)?;
        let kind = self.pool.get(parent)?.kind;

        self.invoke(current, |page, cx| page.on_exit(cx));
        if self.alarm == Some(current) {
            // The alarm page only borrowed its parent for this visit.
            self.pool.get_mut(current)?.parent = None;
        }
        self.display.clear();
        self.activate(parent, kind);
        self.invoke(parent, |page, cx| page.on_enter(cx));
        #[cfg(feature = "defmt")]
        defmt::debug!("menu: back to node {}", parent.index());
        Ok(())
    }

    /// Enter the active node's selected child.
    ///
    /// Runs the child's `on_select`, then the regular [`MenuSystem::enter`]
    /// sequence, so the child's `on_enter` runs once.
    pub fn enter_selected(&mut self) -> Result<(), MenuError> {
        let current = self.current.ok_or(MenuError::NoChildren)?;
        let target = self
            .pool
            .get(current)?
            .selected_child()
            .ok_or(MenuError::NoChildren)?;
        self.invoke(target, |page, cx| page.on_select(cx));
        self.pool.get_mut(target)?.parent = Some(current);
        self.enter(target)
    }

    /// Move the selection of `node` one step, wrapping around.
    pub(crate) fn step_selection(&mut self, node: NodeId, step: Step) -> Result<(), MenuError> {
        let entry = self.pool.get_mut(node)?;
        let count = entry.children.len();
        if count == 0 {
            return Ok(());
        }
        entry.selected = match step {
            Step::Previous => wrap_prev(entry.selected, count),
            Step::Next => wrap_next(entry.selected, count),
        };
        self.refresh_selection_flags(node)?;
        self.sync_pagination();
        self.needs_refresh = true;
        Ok(())
    }

    /// Select child `index` of `node`.
    pub fn select(&mut self, node: NodeId, index: usize) -> Result<(), MenuError> {
        let entry = self.pool.get_mut(node)?;
        if index >= entry.children.len() {
            return Err(MenuError::NotFound);
        }
        entry.selected = index;
        self.refresh_selection_flags(node)?;
        self.sync_pagination();
        self.needs_refresh = true;
        Ok(())
    }

    fn activate(&mut self, node: NodeId, kind: NodeKind) {
        self.current = Some(node);
        self.active = true;
        self.needs_refresh = true;
        self.layout = LayoutConfig::for_kind(kind);
        self.pagination = Pagination::new(self.layout.items_per_page());
        self.sync_pagination();
    }
}
