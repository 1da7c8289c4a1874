//! The menu system: tree, active node, layout state and rendering.
//!
//! Navigation lives in [`crate::navigation`], event dispatch in
//! [`crate::dispatch`]; both are further `impl` blocks on [`MenuSystem`].

use platform::config::{MAX_NODES, REFRESH_INTERVAL_MS};
use platform::Display;

use crate::behavior::{PageBehavior, PageCx};
use crate::error::MenuError;
use crate::event::Debouncer;
use crate::layout::{self, LayoutConfig, Pagination};
use crate::node::{Content, Geometry, MenuNode, NodeId, NodeKind};
use crate::pool::NodePool;

/// Menu tree plus navigation state, owning the display and the board services.
///
/// All tree mutation and rendering go through `&mut self`, so they can never
/// interleave. Across tasks the system is shared through
/// [`SharedMenu`](crate::shared::SharedMenu), whose mutex is the display lock.
pub struct MenuSystem<'a, D, E, const N: usize = MAX_NODES> {
    pub(crate) pool: NodePool<'a, E, N>,
    pub(crate) display: D,
    pub(crate) env: E,
    pub(crate) root: Option<NodeId>,
    pub(crate) current: Option<NodeId>,
    pub(crate) alarm: Option<NodeId>,
    pub(crate) active: bool,
    pub(crate) needs_refresh: bool,
    pub(crate) layout: LayoutConfig,
    pub(crate) pagination: Pagination,
    pub(crate) debouncer: Debouncer,
    pub(crate) now_ms: u64,
    pub(crate) last_render_ms: Option<u64>,
}

impl<'a, D: Display, E, const N: usize> MenuSystem<'a, D, E, N> {
    /// Empty, inactive system.
    pub fn new(display: D, env: E) -> Self {
        let layout = LayoutConfig::for_kind(NodeKind::Custom);
        Self {
            pool: NodePool::new(),
            display,
            env,
            root: None,
            current: None,
            alarm: None,
            active: false,
            needs_refresh: false,
            layout,
            pagination: Pagination::new(layout.items_per_page()),
            debouncer: Debouncer::default(),
            now_ms: 0,
            last_render_ms: None,
        }
    }

    /// Replace the key debouncer (e.g. a different window).
    #[must_use]
    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    // ── Tree construction ────────────────────────────────────────────────

    /// Allocate a detached node.
    pub fn create(
        &mut self,
        label: &str,
        kind: NodeKind,
        content: Content,
    ) -> Result<NodeId, MenuError> {
        self.pool.create(label, kind, content).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: cannot create node: {}", e);
            e
        })
    }

    /// Attach a page behavior to a node.
    pub fn set_behavior(
        &mut self,
        node: NodeId,
        behavior: &'a mut (dyn PageBehavior<E> + 'a),
    ) -> Result<(), MenuError> {
        self.pool.set_behavior(node, behavior)
    }

    /// Override a node's geometry.
    pub fn set_position(&mut self, node: NodeId, geometry: Geometry) -> Result<(), MenuError> {
        self.pool.set_position(node, geometry)?;
        self.needs_refresh = true;
        Ok(())
    }

    /// Append `child` to `parent`. See [`NodePool::add_child`].
    ///
    /// The root cannot become anyone's child (`Protected`).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), MenuError> {
        if self.root == Some(child) {
            return Err(MenuError::Protected);
        }
        self.pool.add_child(parent, child).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: add_child rejected: {}", e);
            e
        })?;
        if let Ok(node) = self.pool.get_mut(child) {
            node.flags.selected = false;
        }
        self.refresh_selection_flags(parent)?;
        self.structure_changed();
        Ok(())
    }

    /// Detach `child` from `parent`. See [`NodePool::remove_child`].
    ///
    /// Detaching the active node or one of its ancestors would strand the
    /// active node outside the tree and is `Protected`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), MenuError> {
        if self.on_active_path(child)? {
            return Err(MenuError::Protected);
        }
        self.pool.remove_child(parent, child)?;
        if let Ok(node) = self.pool.get_mut(child) {
            node.flags.selected = false;
        }
        self.refresh_selection_flags(parent)?;
        self.structure_changed();
        Ok(())
    }

    /// Free `node` and its descendants.
    ///
    /// The root and every node on the active node's parent chain (the active
    /// node included) are `Protected`: deleting them would leave the menu
    /// without a valid current node.
    pub fn delete_subtree(&mut self, node: NodeId) -> Result<usize, MenuError> {
        self.pool.get(node)?;
        if self.root == Some(node) {
            return Err(MenuError::Protected);
        }
        if self.on_active_path(node)? {
            return Err(MenuError::Protected);
        }
        let parent = self.pool.get(node)?.parent;
        let freed = self.pool.delete_subtree(node)?;
        if let Some(parent) = parent {
            // A temporary parent link does not own the node; nothing to refresh.
            let _ = self.refresh_selection_flags(parent);
        }
        if self.alarm.is_some_and(|alarm| !self.pool.contains(alarm)) {
            self.alarm = None;
        }
        self.structure_changed();
        #[cfg(feature = "defmt")]
        defmt::debug!("menu: deleted {} node(s)", freed);
        Ok(freed)
    }

    /// Register the detached page shown when an alarm fires.
    ///
    /// The page must not be part of the tree (`DuplicateChild` otherwise).
    pub fn set_alarm_page(&mut self, node: NodeId) -> Result<(), MenuError> {
        if self.pool.get(node)?.parent.is_some() {
            return Err(MenuError::DuplicateChild);
        }
        self.alarm = Some(node);
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Node storage, read-only.
    pub fn pool(&self) -> &NodePool<'a, E, N> {
        &self.pool
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&MenuNode<'a, E>, MenuError> {
        self.pool.get(id)
    }

    /// Tree root, set by [`MenuSystem::start`].
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Active node.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Alarm page, if registered.
    pub fn alarm_page(&self) -> Option<NodeId> {
        self.alarm
    }

    /// Whether navigation is live.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pause or resume key handling. Alarms are handled either way.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Dirty flag.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Request a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_refresh = true;
    }

    /// Layout parameters of the active node's kind.
    pub fn layout(&self) -> LayoutConfig {
        self.layout
    }

    /// List pagination of the active node.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// The owned display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The owned display, mutably.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Board services.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Board services, mutably.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    // ── Rendering ────────────────────────────────────────────────────────

    /// Whether the menu task should render at `now_ms`: the frame is dirty,
    /// nothing was rendered yet, or more than the refresh interval passed.
    pub fn refresh_due(&self, now_ms: u64) -> bool {
        self.needs_refresh
            || self
                .last_render_ms
                .map_or(true, |last| now_ms.saturating_sub(last) > REFRESH_INTERVAL_MS)
    }

    /// Draw the active node with its kind's layout and clear the dirty flag.
    pub fn render(&mut self, now_ms: u64) -> Result<(), MenuError> {
        self.now_ms = now_ms;
        let Some(current) = self.current else {
            return Ok(());
        };
        let kind = self.pool.get(current)?.kind;
        match kind {
            NodeKind::HorizontalIconCarousel => {
                let node = self.pool.get(current)?;
                layout::render_carousel(&self.pool, node, &mut self.display)?;
            }
            NodeKind::VerticalList => {
                let node = self.pool.get(current)?;
                layout::render_list(&self.pool, node, &self.pagination, &mut self.display)?;
            }
            NodeKind::Custom => {
                self.invoke(current, |page, cx| page.draw(cx));
                self.display.present();
            }
        }
        self.needs_refresh = false;
        self.last_render_ms = Some(now_ms);
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// Run a hook of `node`'s behavior, if it has one.
    pub(crate) fn invoke<R>(
        &mut self,
        node: NodeId,
        hook: impl FnOnce(&mut (dyn PageBehavior<E> + 'a), &mut PageCx<'_, E>) -> R,
    ) -> Option<R> {
        let now_ms = self.now_ms;
        let page = self.pool.get_mut(node).ok()?.behavior.as_deref_mut()?;
        let mut cx = PageCx {
            display: &mut self.display,
            env: &mut self.env,
            now_ms,
        };
        Some(hook(page, &mut cx))
    }

    /// Mirror `selected_child_index` into the children's `selected` flags.
    pub(crate) fn refresh_selection_flags(&mut self, parent: NodeId) -> Result<(), MenuError> {
        let node = self.pool.get(parent)?;
        let selected = node.selected_child();
        let children = node.children.clone();
        for child in children {
            if let Ok(c) = self.pool.get_mut(child) {
                c.flags.selected = Some(child) == selected;
            }
        }
        Ok(())
    }

    /// Keep pagination consistent with the active list after a selection or
    /// structure change.
    pub(crate) fn sync_pagination(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        if let Ok(node) = self.pool.get(current) {
            if node.kind == NodeKind::VerticalList {
                self.pagination.update(node.children.len(), node.selected);
            }
        }
    }

    /// Whether `node` is the active node or one of its ancestors.
    fn on_active_path(&self, node: NodeId) -> Result<bool, MenuError> {
        match self.current {
            Some(current) => self.pool.is_ancestor(node, current),
            None => Ok(false),
        }
    }

    fn structure_changed(&mut self) {
        self.sync_pagination();
        self.needs_refresh = true;
    }
}
