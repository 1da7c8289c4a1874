//! Lock-guarded access to a [`MenuSystem`] shared between tasks.
//!
//! The mutex plays the role of the display lock: rendering and tree mutation
//! both need it. Every acquisition is bounded; a timeout surfaces as
//! [`MenuError::LockTimeout`] and the menu is left untouched.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_time::{with_timeout, Duration};
use platform::config::{DELETE_LOCK_TIMEOUT_MS, RENDER_LOCK_TIMEOUT_MS};
use platform::Display;

use crate::error::MenuError;
use crate::event::MenuEvent;
use crate::node::NodeId;
use crate::system::MenuSystem;

/// Longest wait for the lock before a render is skipped.
pub const RENDER_LOCK_TIMEOUT: Duration = Duration::from_millis(RENDER_LOCK_TIMEOUT_MS);

/// Longest wait for the lock before a structural change gives up.
pub const MUTATION_LOCK_TIMEOUT: Duration = Duration::from_millis(DELETE_LOCK_TIMEOUT_MS);

/// A value behind an async mutex with bounded lock waits.
pub struct SharedMenu<M: RawMutex, T> {
    inner: Mutex<M, T>,
}

impl<M: RawMutex, T> SharedMenu<M, T> {
    /// Wrap `value`.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Lock, waiting at most `timeout`.
    pub async fn lock_within(&self, timeout: Duration) -> Result<MutexGuard<'_, M, T>, MenuError> {
        with_timeout(timeout, self.inner.lock()).await.map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("menu: display lock timeout");
            MenuError::LockTimeout
        })
    }

    /// Lock without waiting.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, M, T>> {
        self.inner.try_lock().ok()
    }
}

impl<'a, M: RawMutex, D: Display, E, const N: usize> SharedMenu<M, MenuSystem<'a, D, E, N>> {
    /// [`MenuSystem::delete_subtree`] under the lock.
    pub async fn delete_subtree(&self, node: NodeId) -> Result<usize, MenuError> {
        self.lock_within(MUTATION_LOCK_TIMEOUT).await?.delete_subtree(node)
    }

    /// [`MenuSystem::add_child`] under the lock.
    pub async fn add_child(&self, parent: NodeId, child: NodeId) -> Result<(), MenuError> {
        self.lock_within(MUTATION_LOCK_TIMEOUT).await?.add_child(parent, child)
    }

    /// [`MenuSystem::remove_child`] under the lock.
    pub async fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), MenuError> {
        self.lock_within(MUTATION_LOCK_TIMEOUT)
            .await?
            .remove_child(parent, child)
    }

    /// [`MenuSystem::process_event`] under the lock.
    pub async fn process_event(&self, event: MenuEvent) -> Result<(), MenuError> {
        self.lock_within(MUTATION_LOCK_TIMEOUT)
            .await?
            .process_event(event)
    }

    /// Render if a frame is due. Returns whether a frame was drawn.
    pub async fn render_if_due(&self, now_ms: u64) -> Result<bool, MenuError> {
        let mut menu = self.lock_within(RENDER_LOCK_TIMEOUT).await?;
        if !menu.refresh_due(now_ms) {
            return Ok(false);
        }
        menu.render(now_ms)?;
        Ok(true)
    }
}
