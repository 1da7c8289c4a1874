//! Bounded lock waits on the shared menu.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use menu::{Content, EventKind, MenuError, MenuEvent, MenuSystem, NodeKind, SharedMenu};
use platform::mocks::RecordingDisplay;

type Menu = MenuSystem<'static, RecordingDisplay, (), 32>;

fn shared_tree() -> (SharedMenu<NoopRawMutex, Menu>, menu::NodeId, menu::NodeId) {
    let mut menu = Menu::new(RecordingDisplay::new(), ());
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let branch = menu.create("branch", NodeKind::VerticalList, Content::Empty).unwrap();
    let leaf = menu.create("leaf", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, branch).unwrap();
    menu.add_child(branch, leaf).unwrap();
    menu.start(root).unwrap();
    (SharedMenu::new(menu), root, branch)
}

#[tokio::test]
async fn delete_times_out_while_lock_is_held() {
    let (shared, root, branch) = shared_tree();
    let guard = shared.try_lock().expect("lock free");

    let result = shared.delete_subtree(branch).await;
    assert_eq!(result, Err(MenuError::LockTimeout));

    assert_eq!(guard.pool().len(), 3, "tree untouched");
    assert_eq!(guard.node(root).unwrap().children(), &[branch]);
}

#[tokio::test]
async fn delete_succeeds_once_lock_is_free() {
    let (shared, root, branch) = shared_tree();
    assert_eq!(shared.delete_subtree(branch).await, Ok(2));
    let menu = shared.try_lock().unwrap();
    assert_eq!(menu.pool().len(), 1);
    assert!(menu.node(root).unwrap().children().is_empty());
}

#[tokio::test]
async fn render_skips_frame_when_lock_is_busy() {
    let (shared, _, _) = shared_tree();
    {
        let _guard = shared.try_lock().unwrap();
        assert_eq!(shared.render_if_due(0).await, Err(MenuError::LockTimeout));
    }
    assert_eq!(shared.render_if_due(0).await, Ok(true));
    assert_eq!(shared.render_if_due(10).await, Ok(false), "nothing changed");
}

#[tokio::test]
async fn events_and_structure_changes_go_through_the_lock() {
    let (shared, root, branch) = shared_tree();
    shared
        .process_event(MenuEvent::new(EventKind::Activate, 1_000))
        .await
        .unwrap();
    assert_eq!(shared.try_lock().unwrap().current(), Some(branch));
    assert_eq!(
        shared.remove_child(root, branch).await,
        Err(MenuError::Protected)
    );
    shared
        .process_event(MenuEvent::new(EventKind::Confirm, 2_000))
        .await
        .unwrap();
    shared.remove_child(root, branch).await.unwrap();
    shared.add_child(root, branch).await.unwrap();
    assert_eq!(shared.try_lock().unwrap().node(branch).unwrap().parent(), Some(root));
}
