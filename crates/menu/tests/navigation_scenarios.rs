//! Navigation and dispatch scenarios: wraparound, pagination, protection,
//! duplicate children, hook ordering, debounce and alarms.
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use menu::{
    Content, EventKind, KeyResponse, MenuError, MenuEvent, MenuSystem, NodeKind, PageBehavior,
    PageCx,
};
use platform::mocks::RecordingDisplay;

type Log = Vec<(&'static str, &'static str)>;
type Menu<'a> = MenuSystem<'a, RecordingDisplay, Log, 32>;

/// Records every hook call into the shared log.
struct HookLog {
    name: &'static str,
    response: KeyResponse,
}

impl HookLog {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            response: KeyResponse::Unhandled,
        }
    }

    fn answering(name: &'static str, response: KeyResponse) -> Self {
        Self { name, response }
    }
}

impl PageBehavior<Log> for HookLog {
    fn on_enter(&mut self, cx: &mut PageCx<'_, Log>) {
        cx.env.push((self.name, "enter"));
    }

    fn on_exit(&mut self, cx: &mut PageCx<'_, Log>) {
        cx.env.push((self.name, "exit"));
    }

    fn on_select(&mut self, cx: &mut PageCx<'_, Log>) {
        cx.env.push((self.name, "select"));
    }

    fn on_key(&mut self, _event: &MenuEvent, cx: &mut PageCx<'_, Log>) -> KeyResponse {
        cx.env.push((self.name, "key"));
        self.response
    }

    fn draw(&mut self, cx: &mut PageCx<'_, Log>) {
        cx.display.draw_text(0, 0, self.name);
    }
}

fn key(kind: EventKind, at_ms: u64) -> MenuEvent {
    MenuEvent::new(kind, at_ms)
}

fn new_menu<'a>() -> Menu<'a> {
    Menu::new(RecordingDisplay::new(), Log::new())
}

#[test]
fn scenario_a_two_item_carousel_wraps_after_two_steps() {
    let mut menu = new_menu();
    let root = menu
        .create("root", NodeKind::HorizontalIconCarousel, Content::Empty)
        .unwrap();
    let a = menu.create("PageA", NodeKind::Custom, Content::Empty).unwrap();
    let b = menu.create("PageB", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, a).unwrap();
    menu.add_child(root, b).unwrap();
    menu.start(root).unwrap();

    menu.process_event(key(EventKind::Next, 1_000)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 1);
    menu.process_event(key(EventKind::Next, 2_000)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 0);
}

#[test]
fn carousel_previous_from_first_wraps_to_last() {
    let mut menu = new_menu();
    let root = menu
        .create("root", NodeKind::HorizontalIconCarousel, Content::Empty)
        .unwrap();
    for _ in 0..5 {
        let c = menu.create("c", NodeKind::Custom, Content::Empty).unwrap();
        menu.add_child(root, c).unwrap();
    }
    menu.start(root).unwrap();
    menu.process_event(key(EventKind::Previous, 1_000)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 4);
    menu.process_event(key(EventKind::Next, 2_000)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 0);
}

#[test]
fn scenario_b_list_of_ten_pages_by_four() {
    let mut menu = new_menu();
    let list = menu.create("list", NodeKind::VerticalList, Content::Empty).unwrap();
    for _ in 0..10 {
        let c = menu.create("item", NodeKind::Custom, Content::Empty).unwrap();
        menu.add_child(list, c).unwrap();
    }
    menu.start(list).unwrap();
    menu.select(list, 7).unwrap();
    let p = menu.pagination();
    assert_eq!(p.current_page, 1);
    assert_eq!(p.total_pages, 3);
}

#[test]
fn list_next_walks_pages_and_wraps() {
    let mut menu = new_menu();
    let list = menu.create("list", NodeKind::VerticalList, Content::Empty).unwrap();
    for _ in 0..6 {
        let c = menu.create("item", NodeKind::Custom, Content::Empty).unwrap();
        menu.add_child(list, c).unwrap();
    }
    menu.start(list).unwrap();
    for step in 1..=4u64 {
        menu.process_event(key(EventKind::Next, step * 1_000)).unwrap();
    }
    assert_eq!(menu.node(list).unwrap().selected_index(), 4);
    assert_eq!(menu.pagination().current_page, 1);
    menu.process_event(key(EventKind::Next, 5_000)).unwrap();
    menu.process_event(key(EventKind::Next, 6_000)).unwrap();
    assert_eq!(menu.node(list).unwrap().selected_index(), 0);
    assert_eq!(menu.pagination().current_page, 0);
}

#[test]
fn scenario_c_root_is_protected() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let child = menu.create("child", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, child).unwrap();
    menu.start(root).unwrap();

    assert_eq!(menu.delete_subtree(root), Err(MenuError::Protected));
    assert_eq!(menu.pool().len(), 2);
    assert_eq!(menu.node(root).unwrap().children(), &[child]);
}

#[test]
fn active_node_and_its_ancestors_are_protected() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let mid = menu.create("mid", NodeKind::VerticalList, Content::Empty).unwrap();
    let leaf = menu.create("leaf", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, mid).unwrap();
    menu.add_child(mid, leaf).unwrap();
    menu.start(root).unwrap();
    menu.enter_selected().unwrap();
    menu.enter_selected().unwrap();
    assert_eq!(menu.current(), Some(leaf));

    assert_eq!(menu.delete_subtree(leaf), Err(MenuError::Protected));
    assert_eq!(menu.delete_subtree(mid), Err(MenuError::Protected));
    assert_eq!(menu.remove_child(root, mid), Err(MenuError::Protected));

    menu.back_to_parent().unwrap();
    menu.back_to_parent().unwrap();
    assert_eq!(menu.delete_subtree(mid), Ok(2));
    assert!(menu.node(root).unwrap().children().is_empty());
}

#[test]
fn scenario_d_duplicate_child_rejected() {
    let mut menu = new_menu();
    let p = menu.create("P", NodeKind::VerticalList, Content::Empty).unwrap();
    let c = menu.create("C", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(p, c).unwrap();
    assert_eq!(menu.add_child(p, c), Err(MenuError::DuplicateChild));
    assert_eq!(menu.node(p).unwrap().children().len(), 1);
}

#[test]
fn scenario_e_enter_selected_runs_each_hook_once() {
    let mut parent_page = HookLog::new("parent");
    let mut leaf_page = HookLog::new("leaf");
    let mut menu = new_menu();
    let parent = menu
        .create("parent", NodeKind::HorizontalIconCarousel, Content::Empty)
        .unwrap();
    let leaf = menu
        .create("leaf", NodeKind::Custom, Content::Custom { icon: None })
        .unwrap();
    menu.add_child(parent, leaf).unwrap();
    menu.set_behavior(parent, &mut parent_page).unwrap();
    menu.set_behavior(leaf, &mut leaf_page).unwrap();
    menu.start(parent).unwrap();
    menu.env_mut().clear();

    menu.enter_selected().unwrap();

    assert_eq!(
        menu.env(),
        &vec![("leaf", "select"), ("parent", "exit"), ("leaf", "enter")],
        "on_select, then the parent's on_exit, then a single on_enter"
    );
    assert_eq!(menu.current(), Some(leaf));
    assert_eq!(menu.layout(), menu::LayoutConfig::Custom);
}

#[test]
fn enter_then_back_restores_current_with_hooks_in_order() {
    let mut root_page = HookLog::new("root");
    let mut child_page = HookLog::new("child");
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let child = menu.create("child", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, child).unwrap();
    menu.set_behavior(root, &mut root_page).unwrap();
    menu.set_behavior(child, &mut child_page).unwrap();
    menu.start(root).unwrap();
    menu.enter(child).unwrap();
    menu.env_mut().clear();
    menu.display_mut().reset();

    menu.back_to_parent().unwrap();

    assert_eq!(menu.current(), Some(root));
    assert_eq!(menu.env(), &vec![("child", "exit"), ("root", "enter")]);
    assert_eq!(menu.display().clear_count(), 1, "display blanked on back");
    assert_eq!(menu.layout(), menu::LayoutConfig::List { items_per_page: 4 });
}

#[test]
fn entering_a_detached_node_is_refused() {
    let mut loose_page = HookLog::new("loose");
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let child = menu.create("child", NodeKind::Custom, Content::Empty).unwrap();
    let loose = menu.create("loose", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, child).unwrap();
    menu.set_behavior(loose, &mut loose_page).unwrap();

    assert_eq!(menu.enter(loose), Err(MenuError::NotFound), "not started");
    menu.start(root).unwrap();
    assert_eq!(menu.enter(loose), Err(MenuError::NotFound));
    assert_eq!(menu.current(), Some(root));
    assert!(menu.env().is_empty(), "no hooks ran");

    // A node detached from the tree cannot be entered either.
    menu.remove_child(root, child).unwrap();
    assert_eq!(menu.enter(child), Err(MenuError::NotFound));
    assert_eq!(menu.current(), Some(root));
}

#[test]
fn back_at_root_is_idempotent_no_parent() {
    let mut root_page = HookLog::new("root");
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    menu.set_behavior(root, &mut root_page).unwrap();
    menu.start(root).unwrap();
    menu.env_mut().clear();

    assert_eq!(menu.back_to_parent(), Err(MenuError::NoParent));
    assert_eq!(menu.back_to_parent(), Err(MenuError::NoParent));
    assert_eq!(menu.current(), Some(root));
    assert!(menu.env().is_empty(), "no hooks ran");
}

#[test]
fn navigation_before_start_fails_cleanly() {
    let mut menu = new_menu();
    assert_eq!(menu.back_to_parent(), Err(MenuError::NoParent));
    assert_eq!(menu.enter_selected(), Err(MenuError::NoChildren));
    assert_eq!(menu.process_event(key(EventKind::Next, 1_000)), Ok(()));
}

#[test]
fn enter_selected_without_children_fails() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    menu.start(root).unwrap();
    assert_eq!(menu.enter_selected(), Err(MenuError::NoChildren));
    assert_eq!(menu.current(), Some(root));
}

#[test]
fn debounce_drops_second_key_inside_window() {
    let mut menu = new_menu();
    let root = menu
        .create("root", NodeKind::HorizontalIconCarousel, Content::Empty)
        .unwrap();
    for _ in 0..3 {
        let c = menu.create("c", NodeKind::Custom, Content::Empty).unwrap();
        menu.add_child(root, c).unwrap();
    }
    menu.start(root).unwrap();

    menu.process_event(key(EventKind::Next, 1_000)).unwrap();
    menu.process_event(key(EventKind::Next, 1_200)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 1);
    menu.process_event(key(EventKind::Next, 1_500)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 2);
}

#[test]
fn page_handler_overrides_default_navigation() {
    let mut page = HookLog::answering("page", KeyResponse::Handled);
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let a = menu.create("a", NodeKind::Custom, Content::Empty).unwrap();
    let b = menu.create("b", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, a).unwrap();
    menu.add_child(root, b).unwrap();
    menu.set_behavior(root, &mut page).unwrap();
    menu.start(root).unwrap();
    menu.env_mut().clear();

    menu.process_event(key(EventKind::Next, 1_000)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 0, "default step skipped");
    assert_eq!(menu.env(), &vec![("page", "key")]);
    assert!(menu.needs_refresh());
}

#[test]
fn page_can_request_back_and_enter_selected() {
    let mut home = HookLog::answering("home", KeyResponse::EnterSelected);
    let mut leaf = HookLog::answering("leaf", KeyResponse::Back);
    let mut menu = new_menu();
    let root = menu.create("home", NodeKind::Custom, Content::Empty).unwrap();
    let child = menu.create("leaf", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, child).unwrap();
    menu.set_behavior(root, &mut home).unwrap();
    menu.set_behavior(child, &mut leaf).unwrap();
    menu.start(root).unwrap();

    menu.process_event(key(EventKind::Activate, 1_000)).unwrap();
    assert_eq!(menu.current(), Some(child));
    menu.process_event(key(EventKind::Confirm, 2_000)).unwrap();
    assert_eq!(menu.current(), Some(root));
}

#[test]
fn custom_without_handler_confirm_goes_back_other_keys_ignored() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let page = menu.create("page", NodeKind::Custom, Content::Empty).unwrap();
    let inner = menu.create("inner", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, page).unwrap();
    menu.add_child(page, inner).unwrap();
    menu.start(root).unwrap();
    menu.enter_selected().unwrap();

    menu.process_event(key(EventKind::Activate, 1_000)).unwrap();
    menu.process_event(key(EventKind::Next, 2_000)).unwrap();
    assert_eq!(menu.current(), Some(page));
    menu.process_event(key(EventKind::Confirm, 3_000)).unwrap();
    assert_eq!(menu.current(), Some(root));
}

#[test]
fn refresh_bypasses_debounce_and_marks_dirty() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    menu.start(root).unwrap();
    menu.render(0).unwrap();
    assert!(!menu.needs_refresh());
    menu.process_event(key(EventKind::Confirm, 1_000)).ok();
    menu.render(1_010).unwrap();
    menu.process_event(MenuEvent::refresh(1_020)).unwrap();
    assert!(menu.needs_refresh());
}

#[test]
fn inactive_menu_ignores_keys() {
    let mut menu = new_menu();
    let root = menu
        .create("root", NodeKind::HorizontalIconCarousel, Content::Empty)
        .unwrap();
    for _ in 0..2 {
        let c = menu.create("c", NodeKind::Custom, Content::Empty).unwrap();
        menu.add_child(root, c).unwrap();
    }
    menu.start(root).unwrap();
    menu.set_active(false);
    menu.process_event(key(EventKind::Next, 1_000)).unwrap();
    assert_eq!(menu.node(root).unwrap().selected_index(), 0);
}

#[test]
fn alarm_interrupts_and_returns_to_previous_node() {
    let mut alarm_page = HookLog::answering("alarm", KeyResponse::Unhandled);
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let leaf = menu.create("leaf", NodeKind::Custom, Content::Empty).unwrap();
    let alarm = menu.create("alarm", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, leaf).unwrap();
    menu.set_behavior(alarm, &mut alarm_page).unwrap();
    menu.set_alarm_page(alarm).unwrap();
    menu.start(root).unwrap();
    menu.enter_selected().unwrap();
    menu.set_active(false);
    menu.env_mut().clear();

    menu.process_event(MenuEvent::alarm(2, 1_000)).unwrap();
    assert_eq!(menu.current(), Some(alarm));
    assert_eq!(menu.node(alarm).unwrap().parent(), Some(leaf));
    assert!(menu.is_active(), "alarm reactivates navigation");
    assert_eq!(menu.env(), &vec![("alarm", "key"), ("alarm", "enter")]);

    // A second alarm only notifies the page.
    menu.process_event(MenuEvent::alarm(3, 1_100)).unwrap();
    assert_eq!(menu.node(alarm).unwrap().parent(), Some(leaf));

    menu.process_event(key(EventKind::Confirm, 2_000)).unwrap();
    assert_eq!(menu.current(), Some(leaf));
    assert_eq!(menu.node(alarm).unwrap().parent(), None, "temporary parent released");
    assert!(!menu.node(leaf).unwrap().children().contains(&alarm));
}

#[test]
fn alarm_without_registered_page_is_not_found() {
    let mut menu = new_menu();
    assert_eq!(
        menu.process_event(MenuEvent::alarm(0, 0)),
        Err(MenuError::NotFound)
    );
}

#[test]
fn alarm_before_start_is_refused_and_leaves_page_detached() {
    let mut alarm_page = HookLog::new("alarm");
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let alarm = menu.create("alarm", NodeKind::Custom, Content::Empty).unwrap();
    menu.set_behavior(alarm, &mut alarm_page).unwrap();
    menu.set_alarm_page(alarm).unwrap();

    assert_eq!(
        menu.process_event(MenuEvent::alarm(1, 0)),
        Err(MenuError::NoParent)
    );
    assert_eq!(menu.current(), None);
    assert_eq!(menu.node(alarm).unwrap().parent(), None);
    assert!(menu.env().is_empty(), "page never saw the alarm");

    // Once started the same alarm shows and can be dismissed.
    menu.start(root).unwrap();
    menu.process_event(MenuEvent::alarm(1, 100)).unwrap();
    assert_eq!(menu.current(), Some(alarm));
    menu.process_event(key(EventKind::Confirm, 1_000)).unwrap();
    assert_eq!(menu.current(), Some(root));
}

#[test]
fn alarm_page_must_be_detached() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let page = menu.create("alarm", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, page).unwrap();
    assert_eq!(menu.set_alarm_page(page), Err(MenuError::DuplicateChild));
}

#[test]
fn selection_flags_follow_selected_index() {
    let mut menu = new_menu();
    let root = menu.create("root", NodeKind::VerticalList, Content::Empty).unwrap();
    let a = menu.create("a", NodeKind::Custom, Content::Empty).unwrap();
    let b = menu.create("b", NodeKind::Custom, Content::Empty).unwrap();
    menu.add_child(root, a).unwrap();
    menu.add_child(root, b).unwrap();
    menu.start(root).unwrap();
    assert!(menu.node(a).unwrap().flags().selected);
    menu.process_event(key(EventKind::Next, 1_000)).unwrap();
    assert!(!menu.node(a).unwrap().flags().selected);
    assert!(menu.node(b).unwrap().flags().selected);
}
