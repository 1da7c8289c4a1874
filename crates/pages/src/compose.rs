//! Builds the sensor panel's menu tree from the page set.

use menu::{Content, MenuError, MenuSystem, NodeId, NodeKind, PageBehavior};
use platform::Display;

use crate::alarm::AlarmPage;
use crate::icons::{self, ICON_BYTES};
use crate::index::IndexPage;
use crate::light::LightPage;
use crate::param_setting::ParamSettingPage;
use crate::pm25::Pm25Page;
use crate::set_date::SetDatePage;
use crate::set_time::SetTimePage;
use crate::tandh::TandhPage;
use crate::wifi_status::WifiStatusPage;
use crate::Environment;

/// One instance of every page. Lives as long as the menu that points at it.
#[derive(Debug, Default)]
pub struct Pages {
    /// Home screen.
    pub index: IndexPage,
    /// Temperature and humidity.
    pub tandh: TandhPage,
    /// Ambient light.
    pub light: LightPage,
    /// PM2.5.
    pub pm25: Pm25Page,
    /// Link status.
    pub wifi: WifiStatusPage,
    /// Interval editor.
    pub params: ParamSettingPage,
    /// Date editor.
    pub set_date: SetDatePage,
    /// Time editor.
    pub set_time: SetTimePage,
    /// Alarm overlay.
    pub alarm: AlarmPage,
}

impl Pages {
    /// Every page off screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: IndexPage::new(),
            tandh: TandhPage::new(),
            light: LightPage::new(),
            pm25: Pm25Page::new(),
            wifi: WifiStatusPage::new(),
            params: ParamSettingPage::new(),
            set_date: SetDatePage::new(),
            set_time: SetTimePage::new(),
            alarm: AlarmPage::new(),
        }
    }
}

/// Handles of the nodes created by [`build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuIds {
    /// Root.
    pub index: NodeId,
    /// Main carousel.
    pub main: NodeId,
    /// Temperature and humidity page.
    pub tandh: NodeId,
    /// Light page.
    pub light: NodeId,
    /// PM2.5 page.
    pub pm25: NodeId,
    /// Link status page.
    pub wifi: NodeId,
    /// Settings list.
    pub settings: NodeId,
    /// Time editor.
    pub set_time: NodeId,
    /// Date editor.
    pub set_date: NodeId,
    /// Interval editor.
    pub params: NodeId,
    /// Alarm overlay (not in the tree).
    pub alarm: NodeId,
}

/// Create the whole tree in `menu`, register the alarm page and start at the
/// home screen.
///
/// Fails if the pool or a child list is too small; a partially built tree is
/// left in place in that case.
pub fn build<'a, D, E, const N: usize>(
    menu: &mut MenuSystem<'a, D, E, N>,
    pages: &'a mut Pages,
) -> Result<MenuIds, MenuError>
where
    D: Display,
    E: Environment + 'a,
{
    let Pages {
        index,
        tandh,
        light,
        pm25,
        wifi,
        params,
        set_date,
        set_time,
        alarm,
    } = pages;

    let root = menu.create("Index", NodeKind::Custom, Content::Custom { icon: None })?;
    menu.set_behavior(root, index)?;

    let main = menu.create("Main Menu", NodeKind::HorizontalIconCarousel, Content::Empty)?;
    menu.add_child(root, main)?;

    let tandh = page(menu, main, "Temp&Humid", Some(&icons::CLIMATE), tandh)?;
    let light = page(menu, main, "Light", Some(&icons::LIGHT), light)?;
    let pm25 = page(menu, main, "PM2.5", Some(&icons::PM25), pm25)?;
    let wifi = page(menu, main, "WiFi", Some(&icons::WIFI), wifi)?;

    let settings = menu.create(
        "Settings",
        NodeKind::VerticalList,
        Content::Icon(icons::icon(&icons::SETTINGS)),
    )?;
    menu.add_child(main, settings)?;
    let set_time = page(menu, settings, "Set Time", None, set_time)?;
    let set_date = page(menu, settings, "Set Date", None, set_date)?;
    let params = page(menu, settings, "Parameters", None, params)?;

    let alarm_id = menu.create(
        "Alarm",
        NodeKind::Custom,
        Content::Custom {
            icon: Some(icons::icon(&icons::BELL)),
        },
    )?;
    menu.set_behavior(alarm_id, alarm)?;
    menu.set_alarm_page(alarm_id)?;

    menu.start(root)?;
    #[cfg(feature = "defmt")]
    defmt::info!("menu tree built: {} nodes", menu.pool().len());

    Ok(MenuIds {
        index: root,
        main,
        tandh,
        light,
        pm25,
        wifi,
        settings,
        set_time,
        set_date,
        params,
        alarm: alarm_id,
    })
}

/// Create a custom page node under `parent`.
fn page<'a, D, E, const N: usize>(
    menu: &mut MenuSystem<'a, D, E, N>,
    parent: NodeId,
    label: &str,
    icon: Option<&'static [u8; ICON_BYTES]>,
    behavior: &'a mut (dyn PageBehavior<E> + 'a),
) -> Result<NodeId, MenuError>
where
    D: Display,
{
    let id = menu.create(
        label,
        NodeKind::Custom,
        Content::Custom {
            icon: icon.map(icons::icon),
        },
    )?;
    menu.set_behavior(id, behavior)?;
    menu.add_child(parent, id)?;
    Ok(id)
}
