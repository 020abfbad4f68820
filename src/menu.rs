//! Application menu and its accelerators. The bar is hidden except on Linux
//! (see [`crate::window::menu_bar_hidden`]).

use std::sync::Mutex;

use tauri::menu::{IsMenuItem, Menu, MenuBuilder, MenuEvent, MenuItem, Submenu, SubmenuBuilder};
use tauri::{AppHandle, Manager, Runtime, WebviewWindow};

use crate::window::MAIN_WINDOW_LABEL;

pub const ZOOM_DEFAULT: f64 = 1.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const ZOOM_MIN: f64 = 0.25;
pub const ZOOM_MAX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CloseWindow,
    Quit,
    Reload,
    ToggleDevTools,
    ResetZoom,
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
}

impl MenuAction {
    pub const ALL: [MenuAction; 8] = [
        MenuAction::CloseWindow,
        MenuAction::Quit,
        MenuAction::Reload,
        MenuAction::ToggleDevTools,
        MenuAction::ResetZoom,
        MenuAction::ZoomIn,
        MenuAction::ZoomOut,
        MenuAction::ToggleFullscreen,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MenuAction::CloseWindow => "file.close",
            MenuAction::Quit => "file.quit",
            MenuAction::Reload => "view.reload",
            MenuAction::ToggleDevTools => "view.devtools",
            MenuAction::ResetZoom => "view.zoom_reset",
            MenuAction::ZoomIn => "view.zoom_in",
            MenuAction::ZoomOut => "view.zoom_out",
            MenuAction::ToggleFullscreen => "view.fullscreen",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::CloseWindow => "Close Window",
            MenuAction::Quit => "Quit",
            MenuAction::Reload => "Reload",
            MenuAction::ToggleDevTools => "Toggle Developer Tools",
            MenuAction::ResetZoom => "Actual Size",
            MenuAction::ZoomIn => "Zoom In",
            MenuAction::ZoomOut => "Zoom Out",
            MenuAction::ToggleFullscreen => "Toggle Full Screen",
        }
    }

    pub fn accelerator(self) -> &'static str {
        match self {
            MenuAction::CloseWindow => "CmdOrCtrl+W",
            MenuAction::Quit => "CmdOrCtrl+Q",
            MenuAction::Reload => "CmdOrCtrl+R",
            MenuAction::ToggleDevTools => "CmdOrCtrl+Shift+I",
            MenuAction::ResetZoom => "CmdOrCtrl+0",
            MenuAction::ZoomIn => "CmdOrCtrl+=",
            MenuAction::ZoomOut => "CmdOrCtrl+-",
            MenuAction::ToggleFullscreen => "F11",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Action(MenuAction),
    Separator,
}

pub struct SubmenuTemplate {
    pub title: &'static str,
    pub entries: &'static [MenuEntry],
}

pub const MENU_TEMPLATE: &[SubmenuTemplate] = &[
    SubmenuTemplate {
        title: "File",
        entries: &[
            MenuEntry::Action(MenuAction::CloseWindow),
            MenuEntry::Action(MenuAction::Quit),
        ],
    },
    SubmenuTemplate {
        title: "View",
        entries: &[
            MenuEntry::Action(MenuAction::Reload),
            MenuEntry::Action(MenuAction::ToggleDevTools),
            MenuEntry::Separator,
            MenuEntry::Action(MenuAction::ResetZoom),
            MenuEntry::Action(MenuAction::ZoomIn),
            MenuEntry::Action(MenuAction::ZoomOut),
            MenuEntry::Separator,
            MenuEntry::Action(MenuAction::ToggleFullscreen),
        ],
    },
];

/// Current zoom factor of the main webview. Tauri can set zoom but not read it.
pub struct ZoomState(Mutex<f64>);

impl Default for ZoomState {
    fn default() -> Self {
        Self(Mutex::new(ZOOM_DEFAULT))
    }
}

/// Next zoom factor for a zoom action; other actions leave it unchanged.
pub fn next_zoom(current: f64, action: MenuAction) -> f64 {
    let next = match action {
        MenuAction::ResetZoom => return ZOOM_DEFAULT,
        MenuAction::ZoomIn => current + ZOOM_STEP,
        MenuAction::ZoomOut => current - ZOOM_STEP,
        _ => return current,
    };
    // Round to one decimal so repeated steps don't drift.
    ((next * 10.0).round() / 10.0).clamp(ZOOM_MIN, ZOOM_MAX)
}

pub fn build_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let mut submenus: Vec<Submenu<R>> = Vec::with_capacity(MENU_TEMPLATE.len());
    for template in MENU_TEMPLATE {
        let mut builder = SubmenuBuilder::new(app, template.title);
        for entry in template.entries {
            builder = match entry {
                MenuEntry::Separator => builder.separator(),
                MenuEntry::Action(action) => builder.item(&MenuItem::with_id(
                    app,
                    action.id(),
                    action.label(),
                    true,
                    Some(action.accelerator()),
                )?),
            };
        }
        submenus.push(builder.build()?);
    }

    let items: Vec<&dyn IsMenuItem<R>> = submenus
        .iter()
        .map(|submenu| submenu as &dyn IsMenuItem<R>)
        .collect();
    MenuBuilder::new(app).items(&items).build()
}

pub fn handle_menu_event<R: Runtime>(app: &AppHandle<R>, event: &MenuEvent) {
    let Some(action) = MenuAction::from_id(event.id().as_ref()) else {
        return;
    };
    if action == MenuAction::Quit {
        app.exit(0);
        return;
    }
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        tracing::debug!(id = action.id(), "menu action without main window");
        return;
    };
    if let Err(err) = apply(app, &window, action) {
        tracing::warn!(id = action.id(), error = %err, "menu action failed");
    }
}

fn apply<R: Runtime>(
    app: &AppHandle<R>,
    window: &WebviewWindow<R>,
    action: MenuAction,
) -> tauri::Result<()> {
    match action {
        MenuAction::CloseWindow => window.close(),
        MenuAction::Quit => {
            app.exit(0);
            Ok(())
        }
        MenuAction::Reload => window.reload(),
        MenuAction::ToggleDevTools => {
            #[cfg(debug_assertions)]
            {
                if window.is_devtools_open() {
                    window.close_devtools();
                } else {
                    window.open_devtools();
                }
            }
            Ok(())
        }
        MenuAction::ResetZoom | MenuAction::ZoomIn | MenuAction::ZoomOut => {
            let zoom = app.state::<ZoomState>();
            let mut current = zoom.0.lock().unwrap_or_else(|e| e.into_inner());
            *current = next_zoom(*current, action);
            window.set_zoom(*current)
        }
        MenuAction::ToggleFullscreen => window.set_fullscreen(!window.is_fullscreen()?),
    }
}
