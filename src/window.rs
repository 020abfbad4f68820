//! Main window bootstrap and single-window session.
//!
//! The session lives in Tauri's window registry under [`MAIN_WINDOW_LABEL`]:
//! it is created in `setup`, and disappears when the window is destroyed.
//! Nothing outside this module holds a window handle across events.

use std::sync::Arc;

use tauri::webview::NewWindowResponse;
use tauri::{
    AppHandle, Manager, Runtime, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder, Window,
    WindowEvent,
};

use crate::config::ShellConfig;
use crate::error::Result;
use crate::external::{route, ExternalOpener, TauriOpener};
use crate::gate::{NavigationEvent, NavigationGate};

pub const MAIN_WINDOW_LABEL: &str = "main";

/// Creates the main window with the navigation gate wired into its webview.
///
/// The navigation hook also receives server redirects, so both are judged
/// against the URL the webview is about to commit.
pub fn create_main_window<R: Runtime>(
    app: &AppHandle<R>,
    config: &ShellConfig,
) -> Result<WebviewWindow<R>> {
    let gate = config.gate();
    let opener: Arc<dyn ExternalOpener> = Arc::new(TauriOpener::new(app.clone()));

    let nav_gate = gate.clone();
    let nav_opener = Arc::clone(&opener);
    let popup_gate = gate;
    let popup_opener = opener;

    let window = WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(config.start_url()?),
    )
    .title(&config.window.title)
    .inner_size(config.window.width as f64, config.window.height as f64)
    .on_navigation(move |url| navigation_allowed(&nav_gate, nav_opener.as_ref(), url))
    .on_new_window(move |url, _features| {
        new_window_response(&popup_gate, popup_opener.as_ref(), &url)
    })
    .build()?;

    if menu_bar_hidden() {
        if let Err(err) = window.hide_menu() {
            tracing::debug!(error = %err, "could not hide menu bar");
        }
    }

    tracing::info!(
        start_url = %config.start_url,
        allowed = config.allowlist.len(),
        "main window created"
    );
    Ok(window)
}

/// Brings the existing main window to the front. Used when a second
/// instance is launched.
pub fn focus_main_window<R: Runtime>(app: &AppHandle<R>) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        tracing::debug!("second instance launched with no main window");
        return;
    };
    let result = window
        .unminimize()
        .and_then(|_| window.show())
        .and_then(|_| window.set_focus());
    if let Err(err) = result {
        tracing::warn!(error = %err, "failed to focus main window");
    }
}

/// Proceed/cancel answer for the webview's navigation hook. Server redirects
/// arrive here too, carrying the redirect target.
pub fn navigation_allowed(gate: &NavigationGate, opener: &dyn ExternalOpener, url: &Url) -> bool {
    route(gate, opener, url.as_str(), NavigationEvent::Navigate).allows_in_place()
}

/// Popup answer: only allowed URLs may open an in-app window.
pub fn new_window_response<R: Runtime>(
    gate: &NavigationGate,
    opener: &dyn ExternalOpener,
    url: &Url,
) -> NewWindowResponse<R> {
    if route(gate, opener, url.as_str(), NavigationEvent::NewWindow).allows_in_place() {
        NewWindowResponse::Allow
    } else {
        NewWindowResponse::Deny
    }
}

/// GTK stops firing menu accelerators once the menu bar is hidden, so the
/// bar stays visible on Linux.
pub fn menu_bar_hidden() -> bool {
    !cfg!(target_os = "linux")
}

pub fn on_window_event<R: Runtime>(window: &Window<R>, event: &WindowEvent) {
    if let WindowEvent::Destroyed = event {
        if window.label() == MAIN_WINDOW_LABEL {
            tracing::info!("main window closed");
        }
    }
}
