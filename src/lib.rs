//! ChatGPT desktop shell.
//!
//! Hosts the web app in a single native window. Navigation is restricted to
//! an allowlist of https domains by [`gate::NavigationGate`]; other web URLs
//! are handed to the system browser.

pub mod config;
pub mod error;
pub mod external;
pub mod gate;
pub mod logging;
pub mod menu;
pub mod window;

pub use error::{Result, ShellError};
pub use gate::{
    is_allowed_host, is_web_url, should_open_externally, Allowlist, Decision, NavigationEvent,
    NavigationGate,
};

use tauri::Manager;

pub fn run() {
    logging::init_logging();

    tauri::Builder::default()
        // Must be registered first so a second launch exits before any setup.
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            window::focus_main_window(app);
        }))
        .plugin(tauri_plugin_opener::init())
        .menu(menu::build_menu)
        .on_menu_event(|app, event| menu::handle_menu_event(app, &event))
        .on_window_event(window::on_window_event)
        .setup(|app| {
            let handle = app.handle().clone();
            let config = config::load_or_default(&handle);
            app.manage(menu::ZoomState::default());
            window::create_main_window(&handle, &config)?;
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
