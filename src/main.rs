// ChatGPT desktop shell: native window around the web app.
// Navigation outside the allowlist goes to the system browser.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    chat_shell::run()
}
