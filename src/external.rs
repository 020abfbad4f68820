//! Handoff of gated URLs to the platform's default handler.

use tauri::{AppHandle, Runtime};
use tauri_plugin_opener::OpenerExt;

use crate::error::{Result, ShellError};
use crate::gate::{Decision, NavigationEvent, NavigationGate};

/// Opens a URL outside the app, usually in the system browser.
pub trait ExternalOpener: Send + Sync {
    fn open_external(&self, url: &str) -> Result<()>;
}

/// [`ExternalOpener`] backed by `tauri-plugin-opener`.
pub struct TauriOpener<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriOpener<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> ExternalOpener for TauriOpener<R> {
    fn open_external(&self, url: &str) -> Result<()> {
        self.app
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| ShellError::Opener {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

/// Asks the gate about `url` and performs the handoff when it says so.
///
/// A failed handoff still cancels the in-app navigation and yields
/// [`Decision::DenySilent`].
pub fn route(
    gate: &NavigationGate,
    opener: &dyn ExternalOpener,
    url: &str,
    event: NavigationEvent,
) -> Decision {
    match gate.decide(url, event) {
        Decision::AllowInPlace => {
            tracing::debug!(%event, url, "navigation allowed in app");
            Decision::AllowInPlace
        }
        Decision::DenyAndRedirectExternal | Decision::DenySilent => {
            match opener.open_external(url) {
                Ok(()) => {
                    tracing::info!(%event, url, "opened in external browser");
                    Decision::DenyAndRedirectExternal
                }
                Err(err) => {
                    tracing::warn!(%event, url, error = %err, "external open failed; navigation blocked");
                    Decision::DenySilent
                }
            }
        }
    }
}
