use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::credencial::{self, centers::CenterDirectory, AppState};
use crate::qr::QrKeys;
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use tracing::{info, warn};

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, centers } => {
            // Bad key material is fatal here, before any login traffic is
            // accepted; it is never surfaced as a per-request error.
            let keys = QrKeys::from_base64(
                globals.qr_key.expose_secret(),
                globals.qr_iv.expose_secret(),
            )
            .context("invalid QR key material, refusing to start")?;

            let centers = match centers {
                Some(path) => CenterDirectory::from_file(&path)
                    .with_context(|| format!("loading centers file {}", path.display()))?,
                None => CenterDirectory::empty(),
            };

            if centers.is_empty() {
                warn!("no JRV centers loaded, every login will fail the JRV lookup");
            } else {
                info!(centers = centers.len(), "JRV center directory loaded");
            }

            credencial::new(port, AppState { keys, centers }).await?;
        }
    }

    Ok(())
}
