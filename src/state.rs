//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed host config, one pooled HTTP client for forwarding to the
//! patient backend, and the account directory. The directory is the only
//! mutable piece and sits behind a `RwLock`: logins read, registrations write.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::HostConfig;
use crate::services::accounts::AccountDirectory;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HostConfig>,
    pub http: reqwest::Client,
    pub accounts: Arc<RwLock<AccountDirectory>>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    pub fn new(config: HostConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(config.proxy_timeout_secs)).build()?;
        let accounts =
            if config.demo_accounts { AccountDirectory::with_demo_accounts() } else { AccountDirectory::new() };
        tracing::info!(accounts = accounts.count(), "account directory ready");
        Ok(Self { config: Arc::new(config), http, accounts: Arc::new(RwLock::new(accounts)) })
    }
}
