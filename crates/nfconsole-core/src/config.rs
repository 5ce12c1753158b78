// ── Runtime connection configuration ──
//
// Describes *where* the console talks to and how. The CLI/TUI build a
// `ConsoleConfig` from their profile files and hand it in; core never
// reads config files.

use std::time::Duration;

use url::Url;

use nfconsole_api::{ApiClient, BasePaths, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Connection settings for one configuration service.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Server root (e.g. `http://localhost:5000`).
    pub server: Url,
    /// Base paths of the config and subscriber APIs under `server`.
    pub paths: BasePaths,
    pub tls: TlsMode,
    /// Request timeout.
    pub timeout: Duration,
}

impl ConsoleConfig {
    pub fn new(server: Url) -> Self {
        Self {
            server,
            paths: BasePaths::default(),
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build the HTTP client these settings describe.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        let transport = TransportConfig::new(self.tls.clone(), self.timeout);
        Ok(ApiClient::new(self.server.as_str(), &self.paths, &transport)?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use nfconsole_api::ApiSurface;

    use super::*;

    #[test]
    fn client_uses_both_base_paths() {
        let config = ConsoleConfig::new(Url::parse("http://core.lab:5000/").unwrap());
        let client = config.build_client().unwrap();
        assert_eq!(
            client.url(ApiSurface::Config, &["device-group"]).as_str(),
            "http://core.lab:5000/config/v1/device-group"
        );
        assert_eq!(
            client.url(ApiSurface::Subscriber, &["k4opt"]).as_str(),
            "http://core.lab:5000/api/k4opt"
        );
    }
}
