use std::sync::Once;

use tracing::debug;

static INIT: Once = Once::new();

/// Install `ring` as the process-wide rustls crypto provider, once.
///
/// rustls 0.23 refuses to build a client config until a provider is chosen,
/// which `wss://` relays need before the handshake.
pub fn init_rustls_crypto_provider() {
    INIT.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }
    });
}
