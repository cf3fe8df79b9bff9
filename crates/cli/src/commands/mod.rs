//! CLI command implementations.

pub mod cart;
pub mod order;
pub mod session;

use bazaar_client::{
    AuthService, CartStore, ClientConfig, GatewayClient, LocalStore, SessionContext,
};

/// Everything a command needs: the store, the gateway, and the current
/// session.
pub struct CliContext {
    pub store: LocalStore,
    pub gateway: GatewayClient,
    pub auth: AuthService,
    pub session: SessionContext,
}

impl CliContext {
    /// Load configuration and assemble the client services.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing/invalid or the local
    /// store cannot be opened.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let store = LocalStore::open(&config.data_dir)?;
        let gateway = GatewayClient::new(&config.gateway);
        let auth = AuthService::new(store.clone());
        let session = auth.session();

        Ok(Self {
            store,
            gateway,
            auth,
            session,
        })
    }

    /// The cart loaded from the local store.
    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::load(self.store.clone(), self.gateway.clone())
    }
}
