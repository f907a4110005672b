//! App state and builder - constructs and runs the config service

use std::sync::Arc;

use crate::authz::NamespaceAuthorizer;
use crate::handler::ConfigHandler;
use crate::prelude::*;
use crate::routes;
use confstore_types::authorizer::Authorizer;
use confstore_types::secret_cipher::SecretCipher;
use confstore_types::store_adapter::StoreAdapter;
use confstore_types::types::DEFAULT_NAMESPACE;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub config: ConfigHandler,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub store_adapter: Option<Arc<dyn StoreAdapter>>,
	pub authorizer: Option<Arc<dyn Authorizer>>,
	pub cipher: Option<Arc<dyn SecretCipher>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Namespace used by requests that name none
	pub default_namespace: Box<str>,
	/// Namespace whose `admin` scoped accounts may access every namespace
	pub admin_namespace: Box<str>,
	pub jwt_secret: Box<str>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				default_namespace: DEFAULT_NAMESPACE.into(),
				admin_namespace: DEFAULT_NAMESPACE.into(),
				jwt_secret: "".into(),
			},
			adapters: Adapters { store_adapter: None, authorizer: None, cipher: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn default_namespace(&mut self, namespace: impl Into<Box<str>>) -> &mut Self {
		self.opts.default_namespace = namespace.into();
		self
	}
	pub fn admin_namespace(&mut self, namespace: impl Into<Box<str>>) -> &mut Self {
		self.opts.admin_namespace = namespace.into();
		self
	}
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.jwt_secret = jwt_secret.into();
		self
	}

	// Adapters
	pub fn store_adapter(&mut self, store_adapter: Arc<dyn StoreAdapter>) -> &mut Self {
		self.adapters.store_adapter = Some(store_adapter);
		self
	}
	pub fn authorizer(&mut self, authorizer: Arc<dyn Authorizer>) -> &mut Self {
		self.adapters.authorizer = Some(authorizer);
		self
	}
	pub fn cipher(&mut self, cipher: Arc<dyn SecretCipher>) -> &mut Self {
		self.adapters.cipher = Some(cipher);
		self
	}

	/// Validates the configuration and assembles the app state
	pub fn build(self) -> CsResult<App> {
		let Some(store_adapter) = self.adapters.store_adapter else {
			error!("FATAL: No store adapter configured");
			return Err(Error::ConfigError("No store adapter configured".to_string()));
		};
		let Some(cipher) = self.adapters.cipher else {
			error!("FATAL: No secret cipher configured");
			return Err(Error::ConfigError("No secret cipher configured".to_string()));
		};
		if self.opts.jwt_secret.is_empty() {
			error!("FATAL: No JWT secret configured");
			return Err(Error::ConfigError("No JWT secret configured".to_string()));
		}
		if self.opts.default_namespace.is_empty() {
			error!("FATAL: Default namespace cannot be empty");
			return Err(Error::ConfigError("Default namespace cannot be empty".to_string()));
		}
		let authorizer: Arc<dyn Authorizer> = match self.adapters.authorizer {
			Some(authorizer) => authorizer,
			None => Arc::new(NamespaceAuthorizer::new(self.opts.admin_namespace.clone())),
		};

		let config = ConfigHandler::new(store_adapter, authorizer, cipher)
			.with_default_namespace(self.opts.default_namespace.clone());

		Ok(Arc::new(AppState { opts: self.opts, config }))
	}

	pub async fn run(self) -> CsResult<()> {
		info!("confstore V{}", VERSION);

		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await.map_err(|e| {
			error!("FATAL: Cannot listen on {}: {}", app.opts.listen, e);
			e
		})?;
		info!(
			"Listening on HTTP {} (default namespace: {})",
			app.opts.listen, app.opts.default_namespace
		);

		axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
		info!("Shut down");

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}


// vim: ts=4
