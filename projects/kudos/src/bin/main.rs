use axum::serve;
use projects_kudos::{
	config::{Config, ConfigError},
	db::{build_pool, PgKudoService},
	kudo::service::MemoryKudoService,
	router, AppState,
};
use thiserror::Error;
use tracing::{info, warn};
use utils_trace::tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("Config: {source}")]
	Config {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("BuildPool: {source}")]
	BuildPool {
		#[source]
		source: r2d2::Error,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	dotenvy::dotenv().ok();

	let config = Config::from_env().map_err(|source| MainError::Config { source })?;

	tracing_init(&config.log_level, config.log_format)
		.map_err(|source| MainError::TracingInit { source })?;

	if config.authenticator.is_empty() {
		warn!("KUDO_AUTH_TOKENS is empty, every kudo request will be rejected");
	}

	let state = match &config.database_url {
		Some(database_url) => {
			let pool = build_pool(database_url, config.database_max_connections)
				.map_err(|source| MainError::BuildPool { source })?;
			info!("Using Postgres kudo store");
			AppState::new(PgKudoService::new(pool), config.authenticator.clone())
		}
		None => {
			info!("DATABASE_URL not set, using in-memory kudo store");
			AppState::new(MemoryKudoService::new(), config.authenticator.clone())
		}
	};

	let app = router(state);

	let addr = config.addr();
	let listener = tokio::net::TcpListener::bind(addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", addr);

	serve(listener, app)
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}
