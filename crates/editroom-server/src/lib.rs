mod auth;
mod client_ip;
mod cors;
mod health;
mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use editroom_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if provider initialization or rate-limiter
    /// construction fails
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let imagegen_state = editroom_imagegen::build_server(&config)?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler),
            );
        }

        // Edit endpoint
        app = app.merge(editroom_imagegen::endpoint_router().with_state(imagegen_state));

        // Apply middleware layers (innermost first)

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // API key authentication (health stays reachable without the secret)
        let mut public_paths = Vec::new();
        if config.server.health.enabled {
            public_paths.push(config.server.health.path.clone());
        }
        let auth_state = Arc::new(auth::AuthState {
            header_name: config.auth.header_name.clone(),
            app_key: config.auth.app_key.clone(),
            public_paths,
        });
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let state = Arc::clone(&auth_state);
            async move { auth::api_key_middleware(state, req, next).await }
        }));

        // Rate limiting (outside auth so rejected requests still count)
        if config.server.rate_limit.enabled {
            let limiter = Arc::new(editroom_ratelimit::create_request_limiter(
                &config.server.rate_limit,
            )?);
            // Client keys are caller-supplied, so the map needs periodic pruning
            limiter.spawn_pruner();
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let limiter = Arc::clone(&limiter);
                async move { rate_limit::rate_limit_middleware_arc(limiter, req, next).await }
            }));
        }

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. The listener is set
    /// up with connect info so the rate limiter can key on peer addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("graceful shutdown initiated");
        })
        .await?;

        Ok(())
    }
}
