pub mod errors;
pub mod extract;
pub mod handlers;
pub mod responses;

use std::net::TcpListener;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
};
use color_eyre::eyre::{Context, Result, eyre};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::domain::{DncService, ports::PlatformClient};
use handlers::{
    form::upload_form, health::health_check, submit_blocklist::submit_blocklist_handler,
    verify_email::verify_email_handler,
};

/// Largest accepted uploaded file, matching the upload form's limit.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Room for multipart boundaries, part headers and the other form fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = MAX_UPLOAD_BYTES + FORM_OVERHEAD_BYTES;

#[derive(Debug)]
pub struct AppState<P: PlatformClient> {
    pub service: Arc<DncService<P>>,
}

impl<P: PlatformClient> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

pub struct Server {
    router: Router,
    listener: TcpListener,
    port: u16,
}

impl Server {
    /// Builds the router and binds the listener.
    ///
    /// Binding happens here so that a port of `0` resolves to a concrete port
    /// before [`Server::run`] is called.
    pub async fn new<P: PlatformClient + 'static>(
        service: DncService<P>,
        config: &ServerConfig,
    ) -> Result<Self> {
        let router = router(AppState {
            service: Arc::new(service),
        });

        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).wrap_err_with(|| format!("Binding {addr}"))?;
        listener
            .set_nonblocking(true)
            .context("Setting non-blocking mode")?;
        let port = listener
            .local_addr()
            .context("Getting local address")?
            .port();

        Ok(Self {
            router,
            listener,
            port,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!("Server listening on port {}", self.port);
        axum_server::from_tcp(self.listener)
            .serve(self.router.into_make_service())
            .await
            .map_err(|e| eyre!("Server error: {e:?}"))
    }
}

/// Assembles the routes with tracing, CORS and the body size limit.
pub fn router<P: PlatformClient + 'static>(state: AppState<P>) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &'_ axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            tracing::info_span!("request", method = %request.method(), uri)
        });

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/", get(upload_form))
        .route("/health", get(health_check))
        .route("/verify-email", post(verify_email_handler::<P>))
        .route("/submit-blocklist", post(submit_blocklist_handler::<P>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer)
        .layer(trace_layer)
        .with_state(state)
}
