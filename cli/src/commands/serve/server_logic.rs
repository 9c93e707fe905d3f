//! # Chat HTTP Server
//!
//! File: cli/src/commands/serve/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Runs the Axum server for `career-mentor serve`:
//! - Port availability checking with automatic fallback
//! - CORS configuration
//! - Request tracing
//! - Idle session expiry
//! - Graceful shutdown on Ctrl+C / SIGTERM
//!
//! Routing lives in `handlers.rs`; this module only wires middleware,
//! binds the socket and drives the server until shutdown.
//!
use super::config::ServerConfig;
use super::handlers::{self, AppState};
use crate::core::error::Result;
use crate::mentor::session::SessionRegistry;
use anyhow::Context;
use axum::Router;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run Chat Server (`run_server`)
///
/// Binds the first free port starting at `config.port`, prints the
/// connection banner, and serves the chat API until a shutdown signal arrives.
///
/// ## Errors
///
/// - No free port within `MAX_PORT_ATTEMPTS` consecutive ports.
/// - The listener cannot be bound, or the server fails while running.
pub async fn run_server(config: ServerConfig, agent_name: &str) -> Result<()> {
    let listener = bind_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read bound listener address")?;

    let state = AppState::default();
    let sweeper = spawn_session_sweeper(state.sessions.clone(), config.session_ttl);
    let app = create_app(&config, state);

    println!("\n=================================================================");
    println!("👩‍💼 {} is listening", agent_name);
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    if config.host.is_unspecified() {
        if let Some(ip) = local_network_ip() {
            println!("🔗 Network URL:       http://{}:{}", ip, addr.port());
        }
    }
    println!("⚙️  Binding to address: {}", addr);
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("⏳ Session idle TTL:  {}s", config.session_ttl.as_secs());
    println!("💬 Start a session:   POST /api/sessions");
    println!("=================================================================\n");
    info!("Starting chat server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    served.context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// # Spawn Session Sweeper (`spawn_session_sweeper`)
///
/// Periodically ends sessions that have been idle for longer than `ttl`.
/// The check runs four times per `ttl`, so a session outlives its TTL by at
/// most a quarter of it.
fn spawn_session_sweeper(sessions: SessionRegistry, ttl: Duration) -> JoinHandle<()> {
    let period = (ttl / 4).max(Duration::from_millis(10));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let expired = sessions.expire_idle(ttl).await;
            if expired > 0 {
                info!(
                    "Expired {} idle session(s), {} active",
                    expired,
                    sessions.len().await
                );
            }
        }
    })
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Bind Available Port (`bind_available_port`)
///
/// Tries `start_port`, then each following port, up to `max_attempts` ports
/// in total. The listener that succeeds is returned still bound, so the
/// port cannot be taken between the check and the serve.
async fn bind_available_port(
    host: IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<TcpListener> {
    for attempt in 0..max_attempts {
        let Some(port) = start_port.checked_add(u16::from(attempt)) else {
            break;
        };
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, bound to port {} instead.",
                        start_port, port
                    );
                }
                return Ok(listener);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable ({}). Trying next port...",
                    attempt + 1,
                    port,
                    host,
                    e
                );
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        host,
        start_port,
        max_attempts
    )
}

/// Best-effort LAN address for the startup banner. Connecting a UDP socket
/// sends no packets; it only selects the outbound interface.
fn local_network_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(192, 0, 2, 1), 9)).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_loopback() && !ip.is_unspecified()).then_some(ip)
}

/// Wraps the chat API router with tracing and CORS middleware.
fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    handlers::create_router(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer)
            .layer(cors_layer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    /// A port the OS just reported as free.
    async fn free_port(host: IpAddr) -> Result<u16> {
        let listener = TcpListener::bind(SocketAddr::new(host, 0)).await?;
        Ok(listener.local_addr()?.port())
    }

    #[tokio::test]
    async fn test_bind_start_port_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = free_port(host).await?;

        let listener = bind_available_port(host, start_port, 5).await?;
        assert_eq!(listener.local_addr()?.port(), start_port);
        Ok(())
    }

    #[tokio::test]
    async fn test_bind_start_port_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let occupied = TcpListener::bind(SocketAddr::new(host, 0)).await?;
        let start_port = occupied.local_addr()?.port();

        let listener = bind_available_port(host, start_port, 5).await?;
        let port = listener.local_addr()?.port();
        assert_ne!(port, start_port);
        assert!(u32::from(port) < u32::from(start_port) + 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_sweeper_expires_idle_sessions() {
        let sessions = SessionRegistry::new();
        let (id, handle) = sessions.start().await;
        handle.lock().await.store.init_session();
        drop(handle);

        let sweeper = spawn_session_sweeper(sessions.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(400)).await;
        sweeper.abort();

        assert!(sessions.get(&id).await.is_none());
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_bind_gives_up_at_port_range_end() {
        let result = bind_available_port(Ipv4Addr::LOCALHOST.into(), u16::MAX, 0).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cors_header_follows_config() {
        let request = || {
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap()
        };

        let enabled = ServerConfig {
            port: 8000,
            host: Ipv4Addr::LOCALHOST.into(),
            enable_cors: true,
            session_ttl: Duration::from_secs(60),
        };
        let response = create_app(&enabled, AppState::default())
            .oneshot(request())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let disabled = ServerConfig {
            enable_cors: false,
            ..enabled
        };
        let response = create_app(&disabled, AppState::default())
            .oneshot(request())
            .await
            .unwrap();
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_shutdown_signal_creation() {
        let shutdown_future = shutdown_signal();
        drop(shutdown_future);
    }
}
