//! Tic-tac-toe server library - transports over the core game registry
//!
//! # Architecture
//!
//! - **API**: axum REST routes (`/api/game/...`) with JSON bodies
//! - **MCP**: tool server for agents (stdio)
//! - **Config**: TOML file + CLI/env overrides
//! - **Telemetry**: tracing subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_core::GameRegistry;
//! use tictactoe_server::router;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = router(Arc::new(GameRegistry::new()));
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 5000)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod mcp;
mod telemetry;

// Crate-level exports - REST API
pub use api::{
    ApiError, AppState, ErrorResponse, GameListResponse, HealthResponse, MoveRequest,
    NewGameResponse, StateResponse, TIE, router,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, DEBUG_LOG_FILTER, ServerConfig};

// Crate-level exports - MCP server
pub use mcp::{GameRequest, GameServer, MakeMoveRequest};

// Crate-level exports - Tracing
pub use telemetry::init_tracing;
