//! MCP tool server over the game registry.

use crate::api::{GameListResponse, NewGameResponse, StateResponse};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tictactoe_core::{GameId, GameRegistry, RegistryError};
use tracing::{debug, info, instrument, warn};

/// Request naming one game.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameRequest {
    /// Game id returned by `new_game`.
    pub game_id: u64,
}

/// Request for making a move.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MakeMoveRequest {
    /// Game id returned by `new_game`.
    pub game_id: u64,
    /// Row (0-2, top to bottom).
    pub row: usize,
    /// Column (0-2, left to right).
    pub col: usize,
}

/// MCP server handler.
pub struct GameServer {
    registry: Arc<GameRegistry>,
    tool_router: ToolRouter<Self>,
}

/// Renders a payload as a JSON text result.
fn json_result<T: Serialize>(payload: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| McpError::internal_error(format!("Failed to encode response: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn to_mcp_error(err: RegistryError) -> McpError {
    warn!(error = %err, "Tool call rejected");
    McpError::invalid_params(err.to_string(), None)
}

#[tool_router]
impl GameServer {
    /// Creates a game server sharing `registry`.
    #[instrument(skip(registry))]
    pub fn new(registry: Arc<GameRegistry>) -> Self {
        info!("Creating MCP game server");
        Self {
            registry,
            tool_router: Self::tool_router(),
        }
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    #[tool(description = "Start a new tic-tac-toe game. Returns its game_id and state. X moves first.")]
    pub async fn new_game(&self) -> Result<CallToolResult, McpError> {
        let (game_id, view) = self.registry.create_game();
        info!(game_id = %game_id, "Game created via MCP");
        json_result(&NewGameResponse {
            game_id,
            state: StateResponse::from(view),
        })
    }

    /// Gets the current state of a game.
    #[instrument(skip(self, req), fields(game_id = req.game_id))]
    #[tool(description = "Get the board, current player, winner and move count of a game")]
    pub async fn get_game(
        &self,
        Parameters(req): Parameters<GameRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Getting game state");
        let view = self
            .registry
            .get_game(GameId::from(req.game_id))
            .map_err(to_mcp_error)?;
        json_result(&StateResponse::from(view))
    }

    /// Places the current player's mark.
    #[instrument(skip(self, req), fields(game_id = req.game_id, row = req.row, col = req.col))]
    #[tool(description = "Place the current player's mark at (row, col). Rows and columns are numbered 0-2 from the top-left.")]
    pub async fn make_move(
        &self,
        Parameters(req): Parameters<MakeMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let view = self
            .registry
            .apply_move(GameId::from(req.game_id), req.row, req.col)
            .map_err(to_mcp_error)?;
        info!(status = ?view.status(), "Move accepted via MCP");
        json_result(&StateResponse::from(view))
    }

    /// Resets a game to an empty board.
    #[instrument(skip(self, req), fields(game_id = req.game_id))]
    #[tool(description = "Reset a game to an empty board with X to move. The game_id is kept.")]
    pub async fn reset_game(
        &self,
        Parameters(req): Parameters<GameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let view = self
            .registry
            .reset_game(GameId::from(req.game_id))
            .map_err(to_mcp_error)?;
        json_result(&StateResponse::from(view))
    }

    /// Lists registered games.
    #[instrument(skip(self))]
    #[tool(description = "List the ids of all games on this server")]
    pub async fn list_games(&self) -> Result<CallToolResult, McpError> {
        json_result(&GameListResponse {
            game_ids: self.registry.game_ids(),
        })
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GameServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tic-tac-toe game server. Create a game with new_game, then alternate make_move calls."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
