//! REST API integration tests.
//!
//! Drives the axum router in-process with `oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tictactoe_core::GameRegistry;
use tictactoe_server::{ErrorResponse, GameListResponse, NewGameResponse, StateResponse, router};
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(GameRegistry::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn call<T: DeserializeOwned>(app: &Router, request: Request<Body>) -> (StatusCode, T) {
    let (status, body) = send(app, request).await;
    let parsed = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("bad body {:?}: {e}", String::from_utf8_lossy(&body)));
    (status, parsed)
}

fn post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn new_game(app: &Router) -> u64 {
    let (status, created): (_, NewGameResponse) = call(app, post("/api/game/new")).await;
    assert_eq!(status, StatusCode::OK);
    created.game_id.get()
}

async fn make_move(app: &Router, id: u64, row: i64, col: i64) -> (StatusCode, Value) {
    call(
        app,
        post_json(&format!("/api/game/{id}/move"), json!({"row": row, "col": col})),
    )
    .await
}

async fn error_message(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let (status, body): (_, ErrorResponse) = call(app, request).await;
    (status, body.error)
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body): (_, Value) = call(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_new_game_returns_id_and_fresh_state() {
    let app = app();
    let (status, body): (_, Value) = call(&app, post("/api/game/new")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "game_id": 1,
            "state": {
                "board": [["", "", ""], ["", "", ""], ["", "", ""]],
                "current_player": "X",
                "game_over": false,
                "winner": null,
                "moves_count": 0
            }
        })
    );
    assert_eq!(new_game(&app).await, 2);
}

#[tokio::test]
async fn test_top_row_win_over_http() {
    let app = app();
    let id = new_game(&app).await;

    for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2)] {
        let (status, _) = make_move(&app, id, row, col).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = make_move(&app, id, 0, 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["winner"], "X");
    assert_eq!(body["game_over"], true);
    assert_eq!(body["moves_count"], 5);
    assert_eq!(body["board"][0], json!(["X", "X", "X"]));

    let (status, state): (_, StateResponse) =
        call(&app, get(&format!("/api/game/{id}/state"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.winner.as_deref(), Some("X"));
}

#[tokio::test]
async fn test_tie_reports_tie_winner() {
    let app = app();
    let id = new_game(&app).await;
    let moves = [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
        (2, 2),
    ];

    let mut last = Value::Null;
    for (row, col) in moves {
        let (status, body) = make_move(&app, id, row, col).await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }
    assert_eq!(last["winner"], "tie");
    assert_eq!(last["game_over"], true);
    assert_eq!(last["moves_count"], 9);
}

#[tokio::test]
async fn test_occupied_cell_is_invalid_move() {
    let app = app();
    let id = new_game(&app).await;
    make_move(&app, id, 1, 1).await;

    let (status, body) = make_move(&app, id, 1, 1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid move"}));

    let (_, state): (_, StateResponse) = call(&app, get(&format!("/api/game/{id}/state"))).await;
    assert_eq!(state.moves_count, 1);
    assert_eq!(state.current_player, "O");
}

#[tokio::test]
async fn test_move_after_game_over_is_invalid_move() {
    let app = app();
    let id = new_game(&app).await;
    for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
        make_move(&app, id, row, col).await;
    }

    let (status, body) = make_move(&app, id, 2, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid move");
}

#[tokio::test]
async fn test_out_of_range_positions() {
    let app = app();
    let id = new_game(&app).await;

    for (row, col) in [(3, 0), (0, 3), (-1, 0), (0, -1)] {
        let (status, body) = make_move(&app, id, row, col).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "({row}, {col})");
        assert_eq!(body["error"], "Invalid position");
    }
}

#[tokio::test]
async fn test_unrepresentable_positions() {
    let app = app();
    let id = new_game(&app).await;
    let uri = format!("/api/game/{id}/move");

    let bodies = [
        r#"{"row": 100000000000000000000, "col": 0}"#,
        r#"{"row": 0, "col": -100000000000000000000}"#,
        r#"{"row": 5.5, "col": 0}"#,
        r#"{"row": 1, "col": 0.5}"#,
    ];
    for raw in bodies {
        let request = Request::post(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap();
        let (status, message) = error_message(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
        assert_eq!(message, "Invalid position", "{raw}");
    }

    let (_, state): (_, StateResponse) = call(&app, get(&format!("/api/game/{id}/state"))).await;
    assert_eq!(state.moves_count, 0);
}

#[tokio::test]
async fn test_missing_fields() {
    let app = app();
    let id = new_game(&app).await;
    let uri = format!("/api/game/{id}/move");

    let cases = [
        post_json(&uri, json!({"row": 1})),
        post_json(&uri, json!({"col": 1})),
        post_json(&uri, json!({})),
        post(&uri),
        Request::post(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap(),
    ];
    for request in cases {
        let (status, message) = error_message(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Row and column are required");
    }
}

#[tokio::test]
async fn test_unknown_game_is_not_found() {
    let app = app();
    new_game(&app).await;

    let requests = [
        get("/api/game/99/state"),
        post_json("/api/game/99/move", json!({"row": 0, "col": 0})),
        post("/api/game/99/move"),
        post("/api/game/99/reset"),
        get("/api/game/abc/state"),
        Request::delete("/api/game/99").body(Body::empty()).unwrap(),
    ];
    for request in requests {
        let (status, message) = error_message(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Game not found");
    }
}

#[tokio::test]
async fn test_reset_keeps_id_and_clears_board() {
    let app = app();
    let id = new_game(&app).await;
    make_move(&app, id, 0, 0).await;

    let (status, state): (_, StateResponse) =
        call(&app, post(&format!("/api/game/{id}/reset"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.moves_count, 0);
    assert_eq!(state.current_player, "X");
    assert!(state.board.iter().flatten().all(String::is_empty));

    let (status, _) = make_move(&app, id, 0, 0).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_then_create_never_reuses_id() {
    let app = app();
    let first = new_game(&app).await;
    let second = new_game(&app).await;

    let (status, body) = send(
        &app,
        Request::delete(format!("/api/game/{first}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let third = new_game(&app).await;
    assert_eq!(third, 3);

    let (_, listed): (_, GameListResponse) = call(&app, get("/api/games")).await;
    let ids: Vec<u64> = listed.game_ids.iter().map(|id| id.get()).collect();
    assert_eq!(ids, vec![second, third]);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let app = app();
    let request = Request::get("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
