//! Single binary web server: the match log as a JSON API over an in-memory record store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080), MATCHLOG_SEED (path to a JSON
//! snapshot `{ players, games, goals, comments }` to start from).

use actix_session::{storage::CookieSessionStore, Session as CookieSession, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{Local, NaiveDate, Utc};
use match_log_web::logic::{active_objectives_preview, match_history, recent_matches};
use match_log_web::{
    delete_game, export_games_csv, load_game, log_game, replace_game, CommentDraft,
    CommentThread, Game, GameDraft, GameId, InMemoryStore, MatchLogError, MatchResult,
    ObjectiveBoard, ObjectiveDraft, ObjectiveEvent, ObjectiveId, ObjectiveView, Player, PlayerId,
    PlayerSummary, ProfileDraft, RecordKind, Session, StatisticsView, SummaryCache,
    ValidationErrors,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Cookie key holding the most recently selected player.
const PLAYER_SESSION_KEY: &str = "activePlayerId";

/// Active objectives shown on the dashboard.
const DASHBOARD_OBJECTIVES: usize = 3;

/// Record store plus the summary cache shared by all requests.
struct AppState {
    store: InMemoryStore,
    cache: Mutex<SummaryCache>,
}

type SharedState = Data<AppState>;

struct ServerConfig {
    host: String,
    port: u16,
    seed: Option<PathBuf>,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
            seed: std::env::var_os("MATCHLOG_SEED").map(PathBuf::from),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayersResponse<'a> {
    players: &'a [Player],
    current_player_id: Option<PlayerId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView<'a> {
    player: &'a Player,
    summary: &'a PlayerSummary,
    win_rate_percent: u32,
    recent_matches: Vec<&'a Game>,
    active_objectives: Vec<ObjectiveView>,
}

#[derive(Serialize)]
struct ObjectivesView {
    active: Vec<ObjectiveView>,
    completed: Vec<ObjectiveView>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchPlayerBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct HistoryQuery {
    /// `Win`, `Draw`, `Loss`, or `all` / absent for every match.
    result: Option<String>,
}

#[derive(Deserialize)]
struct ProgressBody {
    delta: i64,
}

#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

#[derive(Deserialize)]
struct ObjectivePath {
    id: ObjectiveId,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn persisted_player(cookie: &CookieSession) -> Option<PlayerId> {
    cookie.get::<PlayerId>(PLAYER_SESSION_KEY).ok().flatten()
}

fn remember_player(cookie: &CookieSession, id: PlayerId) {
    if let Err(e) = cookie.insert(PLAYER_SESSION_KEY, id) {
        log::warn!("Could not persist selected player {}: {}", id, e);
    }
}

async fn load_session(state: &AppState, cookie: &CookieSession) -> Result<Session, MatchLogError> {
    Session::start(&state.store, persisted_player(cookie)).await
}

async fn current_player_id(state: &AppState, cookie: &CookieSession) -> Result<PlayerId, MatchLogError> {
    Ok(load_session(state, cookie).await?.require_current()?.id)
}

async fn load_board(state: &AppState, cookie: &CookieSession) -> Result<ObjectiveBoard, MatchLogError> {
    let player_id = current_player_id(state, cookie).await?;
    ObjectiveBoard::load(&state.store, player_id).await
}

/// Map an error to its HTTP shape: validation 400, missing 404, store 503.
fn error_response(e: &MatchLogError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        MatchLogError::Validation(fields) => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": e.to_string(), "fields": fields })),
        MatchLogError::NotFound { .. } | MatchLogError::NoCurrentPlayer => {
            HttpResponse::NotFound().json(body)
        }
        MatchLogError::Store(_) => HttpResponse::ServiceUnavailable().json(body),
        MatchLogError::Export(_) => HttpResponse::InternalServerError().json(body),
    }
}

fn respond(result: Result<HttpResponse, MatchLogError>) -> HttpResponse {
    result.unwrap_or_else(|e| error_response(&e))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "match-log-web",
    })
}

/// All profiles and the currently selected one.
#[get("/api/players")]
async fn api_list_players(state: SharedState, cookie: CookieSession) -> HttpResponse {
    respond(list_players(&state, &cookie).await)
}

async fn list_players(state: &AppState, cookie: &CookieSession) -> Result<HttpResponse, MatchLogError> {
    let session = load_session(state, cookie).await?;
    Ok(HttpResponse::Ok().json(PlayersResponse {
        players: session.players(),
        current_player_id: session.current_id(),
    }))
}

/// Create a profile and select it.
#[post("/api/players")]
async fn api_create_player(
    state: SharedState,
    cookie: CookieSession,
    body: Json<ProfileDraft>,
) -> HttpResponse {
    respond(create_player(&state, &cookie, &body).await)
}

async fn create_player(
    state: &AppState,
    cookie: &CookieSession,
    draft: &ProfileDraft,
) -> Result<HttpResponse, MatchLogError> {
    let mut session = load_session(state, cookie).await?;
    let player = session.create_profile(&state.store, draft, today()).await?;
    remember_player(cookie, player.id);
    Ok(HttpResponse::Created().json(player))
}

/// Currently selected player (404 when no profile exists yet).
#[get("/api/session")]
async fn api_current_player(state: SharedState, cookie: CookieSession) -> HttpResponse {
    respond(current_player(&state, &cookie).await)
}

async fn current_player(state: &AppState, cookie: &CookieSession) -> Result<HttpResponse, MatchLogError> {
    let session = load_session(state, cookie).await?;
    Ok(HttpResponse::Ok().json(session.require_current()?))
}

/// Switch the selected player.
#[put("/api/session")]
async fn api_switch_player(
    state: SharedState,
    cookie: CookieSession,
    body: Json<SwitchPlayerBody>,
) -> HttpResponse {
    respond(switch_player(&state, &cookie, body.player_id).await)
}

async fn switch_player(
    state: &AppState,
    cookie: &CookieSession,
    player_id: PlayerId,
) -> Result<HttpResponse, MatchLogError> {
    let mut session = load_session(state, cookie).await?;
    let player = session.switch_player(player_id)?;
    remember_player(cookie, player.id);
    Ok(HttpResponse::Ok().json(player))
}

/// Summary, recent matches and a preview of active objectives for the current player.
#[get("/api/dashboard")]
async fn api_dashboard(state: SharedState, cookie: CookieSession) -> HttpResponse {
    respond(dashboard(&state, &cookie).await)
}

async fn dashboard(state: &AppState, cookie: &CookieSession) -> Result<HttpResponse, MatchLogError> {
    let session = load_session(state, cookie).await?;
    let player = session.require_current()?;
    let board = ObjectiveBoard::load(&state.store, player.id).await?;
    let mut cache = state.cache.lock().await;
    let snapshot = cache.snapshot(&state.store, player.id).await?;
    Ok(HttpResponse::Ok().json(DashboardView {
        player,
        summary: &snapshot.summary,
        win_rate_percent: snapshot.summary.win_rate_rounded(),
        recent_matches: recent_matches(&snapshot.games),
        active_objectives: active_objectives_preview(board.objectives(), DASHBOARD_OBJECTIVES),
    }))
}

/// Summary and chart series for the current player.
#[get("/api/statistics")]
async fn api_statistics(state: SharedState, cookie: CookieSession) -> HttpResponse {
    respond(statistics(&state, &cookie).await)
}

async fn statistics(state: &AppState, cookie: &CookieSession) -> Result<HttpResponse, MatchLogError> {
    let player_id = current_player_id(state, cookie).await?;
    let mut cache = state.cache.lock().await;
    let snapshot = cache.snapshot(&state.store, player_id).await?;
    let view = StatisticsView::with_summary(snapshot.summary.clone(), &snapshot.games);
    Ok(HttpResponse::Ok().json(view))
}

/// Match history, newest first, optionally filtered by result.
#[get("/api/games")]
async fn api_list_games(
    state: SharedState,
    cookie: CookieSession,
    query: Query<HistoryQuery>,
) -> HttpResponse {
    respond(list_games(&state, &cookie, query.result.as_deref()).await)
}

async fn list_games(
    state: &AppState,
    cookie: &CookieSession,
    result: Option<&str>,
) -> Result<HttpResponse, MatchLogError> {
    let filter = match result.map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<MatchResult>()
                .map_err(|e| ValidationErrors::single("result", e))?,
        ),
    };
    let player_id = current_player_id(state, cookie).await?;
    let mut cache = state.cache.lock().await;
    let snapshot = cache.snapshot(&state.store, player_id).await?;
    Ok(HttpResponse::Ok().json(match_history(&snapshot.games, filter)))
}

/// Match history as a CSV download.
#[get("/api/games.csv")]
async fn api_export_games(state: SharedState, cookie: CookieSession) -> HttpResponse {
    respond(export_games(&state, &cookie).await)
}

async fn export_games(state: &AppState, cookie: &CookieSession) -> Result<HttpResponse, MatchLogError> {
    let player_id = current_player_id(state, cookie).await?;
    let mut cache = state.cache.lock().await;
    let snapshot = cache.snapshot(&state.store, player_id).await?;
    let csv = export_games_csv(&snapshot.games)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"matches.csv\""))
        .body(csv))
}

/// Log a match for the current player.
#[post("/api/games")]
async fn api_create_game(
    state: SharedState,
    cookie: CookieSession,
    body: Json<GameDraft>,
) -> HttpResponse {
    respond(create_game(&state, &cookie, &body).await)
}

async fn create_game(
    state: &AppState,
    cookie: &CookieSession,
    draft: &GameDraft,
) -> Result<HttpResponse, MatchLogError> {
    let player_id = current_player_id(state, cookie).await?;
    let mut cache = state.cache.lock().await;
    let game = log_game(&state.store, &mut cache, player_id, draft).await?;
    Ok(HttpResponse::Created().json(game))
}

/// One match (404 sends the client back to the history).
#[get("/api/games/{id}")]
async fn api_get_game(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    match load_game(&state.store, path.id).await {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => error_response(&e),
    }
}

/// Replace all editable fields of a match.
#[put("/api/games/{id}")]
async fn api_replace_game(
    state: SharedState,
    path: Path<GamePath>,
    body: Json<GameDraft>,
) -> HttpResponse {
    let mut cache = state.cache.lock().await;
    match replace_game(&state.store, &mut cache, path.id, &body).await {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/games/{id}")]
async fn api_delete_game(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    let mut cache = state.cache.lock().await;
    match delete_game(&state.store, &mut cache, path.id).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Comments of a match, newest first.
#[get("/api/games/{id}/comments")]
async fn api_list_comments(state: SharedState, path: Path<GamePath>) -> HttpResponse {
    match CommentThread::load(&state.store, path.id).await {
        Ok(thread) => HttpResponse::Ok().json(thread.comments()),
        Err(e) => error_response(&e),
    }
}

/// Post a comment; the response is the whole thread with the new comment first.
#[post("/api/games/{id}/comments")]
async fn api_post_comment(
    state: SharedState,
    path: Path<GamePath>,
    body: Json<CommentDraft>,
) -> HttpResponse {
    respond(post_comment(&state, path.id, &body).await)
}

async fn post_comment(
    state: &AppState,
    game_id: GameId,
    draft: &CommentDraft,
) -> Result<HttpResponse, MatchLogError> {
    let mut thread = CommentThread::load(&state.store, game_id).await?;
    thread.post(&state.store, draft, Utc::now()).await?;
    Ok(HttpResponse::Created().json(thread.comments()))
}

/// Objectives of the current player, split into active and completed.
#[get("/api/objectives")]
async fn api_list_objectives(state: SharedState, cookie: CookieSession) -> HttpResponse {
    match load_board(&state, &cookie).await {
        Ok(board) => HttpResponse::Ok().json(ObjectivesView {
            active: board.active().map(ObjectiveView::from).collect(),
            completed: board.completed().map(ObjectiveView::from).collect(),
        }),
        Err(e) => error_response(&e),
    }
}

#[post("/api/objectives")]
async fn api_create_objective(
    state: SharedState,
    cookie: CookieSession,
    body: Json<ObjectiveDraft>,
) -> HttpResponse {
    respond(create_objective(&state, &cookie, &body).await)
}

async fn create_objective(
    state: &AppState,
    cookie: &CookieSession,
    draft: &ObjectiveDraft,
) -> Result<HttpResponse, MatchLogError> {
    let mut board = load_board(state, cookie).await?;
    let objective = board.create(&state.store, draft, today()).await?;
    Ok(HttpResponse::Created().json(ObjectiveView::from(objective)))
}

/// Apply a signed progress delta (auto-completes or reopens as needed).
#[post("/api/objectives/{id}/progress")]
async fn api_objective_progress(
    state: SharedState,
    cookie: CookieSession,
    path: Path<ObjectivePath>,
    body: Json<ProgressBody>,
) -> HttpResponse {
    respond(objective_progress(&state, &cookie, path.id, body.delta).await)
}

async fn objective_progress(
    state: &AppState,
    cookie: &CookieSession,
    id: ObjectiveId,
    delta: i64,
) -> Result<HttpResponse, MatchLogError> {
    let mut board = load_board(state, cookie).await?;
    let event = board.adjust_progress(&state.store, id, delta).await?;
    objective_response(&board, id, event)
}

/// Manually mark complete / reopen.
#[post("/api/objectives/{id}/toggle")]
async fn api_objective_toggle(
    state: SharedState,
    cookie: CookieSession,
    path: Path<ObjectivePath>,
) -> HttpResponse {
    respond(objective_toggle(&state, &cookie, path.id).await)
}

async fn objective_toggle(
    state: &AppState,
    cookie: &CookieSession,
    id: ObjectiveId,
) -> Result<HttpResponse, MatchLogError> {
    let mut board = load_board(state, cookie).await?;
    let event = board.toggle_completed(&state.store, id).await?;
    objective_response(&board, id, event)
}

#[delete("/api/objectives/{id}")]
async fn api_delete_objective(
    state: SharedState,
    cookie: CookieSession,
    path: Path<ObjectivePath>,
) -> HttpResponse {
    respond(delete_objective(&state, &cookie, path.id).await)
}

async fn delete_objective(
    state: &AppState,
    cookie: &CookieSession,
    id: ObjectiveId,
) -> Result<HttpResponse, MatchLogError> {
    let mut board = load_board(state, cookie).await?;
    board.delete(&state.store, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

fn objective_response(
    board: &ObjectiveBoard,
    id: ObjectiveId,
    event: Option<ObjectiveEvent>,
) -> Result<HttpResponse, MatchLogError> {
    let objective = board.get(id).ok_or(MatchLogError::NotFound {
        kind: RecordKind::Objective,
        id,
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "objective": ObjectiveView::from(objective),
        "event": event,
        "message": event.map(|e| e.message()),
    })))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = match &config.seed {
        Some(path) => InMemoryStore::load(path).map_err(std::io::Error::other)?,
        None => InMemoryStore::new(),
    };
    let state = Data::new(AppState {
        store,
        cache: Mutex::new(SummaryCache::new()),
    });
    let session_key = Key::generate();

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(api_health)
            .service(api_list_players)
            .service(api_create_player)
            .service(api_current_player)
            .service(api_switch_player)
            .service(api_dashboard)
            .service(api_statistics)
            .service(api_export_games)
            .service(api_list_games)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_replace_game)
            .service(api_delete_game)
            .service(api_list_comments)
            .service(api_post_comment)
            .service(api_list_objectives)
            .service(api_create_objective)
            .service(api_objective_progress)
            .service(api_objective_toggle)
            .service(api_delete_objective)
    })
    .bind(bind)?
    .run()
    .await
}
