//! Single binary web server: bracket snapshots and user actions via a JSON REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), BRACKET_CONFIG (JSON config
//! file), BRACKET_NAMES (CSV name corpus).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament::{
    requested_size_from_json, BracketConfig, BracketController, BracketEvent, NameCorpus,
    TournamentId,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Per-tournament entry: bracket controller + last activity time (for auto-cleanup).
struct TournamentEntry {
    controller: BracketController,
    last_activity: Instant,
}

/// In-memory state: many brackets by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Configuration and corpus shared by every bracket the server creates.
struct BracketDefaults {
    config: BracketConfig,
    corpus: Arc<NameCorpus>,
}

/// Inactivity threshold: brackets not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    player_count: Option<Value>,
    /// Play the bracket out right away, like a freshly opened page does.
    #[serde(default = "default_start")]
    start: bool,
}

fn default_start() -> bool {
    true
}

#[derive(Deserialize)]
struct PlayerCountBody {
    #[serde(default)]
    count: Value,
}

#[derive(Deserialize)]
struct ReorderBody {
    #[serde(default)]
    drag_index: Value,
    #[serde(default)]
    drop_index: Value,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Look up a bracket, refresh its activity time and hand it to `f`.
fn with_controller<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut BracketController) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    f(&mut entry.controller)
}

/// Run `event` to completion and answer with the resulting snapshot.
/// Declined actions leave the bracket as it was and are only logged.
fn apply(controller: &mut BracketController, event: BracketEvent) -> HttpResponse {
    if let Err(e) = controller.dispatch(event) {
        log::debug!("Tournament {}: action ignored: {}", controller.id(), e);
    }
    HttpResponse::Ok().json(controller.snapshot())
}

/// Create a bracket (returns its snapshot with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    defaults: Data<BracketDefaults>,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let requested = body
        .as_ref()
        .and_then(|b| b.player_count.as_ref())
        .and_then(requested_size_from_json);
    let start = body.as_ref().map_or_else(default_start, |b| b.start);

    let mut controller = BracketController::new(defaults.config.clone(), defaults.corpus.clone());
    if requested.is_some() {
        apply(&mut controller, BracketEvent::SetPlayerCount(requested));
    }
    if start {
        apply(&mut controller, BracketEvent::Start);
    }

    let id = controller.id();
    let response = HttpResponse::Ok().json(controller.snapshot());
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            controller,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

/// Get a bracket snapshot by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_controller(&state, path.id, |c| HttpResponse::Ok().json(c.snapshot()))
}

/// The bracket in its nested `{ name, children: [...] }` form.
#[get("/api/tournaments/{id}/tree")]
async fn api_get_tree(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_controller(&state, path.id, |c| HttpResponse::Ok().json(c.tournament().to_nested()))
}

/// Regenerate the pool for a new count. Resets any progress.
#[put("/api/tournaments/{id}/player-count")]
async fn api_set_player_count(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PlayerCountBody>,
) -> HttpResponse {
    let requested = requested_size_from_json(&body.count);
    with_controller(&state, path.id, |c| apply(c, BracketEvent::SetPlayerCount(requested)))
}

/// Start the bracket; it plays out to the last player standing.
#[post("/api/tournaments/{id}/start")]
async fn api_start(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_controller(&state, path.id, |c| apply(c, BracketEvent::Start))
}

/// Shuffle the pool (ignored past round 1).
#[post("/api/tournaments/{id}/shuffle")]
async fn api_shuffle(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_controller(&state, path.id, |c| apply(c, BracketEvent::Shuffle))
}

/// Swap two players in the start round (ignored once started or for non-numeric indices).
#[put("/api/tournaments/{id}/players/reorder")]
async fn api_reorder_players(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ReorderBody>,
) -> HttpResponse {
    with_controller(&state, path.id, |c| {
        match (body.drag_index.as_i64(), body.drop_index.as_i64()) {
            (Some(drag), Some(drop)) => apply(c, BracketEvent::Reorder { drag, drop }),
            _ => {
                log::debug!("Tournament {}: reorder with non-numeric index ignored", c.id());
                HttpResponse::Ok().json(c.snapshot())
            }
        }
    })
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_get_tree)
        .service(api_set_player_count)
        .service(api_start)
        .service(api_shuffle)
        .service(api_reorder_players);
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = BracketConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let corpus = NameCorpus::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    log::info!(
        "Bracket sizes {}..={} (default {}), {} names",
        config.floor(),
        config.max_size,
        config.size,
        corpus.len()
    );

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));
    let defaults = Data::new(BracketDefaults {
        config,
        corpus: Arc::new(corpus),
    });

    // Background task: every 30 minutes, remove brackets inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(defaults.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}
