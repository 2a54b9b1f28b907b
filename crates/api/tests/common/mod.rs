//! Shared helpers for the API integration tests.
//!
//! Tests drive the real router (same middleware stack as production) against
//! [`StubService`], an in-process axum server that speaks the subset of the
//! hosted REST surface the repositories use: `eq.`/`in.`/`is.null`/`fts.`
//! filters, `order`, `limit`/`offset`, exact counts via `Content-Range`,
//! many-to-one embeds in `select` (`alias:table!fk(cols)`), `on_conflict`
//! upserts and the two procedures.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{self, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

use worldweaver_api::auth::jwt::{Claims, JwtConfig, AUDIENCE};
use worldweaver_api::config::{ServerConfig, ServiceConfig};
use worldweaver_api::router::build_app_router;
use worldweaver_api::state::AppState;
use worldweaver_db::HostedClient;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const TEST_ANON_KEY: &str = "test-anon-key";

// ---------------------------------------------------------------------------
// Stub hosted service
// ---------------------------------------------------------------------------

/// One request the stub received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Table name, or `rpc/{name}`.
    pub target: String,
    pub params: Vec<(String, String)>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct StubData {
    tables: HashMap<String, Vec<Value>>,
    requests: Vec<RecordedRequest>,
    /// Injected failure: optional target, status and error code.
    fail_next: Option<(Option<String>, StatusCode, String)>,
}

/// In-memory stand-in for the hosted data service.
#[derive(Clone, Default)]
pub struct StubService {
    data: Arc<Mutex<StubData>>,
    url: String,
}

impl StubService {
    /// Start the stub on an ephemeral local port.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stub = StubService {
            data: Arc::default(),
            url: format!("http://{addr}"),
        };

        let app = Router::new()
            .route("/rest/v1/", routing::get(stub_health))
            .route("/rest/v1/rpc/{name}", post(stub_rpc))
            .route(
                "/rest/v1/{table}",
                routing::get(stub_select)
                    .post(stub_insert)
                    .patch(stub_update)
                    .delete(stub_delete),
            )
            .with_state(stub.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        stub
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Put a row straight into a table, filling `id` and timestamps.
    pub fn seed(&self, table: &str, row: Value) -> Value {
        let row = with_generated_columns(row);
        self.data
            .lock()
            .unwrap()
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        row
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.data
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data.lock().unwrap().requests.clone()
    }

    /// Requests that wrote to the service (anything but GET).
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }

    /// Make the next table or procedure request fail with a service error.
    pub fn fail_next(&self, status: StatusCode, code: &str) {
        self.data.lock().unwrap().fail_next = Some((None, status, code.to_string()));
    }

    /// Make the next request to `target` (a table or `rpc/{name}`) fail.
    pub fn fail_next_on(&self, target: &str, status: StatusCode, code: &str) {
        self.data.lock().unwrap().fail_next =
            Some((Some(target.to_string()), status, code.to_string()));
    }

    fn record(
        &self,
        method: Method,
        target: String,
        headers: &HeaderMap,
        params: &[(String, String)],
    ) -> Result<(), Response> {
        let mut data = self.data.lock().unwrap();
        let hits_failure = matches!(
            &data.fail_next,
            Some((wanted, _, _)) if wanted.as_deref().map_or(true, |w| w == target)
        );
        data.requests.push(RecordedRequest {
            method,
            target,
            params: params.to_vec(),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });

        if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some(TEST_ANON_KEY) {
            return Err(error_response(StatusCode::UNAUTHORIZED, None, "Invalid API key"));
        }
        if hits_failure {
            if let Some((_, status, code)) = data.fail_next.take() {
                return Err(error_response(status, Some(&code), "injected failure"));
            }
        }
        Ok(())
    }
}

fn error_response(status: StatusCode, code: Option<&str>, message: &str) -> Response {
    let body = json!({
        "code": code,
        "message": message,
        "details": null,
        "hint": null,
    });
    (status, Json(body)).into_response()
}

fn with_generated_columns(row: Value) -> Value {
    let mut row = row;
    if let Some(obj) = row.as_object_mut() {
        let now = json!(chrono::Utc::now());
        obj.entry("id").or_insert_with(|| json!(Uuid::new_v4()));
        obj.entry("created_at").or_insert_with(|| now.clone());
        obj.entry("updated_at").or_insert(now);
    }
    row
}

const RESERVED_PARAMS: &[&str] = &["select", "order", "limit", "offset", "on_conflict"];

fn cell(row: &Value, column: &str) -> Option<String> {
    match row.get(column) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn matches_filter(row: &Value, column: &str, expr: &str) -> bool {
    let value = cell(row, column);
    if let Some(expected) = expr.strip_prefix("eq.") {
        value.as_deref() == Some(expected)
    } else if let Some(list) = expr.strip_prefix("in.(").and_then(|l| l.strip_suffix(')')) {
        value.is_some_and(|v| list.split(',').any(|item| item == v))
    } else if expr == "is.null" {
        value.is_none()
    } else if let Some(query) = expr.strip_prefix("fts.") {
        let text = value.unwrap_or_default().to_lowercase();
        query
            .split(" & ")
            .all(|term| text.contains(&term.to_lowercase()))
    } else {
        true
    }
}

fn matches_all(row: &Value, params: &[(String, String)]) -> bool {
    params
        .iter()
        .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
        .all(|(column, expr)| matches_filter(row, column, expr))
}

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn compare_cells(a: &Value, b: &Value, column: &str) -> Ordering {
    match (a.get(column), b.get(column)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => cell(a, column).cmp(&cell(b, column)),
    }
}

fn sort_rows(rows: &mut [Value], order: &str) {
    let keys: Vec<(&str, bool)> = order
        .split(',')
        .filter_map(|key| key.rsplit_once('.'))
        .map(|(column, direction)| (column, direction == "desc"))
        .collect();
    rows.sort_by(|a, b| {
        keys.iter()
            .map(|&(column, desc)| {
                let ord = compare_cells(a, b, column);
                if desc {
                    ord.reverse()
                } else {
                    ord
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

/// One member of a `select` list.
#[derive(Debug)]
enum SelectItem {
    All,
    Column(String),
    /// `alias:table!fk(inner)`; `fk` defaults to the table's usual column.
    Embed {
        alias: String,
        table: String,
        fk: Option<String>,
        inner: Vec<SelectItem>,
    },
}

/// Split on commas that are not inside parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let (mut depth, mut start) = (0usize, 0usize);
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect()
}

fn parse_select(list: &str) -> Vec<SelectItem> {
    split_top_level(list)
        .into_iter()
        .map(|part| match part.find('(') {
            Some(open) => {
                let inner = part[open + 1..].strip_suffix(')').unwrap_or_default();
                let head = &part[..open];
                let (alias, target) = head.split_once(':').unwrap_or((head, head));
                let (table, fk) = match target.split_once('!') {
                    Some((table, fk)) => (table, Some(fk.to_string())),
                    None => (target, None),
                };
                SelectItem::Embed {
                    alias: alias.to_string(),
                    table: table.to_string(),
                    fk,
                    inner: parse_select(inner),
                }
            }
            None if part == "*" => SelectItem::All,
            None => SelectItem::Column(part.to_string()),
        })
        .collect()
}

/// The referencing column for an embed without a `!fk` hint.
fn default_fk(table: &str) -> String {
    match table {
        "card_types" => "type_id".to_string(),
        other => format!("{}_id", other.trim_end_matches('s')),
    }
}

/// Shape `row` the way the service answers `select=...`.
fn project(stub: &StubService, row: &Value, items: &[SelectItem]) -> Value {
    let mut out = Map::new();
    for item in items {
        match item {
            SelectItem::All => {
                if let Some(obj) = row.as_object() {
                    out.extend(obj.clone());
                }
            }
            SelectItem::Column(column) => {
                out.insert(column.clone(), row.get(column).cloned().unwrap_or(Value::Null));
            }
            SelectItem::Embed {
                alias,
                table,
                fk,
                inner,
            } => {
                let column = fk.clone().unwrap_or_else(|| default_fk(table));
                let embedded = cell(row, &column)
                    .and_then(|id| {
                        stub.rows(table)
                            .into_iter()
                            .find(|target| cell(target, "id").as_deref() == Some(id.as_str()))
                    })
                    .map(|target| project(stub, &target, inner))
                    .unwrap_or(Value::Null);
                out.insert(alias.clone(), embedded);
            }
        }
    }
    Value::Object(out)
}

/// Apply the request's `select` (if any) to each returned row.
fn project_all(stub: &StubService, rows: Vec<Value>, params: &[(String, String)]) -> Vec<Value> {
    match param(params, "select") {
        Some(list) => {
            let items = parse_select(list);
            rows.iter().map(|row| project(stub, row, &items)).collect()
        }
        None => rows,
    }
}

fn merge_into(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

async fn stub_health(State(stub): State<StubService>, headers: HeaderMap) -> Response {
    match stub.record(Method::GET, String::new(), &headers, &[]) {
        Ok(()) => Json(json!({})).into_response(),
        Err(response) => response,
    }
}

async fn stub_select(
    State(stub): State<StubService>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = stub.record(Method::GET, table.clone(), &headers, &params) {
        return response;
    }

    let mut rows: Vec<Value> = stub
        .rows(&table)
        .into_iter()
        .filter(|row| matches_all(row, &params))
        .collect();
    if let Some(order) = param(&params, "order") {
        sort_rows(&mut rows, order);
    }

    let total = rows.len();
    let offset: usize = param(&params, "offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = param(&params, "limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(usize::MAX);
    let page: Vec<Value> = rows.into_iter().skip(offset).take(limit).collect();
    let page = project_all(&stub, page, &params);

    let wants_count = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("count=exact"));
    if !wants_count {
        return Json(page).into_response();
    }

    let range = if page.is_empty() {
        format!("*/{total}")
    } else {
        format!("{}-{}/{total}", offset, offset + page.len() - 1)
    };
    ([("content-range", range)], Json(page)).into_response()
}

async fn stub_insert(
    State(stub): State<StubService>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(response) = stub.record(Method::POST, table.clone(), &headers, &params) {
        return response;
    }

    let body: Value = serde_json::from_slice(&body).unwrap();
    let incoming = match body {
        Value::Array(rows) => rows,
        row => vec![row],
    };
    let conflict_keys: Vec<String> = param(&params, "on_conflict")
        .map(|keys| keys.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let mut data = stub.data.lock().unwrap();
    let rows = data.tables.entry(table).or_default();
    let mut written = Vec::new();
    for row in incoming {
        let existing = (!conflict_keys.is_empty())
            .then(|| {
                rows.iter_mut().find(|existing| {
                    conflict_keys
                        .iter()
                        .all(|key| cell(existing, key) == cell(&row, key))
                })
            })
            .flatten();
        match existing {
            Some(existing) => {
                merge_into(existing, &row);
                written.push(existing.clone());
            }
            None => {
                let row = with_generated_columns(row);
                rows.push(row.clone());
                written.push(row);
            }
        }
    }

    (StatusCode::CREATED, Json(written)).into_response()
}

async fn stub_update(
    State(stub): State<StubService>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(response) = stub.record(Method::PATCH, table.clone(), &headers, &params) {
        return response;
    }

    let patch: Value = serde_json::from_slice(&body).unwrap();
    let updated = {
        let mut data = stub.data.lock().unwrap();
        let rows = data.tables.entry(table).or_default();
        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| matches_all(row, &params)) {
            merge_into(row, &patch);
            updated.push(row.clone());
        }
        updated
    };

    Json(project_all(&stub, updated, &params)).into_response()
}

async fn stub_delete(
    State(stub): State<StubService>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = stub.record(Method::DELETE, table.clone(), &headers, &params) {
        return response;
    }

    let mut data = stub.data.lock().unwrap();
    let rows = data.tables.entry(table).or_default();
    let (removed, kept): (Vec<Value>, Vec<Value>) =
        rows.drain(..).partition(|row| matches_all(row, &params));
    *rows = kept;

    Json(removed).into_response()
}

async fn stub_rpc(
    State(stub): State<StubService>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(args): Json<Value>,
) -> Response {
    if let Err(response) = stub.record(Method::POST, format!("rpc/{name}"), &headers, &[]) {
        return response;
    }

    let world_id = args["world_id"].as_str().unwrap_or_default().to_string();
    let in_world = |table: &str| -> Vec<Value> {
        stub.rows(table)
            .into_iter()
            .filter(|row| cell(row, "world_id").as_deref() == Some(world_id.as_str()))
            .collect()
    };

    match name.as_str() {
        "search_cards" => {
            let query = args["search_query"].as_str().unwrap_or_default().to_lowercase();
            let limit = args["result_limit"].as_u64().unwrap_or(10) as usize;
            let hits: Vec<Value> = in_world("cards")
                .into_iter()
                .filter(|card| {
                    cell(card, "name")
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&query)
                })
                .take(limit)
                .map(|mut card| {
                    card["rank"] = json!(1.0);
                    card
                })
                .collect();
            Json(hits).into_response()
        }
        "get_world_summary" => {
            let summary: Map<String, Value> = [
                ("total_cards", in_world("cards").len()),
                ("total_folders", in_world("folders").len()),
                ("total_card_types", in_world("card_types").len()),
            ]
            .into_iter()
            .map(|(key, count)| (key.to_string(), json!(count)))
            .collect();
            Json(Value::Object(summary)).into_response()
        }
        _ => error_response(StatusCode::NOT_FOUND, Some("PGRST202"), "Unknown function"),
    }
}

// ---------------------------------------------------------------------------
// App and auth
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` pointing at `service_url`.
pub fn test_config(service_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        service: ServiceConfig {
            url: service_url.to_string(),
            anon_key: TEST_ANON_KEY.to_string(),
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build the full application router against `stub`.
pub fn build_test_app(stub: &StubService) -> Router {
    let config = test_config(stub.url());
    let state = AppState {
        client: HostedClient::new(&config.service.url, &config.service.anon_key),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid session token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id,
        role: "authenticated".to_string(),
        aud: AUDIENCE.to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
        email: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A stub, an app and a signed-in user.
pub struct TestContext {
    pub stub: StubService,
    pub app: Router,
    pub user_id: Uuid,
    pub token: String,
}

impl TestContext {
    pub async fn new() -> Self {
        let stub = StubService::spawn().await;
        let app = build_test_app(&stub);
        let user_id = Uuid::new_v4();
        Self {
            token: token_for(user_id),
            stub,
            app,
            user_id,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        send(&self.app, Method::GET, uri, Some(&self.token), None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        send(&self.app, Method::POST, uri, Some(&self.token), Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        send(&self.app, Method::PUT, uri, Some(&self.token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        send(&self.app, Method::DELETE, uri, Some(&self.token), None).await
    }

    /// Seed a world owned by the test user.
    pub fn seed_world(&self, title: &str) -> Uuid {
        let row = self.stub.seed(
            "worlds",
            json!({
                "owner_id": self.user_id,
                "title": title,
                "summary": null,
                "visibility": "private",
            }),
        );
        id_of(&row)
    }

    /// Seed a card type in `world_id` with the given schema.
    pub fn seed_card_type(&self, world_id: Uuid, name: &str, schema: Value) -> Uuid {
        let row = self.stub.seed(
            "card_types",
            json!({
                "world_id": world_id,
                "name": name,
                "description": null,
                "icon": "📄",
                "color": "#3B82F6",
                "schema": schema,
            }),
        );
        id_of(&row)
    }

    /// Seed a folder in `world_id`.
    pub fn seed_folder(&self, world_id: Uuid, name: &str, parent_id: Option<Uuid>, position: i32) -> Uuid {
        let row = self.stub.seed(
            "folders",
            json!({
                "world_id": world_id,
                "name": name,
                "description": null,
                "parent_id": parent_id,
                "color": "blue",
                "position": position,
            }),
        );
        id_of(&row)
    }

    /// Seed a card of `type_id` in `world_id`.
    pub fn seed_card(&self, world_id: Uuid, type_id: Uuid, name: &str, folder_id: Option<Uuid>) -> Uuid {
        let row = self.stub.seed(
            "cards",
            json!({
                "world_id": world_id,
                "type_id": type_id,
                "folder_id": folder_id,
                "name": name,
                "slug": name.to_lowercase().replace(' ', "-"),
                "cover_image_url": null,
                "summary": null,
                "position": 0,
            }),
        );
        id_of(&row)
    }
}

pub fn id_of(row: &Value) -> Uuid {
    row["id"].as_str().unwrap().parse().unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
