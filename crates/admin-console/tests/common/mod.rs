//! In-process servers shared by the integration tests.

#![allow(dead_code)]

use admin_console::config::UploadConfig;
use admin_console::upload::{NamingPolicy, UploadServer};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

/// A running upload backend. Dropping it stops the server.
pub struct UploadBackend {
    pub base_url: String,
    _shutdown: oneshot::Sender<()>,
}

pub async fn start_upload_backend(dir: &std::path::Path, naming: NamingPolicy) -> UploadBackend {
    let config = UploadConfig {
        dir: dir.to_path_buf(),
        naming,
        ..UploadConfig::default()
    };
    let mut server = UploadServer::new(&config);
    let addr = server
        .try_bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upload server");

    let (shutdown, stopped) = oneshot::channel::<()>();
    tokio::spawn(server.run(async move {
        let _ = stopped.await;
    }));

    UploadBackend {
        base_url: format!("http://{}", addr),
        _shutdown: shutdown,
    }
}

#[derive(Clone)]
struct ApiState {
    users: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicU64>,
    fail_with: Arc<Mutex<Option<u16>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ApiState {
    async fn enter(&self, request: String) -> Result<(), StatusCode> {
        self.requests.lock().await.push(request);
        match *self.fail_with.lock().await {
            Some(code) => Err(StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)),
            None => Ok(()),
        }
    }
}

/// A tiny JSON collection server for `/users`, plus a `/products` endpoint that answers
/// with something that isn't JSON.
pub struct FakeApi {
    pub addr: SocketAddr,
    state: ApiState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeApi {
    pub async fn start(users: Vec<Value>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|u| u["id"].as_u64())
            .max()
            .unwrap_or(0)
            + 1;
        let state = ApiState {
            users: Arc::new(Mutex::new(users)),
            next_id: Arc::new(AtomicU64::new(next_id)),
            fail_with: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/users/{id}", axum::routing::put(update_user).delete(delete_user))
            .route("/products", get(|| async { "<html>not json</html>" }))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake api");
        let addr = listener.local_addr().unwrap();

        let (shutdown, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every following request answers with `status`.
    pub async fn fail_with(&self, status: u16) {
        *self.state.fail_with.lock().await = Some(status);
    }

    /// `"METHOD /path"` of every request received.
    pub async fn requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }

    pub async fn users(&self) -> Vec<Value> {
        self.state.users.lock().await.clone()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn list_users(State(state): State<ApiState>) -> Result<Json<Value>, StatusCode> {
    state.enter("GET /users".into()).await?;
    Ok(Json(Value::Array(state.users.lock().await.clone())))
}

async fn create_user(
    State(state): State<ApiState>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.enter("POST /users".into()).await?;
    body["id"] = json!(state.next_id.fetch_add(1, Ordering::SeqCst));
    state.users.lock().await.push(body.clone());
    Ok(Json(body))
}

async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.enter(format!("PUT /users/{}", id)).await?;
    let mut users = state.users.lock().await;
    let slot = users
        .iter_mut()
        .find(|u| u["id"].as_u64() == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_user(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    state.enter(format!("DELETE /users/{}", id)).await?;
    let mut users = state.users.lock().await;
    let before = users.len();
    users.retain(|u| u["id"].as_u64() != Some(id));
    if users.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({})))
}
