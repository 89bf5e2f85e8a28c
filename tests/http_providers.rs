//! Remote search and module sync against a local axum server

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use clio::core::ProviderError;
use clio::modules::{ModuleStore, ModuleSync};
use clio::providers::{RemoteProvider, RemoteSearch};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Canned reply for `/search`; every request body is recorded
struct SearchState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Mutex<Vec<String>>,
}

impl SearchState {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

async fn search(State(state): State<Arc<SearchState>>, body: String) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(body);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// Manifest listing plus raw manifest files; every raw download is recorded
struct ManifestState {
    listing_status: StatusCode,
    listing: String,
    files: HashMap<String, String>,
    downloads: Mutex<Vec<String>>,
}

async fn listing(State(state): State<Arc<ManifestState>>) -> (StatusCode, String) {
    (state.listing_status, state.listing.clone())
}

async fn raw_file(
    State(state): State<Arc<ManifestState>>,
    Path(file): Path<String>,
) -> (StatusCode, String) {
    state.downloads.lock().unwrap().push(file.clone());
    match state.files.get(&file) {
        Some(content) => (StatusCode::OK, content.clone()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
}

async fn search_server(state: SearchState) -> (String, Arc<SearchState>) {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/search", post(search))
        .with_state(state.clone());
    let (listener, base) = bind().await;
    serve(listener, app);
    (format!("{}/search", base), state)
}

fn manifest_router(state: Arc<ManifestState>) -> Router {
    Router::new()
        .route("/modules", get(listing))
        .route("/raw/:file", get(raw_file))
        .with_state(state)
}

#[tokio::test]
async fn test_remote_search_posts_raw_query() {
    let (url, state) = search_server(SearchState::new(
        StatusCode::OK,
        r#"{"results": [
            {"name": "du", "description": "Disk usage", "usage": "du -sh ."},
            {"name": "df", "description": "Free space"},
            {"name": "ncdu", "description": "Disk usage browser"}
        ]}"#,
    ))
    .await;

    let search = RemoteSearch::new(url, Duration::from_secs(5), 2).unwrap();
    let hits = search.search_remote("How big is this Folder?").await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name, "du");
    assert_eq!(hits[0].usage, "du -sh .");
    assert_eq!(hits[1].usage, "");

    let requests = state.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_str(&requests[0]).unwrap();
    assert_eq!(sent["query"], "How big is this Folder?");
    assert_eq!(sent["os"], std::env::consts::OS);
    assert_eq!(sent["arch"], std::env::consts::ARCH);
}

#[tokio::test]
async fn test_remote_search_error_status_is_transport() {
    let (url, _) = search_server(SearchState::new(StatusCode::INTERNAL_SERVER_ERROR, "")).await;
    let search = RemoteSearch::new(url, Duration::from_secs(5), 5).unwrap();

    let result = search.search_remote("anything").await;
    assert!(matches!(result, Err(ProviderError::Transport(_))));
}

#[tokio::test]
async fn test_remote_search_bad_body_is_parse_error() {
    let (url, _) = search_server(SearchState::new(StatusCode::OK, "not json")).await;
    let search = RemoteSearch::new(url, Duration::from_secs(5), 5).unwrap();

    let result = search.search_remote("anything").await;
    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_remote_search_times_out() {
    let (url, _) = search_server(
        SearchState::new(StatusCode::OK, r#"{"results": []}"#).slow(Duration::from_secs(5)),
    )
    .await;
    let search = RemoteSearch::new(url, Duration::from_millis(200), 5).unwrap();

    let result = search.search_remote("anything").await;
    assert!(matches!(result, Err(ProviderError::Timeout)));
}

#[tokio::test]
async fn test_module_sync_downloads_yaml_manifests() {
    // listing entries point back at this server
    let (listener, base) = bind().await;

    let listing = serde_json::json!([
        {"name": "git.yaml", "type": "file", "download_url": format!("{}/raw/git.yaml", base)},
        {"name": "broken.yaml", "type": "file", "download_url": format!("{}/raw/broken.yaml", base)},
        {"name": "missing.yaml", "type": "file", "download_url": format!("{}/raw/missing.yaml", base)},
        {"name": "README.md", "type": "file", "download_url": format!("{}/raw/README.md", base)},
        {"name": "drafts", "type": "dir", "download_url": null}
    ]);
    let files = HashMap::from([
        (
            "git.yaml".to_string(),
            "id: git_basics\nname: Git basics\ndescription: Commit and push\ntags: [git, vcs]\n"
                .to_string(),
        ),
        ("broken.yaml".to_string(), "description: no id here\n".to_string()),
        ("README.md".to_string(), "# Modules\n".to_string()),
    ]);
    let state = Arc::new(ManifestState {
        listing_status: StatusCode::OK,
        listing: listing.to_string(),
        files,
        downloads: Mutex::new(Vec::new()),
    });
    serve(listener, manifest_router(state.clone()));

    let store = ModuleStore::in_memory();
    let sync = ModuleSync::new(format!("{}/modules", base), Duration::from_secs(5))
        .unwrap()
        .with_delay(Duration::ZERO);

    let updated = sync.sync(&store).await.unwrap();
    assert_eq!(updated, 1);
    assert_eq!(store.len().unwrap(), 1);
    let record = store.get("git_basics").unwrap().unwrap();
    assert_eq!(record.name, "Git basics");
    assert_eq!(record.tags, vec!["git", "vcs"]);

    let downloads = state.downloads.lock().unwrap().clone();
    assert_eq!(downloads, vec!["git.yaml", "broken.yaml", "missing.yaml"]);
}

#[tokio::test]
async fn test_module_sync_failed_listing_is_error() {
    let state = Arc::new(ManifestState {
        listing_status: StatusCode::FORBIDDEN,
        listing: String::new(),
        files: HashMap::new(),
        downloads: Mutex::new(Vec::new()),
    });
    let (listener, base) = bind().await;
    serve(listener, manifest_router(state));

    let store = ModuleStore::in_memory();
    let sync = ModuleSync::new(format!("{}/modules", base), Duration::from_secs(5)).unwrap();

    assert!(sync.sync(&store).await.is_err());
    assert!(store.is_empty().unwrap());
}
