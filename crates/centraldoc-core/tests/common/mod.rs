// Shared fixtures for centraldoc-core integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use centraldoc_api::{ApiResponse, DataSource, Error};
use centraldoc_core::{ComposedDocument, CoreError, DocumentWriter, Fetcher, RetryPolicy};
use serde_json::{Value, json};

// ── Scripted data source ────────────────────────────────────────────

/// In-memory data source keyed by path.
///
/// Each path serves its queued responses in order; the last one is
/// repeated once the queue is down to it. Unknown paths answer 404.
#[derive(Default)]
pub struct ScriptedSource {
    routes: Mutex<HashMap<String, VecDeque<Result<ApiResponse, Error>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: impl Into<String>, status: u16, payload: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.into())
            .or_default()
            .push_back(Ok(ApiResponse::new(status, payload)));
        self
    }

    pub fn ok(self, path: impl Into<String>, payload: Value) -> Self {
        self.respond(path, 200, payload)
    }

    /// Drop anything queued for `path` and serve `payload` instead.
    pub fn replace(self, path: impl Into<String>, payload: Value) -> Self {
        let path = path.into();
        self.routes.lock().unwrap().remove(&path);
        self.ok(path, payload)
    }

    /// Drop anything queued for `path` and fail every request to it.
    pub fn replace_with_failure(self, path: impl Into<String>, error: Error) -> Self {
        let path = path.into();
        self.routes.lock().unwrap().remove(&path);
        self.fail(path, error)
    }

    pub fn fail(self, path: impl Into<String>, error: Error) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.into())
            .or_default()
            .push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split('?').next() == Some(path))
            .count()
    }

    fn answer(&self, path: &str, label: String) -> Result<ApiResponse, Error> {
        self.calls.lock().unwrap().push(label);
        let mut routes = self.routes.lock().unwrap();
        let Some(queue) = routes.get_mut(path) else {
            return Ok(ApiResponse::new(404, json!({ "detail": "not found" })));
        };
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(replay)
        };
        next.unwrap_or_else(|| Ok(ApiResponse::new(404, json!({ "detail": "not found" }))))
    }
}

fn replay(entry: &Result<ApiResponse, Error>) -> Result<ApiResponse, Error> {
    match entry {
        Ok(resp) => Ok(resp.clone()),
        Err(Error::Authentication { message }) => Err(Error::Authentication {
            message: message.clone(),
        }),
        Err(other) => Err(Error::Tls(other.to_string())),
    }
}

impl DataSource for ScriptedSource {
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<ApiResponse, Error> {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.answer(path, format!("{path}?{}", query.join("&")))
    }

    async fn post(&self, path: &str, _body: &Value) -> Result<ApiResponse, Error> {
        self.answer(path, path.to_owned())
    }
}

/// Fetcher over `source` with the production retry budget.
pub fn fetcher(source: ScriptedSource) -> Fetcher<ScriptedSource> {
    Fetcher::new(source).with_policies(
        RetryPolicy::get().with_delay(Duration::from_millis(10)),
        RetryPolicy::post().with_delay(Duration::from_millis(10)),
    )
}

// ── Recording writer ────────────────────────────────────────────────

/// Keeps every saved document in memory instead of writing files.
#[derive(Default)]
pub struct RecordingWriter {
    saved: Mutex<Vec<(PathBuf, ComposedDocument)>>,
}

impl RecordingWriter {
    pub fn file_names(&self) -> Vec<String> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    pub fn document(&self, file_name: &str) -> Option<ComposedDocument> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.file_name().is_some_and(|n| n == file_name))
            .map(|(_, d)| d.clone())
    }
}

impl DocumentWriter for RecordingWriter {
    fn save(&self, document: &ComposedDocument, path: &Path) -> Result<(), CoreError> {
        self.saved
            .lock()
            .unwrap()
            .push((path.to_path_buf(), document.clone()));
        Ok(())
    }
}
