//! Layout/upload service abstraction
//!
//! The crossword layout algorithm and the puzzle store live behind a remote
//! API. Backends are selected by environment:
//! - Local: file-based fixtures and a local publish record for development
//! - Test: in-memory mock for testing
//! - Production: remote HTTP API

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use quizdle_core::{LayoutResponse, PuzzleDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development - file-based fixtures
    Local,
    /// Testing - in-memory mock
    Test,
    /// Production - remote API
    Production,
}

impl Environment {
    /// Detect environment from QUIZDLE_ENV variable
    pub fn detect() -> Self {
        match std::env::var("QUIZDLE_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") | Ok("testing") => Environment::Test,
            _ => Environment::Local,
        }
    }

    /// Parse a CLI `--env` value; unknown names fall back to detection.
    pub fn from_name(name: &str) -> Self {
        match name {
            "local" => Environment::Local,
            "test" | "testing" => Environment::Test,
            "production" | "prod" => Environment::Production,
            _ => Environment::detect(),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur talking to the layout/upload service
#[derive(Debug, Clone)]
pub enum ServiceError {
    /// Network/connection error
    NetworkError(String),
    /// Server returned an error
    ServerError(String),
    /// Invalid response from server
    InvalidResponse(String),
    /// Local storage error
    StorageError(String),
    /// Wrong or missing password
    AuthenticationFailed,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError(e) => write!(f, "Network error: {}", e),
            Self::ServerError(e) => write!(f, "Server error: {}", e),
            Self::InvalidResponse(e) => write!(f, "Invalid response: {}", e),
            Self::StorageError(e) => write!(f, "Storage error: {}", e),
            Self::AuthenticationFailed => write!(f, "Authentication failed"),
        }
    }
}

/// Trait for layout/upload service backends
pub trait QuizdleService: Send + Sync {
    /// Request candidate grid layouts for a word list
    fn generate(&self, words: &[String]) -> ServiceResult<LayoutResponse>;

    /// Which of the seven days starting at `start` already have a puzzle
    fn week_status(&self, start: NaiveDate) -> ServiceResult<Vec<NaiveDate>>;

    /// Upload a finished puzzle document, gated by password
    fn publish(&self, document: &PuzzleDocument, password: &str) -> ServiceResult<()>;

    /// Check if backend is available/connected
    fn is_available(&self) -> bool;

    /// Get backend name for display
    fn backend_name(&self) -> &'static str;
}

// ==================== Local File Backend ====================

/// File-based backend for development: layouts come from a fixture file,
/// publishes are recorded locally.
pub struct LocalService {
    layouts_path: PathBuf,
    published_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PublishedData {
    /// Published documents keyed by `YYYY-MM-DD` date
    documents: BTreeMap<String, PuzzleDocument>,
}

impl LocalService {
    pub fn new() -> Self {
        let dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(dir)
    }

    /// All files under an explicit directory (tests).
    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            layouts_path: dir.join("quizdle_layouts.json"),
            published_path: dir.join("quizdle_published.json"),
        }
    }

    fn load_published(&self) -> PublishedData {
        match std::fs::read_to_string(&self.published_path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => PublishedData::default(),
        }
    }

    fn save_published(&self, data: &PublishedData) -> ServiceResult<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ServiceError::StorageError(e.to_string()))?;
        std::fs::write(&self.published_path, json)
            .map_err(|e| ServiceError::StorageError(e.to_string()))?;
        Ok(())
    }
}

impl Default for LocalService {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizdleService for LocalService {
    fn generate(&self, words: &[String]) -> ServiceResult<LayoutResponse> {
        // No layout algorithm lives on this side of the wire; development
        // uses a canned response.
        log::debug!("local generate for {} words", words.len());
        let json = std::fs::read_to_string(&self.layouts_path).map_err(|_| {
            ServiceError::StorageError(format!(
                "no canned layouts at {}",
                self.layouts_path.display()
            ))
        })?;
        serde_json::from_str(&json).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    fn week_status(&self, start: NaiveDate) -> ServiceResult<Vec<NaiveDate>> {
        let data = self.load_published();
        let end = start + Duration::days(7);

        let mut dates: Vec<NaiveDate> = data
            .documents
            .keys()
            .filter_map(|key| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
            .filter(|date| *date >= start && *date < end)
            .collect();
        dates.sort();
        Ok(dates)
    }

    fn publish(&self, document: &PuzzleDocument, password: &str) -> ServiceResult<()> {
        if password.is_empty() {
            return Err(ServiceError::AuthenticationFailed);
        }
        let date = document
            .date()
            .ok_or_else(|| ServiceError::InvalidResponse("document has no date".to_string()))?
            .to_string();

        let mut data = self.load_published();
        data.documents.insert(date, document.clone());
        self.save_published(&data)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "Local"
    }
}

// ==================== Mock Backend for Testing ====================

#[derive(Default)]
struct MockState {
    response: LayoutResponse,
    week: Vec<NaiveDate>,
    published: Vec<PuzzleDocument>,
    password: Option<String>,
    unavailable: bool,
    generate_calls: usize,
}

/// In-memory mock service for testing
#[derive(Default)]
pub struct MockService {
    state: Mutex<MockState>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned by `generate`
    pub fn set_response(&self, response: LayoutResponse) {
        self.state.lock().unwrap().response = response;
    }

    /// Set the dates reported by `week_status`
    pub fn set_week_status(&self, dates: Vec<NaiveDate>) {
        self.state.lock().unwrap().week = dates;
    }

    /// Require this password for `publish`
    pub fn set_password(&self, password: &str) {
        self.state.lock().unwrap().password = Some(password.to_string());
    }

    /// Set whether the backend should report as available
    pub fn set_available(&self, available: bool) {
        self.state.lock().unwrap().unavailable = !available;
    }

    pub fn published_count(&self) -> usize {
        self.state.lock().unwrap().published.len()
    }

    pub fn last_published(&self) -> Option<PuzzleDocument> {
        self.state.lock().unwrap().published.last().cloned()
    }

    pub fn generate_calls(&self) -> usize {
        self.state.lock().unwrap().generate_calls
    }
}

impl QuizdleService for MockService {
    fn generate(&self, _words: &[String]) -> ServiceResult<LayoutResponse> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(ServiceError::NetworkError("Mock unavailable".into()));
        }
        state.generate_calls += 1;
        Ok(state.response.clone())
    }

    fn week_status(&self, _start: NaiveDate) -> ServiceResult<Vec<NaiveDate>> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(ServiceError::NetworkError("Mock unavailable".into()));
        }
        Ok(state.week.clone())
    }

    fn publish(&self, document: &PuzzleDocument, password: &str) -> ServiceResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(ServiceError::NetworkError("Mock unavailable".into()));
        }
        if let Some(ref required) = state.password {
            if password != required {
                return Err(ServiceError::AuthenticationFailed);
            }
        }
        state.published.push(document.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.state.lock().unwrap().unavailable
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}

// ==================== Remote HTTP Backend ====================

/// Remote HTTP API backend for production
pub struct RemoteService {
    base_url: String,
    api_key: Option<String>,
}

/// Configuration for remote backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pi.nicyelland.com/quizdle-builder".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl RemoteService {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("QUIZDLE_API_URL")
            .unwrap_or_else(|_| RemoteConfig::default().base_url);
        let api_key = std::env::var("QUIZDLE_API_KEY").ok();

        Self { base_url, api_key }
    }

    /// Make an HTTP request (placeholder - would use reqwest/ureq in real implementation)
    fn request<T: for<'de> Deserialize<'de>>(
        &self,
        _method: &str,
        _endpoint: &str,
        _body: Option<&impl Serialize>,
    ) -> ServiceResult<T> {
        // In a real implementation, this would:
        // 1. Build the full URL
        // 2. Add authentication headers
        // 3. Make the HTTP request
        // 4. Parse the response
        //
        // For now, return an error indicating remote is not implemented
        let _ = (&self.base_url, &self.api_key);
        Err(ServiceError::NetworkError(
            "Remote backend not fully implemented - add HTTP client dependency".to_string(),
        ))
    }
}

impl QuizdleService for RemoteService {
    fn generate(&self, words: &[String]) -> ServiceResult<LayoutResponse> {
        #[derive(Serialize)]
        struct GenerateRequest {
            words: String,
            json: String,
        }

        self.request(
            "GET",
            "/generate",
            Some(&GenerateRequest {
                words: words.join(","),
                json: "true".to_string(),
            }),
        )
    }

    fn week_status(&self, start: NaiveDate) -> ServiceResult<Vec<NaiveDate>> {
        #[derive(Serialize)]
        struct QueryRequest {
            query_type: String,
            start_date: String,
        }

        #[derive(Deserialize)]
        struct QueryResponse {
            #[serde(default)]
            error: Option<String>,
            #[serde(default)]
            data: Vec<NaiveDate>,
        }

        let response: QueryResponse = self.request(
            "POST",
            "/query",
            Some(&QueryRequest {
                query_type: "get_week_status".to_string(),
                start_date: start.format("%Y-%m-%d").to_string(),
            }),
        )?;

        if let Some(error) = response.error {
            return Err(ServiceError::ServerError(error));
        }
        Ok(response.data)
    }

    fn publish(&self, document: &PuzzleDocument, password: &str) -> ServiceResult<()> {
        #[derive(Serialize)]
        struct PublishRequest {
            query_type: String,
            quizdle: String,
            password: String,
        }

        #[derive(Deserialize)]
        struct PublishData {
            #[serde(default)]
            success: bool,
        }

        #[derive(Deserialize)]
        struct PublishResponse {
            #[serde(default)]
            error: Option<String>,
            #[serde(default)]
            data: Option<PublishData>,
        }

        let quizdle = serde_json::to_string(document)
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        let response: PublishResponse = self.request(
            "POST",
            "/query",
            Some(&PublishRequest {
                query_type: "write_new_quizdle".to_string(),
                quizdle,
                password: password.to_string(),
            }),
        )?;

        if let Some(error) = response.error {
            return Err(ServiceError::ServerError(error));
        }
        match response.data {
            Some(data) if data.success => Ok(()),
            _ => Err(ServiceError::InvalidResponse(
                "publish reported no success".to_string(),
            )),
        }
    }

    fn is_available(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "Remote"
    }
}

// ==================== Backend Factory ====================

/// Create the appropriate backend based on environment
pub fn create_backend(env: Environment) -> Arc<dyn QuizdleService> {
    match env {
        Environment::Local => Arc::new(LocalService::new()),
        Environment::Test => Arc::new(MockService::new()),
        Environment::Production => Arc::new(RemoteService::from_env()),
    }
}

/// Create backend with automatic environment detection
pub fn create_backend_auto() -> Arc<dyn QuizdleService> {
    create_backend(Environment::detect())
}
