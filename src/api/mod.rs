use crate::models::{Category, ContentItem, ContentType, CurrentUser, DashboardStats, Priority};
use crate::session::{csrf_token, CSRF_HEADER};
use reqwest::Method;
use serde::{Deserialize, Serialize};

pub(crate) const NETWORK_ERROR: &str = "Network error. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// The server answered with a non-success status.
    Application,
    /// The request never completed, or a success body could not be decoded.
    Transport,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl ApiError {
    pub(crate) fn transport(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            status: None,
            message: e.to_string(),
        }
    }

    pub(crate) fn application(status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::Application,
            status: Some(status),
            message: extract_error_message(body).unwrap_or_default(),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind == ApiErrorKind::Transport
    }

    /// Text for a toast: the server's own message when it sent one,
    /// otherwise `fallback`; transport failures always read as a network error.
    pub fn describe(&self, fallback: &str) -> String {
        match self.kind {
            ApiErrorKind::Transport => NETWORK_ERROR.to_string(),
            ApiErrorKind::Application if self.message.trim().is_empty() => fallback.to_string(),
            ApiErrorKind::Application => self.message.clone(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Pull a human readable message out of an error body.
///
/// Understands `{"error": ..}`, `{"detail": ..}` and field error maps such
/// as `{"title": ["Title cannot be empty"]}`.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;

    for key in ["error", "detail", "message"] {
        if let Some(s) = v.get(key).and_then(|x| x.as_str()) {
            if !s.trim().is_empty() {
                return Some(s.to_string());
            }
        }
    }

    let obj = v.as_object()?;
    if let Some(msg) = first_string(obj.get("non_field_errors")) {
        return Some(msg);
    }
    obj.iter()
        .find_map(|(field, val)| first_string(Some(val)).map(|msg| format!("{field}: {msg}")))
}

fn first_string(v: Option<&serde_json::Value>) -> Option<String> {
    match v? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(list) => list
            .iter()
            .filter_map(|x| x.as_str())
            .find(|s| !s.trim().is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Accepts the user object itself or one wrapped as `{"user": {..}}`.
pub(crate) fn parse_current_user(body: &str) -> Option<CurrentUser> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    let user = v.get("user").filter(|u| u.is_object()).unwrap_or(&v);
    serde_json::from_value(user.clone()).ok()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://127.0.0.1:8000/api".to_string();

        // Both `window.ENV.API_URL` and `window.ENV.api_url` are accepted.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CreateItemRequest {
    pub title: String,
    pub content_type: ContentType,
    pub category: Category,
    pub is_starred: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Exactly one filter dimension per list request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ContentFilter {
    All,
    Type(ContentType),
    Starred,
    Category(Category),
}

impl ContentFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            ContentFilter::All => vec![],
            ContentFilter::Type(t) => vec![("type", t.to_string())],
            ContentFilter::Starred => vec![("starred", "true".to_string())],
            ContentFilter::Category(c) => vec![("category", c.to_string())],
        }
    }

    pub fn list_path(&self) -> String {
        let query = self
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            "/content/".to_string()
        } else {
            format!("/content/?{query}")
        }
    }
}

const NO_BODY: Option<&()> = None;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every call goes through here: session cookie included, CSRF header on
    /// anything that is not a GET, non-2xx mapped to an application error.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = client.request(method.clone(), self.url(path));

        if method != Method::GET {
            if let Some(token) = csrf_token() {
                req = req.header(CSRF_HEADER, token);
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(|e| {
            web_sys::console::warn_1(&format!("{method} {path} failed: {e}").into());
            ApiError::transport(e)
        })?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::application(status, &body))
        }
    }

    async fn request<T: serde::de::DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::transport)
    }

    async fn request_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<()> {
        self.send(method, path, body).await.map(|_| ())
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            "/users/login/",
            Some(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            "/users/register/",
            Some(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    /// A success status is what proves the session. The body only feeds the
    /// header, so a shape we cannot read yields `None` rather than an error.
    pub async fn current_user(&self) -> ApiResult<Option<CurrentUser>> {
        let res = self
            .send(Method::GET, "/users/current_user/", NO_BODY)
            .await?;
        let body = res.text().await.unwrap_or_default();
        Ok(parse_current_user(&body))
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.request_empty(Method::POST, "/users/logout/", NO_BODY).await
    }

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.request(Method::GET, "/content/dashboard_stats/", NO_BODY)
            .await
    }

    pub async fn list_items(&self, filter: ContentFilter) -> ApiResult<Vec<ContentItem>> {
        self.request(Method::GET, &filter.list_path(), NO_BODY).await
    }

    pub async fn create_item(&self, req_body: &CreateItemRequest) -> ApiResult<ContentItem> {
        self.request(Method::POST, "/content/", Some(req_body)).await
    }

    pub async fn toggle_star(&self, item_id: i64) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            &format!("/content/{item_id}/toggle_star/"),
            NO_BODY,
        )
        .await
    }

    pub async fn toggle_complete(&self, item_id: i64) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            &format!("/content/{item_id}/toggle_complete/"),
            NO_BODY,
        )
        .await
    }

    pub async fn delete_item(&self, item_id: i64) -> ApiResult<()> {
        self.request_empty(Method::DELETE, &format!("/content/{item_id}/"), NO_BODY)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_trims_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/api/".to_string());
        assert_eq!(client.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(
            client.url("/users/login/"),
            "http://127.0.0.1:8000/api/users/login/"
        );
    }

    #[test]
    fn test_starred_filter_has_no_type_or_category() {
        let pairs = ContentFilter::Starred.query_pairs();
        assert_eq!(pairs, vec![("starred", "true".to_string())]);
        assert_eq!(ContentFilter::Starred.list_path(), "/content/?starred=true");
    }

    #[test]
    fn test_list_paths_per_filter() {
        assert_eq!(ContentFilter::All.list_path(), "/content/");
        assert_eq!(
            ContentFilter::Type(ContentType::Task).list_path(),
            "/content/?type=task"
        );
        assert_eq!(
            ContentFilter::Category(Category::Work).list_path(),
            "/content/?category=work"
        );
    }

    #[test]
    fn test_extract_error_message_shapes() {
        assert_eq!(
            extract_error_message(r#"{"error": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            extract_error_message(r#"{"detail": "Authentication credentials were not provided."}"#)
                .as_deref(),
            Some("Authentication credentials were not provided.")
        );
        assert_eq!(
            extract_error_message(r#"{"title": ["Title cannot be empty"]}"#).as_deref(),
            Some("title: Title cannot be empty")
        );
        assert_eq!(
            extract_error_message(r#"{"non_field_errors": ["Bad pair"], "x": ["y"]}"#).as_deref(),
            Some("Bad pair")
        );
    }

    #[test]
    fn test_extract_error_message_rejects_non_json_and_empty() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(r#"{"error": "  "}"#), None);
        assert_eq!(extract_error_message("[]"), None);
    }

    #[test]
    fn test_describe_uses_server_message_then_fallback() {
        let with_msg = ApiError::application(400, r#"{"error": "Username already exists"}"#);
        assert_eq!(with_msg.describe("Registration failed"), "Username already exists");

        let without = ApiError::application(500, "");
        assert_eq!(without.describe("Registration failed"), "Registration failed");
        assert_eq!(without.status, Some(500));
    }

    #[test]
    fn test_transport_error_always_reads_as_network_error() {
        let e = ApiError::transport("connection refused");
        assert!(e.is_transport());
        assert_eq!(e.describe("Login failed"), NETWORK_ERROR);
        assert_eq!(e.to_string(), "connection refused");
    }

    #[test]
    fn test_create_item_request_skips_absent_fields() {
        let req = CreateItemRequest {
            title: "Read".to_string(),
            content_type: ContentType::Link,
            category: Category::Personal,
            is_starred: false,
            content: None,
            priority: None,
            due_date: None,
            url: Some("https://example.com".to_string()),
            language: None,
            tags: None,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["content_type"], "link");
        assert_eq!(v["url"], "https://example.com");
        assert!(v.get("priority").is_none());
        assert!(v.get("due_date").is_none());
    }

    #[test]
    fn test_current_user_body_is_optional_for_a_live_session() {
        let plain = parse_current_user(r#"{"id": 1, "username": "alice", "email": "a@x.io"}"#)
            .expect("plain user");
        assert_eq!(plain.username, "alice");
        assert_eq!(plain.id, Some(1));

        let no_id = parse_current_user(r#"{"username": "alice"}"#).expect("user without id");
        assert_eq!(no_id.username, "alice");

        let wrapped =
            parse_current_user(r#"{"user": {"id": 1, "username": "alice"}}"#).expect("wrapped user");
        assert_eq!(wrapped.username, "alice");

        // Empty or unexpected bodies are not an auth failure, just no name.
        assert!(parse_current_user("").is_none());
        assert!(parse_current_user(r#"{"ok": true}"#).is_none());
    }
}
