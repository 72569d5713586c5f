use crate::autocomplete::{AutocompleteConfig, FieldKind, LookupRequest};
use crate::models::{MediaUpload, SearchCriteria};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
    /// Backend answered with `"status": "error"`.
    Backend,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    fn backend(message: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Backend,
            message: message.unwrap_or_else(|| "Backend reported an error".to_string()),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub autocomplete: AutocompleteConfig,
}

impl EnvConfig {
    pub fn new() -> Self {
        let api_url = env_string("API_URL")
            .or_else(|| env_string("api_url"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let autocomplete = AutocompleteConfig::default().with_overrides(
            env_number("DEBOUNCE_MS"),
            env_number("BLUR_GRACE_MS"),
            env_number("MODEL_LIMIT"),
        );

        Self {
            api_url,
            autocomplete,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Deployments inject `window.ENV = { API_URL: ..., DEBOUNCE_MS: ... }` before the
// wasm bundle loads.
fn env_value(key: &str) -> Option<wasm_bindgen::JsValue> {
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    js_sys::Reflect::get(&env, &key.into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn env_string(key: &str) -> Option<String> {
    env_value(key)?
        .as_string()
        .filter(|s| !s.trim().is_empty())
}

fn env_number(key: &str) -> Option<f64> {
    let v = env_value(key)?;
    v.as_f64()
        .or_else(|| v.as_string().and_then(|s| s.trim().parse().ok()))
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ResponseStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// `/api/cars/makes` and `/api/cars/models` share this shape; only the list key
/// differs.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LookupResponse {
    pub status: ResponseStatus,
    #[serde(default, alias = "makes", alias = "models")]
    pub items: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LookupResponse {
    pub fn into_items(self) -> ApiResult<Vec<String>> {
        match self.status {
            ResponseStatus::Success => Ok(self.items),
            _ => Err(ApiError::backend(self.message)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SearchResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn into_result(self) -> ApiResult<SearchResponse> {
        match self.status {
            ResponseStatus::Success => Ok(self),
            _ => Err(ApiError::backend(self.message)),
        }
    }
}

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

    pub fn from_env(env: &EnvConfig) -> Self {
        Self::new(env.api_url.clone())
    }

    pub(crate) fn lookup_url(&self, req: &LookupRequest) -> String {
        let query = urlencoding::encode(req.text());
        match req.field() {
            FieldKind::Make => format!("{}/api/cars/makes?query={}", self.base_url, query),
            FieldKind::Model => {
                let make = urlencoding::encode(req.scope_make().unwrap_or_default());
                let mut url = format!(
                    "{}/api/cars/models?make={}&query={}",
                    self.base_url, make, query
                );
                if let Some(limit) = req.limit {
                    url.push_str(&format!("&limit={limit}"));
                }
                url
            }
        }
    }

    /// Error replies from the backend carry a JSON body with a `message` even on
    /// 4xx/5xx, so the body is parsed before looking at the status.
    async fn send_json<T: serde::de::DeserializeOwned>(
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();
        let body = res.text().await.map_err(ApiError::network)?;

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ApiError::http(status, body, ctx)),
            Err(e) => Err(ApiError::parse(e)),
        }
    }

    pub async fn lookup(&self, req: &LookupRequest) -> ApiResult<Vec<String>> {
        let client = reqwest::Client::new();
        let resp: LookupResponse = Self::send_json(
            client.get(self.lookup_url(req)),
            &format!("{} lookup failed", req.field()),
        )
        .await?;
        resp.into_items()
    }

    pub async fn search(
        &self,
        media: MediaUpload,
        criteria: &SearchCriteria,
    ) -> ApiResult<SearchResponse> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in criteria.form_fields() {
            form = form.text(name, value);
        }

        let part = reqwest::multipart::Part::bytes(media.bytes).file_name(media.file_name);
        let part = if media.mime_type.is_empty() {
            part
        } else {
            part.mime_str(&media.mime_type).map_err(ApiError::parse)?
        };
        form = form.part("media", part);

        let client = reqwest::Client::new();
        let resp: SearchResponse = Self::send_json(
            client
                .post(format!("{}/api/search", self.base_url))
                .multipart(form),
            "Search failed",
        )
        .await?;
        resp.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::{FieldQuery, LookupTicket};

    fn request(field: FieldKind, text: &str, scope: Option<&str>, limit: Option<u32>) -> LookupRequest {
        LookupRequest {
            ticket: LookupTicket {
                field,
                seq: 1,
                query: FieldQuery::new(text, scope.map(str::to_string)),
            },
            limit,
        }
    }

    #[test]
    fn test_api_client_trims_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/".to_string());
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_make_lookup_url_encodes_query() {
        let client = ApiClient::new("http://api".to_string());
        let url = client.lookup_url(&request(FieldKind::Make, "Land R", None, None));
        assert_eq!(url, "http://api/api/cars/makes?query=Land%20R");
    }

    #[test]
    fn test_model_lookup_url_is_scoped() {
        let client = ApiClient::new("http://api".to_string());
        let url = client.lookup_url(&request(
            FieldKind::Model,
            "3",
            Some("Mercedes-Benz"),
            Some(20),
        ));
        assert_eq!(
            url,
            "http://api/api/cars/models?make=Mercedes-Benz&query=3&limit=20"
        );

        let url = client.lookup_url(&request(FieldKind::Model, "a&b", Some("Rolls Royce"), None));
        assert_eq!(
            url,
            "http://api/api/cars/models?make=Rolls%20Royce&query=a%26b"
        );
    }

    #[test]
    fn test_makes_response_contract_deserialize() {
        let json = r#"{"status": "success", "makes": ["Toyota", "Toyopet"]}"#;
        let parsed: LookupResponse = serde_json::from_str(json).expect("makes response should parse");
        assert_eq!(parsed.into_items().unwrap(), vec!["Toyota", "Toyopet"]);
    }

    #[test]
    fn test_models_response_contract_deserialize() {
        let json = r#"{"status": "success", "models": ["Camry", "Corolla"]}"#;
        let parsed: LookupResponse = serde_json::from_str(json).expect("models response should parse");
        assert_eq!(parsed.items.len(), 2);
    }

    #[test]
    fn test_lookup_error_status_becomes_backend_error() {
        let json = r#"{"status": "error", "message": "Make is required"}"#;
        let parsed: LookupResponse = serde_json::from_str(json).expect("error response should parse");
        let err = parsed.into_items().unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Backend);
        assert_eq!(err.to_string(), "Make is required");
    }

    #[test]
    fn test_unknown_status_is_not_success() {
        let json = r#"{"status": "pending"}"#;
        let parsed: LookupResponse = serde_json::from_str(json).expect("should parse");
        assert_eq!(parsed.status, ResponseStatus::Unknown);
        assert!(parsed.into_items().is_err());
    }

    #[test]
    fn test_search_response_contract_deserialize() {
        let json = r#"{
            "status": "success",
            "analysis": "Silver Toyota Camry at 00:42",
            "screenshot": null,
            "timestamp": 42.5
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).expect("search response should parse");
        let ok = parsed.into_result().expect("success status");
        assert_eq!(ok.timestamp, Some(42.5));
        assert!(ok.screenshot.is_none());
    }
}
