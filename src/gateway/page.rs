//! Companion chat page served on `GET /`.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::config::ChatConfig;
use crate::http::server::AppState;

const TEMPLATE: &str = include_str!("../../assets/index.html");

/// `GET /`.
pub async fn page_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    let url_key = query.as_deref().and_then(key_param);
    Html(render_page(&state.config.gateway, url_key.as_deref()))
}

/// Everything the gateway does not route.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Value of the `key` query parameter.
pub fn key_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == "key")
        .map(|(_, value)| value.into_owned())
}

/// Fill the page template.
pub fn render_page(gateway: &ChatConfig, url_key: Option<&str>) -> String {
    let has_server_key = gateway.has_server_key();
    let (status, notice) = if has_server_key {
        ("Server key configured", "")
    } else {
        (
            "No server key",
            "<br><span class=\"warn\">The server has no API key configured; add ?key=YOUR_API_KEY to the URL.</span>",
        )
    };

    TEMPLATE
        .replace("{{KEY_STATUS}}", status)
        .replace("{{KEY_NOTICE}}", notice)
        .replace("{{CHAT_PATH}}", &script_string(&gateway.chat_path))
        .replace("{{URL_KEY}}", &script_string(url_key.unwrap_or("")))
}

/// A JSON string literal safe to place inside `<script>`.
fn script_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
