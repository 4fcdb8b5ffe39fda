//! # Operator Console
//!
//! A single static page whose forms and tables call the JSON routes.

use axum::response::Html;

const CONSOLE_HTML: &str = include_str!("../../assets/console.html");

/// Serves the console page.
pub async fn index() -> Html<&'static str> {
    Html(CONSOLE_HTML)
}
