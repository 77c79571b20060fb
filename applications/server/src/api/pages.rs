/// Page routes: every gated page is the web app's entry point
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, response::Html};

/// GET /, /login, /register, /logout, /profile
pub async fn index(State(app_state): State<AppState>) -> Result<Html<Vec<u8>>> {
    let index_path = app_state.web_dir.join("index.html");

    match tokio::fs::read(&index_path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ServerError::NotFound("Page not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
