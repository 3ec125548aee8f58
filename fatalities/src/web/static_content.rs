use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;

use crate::web::error::WebError;

/// In release mode, return the files from a statically included dir
#[cfg(not(debug_assertions))]
fn get_static_file(path: &str) -> Option<&'static [u8]> {
    use include_dir::include_dir;
    static STATIC_DIR: include_dir::Dir = include_dir!("$CARGO_MANIFEST_DIR/static");
    let dir = &STATIC_DIR;
    let file = dir.get_file(path)?;
    Some(file.contents())
}

/// In debug mode, just load the files from disk
#[cfg(debug_assertions)]
fn get_static_file(path: &str) -> Option<Vec<u8>> {
    use std::path::PathBuf;

    // keep requests inside the static dir
    if path.split('/').any(|part| part == "..") {
        return None;
    }
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    std::fs::read(dir.join(path)).ok()
}

fn get_file(path: &str) -> Result<Response<Body>, WebError> {
    let mime_type = mime_guess::from_path(path).first_or_text_plain();
    match get_static_file(path) {
        None => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::new(http_body_util::Empty::new()))?),
        Some(file) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime_type.as_ref())
            .header(
                header::CACHE_CONTROL,
                #[cfg(not(debug_assertions))]
                HeaderValue::from_static("public, max-age=86400"),
                #[cfg(debug_assertions)]
                HeaderValue::from_static("no-cache"),
            )
            .body(Body::new(http_body_util::Full::from(file)))?),
    }
}

pub(crate) async fn static_path(Path(path): Path<String>) -> impl IntoResponse {
    let path = path.trim_start_matches('/');
    get_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_known_assets() {
        let response = static_path(Path("main.css".to_string())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

        let response = static_path(Path("hover.js".to_string())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn hover_script_positions_from_bounding_boxes() {
        let script = String::from_utf8(get_static_file("hover.js").unwrap().to_vec()).unwrap();
        // inline <svg> elements have no offsetLeft/offsetTop
        assert!(!script.contains("svg.offset"));
        assert!(script.contains("chartEl.getBoundingClientRect()"));
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let response = static_path(Path("nope.txt".to_string())).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = static_path(Path("../Cargo.toml".to_string())).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
