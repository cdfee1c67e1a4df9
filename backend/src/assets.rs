//! Serves the compiled frontend embedded in the binary.
//!
//! Known files are returned with a MIME type guessed from their extension.
//! Every other path gets `index.html`, so client-side routes such as
//! `/admin/bulk-upload-teachers` load the app on a full page reload.

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use log::debug;
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

/// Resolves `path` against `dir`, returning the file body and its content type.
fn resolve<'a>(dir: &'a Dir<'a>, path: &str) -> Option<(&'a [u8], String)> {
    let path = path.trim_start_matches('/');
    let file_path = if path.is_empty() { INDEX } else { path };

    if let Some(file) = dir.get_file(file_path) {
        let mime = from_path(file_path).first_or_octet_stream();
        return Some((file.contents(), mime.to_string()));
    }

    debug!("no embedded asset for /{}, serving {}", path, INDEX);
    dir.get_file(INDEX)
        .map(|index| (index.contents(), "text/html; charset=utf-8".to_string()))
}

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    match resolve(&STATIC_DIR, req.path()) {
        Some((body, content_type)) => HttpResponse::Ok()
            .content_type(content_type)
            .body(body.to_vec()),
        None => HttpResponse::NotFound().body("Not Found"),
    }
}
