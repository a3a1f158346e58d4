//! Bundled content served through the app's custom protocol.
//!
//! In packaged mode surfaces load `app://localhost/<route>`. The exported
//! pages are laid out like a static site, so a route resolves to the first
//! of `<route>`, `<route>.html` and `<route>/index.html` that exists under
//! the content root.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::debug;

/// A resolved asset: MIME type and bytes.
pub type Asset = (Cow<'static, str>, Vec<u8>);

/// Serves files from a content root.
pub struct ContentProvider {
    root: PathBuf,
    scheme: String,
}

impl ContentProvider {
    pub fn new(root: impl Into<PathBuf>, scheme: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            scheme: scheme.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Strip the scheme and host from a request URI, leaving the path.
    ///
    /// Handles `app://localhost/x`, `app:///x`, `app://x` and the
    /// `http://app.localhost/x` form WebView2 rewrites custom schemes to.
    pub fn request_path<'u>(&self, uri: &'u str) -> &'u str {
        let path = uri
            .strip_prefix(&format!("{}://localhost", self.scheme))
            .or_else(|| uri.strip_prefix(&format!("http://{}.localhost", self.scheme)))
            .or_else(|| uri.strip_prefix(&format!("https://{}.localhost", self.scheme)))
            .or_else(|| uri.strip_prefix(&format!("{}://", self.scheme)))
            .unwrap_or("");
        let path = path.split(['?', '#']).next().unwrap_or("");
        path.trim_start_matches('/')
    }

    /// Resolve a request path to an asset.
    pub fn resolve(&self, path: &str) -> Option<Asset> {
        let clean = path.trim_start_matches('/');
        if clean.split('/').any(|seg| seg == "..") {
            return None;
        }

        let canonical_root = std::fs::canonicalize(&self.root).ok()?;
        let candidates = if clean.is_empty() {
            vec![PathBuf::from("index.html")]
        } else {
            vec![
                PathBuf::from(clean),
                PathBuf::from(format!("{clean}.html")),
                Path::new(clean).join("index.html"),
            ]
        };

        for candidate in candidates {
            let full = self.root.join(&candidate);
            let Ok(canonical) = std::fs::canonicalize(&full) else {
                continue;
            };
            // Symlinks may still point outside the root.
            if !canonical.starts_with(&canonical_root) || !canonical.is_file() {
                continue;
            }
            let Ok(data) = std::fs::read(&canonical) else {
                continue;
            };
            debug!(path = %clean, file = %canonical.display(), "asset resolved");
            return Some((Cow::Borrowed(mime_from_extension(&canonical)), data));
        }
        None
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
