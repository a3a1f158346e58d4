use std::borrow::Cow;
use std::sync::Arc;

use sightline_common::SurfaceId;
use sightline_shell::SurfaceEvent;
use tracing::{debug, warn};
use wry::http::Response;
use wry::{PageLoadEvent, WebViewBuilder};

use crate::content::ContentProvider;
use crate::events::EventSink;

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Where a surface may navigate.
///
/// Bundled content (the app scheme and the `http://<scheme>.localhost`
/// form WebView2 rewrites it to) and `about:blank` are always allowed. In
/// live mode the dev server origin is added. Everything else is blocked.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    prefixes: Vec<String>,
    origins: Vec<String>,
}

impl NavigationPolicy {
    pub fn packaged(scheme: &str) -> Self {
        Self {
            prefixes: vec![format!("{scheme}://"), "about:blank".to_string()],
            origins: vec![
                format!("http://{scheme}.localhost"),
                format!("https://{scheme}.localhost"),
            ],
        }
    }

    pub fn live(scheme: &str, host: &str, port: u16) -> Self {
        let mut policy = Self::packaged(scheme);
        policy.origins.push(format!("http://{host}:{port}"));
        policy
    }

    pub fn allows(&self, url: &str) -> bool {
        if self.prefixes.iter().any(|p| url.starts_with(p.as_str())) {
            return true;
        }
        self.origins.iter().any(|origin| {
            url.strip_prefix(origin.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
        })
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            debug!(%surface, body_len = body.len(), "IPC message from surface");
            events.push(SurfaceEvent::Ipc { surface, body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| match event {
            PageLoadEvent::Started => debug!(%surface, url = %url, "page load started"),
            PageLoadEvent::Finished => {
                debug!(%surface, url = %url, "page load finished");
                events.push(SurfaceEvent::LoadFinished { surface, url });
            }
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        policy: Arc<NavigationPolicy>,
        surface: SurfaceId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if policy.allows(&url) {
                return true;
            }
            warn!(%surface, url = %url, "navigation blocked: URL not in allowlist");
            false
        })
    }

    pub(super) fn attach_custom_protocol<'a>(
        &self,
        builder: WebViewBuilder<'a>,
    ) -> WebViewBuilder<'a> {
        let Some(provider) = &self.content_provider else {
            return builder;
        };
        let cp: Arc<ContentProvider> = Arc::clone(provider);
        let scheme = cp.scheme().to_string();
        let origin = format!("{scheme}://localhost");
        builder.with_custom_protocol(scheme, move |_webview_id, request| {
            let uri = request.uri().to_string();
            let path = cp.request_path(&uri);
            match cp.resolve(path) {
                Some((mime, data)) => respond(200, &mime, &origin, data),
                None => {
                    warn!(path = %path, "custom protocol: asset not found");
                    respond(404, "text/plain", &origin, b"Not Found".to_vec())
                }
            }
        })
    }
}

fn respond(
    status: u16,
    mime: &str,
    origin: &str,
    body: Vec<u8>,
) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .header("Access-Control-Allow-Origin", origin)
        .body(Cow::Owned(body))
        .unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: failed to build response");
            let mut fallback = Response::new(Cow::Borrowed(&b""[..]));
            *fallback.status_mut() = wry::http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaged_allows_bundled_content() {
        let policy = NavigationPolicy::packaged("app");
        assert!(policy.allows("app://localhost/home"));
        assert!(policy.allows("app://localhost/kinect"));
        assert!(policy.allows("about:blank"));
    }

    #[test]
    fn allows_webview2_rewritten_scheme() {
        let policy = NavigationPolicy::packaged("app");
        assert!(policy.allows("http://app.localhost/home"));
        assert!(policy.allows("https://app.localhost/kinect"));
        assert!(!policy.allows("http://app.localhost.evil.com/home"));
    }

    #[test]
    fn packaged_blocks_dev_server_and_web() {
        let policy = NavigationPolicy::packaged("app");
        assert!(!policy.allows("http://localhost:8888/home"));
        assert!(!policy.allows("https://example.com"));
        assert!(!policy.allows("file:///etc/passwd"));
        assert!(!policy.allows("javascript:alert(1)"));
        assert!(!policy.allows("data:text/html,<h1>x</h1>"));
        assert!(!policy.allows(""));
    }

    #[test]
    fn live_allows_exact_dev_origin() {
        let policy = NavigationPolicy::live("app", "localhost", 8888);
        assert!(policy.allows("http://localhost:8888/home"));
        assert!(policy.allows("http://localhost:8888"));
        assert!(policy.allows("http://localhost:8888/?x=1"));
        assert!(!policy.allows("http://localhost:88889/home"));
        assert!(!policy.allows("http://localhost:9999/home"));
        assert!(!policy.allows("http://localhost:8888.evil.com/"));
        // Bundled content stays reachable.
        assert!(policy.allows("app://localhost/home"));
    }

    #[test]
    fn response_carries_status_and_mime() {
        let res = respond(200, "text/html", "app://localhost", b"<h1>".to_vec());
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["Content-Type"], "text/html");
        assert_eq!(res.body().as_ref(), b"<h1>");
    }
}
