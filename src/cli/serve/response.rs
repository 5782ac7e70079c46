//! HTTP response handlers.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a static file, optionally injecting the livereload script.
pub fn respond_file(request: Request, path: &Path, ws_port: Option<u16>) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let body = maybe_inject_livereload(body, content_type, ws_port);

    send_body(request, 200, content_type, body)
}

/// Respond with 404 (plain text; the site is a single page).
pub fn respond_not_found(
    request: Request,
    _config: &SiteConfig,
    _ws_port: Option<u16>,
) -> Result<()> {
    use crate::utils::mime::types::PLAIN;

    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with loading page (build not ready).
pub fn respond_loading(request: Request) -> Result<()> {
    use crate::embed::serve::{LOADING_HTML, LoadingVars};
    use crate::utils::mime::types::HTML;

    // HEAD requests return without X-Folio-Ready so the loading page's
    // poll keeps waiting instead of reloading into another loading page
    if is_head_request(&request) {
        let response =
            Response::empty(StatusCode(200)).with_header(make_header("Content-Type", HTML));
        return request.respond(response).map_err(Into::into);
    }

    let body = LOADING_HTML.render(&LoadingVars {
        version: env!("CARGO_PKG_VERSION"),
    });
    let response = Response::from_string(body).with_header(make_header("Content-Type", HTML));
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    use crate::utils::mime::types::PLAIN;
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with livereload.js from memory.
pub fn respond_livereload_js(request: Request, ws_port: u16) -> Result<()> {
    use crate::embed::serve::{LIVERELOAD_JS, LivereloadVars};
    use crate::utils::mime::types::JAVASCRIPT;

    let vars = LivereloadVars { ws_port };
    let body = LIVERELOAD_JS.render(&vars);
    send_body(request, 200, JAVASCRIPT, body.into_bytes())
}

/// Maybe inject the livereload script if content is HTML and ws_port is set
pub fn maybe_inject_livereload(
    body: Vec<u8>,
    content_type: &str,
    ws_port: Option<u16>,
) -> Vec<u8> {
    match (content_type.starts_with("text/html"), ws_port) {
        (true, Some(port)) => inject_livereload_script(&body, port),
        _ => body,
    }
}

/// Inject the livereload script tag before `</body>`
fn inject_livereload_script(content: &[u8], ws_port: u16) -> Vec<u8> {
    use crate::embed::serve::{LIVERELOAD_JS, LivereloadVars};

    let script = LIVERELOAD_JS.external_tag_with_vars(&LivereloadVars { ws_port });
    let script_bytes = script.as_bytes();

    const PATTERN: &[u8] = b"</body>";

    // Reverse search for </body> using byte windows
    if let Some(pos) = content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
    {
        let mut result = Vec::with_capacity(content.len() + script_bytes.len());
        result.extend_from_slice(&content[..pos]);
        result.extend_from_slice(script_bytes);
        result.extend_from_slice(&content[pos..]);
        return result;
    }

    // No </body> found, append to end (browsers handle this gracefully)
    let mut result = Vec::with_capacity(content.len() + script_bytes.len());
    result.extend_from_slice(content);
    result.extend_from_slice(script_bytes);
    result
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("X-Folio-Ready", "true"));
    request.respond(response)?;
    Ok(())
}

pub(super) fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("X-Folio-Ready", "true"));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_before_body_close() {
        let html = b"<html><body><p>hi</p></body></html>".to_vec();
        let out = inject_livereload_script(&html, 35729);
        let out = String::from_utf8(out).unwrap();

        let script_pos = out.find("livereload").unwrap();
        let body_pos = out.find("</body>").unwrap();
        assert!(script_pos < body_pos);
    }

    #[test]
    fn test_inject_case_insensitive() {
        let html = b"<HTML><BODY>x</BODY></HTML>".to_vec();
        let out = inject_livereload_script(&html, 35729);
        assert!(String::from_utf8(out).unwrap().contains("livereload"));
    }

    #[test]
    fn test_inject_appends_without_body_tag() {
        let html = b"<p>fragment</p>".to_vec();
        let out = inject_livereload_script(&html, 35729);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("<p>fragment</p>"));
        assert!(out.contains("livereload"));
    }

    #[test]
    fn test_non_html_untouched() {
        let css = b"body{}".to_vec();
        let out = maybe_inject_livereload(css.clone(), "text/css; charset=utf-8", Some(35729));
        assert_eq!(out, css);
    }

    #[test]
    fn test_no_ws_port_untouched() {
        let html = b"<body></body>".to_vec();
        let out = maybe_inject_livereload(html.clone(), "text/html; charset=utf-8", None);
        assert_eq!(out, html);
    }
}
