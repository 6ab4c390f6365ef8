//! HTTP responses for embedded assets.

use std::io::Read;
use std::time::SystemTime;

use http::header::{
    ALLOW, CONTENT_LENGTH, CONTENT_TYPE, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
    LOCATION,
};
use http::{HeaderMap, Method, Request, Response, StatusCode};

use crate::directory::AssetDirectory;
use crate::file::{HttpFile, WebFile};
use crate::fs::{AssetFs, AssetHandle};
use crate::path;
use crate::source::AssetSource;

/// Answer a request for an embedded asset.
///
/// ## Behavior
///
/// - Only `GET` and `HEAD` are allowed.
/// - `base`, the path the assets are mounted at, is removed from the request
///   path before it is passed to [`AssetFs::open`].
/// - Files are served with `Content-Type`, `ETag` and `Last-Modified`.
///   Conditional requests (`If-None-Match`, `If-Modified-Since`) are answered
///   with `304 Not Modified`.
/// - Directories are redirected to a path with a trailing `/`, then served by
///   their `index.html`, or as an HTML listing if they have none.
/// - [`AssetError::NotExist`](crate::AssetError::NotExist) is answered with
///   `404 Not Found`, every other error with `500 Internal Server Error`.
///
/// ## Example
///
/// ```
/// use assetfs::{AssetBundle, AssetFs, BundleFile, serve_asset};
/// use http::{Request, StatusCode};
///
/// let bundle: AssetBundle = [("index.html", BundleFile::new(b"<h1>hi</h1>"))]
///     .into_iter()
///     .collect();
/// let fs = AssetFs::new(bundle).with_fallback("index.html");
/// let request = Request::get("/my_webapp/some/route").body(()).unwrap();
/// let response = serve_asset(&fs, &request, "/my_webapp");
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body(), b"<h1>hi</h1>");
/// ```
pub fn serve_asset<S: AssetSource, B>(
    fs: &AssetFs<S>,
    request: &Request<B>,
    base: &str,
) -> Response<Vec<u8>> {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return finish(
            Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .header(ALLOW, "GET, HEAD"),
            Vec::new(),
        );
    }
    let uri_path = request.uri().path();
    let path = relative_path_of(base, uri_path);
    match fs.open(path) {
        Ok(AssetHandle::File(file)) => respond_with_file(request, file),
        Ok(AssetHandle::Directory(dir)) => {
            if !uri_path.ends_with('/') {
                let location = match request.uri().query() {
                    Some(query) => format!("{uri_path}/?{query}"),
                    None => format!("{uri_path}/"),
                };
                return finish(
                    Response::builder()
                        .status(StatusCode::MOVED_PERMANENTLY)
                        .header(LOCATION, location),
                    Vec::new(),
                );
            }
            respond_with_directory(fs, request, path, dir)
        }
        Err(e) if e.is_not_found() => respond_no_body(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!(path, error = %e, "cannot open embedded asset");
            respond_no_body(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Strip hash, query, `base` and leading '/' from a URI path.
fn relative_path_of<'a>(base: &str, uri: &'a str) -> &'a str {
    let without_hash = uri.split_once('#').map(|(l, _)| l).unwrap_or(uri);
    let without_query = without_hash
        .split_once('?')
        .map(|(l, _)| l)
        .unwrap_or(without_hash);
    without_query
        .strip_prefix(base)
        .unwrap_or(without_query)
        .trim_start_matches('/')
}

fn respond_with_file<B>(request: &Request<B>, mut file: HttpFile) -> Response<Vec<u8>> {
    let etag = etag_of(file.content());
    let modified = file.stat().modified();
    if is_not_modified(request.headers(), &etag, modified) {
        return finish(
            Response::builder()
                .status(StatusCode::NOT_MODIFIED)
                .header(ETAG, etag.as_str()),
            Vec::new(),
        );
    }
    let mime = mime_guess::from_path(file.stat().name()).first_or_octet_stream();
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, mime.essence_str())
        .header(CONTENT_LENGTH, file.size().to_string())
        .header(ETAG, etag.as_str());
    if let Some(modified) = modified {
        builder = builder.header(LAST_MODIFIED, httpdate::fmt_http_date(modified));
    }
    if request.method() == Method::HEAD {
        return finish(builder, Vec::new());
    }
    let mut body = Vec::with_capacity(file.size() as usize);
    if let Err(e) = file.read_to_end(&mut body) {
        tracing::error!(path = file.stat().name(), error = %e, "cannot read embedded file");
        return respond_no_body(StatusCode::INTERNAL_SERVER_ERROR);
    }
    finish(builder, body)
}

fn respond_with_directory<S: AssetSource, B>(
    fs: &AssetFs<S>,
    request: &Request<B>,
    path: &str,
    mut dir: AssetDirectory,
) -> Response<Vec<u8>> {
    let has_index = dir
        .children()
        .iter()
        .any(|c| c.name() == "index.html" && !c.is_dir());
    if has_index
        && let Ok(AssetHandle::File(index)) = fs.open(&path::join(path, "index.html"))
    {
        return respond_with_file(request, index);
    }
    let mut listing = String::from(
        "<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n",
    );
    for child in dir.read_dir(0) {
        let name = if child.is_dir() {
            format!("{}/", child.name())
        } else {
            child.name().to_string()
        };
        let escaped = escape_html(&name);
        listing.push_str(&format!("<a href=\"{escaped}\">{escaped}</a>\n"));
    }
    listing.push_str("</pre>\n");
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8");
    let body = if request.method() == Method::HEAD {
        Vec::new()
    } else {
        listing.into_bytes()
    };
    finish(builder, body)
}

fn respond_no_body(status: StatusCode) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = status;
    response
}

/// Build the response, or answer with a 500 if a header was invalid.
fn finish(builder: http::response::Builder, body: Vec<u8>) -> Response<Vec<u8>> {
    builder.body(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid HTTP response");
        respond_no_body(StatusCode::INTERNAL_SERVER_ERROR)
    })
}

fn is_not_modified(headers: &HeaderMap, etag: &str, modified: Option<SystemTime>) -> bool {
    if let Some(if_none_match) = headers.get(IF_NONE_MATCH) {
        return if_none_match.to_str().is_ok_and(|value| {
            value
                .split(',')
                .map(|tag| tag.trim().trim_start_matches("W/"))
                .any(|tag| tag == "*" || tag == etag)
        });
    }
    if let Some(if_modified_since) = headers.get(IF_MODIFIED_SINCE)
        && let Some(modified) = modified
        && let Ok(value) = if_modified_since.to_str()
        && let Ok(since) = httpdate::parse_http_date(value)
    {
        // HTTP dates have a resolution of one second
        let modified = SystemTime::from(httpdate::HttpDate::from(modified));
        return modified <= since;
    }
    false
}

fn etag_of(content: &[u8]) -> String {
    let hash = rapidhash::v3::rapidhash_v3(content);
    let encoded = base32::encode(base32::Alphabet::Crockford, &hash.to_le_bytes());
    format!("\"{encoded}\"")
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
