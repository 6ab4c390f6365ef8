#![cfg(all(feature = "include_dir", feature = "bundle", feature = "http"))]

use std::io::Read;

use assetfs::{AssetBundle, AssetError, AssetFs, AssetFsConfig, BundleFile, WebFile, serve_asset};
use http::{Request, StatusCode, header};
use include_dir::{Dir, DirEntry, File, include_dir};
use pretty_assertions::assert_eq;
use rstest::*;

static DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/dist");

fn names(handle: &mut impl WebFile, count: isize) -> Vec<String> {
    handle
        .read_dir(count)
        .unwrap()
        .into_iter()
        .map(|info| info.name().to_string())
        .collect()
}

fn files_of(dir: &'static Dir<'static>) -> Vec<&'static File<'static>> {
    dir.entries()
        .iter()
        .flat_map(|entry| match entry {
            DirEntry::Dir(dir) => files_of(dir),
            DirEntry::File(file) => vec![file],
        })
        .collect()
}

#[test]
fn test_index_html() {
    let fs = AssetFs::new(&DIST);
    let mut file = fs.open("/index.html").unwrap();
    let expected = DIST.get_file("index.html").unwrap();
    assert_eq!(file.size(), expected.contents().len() as u64);
    let mut body = Vec::new();
    file.read_to_end(&mut body).unwrap();
    assert_eq!(body, expected.contents());
    let expected_modified = expected.metadata().unwrap().modified();
    assert_eq!(file.stat().modified(), Some(expected_modified));
}

#[test]
fn test_root_directory() {
    let fs = AssetFs::new(&DIST);
    let mut root = fs.open("/").unwrap();
    assert!(root.is_dir());
    assert_eq!(names(&mut root, 0), vec!["assets", "docs", "index.html"]);
    let dir = root.into_directory().unwrap();
    let kinds: Vec<_> = dir.children().iter().map(|c| c.is_dir()).collect();
    assert_eq!(kinds, vec![true, true, false]);
}

#[test]
fn test_paginated_listing() {
    let fs = AssetFs::new(&DIST);
    let mut docs = fs.open("/docs").unwrap();
    assert_eq!(names(&mut docs, 1), vec!["guide"]);
    assert_eq!(names(&mut docs, 1), vec!["readme.txt"]);
    assert!(names(&mut docs, 1).is_empty());
    assert_eq!(names(&mut docs, -1), vec!["guide", "readme.txt"]);
}

#[test]
fn test_read_dir_on_file() {
    let fs = AssetFs::new(&DIST);
    let mut file = fs.open("/docs/readme.txt").unwrap();
    assert!(matches!(file.read_dir(0), Err(AssetError::NotADirectory)));
}

#[rstest]
#[case("", "/nope", None)]
#[case("", "/docs/guide/nope.txt", None)]
#[case("docs", "/index.html", None)]
#[case("docs", "/readme.txt", Some("docs/readme.txt"))]
#[case("docs/guide", "intro.txt", Some("docs/guide/intro.txt"))]
fn test_prefix(#[case] prefix: &str, #[case] path: &str, #[case] expected: Option<&str>) {
    let fs = AssetFs::new(&DIST).with_prefix(prefix);
    match (fs.open(path), expected) {
        (Ok(handle), Some(name)) => assert_eq!(handle.stat().name(), name),
        (Err(e), None) => assert!(e.is_not_found()),
        (actual, _) => panic!("unexpected result for {path:?}: {actual:?}"),
    }
}

#[test]
fn test_config_from_json() {
    let json = r#"{ "AssetFs": { "Prefix": "docs", "Fallback": "readme.txt" } }"#;
    let config = AssetFsConfig::from_json_section(json, "AssetFs")
        .unwrap()
        .unwrap();
    let fs = AssetFs::from_config(&DIST, config);
    let file = fs.open("/guide/unknown").unwrap();
    assert_eq!(file.stat().name(), "docs/readme.txt");
}

#[test]
fn test_serve_webapp() {
    let fs = AssetFs::new(&DIST).with_fallback("index.html");
    let expected = DIST.get_file("assets/script-abc123.js").unwrap();

    let request = Request::get("/webapp/assets/script-abc123.js")
        .body(())
        .unwrap();
    let response = serve_asset(&fs, &request, "/webapp");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), expected.contents());
    let expected_date = httpdate::fmt_http_date(expected.metadata().unwrap().modified());
    assert_eq!(
        response.headers()[header::LAST_MODIFIED].to_str().unwrap(),
        &expected_date
    );

    let request = Request::get("/webapp/patients/42").body(()).unwrap();
    let response = serve_asset(&fs, &request, "/webapp");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.body(),
        DIST.get_file("index.html").unwrap().contents()
    );
}

#[test]
fn test_serve_directory_listing() {
    let fs = AssetFs::new(&DIST);
    let request = Request::get("/docs/").body(()).unwrap();
    let response = serve_asset(&fs, &request, "");
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(response.into_body()).unwrap();
    assert!(body.contains("<a href=\"guide/\">guide/</a>"));
    assert!(body.contains("<a href=\"readme.txt\">readme.txt</a>"));
}

#[test]
fn test_serve_not_found() {
    let fs = AssetFs::new(&DIST);
    let request = Request::get("/missing.png").body(()).unwrap();
    assert_eq!(
        serve_asset(&fs, &request, "").status(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_bundle_matches_embedded_dir() {
    let bundle: AssetBundle = files_of(&DIST)
        .into_iter()
        .map(|file| {
            let path = file.path().to_str().unwrap();
            (path, BundleFile::new(file.contents()))
        })
        .collect();
    let from_bundle = AssetFs::new(bundle);
    let from_dir = AssetFs::new(&DIST);
    for path in ["", "assets", "docs", "docs/guide"] {
        let mut a = from_bundle.open(path).unwrap();
        let mut b = from_dir.open(path).unwrap();
        assert_eq!(names(&mut a, 0), names(&mut b, 0), "children of {path:?}");
    }
}
