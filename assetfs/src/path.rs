//! Lexical handling of slash-separated asset paths.

/// Join path elements with `/` and clean the result. Empty elements are
/// ignored; if every element is empty the result is empty.
pub(crate) fn join(base: &str, name: &str) -> String {
    match (base.is_empty(), name.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(name),
        (false, true) => clean(base),
        (false, false) => clean(&format!("{base}/{name}")),
    }
}

/// Resolve `.` and `..` segments and collapse repeated separators.
///
/// `..` above the root of an absolute path is dropped. For a relative path it
/// is kept. An empty result becomes `/` or `.`.
pub(crate) fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }
    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Turn a request path into the key looked up in the asset source.
pub(crate) fn normalize(prefix: &str, request_path: &str) -> String {
    let joined = join(prefix, request_path);
    match joined.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => joined,
    }
}
