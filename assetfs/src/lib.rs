//! Serve assets embedded at build time through a file-handle interface, as
//! expected by static-file HTTP servers.
//!
//! An [`AssetSource`] gives access to the embedded assets: the content of a
//! file, and the children of a directory. [`AssetFs`] resolves request paths
//! against it and produces [`WebFile`] handles which can be read, seeked,
//! listed and stat'd uniformly, whether they are files ([`HttpFile`]) or
//! directories ([`AssetDirectory`]).
//!
//! ## Sources
//!
//! - [`include_dir::Dir`] (feature `include_dir`)
//! - [`AssetBundle`], a sorted map of files (feature `bundle`)
//! - [`FnSource`], for plain accessor functions
//!
//! ## Example
//!
//! ```
//! use assetfs::{AssetFs, WebFile};
//! use include_dir::{Dir, include_dir};
//!
//! static DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/dist");
//!
//! let fs = AssetFs::new(&DIST).with_fallback("index.html");
//! let file = fs.open("/client/side/route").unwrap();
//! assert_eq!(file.stat().name(), "index.html");
//! ```
//!
//! With the `http` feature, [`serve_asset`] turns an [`http::Request`] into a
//! complete [`http::Response`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod directory;
mod error;
mod file;
mod fs;
mod info;
mod path;
mod source;

#[cfg(feature = "http")]
mod serve;

pub use config::AssetFsConfig;
pub use directory::AssetDirectory;
pub use error::{AssetError, BoxError, SourceError};
pub use file::{HttpFile, WebFile};
pub use fs::{AssetFs, AssetHandle};
pub use info::{EmbeddedFile, default_file_timestamp};
pub use source::{AssetSource, FnSource, MetadataFn};

#[cfg(feature = "bundle")]
pub use source::{AssetBundle, BundleFile};

#[cfg(feature = "http")]
pub use serve::serve_asset;
