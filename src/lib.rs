//! Page title and `<meta>` tag extraction as an HTTP service.
//!
//! The core is two synchronous stages: [`normalizer`] turns a byte stream
//! of any encoding into UTF-8 text, [`extractor`] tokenizes that text and
//! collects the title and meta tags until `</head>`. [`fetcher`] and
//! [`meta`] are the HTTP plumbing around them.

pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod meta;
pub mod normalizer;
pub mod routes;
