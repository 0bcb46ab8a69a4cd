use reqwest::StatusCode;
use std::fmt;
use std::io::Read;
use url::Url;

/// Blocking view of a response body. Dropping it releases the connection.
pub type BodyReader = Box<dyn Read + Send>;

/// A fetched page whose body has not been read yet.
pub struct FetchedPage {
    /// Host of the requested URL, with the port when one was given.
    pub host: String,
    /// The requested URL.
    pub url: Url,
    /// Where redirects ended up.
    pub url_final: Url,
    pub status: StatusCode,
    /// Protocol version, e.g. `HTTP/1.1`.
    pub protocol: String,
    /// Raw `Content-Type` header, if the server sent a readable one.
    pub content_type: Option<String>,
    pub body: BodyReader,
}

impl FetchedPage {
    /// Status line text, e.g. `200 OK`.
    pub fn status_text(&self) -> String {
        status_text(self.status)
    }

    /// Moves the body out, leaving an empty one behind.
    pub fn take_body(&mut self) -> BodyReader {
        std::mem::replace(&mut self.body, Box::new(std::io::empty()))
    }
}

impl fmt::Debug for FetchedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedPage")
            .field("host", &self.host)
            .field("url", &self.url.as_str())
            .field("url_final", &self.url_final.as_str())
            .field("status", &self.status)
            .field("protocol", &self.protocol)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

pub fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// `host[:port]` of a URL, the way it appears in a Host header.
pub fn host_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
