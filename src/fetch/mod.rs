//! Outbound requests: request building and the transport seam.
//!
//! - [`RequestBuilder`] assembles browser-like GET requests for search and
//!   repository pages
//! - [`Transport`] performs them; [`ReqwestTransport`] is the HTTP implementation

mod request;
mod transport;

// Re-export public API
pub use request::{HttpRequest, RequestBuilder};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
