//! Expand shortened URLs.
//!
//! [`ShortenerRegistry`] answers "is this a known shortener?" offline;
//! [`Unwinder`] follows redirects with a single HEAD request.

pub mod config;
pub mod error;
pub mod fetch_head;
pub mod host;
pub mod logging;
pub mod registry;
pub mod resolver;

pub use error::{Result, UnwindError};
pub use fetch_head::{CurlTransport, HeadResponse, HeadTransport, TransportError};
pub use registry::{ShortenerRegistry, DEFAULT_SHORTENERS};
pub use resolver::{Redirect, UnwindService, Unwinder};
