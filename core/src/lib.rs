//! Fluent, chain-based REST client core.
//!
//! # Overview
//! A [`Client`] accumulates path fragments and query parameters through
//! chained calls, then executes the assembled request when one of the
//! terminal verb methods (`get`, `post`, ... and their `_strict` variants)
//! is invoked. Strict variants error on any response outside the 100-399
//! success range; non-strict variants hand every completed exchange back as
//! a [`Response`] and error only when the transport itself fails.
//!
//! # Design
//! - URL serialization is a pure function of the accumulated state and
//!   performs no percent-encoding; `raw_query` fragments embed verbatim.
//! - All socket I/O sits behind the [`Transport`] trait; [`UreqTransport`]
//!   is the default blocking implementation, and tests substitute recording
//!   transports to observe exchanges without a network.
//! - [`ServiceClient`] wraps one lazily created client per service instance
//!   for long-lived API bindings.

pub mod client;
pub mod error;
pub mod http;
pub mod response;
pub mod service;
pub mod transport;

pub use client::{Client, Options};
pub use error::{Error, RequestError, Result, TransportError};
pub use http::{HttpRequest, HttpResponse, Method, Transport};
pub use response::Response;
pub use service::{Service, ServiceClient};
pub use transport::UreqTransport;
