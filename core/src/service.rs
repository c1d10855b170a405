//! Long-lived service wrapper around one lazily created client.
//!
//! # Design
//! A concrete service supplies configuration through the [`Service`] trait:
//! the base URI is a required method (leaving it out is a compile error, so
//! misconfiguration cannot reach runtime), options and transport have
//! defaults. [`ServiceClient`] owns the service value plus at most one
//! [`Client`], created from the hooks on first use and held for the
//! wrapper's lifetime, and forwards the entire chain/terminal API by
//! explicit delegation — call sites read the same as against a raw client.
//!
//! The wrapper is intended for single-threaded use: every method takes
//! `&mut self`, so concurrent first-use cannot be expressed without an
//! external `Mutex`. Sharing one instance across threads is the caller's
//! synchronization problem, not this type's.

use std::fmt;

use serde::Serialize;

use crate::client::{Client, Options};
use crate::error::Result;
use crate::http::{Method, Transport};
use crate::response::Response;
use crate::transport::UreqTransport;

/// Configuration hooks a concrete service supplies.
pub trait Service {
    /// Base URI every request starts from.
    fn base_uri(&self) -> String;

    /// Options applied to every request.
    fn options(&self) -> Options {
        Options::default()
    }

    /// Transport performing the exchanges.
    fn transport(&self) -> Box<dyn Transport> {
        Box::new(UreqTransport::new())
    }
}

/// Owns one lazily created [`Client`] and forwards the chain and terminal
/// API to it.
///
/// ```no_run
/// use restchain_core::{Options, Service, ServiceClient};
///
/// struct Github;
///
/// impl Service for Github {
///     fn base_uri(&self) -> String {
///         "https://api.github.com".to_string()
///     }
///
///     fn options(&self) -> Options {
///         Options {
///             json: true,
///             ..Options::default()
///         }
///     }
/// }
///
/// let mut github = ServiceClient::new(Github);
/// let repos = github.fragment_with("users", ["rustlang"]).fragment("repos").get()?;
/// assert!(repos.is_successful());
/// # Ok::<(), restchain_core::Error>(())
/// ```
pub struct ServiceClient<S: Service> {
    service: S,
    client: Option<Client>,
}

impl<S: Service> ServiceClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            client: None,
        }
    }

    /// The underlying client, created from the service hooks on first use
    /// and reused afterwards.
    ///
    /// The client's accumulated state survives terminal calls, so a
    /// long-lived wrapper issuing several requests keeps appending to the
    /// same URL unless a fresh wrapper (or client) is created per request.
    pub fn client(&mut self) -> &mut Client {
        let service = &self.service;
        self.client.get_or_insert_with(|| {
            Client::with_transport(service.base_uri(), service.options(), service.transport())
        })
    }

    pub fn fragment(&mut self, name: &str) -> &mut Client {
        self.client().fragment(name)
    }

    pub fn fragment_with<I>(&mut self, name: &str, args: I) -> &mut Client
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.client().fragment_with(name, args)
    }

    pub fn query(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Client {
        self.client().query(key, value)
    }

    pub fn raw_query(&mut self, raw: impl Into<String>) -> &mut Client {
        self.client().raw_query(raw)
    }

    pub fn url(&mut self) -> String {
        self.client().url()
    }

    pub fn get(&mut self) -> Result<Response> {
        self.client().get()
    }

    pub fn delete(&mut self) -> Result<Response> {
        self.client().delete()
    }

    pub fn post<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<Response> {
        self.client().post(body)
    }

    pub fn put<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<Response> {
        self.client().put(body)
    }

    pub fn patch<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<Response> {
        self.client().patch(body)
    }

    pub fn get_strict(&mut self) -> Result<Response> {
        self.client().get_strict()
    }

    pub fn delete_strict(&mut self) -> Result<Response> {
        self.client().delete_strict()
    }

    pub fn post_strict<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<Response> {
        self.client().post_strict(body)
    }

    pub fn put_strict<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<Response> {
        self.client().put_strict(body)
    }

    pub fn patch_strict<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<Response> {
        self.client().patch_strict(body)
    }

    pub fn send<B: Serialize + ?Sized>(&mut self, method: Method, body: &B) -> Result<Response> {
        self.client().send(method, body)
    }

    pub fn send_strict<B: Serialize + ?Sized>(
        &mut self,
        method: Method,
        body: &B,
    ) -> Result<Response> {
        self.client().send_strict(method, body)
    }
}
