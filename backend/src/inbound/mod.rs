//! Inbound adapters: the HTTP surface driving the domain ports.

pub mod http;
