//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as tracing. Role enforcement lives with the HTTP adapter in
//! `inbound::http::guard`.

pub mod trace;

pub use trace::Trace;
