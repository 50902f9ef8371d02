//! # API Layer
//!
//! HTTP surface of the proxy.

pub mod rest;
