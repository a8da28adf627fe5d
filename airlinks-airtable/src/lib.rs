//! # Airlinks Airtable Integration
//!
//! Resolves Airtable lists into their link records.
//!
//! - [`AirtableClient`]: authenticated reads of the lists and links tables
//! - [`resolve_list`] / [`resolve_links`]: the two resolution steps
//! - [`LinksService`]: cached entry point (`get_links`)

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod formula;
mod resolver;
mod service;

#[cfg(test)]
mod testing;

pub use client::{AirtableClient, AirtableConfig};
pub use formula::record_id_filter;
pub use resolver::{resolve_links, resolve_list};
pub use service::{LinksResult, LinksService, ServiceConfig};
