//! Acceptor role of a Multi-Paxos replicated log.
//!
//! An acceptor promises not to contradict lower-numbered proposals, accepts
//! values proposed under its promise and records committed values per slot.
//! Proposers and learners reach it over HTTP, one route per method.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use paxos_acceptor::{service, Acceptor, Configuration};
//! # #[tokio::main]
//! # async fn main() -> Result<(), paxos_acceptor::Error> {
//! let config = Configuration::new(4001);
//! service::serve(&config, Acceptor::new(&config)).await
//! # }
//! ```
#[macro_use]
extern crate log;

mod acceptor;
mod client;
pub mod config;
mod error;
mod message;
pub mod messages;
mod promise;
mod proposal;
pub mod service;
mod slots;

pub use acceptor::{Acceptor, AcceptorState};
pub use client::AcceptorClient;
pub use config::Configuration;
pub use error::Error;
pub use message::Message;
pub use promise::{Decision, PromiseTracker};
pub use proposal::Proposal;
pub use slots::{Entry, Slot, SlotLog};
