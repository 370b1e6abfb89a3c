//! Offline mutation core of a personal bookmark manager.
//!
//! The local tree is fetched once from a snapshot document and edited in
//! memory; every edit is mirrored into a durable command queue that is later
//! sent as one change-request. Peers' trees can be mounted alongside, read-only.

pub mod dispatch;
pub mod federation;
pub mod model;
pub mod queue;
pub mod quorum;
pub mod remote;
pub mod session;
pub mod store;
pub mod tree;
pub mod workspace;
