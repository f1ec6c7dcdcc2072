//! # hostelcare-store
//!
//! Local persistence and domain logic for HostelCare.
//!
//! Everything is kept as JSON documents under four fixed keys in a
//! key-value store (users, complaints, staff and the current user). The
//! [`KeyValueStore`] trait is the seam to the device: [`SqliteStore`] keeps a
//! single `kv` table in a SQLite file, [`MemoryStore`] keeps a map in memory
//! for tests. [`StoreAdapter`] adds JSON (de)serialization and turns every
//! backend failure into `None`/`false`.
//!
//! [`Repository`] implements the complaint workflow on top of the adapter.
//! Every write is a whole-collection read-modify-write with no locking; two
//! concurrent writers would race and the later write wins. The store is
//! meant for a single device with one active session.

pub mod complaints;
pub mod database;
pub mod insights;
pub mod kv;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod seed;
pub mod session;
pub mod staff;
pub mod users;

mod error;

pub use database::SqliteStore;
pub use error::StoreError;
pub use insights::{compute_insights, compute_stats, ComplaintStats, Insights};
pub use kv::{Fetched, KeyValueStore, StoreAdapter};
pub use memory::MemoryStore;
pub use models::*;
pub use repository::{Repository, RepositoryConfig};
pub use seed::SeedReport;
pub use session::Session;
