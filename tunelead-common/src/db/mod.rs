//! Database access layer
//!
//! Every operation takes a `&SqlitePool` and is self-contained: acquire a
//! connection from the pool, run the statement, release. No in-memory
//! caching sits in front of the store.

pub mod init;
pub mod leads;
pub mod models;
pub mod tracks;

pub use init::init_database;
