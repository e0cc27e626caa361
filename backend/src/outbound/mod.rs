//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **openfda**: reqwest client for the openFDA NDC catalogue
//! - **persistence**: PostgreSQL-backed user accounts via Diesel
//! - **memory**: process-local user accounts for database-less runs
//! - **password**: bcrypt password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod openfda;
pub mod password;
pub mod persistence;
