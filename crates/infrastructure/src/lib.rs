//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_repository;
mod in_memory_audit_repository;
mod json_access_policy_loader;

pub use in_memory_access_repository::InMemoryAccessRepository;
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use json_access_policy_loader::{load_access_policy, parse_access_policy};
