//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod credential_digest;
mod in_memory_access_directory;
mod postgres_audit_repository;
mod postgres_identity_provider;
mod postgres_membership_repository;
mod postgres_profile_store;

pub use credential_digest::digest_credential;
pub use in_memory_access_directory::InMemoryAccessDirectory;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_identity_provider::PostgresIdentityProvider;
pub use postgres_membership_repository::PostgresMembershipRepository;
pub use postgres_profile_store::PostgresProfileStore;
