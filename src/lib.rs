//! Social Club - Membership Registry
//!
//! A minimal in-memory membership registry served over HTTP.
//!
//! Features:
//! - Deterministic seed data (fixed-seed generator, 25 members by default)
//! - CRUD over member records with store-assigned ids
//! - Two-predicate search (occupation / marital status, AND or OR)
//! - CSV export
//! - Demo-only login with a single configured credential pair
//!
//! ```text
//! api (axum) -> service -> repository -> store (Arc<RwLock<MemberStore>>)
//!                                          ^
//!                                        seed
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod export;
pub mod member;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;

pub use api::{router, ApiError, AppState};
pub use auth::{AuthError, DemoCredentials};
pub use config::{ServerConfig, HTTP_BIND_ADDRESS_DEFAULT};
pub use member::{HealthStatus, MaritalStatus, Member, MemberId, Occupation};
pub use seed::{SeedConfig, SEED_DEFAULT, SEED_MEMBER_COUNT_DEFAULT};
pub use service::MemberService;
pub use store::{MemberQuery, MemberStore, SharedMemberStore, StoreError};

/// Application name
pub const APP_NAME: &str = "social-club";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
