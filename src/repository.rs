//! Member Repository
//!
//! TigerStyle: Data access contract, decoupled from storage.
//!
//! `InMemoryMemberRepository` is the only implementation: it takes the
//! shared store's read lock for queries and its write lock for the whole
//! of each mutation.

use crate::member::{Member, MemberId};
use crate::store::{MemberQuery, SharedMemberStore, StoreError};
use async_trait::async_trait;

/// Member data access contract
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Get a member by ID (None if absent)
    async fn get_by_id(&self, id: MemberId) -> Option<Member>;

    /// All members, ascending by id
    async fn get_all(&self) -> Vec<Member>;

    /// Members matching the query, in store order
    async fn search(&self, query: MemberQuery) -> Vec<Member>;

    /// Store a new member and return it with its assigned id
    async fn add(&self, member: Member) -> Result<Member, StoreError>;

    /// Replace an existing member; false if the id is unknown
    async fn update(&self, member: Member) -> bool;

    /// Remove a member; false if the id is unknown
    async fn delete(&self, id: MemberId) -> bool;

    /// Number of live members
    async fn count(&self) -> usize;
}

/// Repository backed by the in-process member store
#[derive(Debug, Clone)]
pub struct InMemoryMemberRepository {
    store: SharedMemberStore,
}

impl InMemoryMemberRepository {
    /// Create a repository over a shared store
    pub fn new(store: SharedMemberStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn get_by_id(&self, id: MemberId) -> Option<Member> {
        self.store.read().await.get(id).cloned()
    }

    async fn get_all(&self) -> Vec<Member> {
        self.store.read().await.list()
    }

    async fn search(&self, query: MemberQuery) -> Vec<Member> {
        self.store.read().await.search(&query)
    }

    async fn add(&self, member: Member) -> Result<Member, StoreError> {
        let created = self.store.write().await.create(member)?;
        tracing::info!(member_id = created.id, "Created member");
        Ok(created)
    }

    async fn update(&self, member: Member) -> bool {
        let id = member.id;
        let updated = self.store.write().await.update(member);
        if updated {
            tracing::info!(member_id = id, "Updated member");
        }
        updated
    }

    async fn delete(&self, id: MemberId) -> bool {
        let deleted = self.store.write().await.delete(id);
        if deleted {
            tracing::info!(member_id = id, "Deleted member");
        }
        deleted
    }

    async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}
