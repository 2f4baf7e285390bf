//! Member Service
//!
//! Use-case entry points for request handlers. Delegates straight to the
//! repository; no behavior of its own.

use crate::member::{Member, MemberId};
use crate::repository::MemberRepository;
use crate::store::{MemberQuery, StoreError};
use std::sync::Arc;

/// Pass-through facade over a member repository
#[derive(Clone)]
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
}

impl MemberService {
    /// Create a service over the given repository
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: MemberId) -> Option<Member> {
        self.repo.get_by_id(id).await
    }

    pub async fn list(&self) -> Vec<Member> {
        self.repo.get_all().await
    }

    pub async fn search(&self, query: MemberQuery) -> Vec<Member> {
        self.repo.search(query).await
    }

    pub async fn create(&self, member: Member) -> Result<Member, StoreError> {
        self.repo.add(member).await
    }

    pub async fn update(&self, member: Member) -> bool {
        self.repo.update(member).await
    }

    pub async fn delete(&self, id: MemberId) -> bool {
        self.repo.delete(id).await
    }

    pub async fn count(&self) -> usize {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{MaritalStatus, Occupation};
    use crate::repository::InMemoryMemberRepository;
    use crate::seed::SeedConfig;
    use crate::store::{new_shared_store, MemberStore};
    use chrono::NaiveDate;

    fn service() -> MemberService {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let store = MemberStore::seeded(SeedConfig::default(), today).unwrap();
        MemberService::new(Arc::new(InMemoryMemberRepository::new(new_shared_store(
            store,
        ))))
    }

    #[tokio::test]
    async fn test_engineer_search_same_for_both_flags() {
        let service = service();
        let query = |match_all| MemberQuery {
            occupation: Some(Occupation::Engineer),
            marital_status: None,
            match_all,
        };

        let with_and = service.search(query(true)).await;
        let with_or = service.search(query(false)).await;
        assert_eq!(with_and, with_or);
        assert!(with_and.iter().all(|m| m.occupation == Occupation::Engineer));

        let engineers = service
            .list()
            .await
            .into_iter()
            .filter(|m| m.occupation == Occupation::Engineer)
            .count();
        assert_eq!(with_and.len(), engineers);
    }

    #[tokio::test]
    async fn test_create_overwrites_supplied_id() {
        let service = service();
        let mut member = service.get(1).await.unwrap();
        member.id = 7;
        member.marital_status = MaritalStatus::Single;

        let created = service.create(member.clone()).await.unwrap();
        assert_eq!(created.id, 26);

        member.id = 26;
        assert_eq!(service.get(26).await, Some(member));
        assert_eq!(service.count().await, 26);
    }

    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing() {
        let service = service();
        let before = service.list().await;

        let mut ghost = before[0].clone();
        ghost.id = 1000;
        assert!(!service.update(ghost).await);
        assert_eq!(service.list().await, before);
    }
}
