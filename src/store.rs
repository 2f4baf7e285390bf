//! Member Store
//!
//! TigerStyle: Single in-memory owner of all member records.
//!
//! The store holds the records in insertion order plus the next-id counter.
//! It is plain data with `&self` reads and `&mut self` writes; concurrent
//! access goes through [`SharedMemberStore`], whose write lock serializes
//! every mutation (id assignment + collection change) and whose read lock
//! keeps readers from observing a half-applied write.

use crate::member::{MaritalStatus, Member, MemberId, Occupation};
use crate::seed::{generate_members, SeedConfig, SeedError};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

// =============================================================================
// Query
// =============================================================================

/// Two-predicate member search.
///
/// With both predicates set, `match_all` picks AND (true) or OR (false).
/// With a single predicate the flag has no effect. With none, every record
/// matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberQuery {
    pub occupation: Option<Occupation>,
    pub marital_status: Option<MaritalStatus>,
    pub match_all: bool,
}

impl MemberQuery {
    /// Check a single record against the query
    pub fn matches(&self, member: &Member) -> bool {
        match (self.occupation, self.marital_status) {
            (Some(occupation), Some(marital_status)) => {
                let occupation_hit = member.occupation == occupation;
                let marital_hit = member.marital_status == marital_status;
                if self.match_all {
                    occupation_hit && marital_hit
                } else {
                    occupation_hit || marital_hit
                }
            }
            (Some(occupation), None) => member.occupation == occupation,
            (None, Some(marital_status)) => member.marital_status == marital_status,
            (None, None) => true,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// In-memory member store
#[derive(Debug)]
pub struct MemberStore {
    /// Live records in insertion order
    members: Vec<Member>,
    /// Always greater than every id ever assigned. Wider than `MemberId`
    /// so that it can step past `MemberId::MAX` without wrapping.
    next_id: u64,
}

impl Default for MemberStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store from existing records, continuing ids after the max
    pub fn with_members(members: Vec<Member>) -> Self {
        let next_id = members
            .iter()
            .map(|m| m.id)
            .max()
            .map_or(1, |max| u64::from(max) + 1);
        Self { members, next_id }
    }

    /// Create a store populated by the seed generator
    pub fn seeded(config: SeedConfig, today: NaiveDate) -> Result<Self, SeedError> {
        let store = Self::with_members(generate_members(config, today)?);
        tracing::info!(
            seed = config.seed,
            count = store.len(),
            next_id = store.next_id,
            "Seeded member store"
        );
        Ok(store)
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Get a member by ID
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// All members, ascending by id
    pub fn list(&self) -> Vec<Member> {
        let mut all = self.members.clone();
        all.sort_by_key(|m| m.id);
        all
    }

    /// Members matching the query, in store order
    pub fn search(&self, query: &MemberQuery) -> Vec<Member> {
        self.members
            .iter()
            .filter(|m| query.matches(m))
            .cloned()
            .collect()
    }

    /// Add a member, overwriting any caller-supplied id.
    ///
    /// Fails without touching the store once every `MemberId` has been used.
    pub fn create(&mut self, mut member: Member) -> Result<Member, StoreError> {
        member.id = MemberId::try_from(self.next_id).map_err(|_| StoreError::IdsExhausted)?;
        self.next_id += 1;
        self.members.push(member.clone());

        // Postcondition
        assert!(
            self.next_id > u64::from(member.id),
            "next id must stay ahead of assigned ids"
        );

        Ok(member)
    }

    /// Replace the record with the same id. Returns false if absent.
    pub fn update(&mut self, member: Member) -> bool {
        match self.members.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member;
                true
            }
            None => false,
        }
    }

    /// Remove a member by ID. Returns false if absent.
    pub fn delete(&mut self, id: MemberId) -> bool {
        let len_before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.members.len() < len_before
    }
}

/// Thread-safe member store
pub type SharedMemberStore = Arc<RwLock<MemberStore>>;

/// Wrap a store for sharing across request handlers
pub fn new_shared_store(store: MemberStore) -> SharedMemberStore {
    Arc::new(RwLock::new(store))
}

// =============================================================================
// Errors
// =============================================================================

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("member ids exhausted")]
    IdsExhausted,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::HealthStatus;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn member(id: MemberId, occupation: Occupation, marital_status: MaritalStatus) -> Member {
        Member {
            id,
            name: format!("Member {}", id),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 9).unwrap(),
            occupation,
            marital_status,
            health_status: HealthStatus::Good,
            salary: Decimal::new(6_000_000, 2),
            number_of_children: 1,
        }
    }

    fn fixture() -> MemberStore {
        MemberStore::with_members(vec![
            member(1, Occupation::Doctor, MaritalStatus::Single),
            member(2, Occupation::Doctor, MaritalStatus::Married),
            member(3, Occupation::Engineer, MaritalStatus::Single),
            member(4, Occupation::Engineer, MaritalStatus::Married),
            member(5, Occupation::Professor, MaritalStatus::Married),
        ])
    }

    fn ids(members: &[Member]) -> Vec<MemberId> {
        members.iter().map(|m| m.id).collect()
    }

    fn seeded() -> MemberStore {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        MemberStore::seeded(SeedConfig::default(), today).unwrap()
    }

    #[test]
    fn test_seeded_store_continues_ids() {
        let mut store = seeded();
        assert_eq!(store.len(), 25);
        let created = store
            .create(member(0, Occupation::Doctor, MaritalStatus::Single))
            .unwrap();
        assert_eq!(created.id, 26);
    }

    #[test]
    fn test_search_and() {
        let store = fixture();
        let query = MemberQuery {
            occupation: Some(Occupation::Doctor),
            marital_status: Some(MaritalStatus::Single),
            match_all: true,
        };
        assert_eq!(ids(&store.search(&query)), vec![1]);
    }

    #[test]
    fn test_search_or() {
        let store = fixture();
        let query = MemberQuery {
            occupation: Some(Occupation::Doctor),
            marital_status: Some(MaritalStatus::Single),
            match_all: false,
        };
        assert_eq!(ids(&store.search(&query)), vec![1, 2, 3]);
    }

    #[test]
    fn test_single_predicate_ignores_flag() {
        let store = fixture();
        for match_all in [true, false] {
            let by_occupation = MemberQuery {
                occupation: Some(Occupation::Engineer),
                marital_status: None,
                match_all,
            };
            assert_eq!(ids(&store.search(&by_occupation)), vec![3, 4]);

            let by_status = MemberQuery {
                occupation: None,
                marital_status: Some(MaritalStatus::Married),
                match_all,
            };
            assert_eq!(ids(&store.search(&by_status)), vec![2, 4, 5]);
        }
    }

    #[test]
    fn test_search_no_predicates_keeps_store_order() {
        let mut store = MemberStore::with_members(vec![
            member(3, Occupation::Doctor, MaritalStatus::Single),
            member(1, Occupation::Engineer, MaritalStatus::Single),
        ]);
        store
            .create(member(0, Occupation::Professor, MaritalStatus::Married))
            .unwrap();

        assert_eq!(ids(&store.search(&MemberQuery::default())), vec![3, 1, 4]);
        assert_eq!(ids(&store.list()), vec![1, 3, 4]);
    }

    #[test]
    fn test_search_on_seed_data() {
        let store = seeded();
        let all = store.list();
        let and = MemberQuery {
            occupation: Some(Occupation::Doctor),
            marital_status: Some(MaritalStatus::Single),
            match_all: true,
        };
        let or = MemberQuery { match_all: false, ..and };

        let expected_and: Vec<MemberId> = all
            .iter()
            .filter(|m| m.occupation == Occupation::Doctor && m.marital_status == MaritalStatus::Single)
            .map(|m| m.id)
            .collect();
        let expected_or: Vec<MemberId> = all
            .iter()
            .filter(|m| m.occupation == Occupation::Doctor || m.marital_status == MaritalStatus::Single)
            .map(|m| m.id)
            .collect();

        assert_eq!(ids(&store.search(&and)), expected_and);
        assert_eq!(ids(&store.search(&or)), expected_or);
    }

    #[test]
    fn test_create_then_get() {
        let mut store = fixture();
        let created = store
            .create(member(99, Occupation::Professor, MaritalStatus::Single))
            .unwrap();
        assert_eq!(created.id, 6);

        let mut expected = member(99, Occupation::Professor, MaritalStatus::Single);
        expected.id = 6;
        assert_eq!(store.get(6), Some(&expected));
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut store = fixture();
        let mut changed = member(2, Occupation::Professor, MaritalStatus::Single);
        changed.name = "Renamed".to_string();
        changed.number_of_children = 4;

        assert!(store.update(changed.clone()));
        assert_eq!(store.get(2), Some(&changed));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_update_missing_leaves_store_unchanged() {
        let mut store = fixture();
        let before = store.list();
        assert!(!store.update(member(42, Occupation::Doctor, MaritalStatus::Single)));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_delete_then_get() {
        let mut store = fixture();
        assert!(store.delete(3));
        assert!(store.get(3).is_none());
        assert!(!store.delete(3));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut store = fixture();
        assert!(store.delete(5));
        let created = store
            .create(member(0, Occupation::Doctor, MaritalStatus::Married))
            .unwrap();
        assert_eq!(created.id, 6);

        store
            .create(member(0, Occupation::Doctor, MaritalStatus::Married))
            .unwrap();
        store.delete(1);
        store.update(member(2, Occupation::Engineer, MaritalStatus::Single));

        let all = store.list();
        let unique: HashSet<MemberId> = all.iter().map(|m| m.id).collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let mut store = MemberStore::new();
        assert!(store.is_empty());
        let created = store
            .create(member(0, Occupation::Doctor, MaritalStatus::Single))
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_create_after_max_id_fails_cleanly() {
        let mut store = MemberStore::with_members(vec![member(
            MemberId::MAX - 1,
            Occupation::Doctor,
            MaritalStatus::Single,
        )]);

        let last = store
            .create(member(0, Occupation::Engineer, MaritalStatus::Married))
            .unwrap();
        assert_eq!(last.id, MemberId::MAX);

        let before = store.list();
        assert_eq!(
            store.create(member(0, Occupation::Professor, MaritalStatus::Married)),
            Err(StoreError::IdsExhausted)
        );
        assert_eq!(store.list(), before);

        let full = MemberStore::with_members(vec![member(
            MemberId::MAX,
            Occupation::Doctor,
            MaritalStatus::Single,
        )]);
        assert_eq!(full.next_id, u64::from(MemberId::MAX) + 1);
    }
}
