//! Seed Data Generator
//!
//! TigerStyle: Deterministic initial members from a fixed seed.
//!
//! Same seed + same `today` ⇒ identical records. The draw order per record
//! is fixed: first name, last name, age, day offset, occupation, marital
//! status, health status, salary, children. Changing it changes every
//! generated record.

use crate::member::{HealthStatus, MaritalStatus, Member, MemberId, Occupation};
use chrono::{Days, Months, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Default generator seed
pub const SEED_DEFAULT: u64 = 12345;

/// Default number of seeded members
pub const SEED_MEMBER_COUNT_DEFAULT: usize = 25;

/// Maximum number of seeded members
pub const SEED_MEMBER_COUNT_MAX: usize = 10_000;

/// Youngest seeded age in years
pub const SEED_AGE_YEARS_MIN: u32 = 18;

/// Oldest seeded age in years
pub const SEED_AGE_YEARS_MAX: u32 = 70;

/// Largest day offset added to the birth year
pub const SEED_BIRTHDAY_OFFSET_DAYS_MAX: u64 = 364;

/// Salary lower bound (inclusive)
pub const SEED_SALARY_MIN: f64 = 30_000.0;

/// Salary upper bound (exclusive)
pub const SEED_SALARY_MAX: f64 = 150_000.0;

/// Most children a seeded member can have
pub const SEED_CHILDREN_COUNT_MAX: u32 = 6;

const FIRST_NAMES: [&str; 10] = [
    "Alex", "Jamie", "Taylor", "Morgan", "Jordan", "Casey", "Riley", "Avery", "Dakota", "Reese",
];

const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Brown", "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris",
    "Martin",
];

// =============================================================================
// Generator
// =============================================================================

/// Seed parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    /// PRNG seed
    pub seed: u64,
    /// Number of members to generate
    pub count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: SEED_DEFAULT,
            count: SEED_MEMBER_COUNT_DEFAULT,
        }
    }
}

/// Generate `config.count` members with ids `1..=count`.
///
/// `today` anchors the date-of-birth arithmetic.
pub fn generate_members(config: SeedConfig, today: NaiveDate) -> Result<Vec<Member>, SeedError> {
    if config.count > SEED_MEMBER_COUNT_MAX {
        return Err(SeedError::TooManyMembers {
            count: config.count,
            max: SEED_MEMBER_COUNT_MAX,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut members = Vec::with_capacity(config.count);

    for index in 0..config.count {
        let id = MemberId::try_from(index + 1).map_err(|_| SeedError::TooManyMembers {
            count: config.count,
            max: SEED_MEMBER_COUNT_MAX,
        })?;
        members.push(draw_member(&mut rng, id, today)?);
    }

    // Postcondition
    assert_eq!(members.len(), config.count, "seeded member count mismatch");

    tracing::debug!(
        seed = config.seed,
        count = members.len(),
        "Generated seed members"
    );

    Ok(members)
}

fn draw_member(rng: &mut ChaCha8Rng, id: MemberId, today: NaiveDate) -> Result<Member, SeedError> {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];

    let age = rng.gen_range(SEED_AGE_YEARS_MIN..=SEED_AGE_YEARS_MAX);
    let offset = rng.gen_range(0..=SEED_BIRTHDAY_OFFSET_DAYS_MAX);
    let date_of_birth = today
        .checked_sub_months(Months::new(age * 12))
        .and_then(|d| d.checked_add_days(Days::new(offset)))
        .ok_or(SeedError::DateOutOfRange { today, age, offset })?;

    let occupation = Occupation::ALL[rng.gen_range(0..Occupation::ALL.len())];
    let marital_status = MaritalStatus::ALL[rng.gen_range(0..MaritalStatus::ALL.len())];
    let health_status = HealthStatus::ALL[rng.gen_range(0..HealthStatus::ALL.len())];

    let raw_salary = rng.gen::<f64>() * (SEED_SALARY_MAX - SEED_SALARY_MIN) + SEED_SALARY_MIN;
    let salary = Decimal::new((raw_salary * 100.0).round() as i64, 2);

    let number_of_children = rng.gen_range(0..=SEED_CHILDREN_COUNT_MAX);

    Ok(Member {
        id,
        name: format!("{} {}", first, last),
        date_of_birth,
        occupation,
        marital_status,
        health_status,
        salary,
        number_of_children,
    })
}

// =============================================================================
// Errors
// =============================================================================

/// Seed generation errors
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("too many seed members: {count} > {max}")]
    TooManyMembers { count: usize, max: usize },

    #[error("date of birth out of range: {today} - {age} years + {offset} days")]
    DateOutOfRange {
        today: NaiveDate,
        age: u32,
        offset: u64,
    },
}

// =============================================================================
// Tests
// =============================================================================
