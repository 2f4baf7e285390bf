//! CSV Export
//!
//! TigerStyle: Tabular rendering lives only at the boundary.
//!
//! Members are flattened into [`MemberRow`]s (enumerations as integer
//! codes, date as `dd-MM-yyyy`) and then written one line per row.

use crate::member::{Member, MemberId};
use rust_decimal::Decimal;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// CSV header row
pub const CSV_HEADER: &str =
    "Id,Name,DateOfBirth,Occupation,MaritalStatus,HealthStatus,Salary,NumberOfChildren";

/// Download file name
pub const CSV_FILE_NAME: &str = "Members.csv";

/// CSV content type
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Date format for the DateOfBirth column
pub const CSV_DATE_FORMAT: &str = "%d-%m-%Y";

// =============================================================================
// Rows
// =============================================================================

/// Flat tabular view of a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub id: MemberId,
    pub name: String,
    pub date_of_birth: String,
    pub occupation: u8,
    pub marital_status: u8,
    pub health_status: u8,
    pub salary: Decimal,
    pub number_of_children: u32,
}

impl From<&Member> for MemberRow {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            date_of_birth: member.date_of_birth.format(CSV_DATE_FORMAT).to_string(),
            occupation: member.occupation.code(),
            marital_status: member.marital_status.code(),
            health_status: member.health_status.code(),
            salary: member.salary,
            number_of_children: member.number_of_children,
        }
    }
}

impl MemberRow {
    /// Render as one CSV line (no terminator). Name is always quoted.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},\"{}\",{},{},{},{},{},{}",
            self.id,
            self.name.replace('"', "\"\""),
            self.date_of_birth,
            self.occupation,
            self.marital_status,
            self.health_status,
            self.salary,
            self.number_of_children
        )
    }
}

/// Render the header plus one line per member, in the given order
pub fn render_csv(members: &[Member]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + members.len() * 80);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for member in members {
        out.push_str(&MemberRow::from(member).to_csv_line());
        out.push('\n');
    }
    out
}
