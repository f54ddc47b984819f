//! Recommendation form validators
//!
//! Pure, synchronous field checks. Every rule is evaluated independently
//! (no short-circuiting) so a field can surface all of its violations at
//! once. Lengths are counted in characters, not bytes, matching what a
//! visitor sees in the form.

use serde::Serialize;

use crate::store::RecommendationDraft;

/// Minimum name length (after trimming)
pub const NAME_MIN: usize = 2;
/// Maximum name length
pub const NAME_MAX: usize = 50;
/// Minimum message length (after trimming)
pub const MESSAGE_MIN: usize = 10;
/// Maximum message length
pub const MESSAGE_MAX: usize = 1000;
/// Maximum length for the optional role/company fields
pub const OPTIONAL_MAX: usize = 50;

/// Characters permitted in a name: letters (including German umlauts),
/// whitespace, and hyphens.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || "äöüÄÖÜß".contains(c) || c.is_whitespace() || c == '-'
}

/// Validate the required name field.
///
/// Returns one message per violated rule, in rule order. The empty string
/// violates both the minimum-length and the character-class rule.
pub fn validate_name(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().chars().count() < NAME_MIN {
        errors.push(format!("Name must be at least {} characters", NAME_MIN));
    }
    if name.chars().count() > NAME_MAX {
        errors.push(format!("Name must be less than {} characters", NAME_MAX));
    }
    if name.is_empty() || !name.chars().all(is_name_char) {
        errors.push("Name can only contain letters, spaces, and hyphens".to_string());
    }
    errors
}

/// Validate an optional field: empty is fine, anything present must stay
/// under `max_len` characters.
pub fn validate_optional_field(value: &str, label: &str, max_len: usize) -> Vec<String> {
    let mut errors = Vec::new();
    if !value.is_empty() && value.chars().count() > max_len {
        errors.push(format!("{} must be less than {} characters", label, max_len));
    }
    errors
}

/// Validate the required message field.
pub fn validate_message(message: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if message.trim().chars().count() < MESSAGE_MIN {
        errors.push(format!("Message must be at least {} characters", MESSAGE_MIN));
    }
    if message.chars().count() > MESSAGE_MAX {
        errors.push(format!("Message must be less than {} characters", MESSAGE_MAX));
    }
    errors
}

/// Per-field validation outcome.
///
/// Serialized into the 422 response body; the page script shows the first
/// message of each non-empty list and marks the field invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Vec<String>,
    pub role: Vec<String>,
    pub company: Vec<String>,
    pub message: Vec<String>,
}

impl FieldErrors {
    /// True when no field has a violation
    pub fn is_clean(&self) -> bool {
        self.name.is_empty()
            && self.role.is_empty()
            && self.company.is_empty()
            && self.message.is_empty()
    }

    /// Total violation count across all fields
    pub fn violation_count(&self) -> usize {
        self.name.len() + self.role.len() + self.company.len() + self.message.len()
    }
}

/// Run all four field validators over a draft.
pub fn validate_draft(draft: &RecommendationDraft) -> FieldErrors {
    FieldErrors {
        name: validate_name(&draft.name),
        role: validate_optional_field(&draft.role, "Role", OPTIONAL_MAX),
        company: validate_optional_field(&draft.company, "Company", OPTIONAL_MAX),
        message: validate_message(&draft.message),
    }
}
