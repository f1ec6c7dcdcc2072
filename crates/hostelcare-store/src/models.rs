//! Records persisted as JSON in the key-value store.
//!
//! Field names are camelCase on the wire so documents keep the shape the
//! mobile app has always written.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use hostelcare_shared::{Category, ComplaintId, ComplaintStatus, Priority, Role, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Stored and compared in plaintext.
    #[serde(default)]
    pub password: String,
    pub name: String,
    /// Role-specific fields, discriminated by the `role` key.
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
    #[serde(rename_all = "camelCase")]
    Student {
        room_number: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hostel_block: Option<String>,
    },
    Warden,
}

impl UserProfile {
    pub fn role(&self) -> Role {
        match self {
            UserProfile::Student { .. } => Role::Student,
            UserProfile::Warden => Role::Warden,
        }
    }
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn room_number(&self) -> Option<&str> {
        match &self.profile {
            UserProfile::Student { room_number, .. } => Some(room_number),
            UserProfile::Warden => None,
        }
    }
}

/// Signup form contents. The id is assigned on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub profile: UserProfile,
}

// ---------------------------------------------------------------------------
// Complaint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub priority: Priority,
    pub student_id: UserId,
    pub student_name: String,
    pub room_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostel_block: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Always equal to `upvoted_by.len()`.
    pub upvotes: u32,
    #[serde(default)]
    pub upvoted_by: Vec<UserId>,
    /// Append-only, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Complaint {
    pub fn has_upvoted(&self, user: &UserId) -> bool {
        self.upvoted_by.contains(user)
    }

    /// Add `user` to the upvoters, or take them out if already there.
    /// Returns whether the user is an upvoter afterwards.
    pub fn toggle_upvote(&mut self, user: &UserId) -> bool {
        let now_upvoted = if let Some(pos) = self.upvoted_by.iter().position(|u| u == user) {
            self.upvoted_by.remove(pos);
            false
        } else {
            self.upvoted_by.push(user.clone());
            true
        };
        self.upvotes = self.upvoted_by.len() as u32;
        now_upvoted
    }

    /// Move `updated_at` forward to `now`. Clocks with coarse resolution can
    /// hand out the same instant twice, so the new value is always at least
    /// one microsecond past the previous one.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at + Duration::microseconds(1));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    /// Display name of the author, not their id.
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Complaint form contents as entered by a student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    /// Raw category name; must be one of [`Category::ALL`].
    pub category: String,
    pub priority: Option<Priority>,
}

/// Warden changes to a complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintUpdate {
    /// Required.
    pub status: Option<ComplaintStatus>,
    /// `None` leaves the assignment alone; blank or `"Unassigned"` clears it.
    pub assigned_to: Option<String>,
}
