//! Identifier generation.
//!
//! Complaint and comment ids are only "practically unique" on a single
//! device. Nothing checks them for collisions.

use chrono::Utc;
use rand::Rng;

use crate::constants::COMPLAINT_ID_LEN;
use crate::types::{ComplaintId, Role, UserId};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `_` followed by a short random base-36 token, e.g. `_k3j9x0a2b`.
pub fn complaint_id() -> ComplaintId {
    let mut rng = rand::thread_rng();
    let token: String = (0..COMPLAINT_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    ComplaintId(format!("_{token}"))
}

/// Role-prefixed timestamp, e.g. `student_1732800000000`.
pub fn user_id_at(role: Role, millis: i64) -> UserId {
    UserId(format!("{role}_{millis}"))
}

/// Millisecond timestamp as a decimal string.
pub fn comment_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
