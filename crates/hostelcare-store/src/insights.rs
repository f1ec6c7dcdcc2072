//! Summary statistics over the complaint collection.

use std::collections::BTreeMap;

use serde::Serialize;

use hostelcare_shared::constants::TOP_ISSUES_LIMIT;
use hostelcare_shared::{Category, ComplaintStatus};

use crate::models::Complaint;
use crate::repository::Repository;

/// Dashboard counters. `closed` complaints count towards `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub total_complaints: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_status: BTreeMap<ComplaintStatus, usize>,
    /// Most upvoted first; equal counts keep their stored order.
    pub top_issues: Vec<Complaint>,
}

pub fn compute_stats(complaints: &[Complaint]) -> ComplaintStats {
    let mut stats = ComplaintStats {
        total: complaints.len(),
        ..Default::default()
    };
    for c in complaints {
        match c.status {
            ComplaintStatus::Open => stats.open += 1,
            ComplaintStatus::InProgress => stats.in_progress += 1,
            ComplaintStatus::Resolved => stats.resolved += 1,
            ComplaintStatus::Closed => {}
        }
    }
    stats
}

pub fn compute_insights(complaints: &[Complaint]) -> Insights {
    let mut by_category = BTreeMap::new();
    let mut by_status = BTreeMap::new();
    for c in complaints {
        *by_category.entry(c.category).or_insert(0) += 1;
        *by_status.entry(c.status).or_insert(0) += 1;
    }

    let mut ranked: Vec<&Complaint> = complaints.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    let top_issues = ranked
        .into_iter()
        .take(TOP_ISSUES_LIMIT)
        .cloned()
        .collect();

    Insights {
        total_complaints: complaints.len(),
        by_category,
        by_status,
        top_issues,
    }
}

impl Repository {
    pub async fn stats(&self) -> ComplaintStats {
        compute_stats(&self.all_complaints().await)
    }

    pub async fn insights(&self) -> Insights {
        compute_insights(&self.all_complaints().await)
    }
}
