//! First-run example data.
//!
//! Each collection is seeded only while it is empty, so running the seeder
//! again is a no-op.

use chrono::{Duration, Utc};
use tracing::info;

use hostelcare_shared::constants::{KEY_COMPLAINTS, KEY_STAFF, SEED_STAFF};
use hostelcare_shared::error::Result;
use hostelcare_shared::{Category, ComplaintId, ComplaintStatus, Priority, UserId};

use crate::models::{Comment, Complaint};
use crate::repository::Repository;

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub complaints_added: usize,
    pub staff_added: usize,
}

impl Repository {
    /// Fill the complaints and staff collections if they are empty.
    ///
    /// The two collections are written separately. If the staff write fails
    /// the complaints stay seeded and an error is returned; running `seed`
    /// again completes the job.
    pub async fn seed(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        let complaints: Vec<Complaint> = self.load_list(KEY_COMPLAINTS).await?;
        if complaints.is_empty() {
            let examples = example_complaints();
            self.save_list(KEY_COMPLAINTS, &examples).await?;
            report.complaints_added = examples.len();
        }

        let staff: Vec<String> = self.load_list(KEY_STAFF).await?;
        if staff.is_empty() {
            let names: Vec<String> = SEED_STAFF.iter().map(|s| s.to_string()).collect();
            self.save_list(KEY_STAFF, &names).await?;
            report.staff_added = names.len();
        }

        if report != SeedReport::default() {
            info!(
                complaints = report.complaints_added,
                staff = report.staff_added,
                "seeded example data"
            );
        }
        Ok(report)
    }
}

fn example_complaints() -> Vec<Complaint> {
    let now = Utc::now();
    let fan_at = now - Duration::days(2);
    let leak_at = now - Duration::days(1);

    vec![
        Complaint {
            id: ComplaintId::from("_demo00001"),
            title: "Ceiling fan not working".into(),
            description: "The fan in my room stopped working two days ago.".into(),
            category: Category::Electrical,
            status: ComplaintStatus::Open,
            priority: Priority::Medium,
            student_id: UserId::from("student_demo_1"),
            student_name: "Rahul Sharma".into(),
            room_number: "101".into(),
            hostel_block: Some("A".into()),
            created_at: fan_at,
            updated_at: fan_at,
            upvotes: 2,
            upvoted_by: vec![
                UserId::from("student_demo_2"),
                UserId::from("student_demo_3"),
            ],
            comments: Vec::new(),
            assigned_to: None,
            images: Vec::new(),
        },
        Complaint {
            id: ComplaintId::from("_demo00002"),
            title: "Water leakage in bathroom".into(),
            description: "Pipe under the washbasin is leaking on the second floor.".into(),
            category: Category::Plumbing,
            status: ComplaintStatus::InProgress,
            priority: Priority::High,
            student_id: UserId::from("student_demo_2"),
            student_name: "Priya Patel".into(),
            room_number: "205".into(),
            hostel_block: Some("B".into()),
            created_at: leak_at,
            updated_at: leak_at + Duration::hours(3),
            upvotes: 1,
            upvoted_by: vec![UserId::from("student_demo_1")],
            comments: vec![Comment {
                id: "1".into(),
                text: "Plumber has been informed.".into(),
                author: "Warden Admin".into(),
                created_at: leak_at + Duration::hours(3),
            }],
            assigned_to: Some("Plumber".into()),
            images: Vec::new(),
        },
    ]
}
