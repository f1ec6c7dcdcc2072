//! Complaint lifecycle: submission, upvotes, comments, warden updates and
//! the list queries behind each screen.

use chrono::Utc;
use tracing::{debug, info};

use hostelcare_shared::constants::{KEY_COMPLAINTS, UNASSIGNED};
use hostelcare_shared::error::Result;
use hostelcare_shared::{
    ids, validation, Category, ComplaintId, ComplaintStatus, HostelError, UserId, ValidationError,
};

use crate::models::{Comment, Complaint, ComplaintUpdate, NewComplaint, UserProfile};
use crate::repository::Repository;
use crate::session::Session;

impl Repository {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// File a complaint on behalf of the logged-in student.
    pub async fn submit_complaint(
        &self,
        session: &Session,
        fields: NewComplaint,
    ) -> Result<Complaint> {
        validation::require("Title", &fields.title)?;
        validation::require("Description", &fields.description)?;
        validation::require("Category", &fields.category)?;
        let category: Category = fields
            .category
            .trim()
            .parse()
            .map_err(ValidationError::from)?;

        let author = session.user();
        let UserProfile::Student {
            room_number,
            hostel_block,
        } = &author.profile
        else {
            return Err(HostelError::Forbidden(
                "only students can file complaints".into(),
            ));
        };

        let mut complaints: Vec<Complaint> = self.load_list(KEY_COMPLAINTS).await?;

        let now = Utc::now();
        let complaint = Complaint {
            id: ids::complaint_id(),
            title: fields.title.trim().to_string(),
            description: fields.description.trim().to_string(),
            category,
            status: ComplaintStatus::Open,
            priority: fields.priority.unwrap_or_default(),
            student_id: author.id.clone(),
            student_name: author.name.clone(),
            room_number: room_number.clone(),
            hostel_block: hostel_block.clone(),
            created_at: now,
            updated_at: now,
            upvotes: 0,
            upvoted_by: Vec::new(),
            comments: Vec::new(),
            assigned_to: None,
            images: Vec::new(),
        };
        complaints.push(complaint.clone());
        self.save_list(KEY_COMPLAINTS, &complaints).await?;

        info!(
            id = %complaint.id,
            student = %complaint.student_id,
            category = %complaint.category,
            "complaint submitted"
        );
        Ok(complaint)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Upvote as the session user, or withdraw their upvote.
    pub async fn toggle_upvote(&self, session: &Session, id: &ComplaintId) -> Result<Complaint> {
        let user = session.user_id().clone();
        let updated = self
            .modify_complaint(id, |c| {
                let upvoted = c.toggle_upvote(&user);
                debug!(id = %c.id, user = %user, upvoted, upvotes = c.upvotes, "upvote toggled");
                Ok(())
            })
            .await?;
        Ok(updated)
    }

    /// Append a comment signed with the session user's display name.
    pub async fn add_comment(
        &self,
        session: &Session,
        id: &ComplaintId,
        text: &str,
    ) -> Result<Complaint> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyComment.into());
        }

        let comment = Comment {
            id: ids::comment_id(),
            text: text.to_string(),
            author: session.user().name.clone(),
            created_at: Utc::now(),
        };
        let updated = self
            .modify_complaint(id, move |c| {
                c.comments.push(comment);
                Ok(())
            })
            .await?;

        info!(id = %updated.id, comments = updated.comments.len(), "comment added");
        Ok(updated)
    }

    /// Warden triage: set the status and optionally (re)assign staff.
    ///
    /// Any status may follow any other. The assignee is not checked against
    /// the staff list.
    pub async fn update_complaint(
        &self,
        session: &Session,
        id: &ComplaintId,
        update: ComplaintUpdate,
    ) -> Result<Complaint> {
        session.require_warden()?;
        let status = update.status.ok_or(ValidationError::MissingStatus)?;

        let assignment = update.assigned_to.map(|name| {
            let name = name.trim();
            if name.is_empty() || name == UNASSIGNED {
                None
            } else {
                Some(name.to_string())
            }
        });

        let updated = self
            .modify_complaint(id, move |c| {
                c.status = status;
                if let Some(assignee) = assignment {
                    c.assigned_to = assignee;
                }
                Ok(())
            })
            .await?;

        info!(
            id = %updated.id,
            status = %updated.status,
            assigned_to = updated.assigned_to.as_deref().unwrap_or(UNASSIGNED),
            "complaint updated"
        );
        Ok(updated)
    }

    /// Load all complaints, apply `f` to the one with `id`, refresh its
    /// `updated_at` and write the collection back.
    async fn modify_complaint<F>(&self, id: &ComplaintId, f: F) -> Result<Complaint>
    where
        F: FnOnce(&mut Complaint) -> Result<()>,
    {
        let mut complaints: Vec<Complaint> = self.load_list(KEY_COMPLAINTS).await?;
        let complaint = complaints
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| HostelError::not_found("complaint", id.as_str()))?;

        f(complaint)?;
        complaint.touch(Utc::now());
        let updated = complaint.clone();

        self.save_list(KEY_COMPLAINTS, &complaints).await?;
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub async fn get_complaint(&self, id: &ComplaintId) -> Result<Complaint> {
        let complaints: Vec<Complaint> = self.load_list(KEY_COMPLAINTS).await?;
        complaints
            .into_iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| HostelError::not_found("complaint", id.as_str()))
    }

    /// Every complaint in stored order.
    pub async fn all_complaints(&self) -> Vec<Complaint> {
        self.read_list(KEY_COMPLAINTS).await
    }

    /// A student's own complaints, newest first.
    pub async fn list_for_student(&self, student_id: &UserId) -> Vec<Complaint> {
        let mut mine: Vec<Complaint> = self
            .all_complaints()
            .await
            .into_iter()
            .filter(|c| &c.student_id == student_id)
            .collect();
        newest_first(&mut mine);
        mine
    }

    /// All complaints, optionally narrowed by category and/or status,
    /// newest first.
    pub async fn list_all(
        &self,
        category: Option<Category>,
        status: Option<ComplaintStatus>,
    ) -> Vec<Complaint> {
        let mut list: Vec<Complaint> = self
            .all_complaints()
            .await
            .into_iter()
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .filter(|c| status.map_or(true, |st| c.status == st))
            .collect();
        newest_first(&mut list);
        list
    }

    /// Case-insensitive search over title, category, room and block.
    /// A blank query matches everything.
    pub async fn search_complaints(
        &self,
        query: &str,
        status: Option<ComplaintStatus>,
    ) -> Vec<Complaint> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<Complaint> = self
            .all_complaints()
            .await
            .into_iter()
            .filter(|c| status.map_or(true, |st| c.status == st))
            .filter(|c| needle.is_empty() || matches_query(c, &needle))
            .collect();
        newest_first(&mut hits);
        hits
    }
}

fn matches_query(c: &Complaint, needle: &str) -> bool {
    c.title.to_lowercase().contains(needle)
        || c.category.as_str().to_lowercase().contains(needle)
        || c.room_number.to_lowercase().contains(needle)
        || c.hostel_block
            .as_deref()
            .is_some_and(|b| b.to_lowercase().contains(needle))
}

fn newest_first(list: &mut [Complaint]) {
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::User;
    use crate::repository::RepositoryConfig;

    fn repo() -> (Repository, Arc<MemoryStore>) {
        let mem = Arc::new(MemoryStore::new());
        (Repository::new(mem.clone(), RepositoryConfig::default()), mem)
    }

    fn student(id: &str, room: &str) -> Session {
        Session::new(User {
            id: UserId::from(id),
            email: format!("{id}@example.com"),
            password: "secret1".into(),
            name: format!("Student {id}"),
            profile: UserProfile::Student {
                room_number: room.into(),
                hostel_block: Some("A".into()),
            },
        })
    }

    fn warden() -> Session {
        Session::new(User {
            id: UserId::from("warden_1"),
            email: "w@example.com".into(),
            password: "secret1".into(),
            name: "Warden Admin".into(),
            profile: UserProfile::Warden,
        })
    }

    fn form(title: &str, category: &str) -> NewComplaint {
        NewComplaint {
            title: title.into(),
            description: "details".into(),
            category: category.into(),
            priority: None,
        }
    }

    #[tokio::test]
    async fn broken_ac_end_to_end() {
        let (repo, _) = repo();
        let s = student("S", "101");

        let filed = repo
            .submit_complaint(
                &s,
                NewComplaint {
                    title: "Broken AC".into(),
                    description: "not cooling".into(),
                    category: "Maintenance".into(),
                    priority: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(filed.status, ComplaintStatus::Open);
        assert_eq!(filed.upvotes, 0);
        assert_eq!(filed.student_id, UserId::from("S"));
        assert_eq!(filed.room_number, "101");
        assert_eq!(filed.priority, hostelcare_shared::Priority::Medium);
        assert!(filed.assigned_to.is_none());

        repo.update_complaint(
            &warden(),
            &filed.id,
            ComplaintUpdate {
                status: Some(ComplaintStatus::InProgress),
                assigned_to: Some("Maintenance Staff".into()),
            },
        )
        .await
        .unwrap();

        let fetched = repo.get_complaint(&filed.id).await.unwrap();
        assert_eq!(fetched.status, ComplaintStatus::InProgress);
        assert_eq!(fetched.assigned_to.as_deref(), Some("Maintenance Staff"));
        assert!(fetched.updated_at > fetched.created_at);
    }

    #[tokio::test]
    async fn submit_requires_fields() {
        let (repo, _) = repo();
        let s = student("S", "101");

        let err = repo.submit_complaint(&s, form("  ", "Food")).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingField("Title").into());

        let err = repo.submit_complaint(&s, form("Cold food", "")).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingField("Category").into());

        let err = repo
            .submit_complaint(&s, form("Cold food", "Canteen"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HostelError::Validation(ValidationError::UnknownValue { kind: "category", .. })
        ));

        assert!(repo.all_complaints().await.is_empty());
    }

    #[tokio::test]
    async fn wardens_cannot_file_complaints() {
        let (repo, _) = repo();
        let err = repo
            .submit_complaint(&warden(), form("Leak", "Plumbing"))
            .await
            .unwrap_err();
        assert!(matches!(err, HostelError::Forbidden(_)));
    }

    #[tokio::test]
    async fn upvote_toggles_per_user() {
        let (repo, _) = repo();
        let owner = student("S1", "101");
        let c = repo
            .submit_complaint(&owner, form("Leak", "Plumbing"))
            .await
            .unwrap();

        let a = student("S2", "102");
        let b = student("S3", "103");

        let after = repo.toggle_upvote(&a, &c.id).await.unwrap();
        assert_eq!(after.upvotes, 1);
        let after = repo.toggle_upvote(&b, &c.id).await.unwrap();
        assert_eq!(after.upvotes, 2);
        let after = repo.toggle_upvote(&a, &c.id).await.unwrap();
        assert_eq!(after.upvotes, 1);
        assert_eq!(after.upvoted_by, vec![UserId::from("S3")]);

        let stored = repo.get_complaint(&c.id).await.unwrap();
        assert_eq!(stored.upvotes as usize, stored.upvoted_by.len());
    }

    #[tokio::test]
    async fn upvote_unknown_complaint() {
        let (repo, _) = repo();
        let err = repo
            .toggle_upvote(&student("S", "1"), &ComplaintId::from("_missing"))
            .await
            .unwrap_err();
        assert_eq!(err, HostelError::not_found("complaint", "_missing"));
    }

    #[tokio::test]
    async fn comment_on_unknown_complaint() {
        let (repo, _) = repo();
        let err = repo
            .add_comment(&student("S", "1"), &ComplaintId::from("_missing"), "hello")
            .await
            .unwrap_err();
        assert_eq!(err, HostelError::not_found("complaint", "_missing"));
        assert!(repo.all_complaints().await.is_empty());
    }

    #[tokio::test]
    async fn get_unknown_complaint() {
        let (repo, _) = repo();
        repo.submit_complaint(&student("S", "1"), form("Leak", "Plumbing"))
            .await
            .unwrap();

        let err = repo
            .get_complaint(&ComplaintId::from("_missing"))
            .await
            .unwrap_err();
        assert_eq!(err, HostelError::not_found("complaint", "_missing"));
    }

    #[tokio::test]
    async fn comments_append_in_order() {
        let (repo, _) = repo();
        let s = student("S", "101");
        let c = repo.submit_complaint(&s, form("Leak", "Plumbing")).await.unwrap();

        repo.add_comment(&s, &c.id, "still leaking").await.unwrap();
        let updated = repo
            .add_comment(&warden(), &c.id, "plumber on the way")
            .await
            .unwrap();

        let texts: Vec<_> = updated.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["still leaking", "plumber on the way"]);
        assert_eq!(updated.comments[0].author, "Student S");
        assert_eq!(updated.comments[1].author, "Warden Admin");
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let (repo, _) = repo();
        let s = student("S", "101");
        let c = repo.submit_complaint(&s, form("Leak", "Plumbing")).await.unwrap();

        let err = repo.add_comment(&s, &c.id, " \n\t ").await.unwrap_err();
        assert_eq!(err, HostelError::Validation(ValidationError::EmptyComment));
        assert!(repo.get_complaint(&c.id).await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn update_needs_status_and_warden() {
        let (repo, _) = repo();
        let s = student("S", "101");
        let c = repo.submit_complaint(&s, form("Leak", "Plumbing")).await.unwrap();

        let err = repo
            .update_complaint(&warden(), &c.id, ComplaintUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingStatus.into());

        let err = repo
            .update_complaint(
                &s,
                &c.id,
                ComplaintUpdate {
                    status: Some(ComplaintStatus::Closed),
                    assigned_to: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HostelError::Forbidden(_)));
        assert_eq!(
            repo.get_complaint(&c.id).await.unwrap().status,
            ComplaintStatus::Open
        );
    }

    #[tokio::test]
    async fn any_status_can_follow_any_other() {
        let (repo, _) = repo();
        let s = student("S", "101");
        let w = warden();
        let c = repo.submit_complaint(&s, form("Leak", "Plumbing")).await.unwrap();

        for status in [
            ComplaintStatus::Closed,
            ComplaintStatus::Open,
            ComplaintStatus::Resolved,
            ComplaintStatus::InProgress,
        ] {
            let updated = repo
                .update_complaint(
                    &w,
                    &c.id,
                    ComplaintUpdate {
                        status: Some(status),
                        assigned_to: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn unassigned_clears_assignment() {
        let (repo, _) = repo();
        let w = warden();
        let c = repo
            .submit_complaint(&student("S", "101"), form("Leak", "Plumbing"))
            .await
            .unwrap();

        let set = ComplaintUpdate {
            status: Some(ComplaintStatus::InProgress),
            assigned_to: Some("Plumber".into()),
        };
        repo.update_complaint(&w, &c.id, set).await.unwrap();

        // status-only update keeps the assignee
        let keep = ComplaintUpdate {
            status: Some(ComplaintStatus::Resolved),
            assigned_to: None,
        };
        let kept = repo.update_complaint(&w, &c.id, keep).await.unwrap();
        assert_eq!(kept.assigned_to.as_deref(), Some("Plumber"));

        let clear = ComplaintUpdate {
            status: Some(ComplaintStatus::Resolved),
            assigned_to: Some(UNASSIGNED.into()),
        };
        let cleared = repo.update_complaint(&w, &c.id, clear).await.unwrap();
        assert!(cleared.assigned_to.is_none());
    }

    #[tokio::test]
    async fn failed_write_leaves_complaint_untouched() {
        let (repo, mem) = repo();
        let s = student("S", "101");
        let c = repo.submit_complaint(&s, form("Leak", "Plumbing")).await.unwrap();

        mem.set_failing(true);
        let err = repo.toggle_upvote(&s, &c.id).await.unwrap_err();
        assert!(matches!(err, HostelError::StorageFailure(_)));
        mem.set_failing(false);

        assert_eq!(repo.get_complaint(&c.id).await.unwrap(), c);
    }

    /// Write complaints with fixed timestamps straight into the store.
    async fn seed_list(repo: &Repository, rows: &[(&str, &str, i64, Category, ComplaintStatus)]) {
        let base = Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap();
        let list: Vec<Complaint> = rows
            .iter()
            .map(|(id, student, hours, category, status)| {
                let at = base + Duration::hours(*hours);
                Complaint {
                    id: ComplaintId::from(*id),
                    title: format!("Complaint {id}"),
                    description: "d".into(),
                    category: *category,
                    status: *status,
                    priority: Default::default(),
                    student_id: UserId::from(*student),
                    student_name: (*student).into(),
                    room_number: "101".into(),
                    hostel_block: Some("B".into()),
                    created_at: at,
                    updated_at: at,
                    upvotes: 0,
                    upvoted_by: Vec::new(),
                    comments: Vec::new(),
                    assigned_to: None,
                    images: Vec::new(),
                }
            })
            .collect();
        repo.save_list(KEY_COMPLAINTS, &list).await.unwrap();
    }

    #[tokio::test]
    async fn student_list_is_filtered_and_newest_first() {
        use Category::*;
        use ComplaintStatus::*;
        let (repo, _) = repo();
        seed_list(
            &repo,
            &[
                ("_a", "alice", 1, Food, Open),
                ("_b", "bob", 2, Food, Open),
                ("_c", "alice", 5, Internet, Closed),
                ("_d", "bob", 3, Food, Open),
                ("_e", "alice", 4, Other, Resolved),
            ],
        )
        .await;

        let ids: Vec<String> = repo
            .list_for_student(&UserId::from("alice"))
            .await
            .into_iter()
            .map(|c| c.id.0)
            .collect();
        assert_eq!(ids, ["_c", "_e", "_a"]);
        assert!(repo.list_for_student(&UserId::from("carol")).await.is_empty());
    }

    #[tokio::test]
    async fn list_all_filters() {
        use Category::*;
        use ComplaintStatus::*;
        let (repo, _) = repo();
        seed_list(
            &repo,
            &[
                ("_a", "alice", 1, Food, Open),
                ("_b", "bob", 2, Food, Resolved),
                ("_c", "alice", 3, Internet, Open),
            ],
        )
        .await;

        let ids = |v: Vec<Complaint>| v.into_iter().map(|c| c.id.0).collect::<Vec<_>>();
        assert_eq!(ids(repo.list_all(None, None).await), ["_c", "_b", "_a"]);
        assert_eq!(ids(repo.list_all(Some(Food), None).await), ["_b", "_a"]);
        assert_eq!(ids(repo.list_all(None, Some(Open)).await), ["_c", "_a"]);
        assert_eq!(ids(repo.list_all(Some(Food), Some(Open)).await), ["_a"]);
        assert!(repo.list_all(Some(Security), None).await.is_empty());
    }

    #[tokio::test]
    async fn search_matches_several_fields() {
        let (repo, _) = repo();
        let s = student("S", "204");
        repo.submit_complaint(&s, form("Broken AC", "Maintenance"))
            .await
            .unwrap();
        repo.submit_complaint(&s, form("WiFi down", "Internet"))
            .await
            .unwrap();

        assert_eq!(repo.search_complaints("broken", None).await.len(), 1);
        assert_eq!(repo.search_complaints("INTERNET", None).await.len(), 1);
        assert_eq!(repo.search_complaints("204", None).await.len(), 2);
        assert_eq!(repo.search_complaints("a", None).await.len(), 2);
        assert_eq!(repo.search_complaints("", None).await.len(), 2);
        assert!(repo
            .search_complaints("", Some(ComplaintStatus::Closed))
            .await
            .is_empty());
    }
}
