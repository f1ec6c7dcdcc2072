//! Subcommand definitions and handlers.

use anyhow::anyhow;
use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;

use hostelcare_shared::constants::UNASSIGNED;
use hostelcare_shared::display::{format_date, format_time_ago, truncate_text};
use hostelcare_shared::{Category, ComplaintId, ComplaintStatus, Priority, Role};
use hostelcare_store::{
    Complaint, ComplaintStats, ComplaintUpdate, Insights, NewComplaint, NewUser, Repository,
    Session, User, UserProfile,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Populate empty collections with example data.
    Seed,

    /// Create an account and log in.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "student")]
        role: Role,
        /// Required for students.
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        block: Option<String>,
    },

    /// Log in with existing credentials.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student")]
        role: Role,
    },

    /// Forget the logged-in user.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// File a complaint (students).
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// One of Maintenance, Plumbing, Electrical, Internet, Cleaning,
        /// Security, Food, Other.
        #[arg(long)]
        category: String,
        #[arg(long)]
        priority: Option<Priority>,
    },

    /// List your own complaints.
    Mine,

    /// List all complaints (wardens).
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        status: Option<ComplaintStatus>,
    },

    /// Search complaints by title, category, room or block.
    Search {
        query: String,
        #[arg(long)]
        status: Option<ComplaintStatus>,
    },

    /// Show one complaint with its comments.
    Show { id: String },

    /// Upvote a complaint, or withdraw your upvote.
    Upvote { id: String },

    /// Comment on a complaint.
    Comment { id: String, text: String },

    /// Change status and assignment (wardens).
    Update {
        id: String,
        #[arg(long)]
        status: Option<ComplaintStatus>,
        /// Staff name, or "Unassigned" to clear.
        #[arg(long)]
        assign: Option<String>,
    },

    /// List staff available for assignment.
    Staff,

    /// Dashboard counters.
    Stats,

    /// Breakdown by category and status plus the most upvoted complaints.
    Insights,
}

pub async fn execute(repo: &Repository, command: Command, json: bool) -> anyhow::Result<()> {
    let out = Output { json };

    match command {
        Command::Seed => {
            let report = repo.seed().await?;
            out.line(format!(
                "Seeded {} complaints and {} staff",
                report.complaints_added, report.staff_added
            ));
        }

        Command::Signup {
            email,
            password,
            name,
            role,
            room,
            block,
        } => {
            let profile = match role {
                Role::Student => UserProfile::Student {
                    room_number: room.unwrap_or_default(),
                    hostel_block: block,
                },
                Role::Warden => UserProfile::Warden,
            };
            let session = repo
                .register_user(NewUser {
                    email,
                    password,
                    name,
                    profile,
                })
                .await?;
            out.user("Account created", session.user())?;
        }

        Command::Login {
            email,
            password,
            role,
        } => {
            let session = repo.login(&email, &password, role).await?;
            out.user("Logged in", session.user())?;
        }

        Command::Logout => match repo.resume_session().await {
            Some(session) => {
                repo.logout(session).await?;
                out.line("Logged out".to_string());
            }
            None => out.line("Not logged in".to_string()),
        },

        Command::Whoami => {
            let session = require_session(repo).await?;
            out.user("Current user", session.user())?;
        }

        Command::Submit {
            title,
            description,
            category,
            priority,
        } => {
            let session = require_session(repo).await?;
            let complaint = repo
                .submit_complaint(
                    &session,
                    NewComplaint {
                        title,
                        description,
                        category,
                        priority,
                    },
                )
                .await?;
            out.complaint(&complaint)?;
        }

        Command::Mine => {
            let session = require_session(repo).await?;
            let list = repo.list_for_student(session.user_id()).await;
            out.complaints(&list)?;
        }

        Command::List { category, status } => {
            require_session(repo).await?.require_warden()?;
            let list = repo.list_all(category, status).await;
            out.complaints(&list)?;
        }

        Command::Search { query, status } => {
            let list = repo.search_complaints(&query, status).await;
            out.complaints(&list)?;
        }

        Command::Show { id } => {
            let complaint = repo.get_complaint(&ComplaintId(id)).await?;
            out.complaint(&complaint)?;
        }

        Command::Upvote { id } => {
            let session = require_session(repo).await?;
            let complaint = repo.toggle_upvote(&session, &ComplaintId(id)).await?;
            if complaint.has_upvoted(session.user_id()) {
                out.line(format!("Upvoted ({})", complaint.upvotes));
            } else {
                out.line(format!("Upvote removed ({})", complaint.upvotes));
            }
        }

        Command::Comment { id, text } => {
            let session = require_session(repo).await?;
            let complaint = repo.add_comment(&session, &ComplaintId(id), &text).await?;
            out.complaint(&complaint)?;
        }

        Command::Update { id, status, assign } => {
            let session = require_session(repo).await?;
            let complaint = repo
                .update_complaint(
                    &session,
                    &ComplaintId(id),
                    ComplaintUpdate {
                        status,
                        assigned_to: assign,
                    },
                )
                .await?;
            out.complaint(&complaint)?;
        }

        Command::Staff => {
            let staff = repo.list_staff().await;
            if out.json {
                out.print_json(&staff)?;
            } else {
                for name in staff {
                    println!("{name}");
                }
            }
        }

        Command::Stats => out.stats(&repo.stats().await)?,

        Command::Insights => out.insights(&repo.insights().await)?,
    }

    Ok(())
}

async fn require_session(repo: &Repository) -> anyhow::Result<Session> {
    repo.resume_session()
        .await
        .ok_or_else(|| anyhow!("not logged in; run `hostelcare login` first"))
}

struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn line(&self, text: String) {
        if self.json {
            println!("{}", serde_json::json!({ "message": text }));
        } else {
            println!("{text}");
        }
    }

    fn user(&self, heading: &str, user: &User) -> anyhow::Result<()> {
        if self.json {
            let mut value = serde_json::to_value(user)?;
            if let Some(fields) = value.as_object_mut() {
                fields.remove("password");
            }
            return self.print_json(&value);
        }
        println!("{heading}: {} <{}> ({})", user.name, user.email, user.role());
        if let UserProfile::Student {
            room_number,
            hostel_block,
        } = &user.profile
        {
            match hostel_block {
                Some(block) => println!("Room {room_number}, Block {block}"),
                None => println!("Room {room_number}"),
            }
        }
        Ok(())
    }

    fn complaints(&self, list: &[Complaint]) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(list);
        }
        if list.is_empty() {
            println!("No complaints found");
            return Ok(());
        }
        let now = Utc::now();
        for c in list {
            println!(
                "{:<12} {:<12} {:<12} {:>3}  {}  ({})",
                c.id,
                c.status.label(),
                c.category,
                c.upvotes,
                truncate_text(&c.title, 40),
                format_time_ago(c.created_at, now),
            );
        }
        Ok(())
    }

    fn complaint(&self, c: &Complaint) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(c);
        }
        println!("{} [{}]", c.title, c.status.label());
        println!("  id:        {}", c.id);
        println!("  category:  {} ({} priority)", c.category, c.priority);
        println!("  by:        {} • Room {}", c.student_name, c.room_number);
        println!("  filed:     {}", format_date(c.created_at));
        println!(
            "  assigned:  {}",
            c.assigned_to.as_deref().unwrap_or(UNASSIGNED)
        );
        println!("  upvotes:   {}", c.upvotes);
        println!();
        println!("  {}", c.description);
        if !c.comments.is_empty() {
            println!();
            let now = Utc::now();
            for comment in &c.comments {
                println!(
                    "  - {} ({}): {}",
                    comment.author,
                    format_time_ago(comment.created_at, now),
                    comment.text
                );
            }
        }
        Ok(())
    }

    fn stats(&self, stats: &ComplaintStats) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(stats);
        }
        println!("Total:       {}", stats.total);
        println!("Open:        {}", stats.open);
        println!("In Progress: {}", stats.in_progress);
        println!("Resolved:    {}", stats.resolved);
        Ok(())
    }

    fn insights(&self, insights: &Insights) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(insights);
        }
        println!("Total complaints: {}", insights.total_complaints);

        println!("\nBy category:");
        for (category, count) in &insights.by_category {
            println!("  {:<12} {}", category, count);
        }

        println!("\nBy status:");
        for (status, count) in &insights.by_status {
            println!("  {:<12} {}", status.label(), count);
        }

        println!("\nTop issues:");
        if insights.top_issues.is_empty() {
            println!("  none yet");
        }
        for (i, c) in insights.top_issues.iter().enumerate() {
            println!("  {}. {} ({} upvotes)", i + 1, c.title, c.upvotes);
        }
        Ok(())
    }
}
