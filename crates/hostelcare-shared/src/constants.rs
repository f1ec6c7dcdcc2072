/// Storage key holding the list of registered users
pub const KEY_USERS: &str = "@users";

/// Storage key holding the list of complaints
pub const KEY_COMPLAINTS: &str = "@complaints";

/// Storage key holding the list of staff names
pub const KEY_STAFF: &str = "@staff";

/// Storage key holding the single logged-in user record
pub const KEY_CURRENT_USER: &str = "@currentUser";

/// Number of complaints returned as "top issues" by the insights report
pub const TOP_ISSUES_LIMIT: usize = 5;

/// Length of the random part of a complaint id
pub const COMPLAINT_ID_LEN: usize = 9;

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum display-name length accepted at signup
pub const MIN_NAME_LEN: usize = 2;

/// Assignment option meaning "nobody is assigned"
pub const UNASSIGNED: &str = "Unassigned";

/// Demo warden identity used when credential checks are disabled
pub const DEMO_WARDEN_ID: &str = "warden_1";
pub const DEMO_WARDEN_NAME: &str = "Warden Admin";

/// Staff names seeded on first run
pub const SEED_STAFF: [&str; 6] = [
    "Maintenance Staff",
    "Plumber",
    "Electrician",
    "IT Support",
    "Cleaning Staff",
    "Security Guard",
];
