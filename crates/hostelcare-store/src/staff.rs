use hostelcare_shared::constants::KEY_STAFF;

use crate::repository::Repository;

impl Repository {
    /// Staff names offered as assignment options, in seeded order.
    pub async fn list_staff(&self) -> Vec<String> {
        self.read_list(KEY_STAFF).await
    }
}
