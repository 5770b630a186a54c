use serde::{Deserialize, Serialize};

/// The logged-in user, as reported by the external auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
}
