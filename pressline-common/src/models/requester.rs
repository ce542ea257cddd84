//! Authenticated requester identity
//!
//! Authentication itself happens outside this system; gates receive an
//! already-verified user id and role and enforce ownership from there.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Release;

/// Platform role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Artist,
    Admin,
}

/// The user on whose behalf an operation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Uuid,
    pub role: Role,
}

impl Requester {
    pub fn artist(user_id: Uuid) -> Self {
        Self { user_id, role: Role::Artist }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self { user_id, role: Role::Admin }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins manage everything; artists manage only their own releases.
    pub fn may_manage(&self, release: &Release) -> bool {
        self.is_admin() || release.owned_by(self.user_id)
    }
}
