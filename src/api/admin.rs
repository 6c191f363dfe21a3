//! Admin dashboard endpoints under `/admin`.
//!
//! Non-admin tokens get HTTP 403, surfaced as [`VeriqoError::Forbidden`];
//! callers should treat that as "leave the admin area" rather than retry.
//!
//! [`VeriqoError::Forbidden`]: crate::error::VeriqoError::Forbidden

use serde_json::{json, Value};

use crate::client::{ApiClient, Auth};
use crate::error::Result;
use crate::models::{AdminStats, Analysis, User, UserPatch};

pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn stats(&self) -> Result<AdminStats> {
        self.client.get("/admin/stats", Auth::Required)
    }

    pub fn users(&self) -> Result<Vec<User>> {
        self.client.get("/admin/users", Auth::Required)
    }

    pub fn analyses(&self) -> Result<Vec<Analysis>> {
        self.client.get("/admin/analyses", Auth::Required)
    }

    pub fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<()> {
        self.client.patch::<Value, _>(
            &format!("/admin/users/{}", user_id),
            patch,
            Auth::Required,
        )?;
        Ok(())
    }

    pub fn set_admin(&self, user_id: &str, is_admin: bool) -> Result<()> {
        self.update_user(
            user_id,
            &UserPatch {
                is_admin: Some(is_admin),
                ..Default::default()
            },
        )
    }

    pub fn reset_checks(&self, user_id: &str) -> Result<()> {
        self.client.post::<Value, _>(
            &format!("/admin/users/{}/reset-checks", user_id),
            &json!({}),
            Auth::Required,
        )?;
        Ok(())
    }
}
