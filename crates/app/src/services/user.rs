//! General-user operations: public gym content and record search.

use std::sync::Arc;

use fitdesk_auth::Role;
use fitdesk_gym::GymInfo;
use fitdesk_members::{matches_query, RecordView};

use crate::error::AppError;
use crate::services::{require_assigned, require_role, AppServices};

pub struct UserService {
    ctx: Arc<AppServices>,
}

impl UserService {
    pub fn new(ctx: Arc<AppServices>) -> Self {
        Self { ctx }
    }

    /// The gym information document for the user dashboard, if the admin
    /// has published one.
    pub async fn gym_overview(&self) -> Result<Option<GymInfo>, AppError> {
        require_role(&self.ctx.session, Role::User)?;
        Ok(self.ctx.gym_info.get().await?)
    }

    /// Search the whole directory by name or email, redacting each record
    /// for the viewer's role.
    pub async fn search_records(&self, query: &str) -> Result<Vec<RecordView>, AppError> {
        let (_, viewer) = require_assigned(&self.ctx.session)?;

        let records = self.ctx.directory.list_all().await?;
        let mut hits: Vec<RecordView> = records
            .iter()
            .filter(|record| matches_query(&record.profile, query))
            .map(|record| RecordView::redacted_for(&record.profile, Some(viewer)))
            .collect();

        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hits)
    }
}
