//! Directory search: client-side filtering with role-scoped visibility.
//!
//! The records screen fetches the whole directory and filters locally; what
//! each viewer may see of a record depends on the viewer's role.

use serde::Serialize;

use fitdesk_auth::Role;

use crate::member::MemberProfile;

/// Case-insensitive substring match over name and email. An empty or
/// whitespace query matches everything.
pub fn matches_query(profile: &MemberProfile, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    profile.name.to_lowercase().contains(&needle)
        || profile.email.to_lowercase().contains(&needle)
}

/// A directory record as presented to a given viewer.
///
/// Visibility: name always; email for user and member viewers; phone for
/// member viewers only. Unassigned viewers see nothing beyond the name
/// (they should not reach this screen at all, but the redaction does not
/// rely on that).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RecordView {
    pub fn redacted_for(profile: &MemberProfile, viewer: Option<Role>) -> Self {
        let email_visible = matches!(viewer, Some(Role::User) | Some(Role::Member));
        let phone_visible = matches!(viewer, Some(Role::Member));

        Self {
            name: profile.name.clone(),
            email: email_visible.then(|| profile.email.clone()),
            phone: phone_visible.then(|| profile.phone.clone()),
        }
    }
}
