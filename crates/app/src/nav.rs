//! The navigator: one gate evaluation per navigation attempt.

use tracing::debug;

use fitdesk_auth::AccessDecision;
use fitdesk_identity::SessionHandle;

use crate::routes::{destination_path, RouteTable};

/// What the shell should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The resolver has not settled; show the neutral waiting state and
    /// re-evaluate when the snapshot changes.
    Loading,
    /// Render the requested path.
    Render(String),
    /// Navigate here instead; the requested path must not render.
    RedirectTo(String),
}

pub struct Navigator {
    session: SessionHandle,
    table: RouteTable,
}

impl Navigator {
    pub fn new(session: SessionHandle, table: RouteTable) -> Self {
        Self { session, table }
    }

    /// Evaluate a navigation attempt against the current snapshot.
    ///
    /// Re-run on every snapshot change: outcomes are never cached across
    /// session transitions.
    pub fn navigate(&self, path: &str) -> NavigationOutcome {
        let Some(requirement) = self.table.requirement_for(path) else {
            return NavigationOutcome::Render(path.to_string());
        };

        match self.session.authorize(&requirement) {
            AccessDecision::Pending => NavigationOutcome::Loading,
            AccessDecision::Allow => NavigationOutcome::Render(path.to_string()),
            AccessDecision::Redirect(destination) => {
                let target = destination_path(destination);
                debug!(path, target, "navigation redirected");
                NavigationOutcome::RedirectTo(target.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fitdesk_identity::IdentityResolver;
    use fitdesk_infra::{DirectoryRecord, InMemoryAuthProvider, InMemoryUserDirectory, UserDirectory};
    use fitdesk_members::MemberProfile;

    async fn navigator_with(role: Option<&str>) -> (Navigator, Arc<InMemoryAuthProvider>) {
        let provider = Arc::new(InMemoryAuthProvider::new());
        let directory = Arc::new(InMemoryUserDirectory::new());

        if let Some(role) = role {
            directory
                .insert(DirectoryRecord {
                    profile: MemberProfile {
                        identity_id: "uid-1".into(),
                        name: "Ada Lovelace".into(),
                        email: "ada@example.com".into(),
                        phone: "555-0100".into(),
                        address: "1 Analytical Way".into(),
                        join_date: "2025-03-01".parse().unwrap(),
                        created_at: chrono::Utc::now(),
                    },
                    role: role.into(),
                })
                .await
                .unwrap();
            provider.sign_in("uid-1", Some("Ada"), None);
        }

        let mut session = IdentityResolver::start(provider.as_ref(), directory).await;
        session.settled().await;

        (
            Navigator::new(session, RouteTable::standard()),
            provider,
        )
    }

    #[tokio::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let (navigator, _provider) = navigator_with(None).await;
        assert_eq!(
            navigator.navigate("/admin"),
            NavigationOutcome::RedirectTo("/login".into())
        );
    }

    #[tokio::test]
    async fn members_reach_member_routes_and_bounce_off_admin_ones() {
        let (navigator, _provider) = navigator_with(Some("member")).await;
        assert_eq!(
            navigator.navigate("/member/bills"),
            NavigationOutcome::Render("/member/bills".into())
        );
        assert_eq!(
            navigator.navigate("/admin"),
            NavigationOutcome::RedirectTo("/member".into())
        );
    }

    #[tokio::test]
    async fn unassigned_roles_bounce_to_login() {
        let (navigator, _provider) = navigator_with(Some("trainer")).await;
        assert_eq!(
            navigator.navigate("/user"),
            NavigationOutcome::RedirectTo("/login".into())
        );
    }

    #[tokio::test]
    async fn ungated_paths_always_render() {
        let (navigator, _provider) = navigator_with(None).await;
        assert_eq!(
            navigator.navigate("/login"),
            NavigationOutcome::Render("/login".into())
        );
        assert_eq!(
            navigator.navigate("/"),
            NavigationOutcome::Render("/".into())
        );
    }
}
