//! Static route declarations: which paths are gated, and by which role.
//!
//! This is the routing layer's contribution to the gate — a fixed table,
//! not logic. Paths missing from the table are ungated; 404 handling
//! belongs to the surrounding router, not to authorization.

use fitdesk_auth::{Destination, Role, RouteRequirement};

pub struct RouteTable {
    protected: Vec<(&'static str, RouteRequirement)>,
    public: Vec<&'static str>,
}

impl RouteTable {
    /// The application's full route set.
    pub fn standard() -> Self {
        let admin = RouteRequirement::role(Role::Admin);
        let member = RouteRequirement::role(Role::Member);
        let user = RouteRequirement::role(Role::User);

        Self {
            public: vec!["/", "/login", "/register"],
            protected: vec![
                ("/admin", admin),
                ("/admin/add-member", admin),
                ("/admin/members", admin),
                ("/admin/create-bill", admin),
                ("/admin/info", admin),
                ("/admin/reports", admin),
                ("/member", member),
                ("/member/bills", member),
                ("/user", user),
                ("/user/details", user),
                ("/user/search", user),
            ],
        }
    }

    /// The requirement gating `path`, or `None` if the path is not gated.
    pub fn requirement_for(&self, path: &str) -> Option<RouteRequirement> {
        self.protected
            .iter()
            .find(|(candidate, _)| *candidate == path)
            .map(|(_, requirement)| *requirement)
    }

    pub fn is_declared(&self, path: &str) -> bool {
        self.public.contains(&path) || self.requirement_for(path).is_some()
    }
}

/// Fixed destination→path mapping, the inverse edge of the gate's
/// role→home table.
pub fn destination_path(destination: Destination) -> &'static str {
    match destination {
        Destination::Login => "/login",
        Destination::AdminHome => "/admin",
        Destination::MemberHome => "/member",
        Destination::UserHome => "/user",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_paths_require_the_admin_role() {
        let table = RouteTable::standard();
        for path in ["/admin", "/admin/reports", "/admin/create-bill"] {
            assert_eq!(
                table.requirement_for(path),
                Some(RouteRequirement::role(Role::Admin)),
                "{path}"
            );
        }
    }

    #[test]
    fn public_paths_are_not_gated() {
        let table = RouteTable::standard();
        for path in ["/", "/login", "/register"] {
            assert!(table.is_declared(path));
            assert_eq!(table.requirement_for(path), None);
        }
    }

    #[test]
    fn unknown_paths_are_undeclared_and_ungated() {
        let table = RouteTable::standard();
        assert!(!table.is_declared("/admin/secret"));
        assert_eq!(table.requirement_for("/admin/secret"), None);
    }

    #[test]
    fn every_home_destination_is_a_declared_route() {
        let table = RouteTable::standard();
        for destination in [
            Destination::Login,
            Destination::AdminHome,
            Destination::MemberHome,
            Destination::UserHome,
        ] {
            assert!(table.is_declared(destination_path(destination)));
        }
    }
}
