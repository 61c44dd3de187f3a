//! Role-gated navigation.
//!
//! A static manifest of screens, each optionally restricted to one role.
//! Filtering and redirect decisions are plain data lookups.

use pkg_types::role::Role;
use serde::Serialize;

use crate::resolver::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    SignIn,
    Dashboard,
    Books,
    BorrowReturn,
    Members,
    Staff,
    Reports,
    Genres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub route: Route,
    pub label: &'static str,
    pub path: &'static str,
    /// `None` means any signed-in role may open it.
    pub required_role: Option<Role>,
}

pub const NAV_MANIFEST: &[NavEntry] = &[
    NavEntry {
        route: Route::Dashboard,
        label: "Dashboard",
        path: "/dashboard",
        required_role: None,
    },
    NavEntry {
        route: Route::Books,
        label: "Books",
        path: "/books",
        required_role: None,
    },
    NavEntry {
        route: Route::BorrowReturn,
        label: "Borrow/Return",
        path: "/borrow-return",
        required_role: None,
    },
    NavEntry {
        route: Route::Members,
        label: "Members",
        path: "/members",
        required_role: Some(Role::Admin),
    },
    NavEntry {
        route: Route::Staff,
        label: "Staff",
        path: "/staff",
        required_role: Some(Role::Admin),
    },
    NavEntry {
        route: Route::Reports,
        label: "Reports",
        path: "/reports",
        required_role: Some(Role::Admin),
    },
    NavEntry {
        route: Route::Genres,
        label: "Genres",
        path: "/genres",
        required_role: Some(Role::Admin),
    },
];

/// Where a signed-in user is sent when a route is off-limits.
pub const DEFAULT_LANDING: Route = Route::Dashboard;

/// Path of the sign-in entry point.
pub const SIGN_IN_PATH: &str = "/login";

impl Route {
    pub fn entry(&self) -> Option<&'static NavEntry> {
        NAV_MANIFEST.iter().find(|e| e.route == *self)
    }

    pub fn path(&self) -> &'static str {
        match self.entry() {
            Some(entry) => entry.path,
            None => SIGN_IN_PATH,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.entry() {
            Some(entry) => entry.label,
            None => "Sign in",
        }
    }
}

/// Outcome of trying to open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Not signed in: go to the sign-in entry point.
    SignIn,
    /// Signed in with the wrong role: go here instead.
    Redirect(Route),
}

fn permits(entry: &NavEntry, role: Role) -> bool {
    entry.required_role.is_none_or(|required| required == role)
}

/// Menu entries the session may see, in manifest order.
pub fn visible_entries(session: &Session) -> Vec<&'static NavEntry> {
    if !session.authenticated {
        return Vec::new();
    }
    NAV_MANIFEST
        .iter()
        .filter(|e| permits(e, session.role))
        .collect()
}

pub fn authorize(session: &Session, route: Route) -> Access {
    if route == Route::SignIn {
        return Access::Granted;
    }
    if !session.authenticated {
        return Access::SignIn;
    }
    match route.entry() {
        Some(entry) if permits(entry, session.role) => Access::Granted,
        _ => Access::Redirect(DEFAULT_LANDING),
    }
}

/// First screen after signing in.
pub fn landing_route(role: Role) -> Route {
    match role {
        Role::Librarian => Route::BorrowReturn,
        Role::Admin | Role::Unknown => DEFAULT_LANDING,
    }
}
