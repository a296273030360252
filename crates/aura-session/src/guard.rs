//! Route guard: which screen a navigation actually lands on.
//!
//! A pure function of the current [`Session`] and the requested path. The
//! rules form a strict priority chain; the first that matches wins:
//!
//! | # | Condition                                  | Decision              |
//! |---|--------------------------------------------|-----------------------|
//! | 1 | path is the login or register page         | render it             |
//! | 2 | path is not a known page                   | redirect to home      |
//! | 3 | start-up refresh still running             | render loading        |
//! | 4 | nobody signed in                           | redirect to login     |
//! | 5 | user is banter-gated, path isn't the gate  | redirect to the gate  |
//! | 6 | otherwise                                  | render it             |

use crate::Session;

/// The application's page paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub home: String,
    pub login: String,
    pub register: String,
    pub banter: String,
    /// Pages that require a signed-in, non-gated user (the banter gate
    /// itself requires only a signed-in user).
    pub protected: Vec<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            home: "/".into(),
            login: "/login".into(),
            register: "/register".into(),
            banter: "/banter".into(),
            protected: vec![
                "/".into(),
                "/predictor".into(),
                "/info".into(),
                "/banter".into(),
            ],
        }
    }
}

/// What to show for a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restore is still in flight; show a placeholder.
    RenderLoading,
    Render(String),
    Redirect(String),
}

/// Decides access per navigation. Holds no state beyond its table.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Applies the priority chain to `requested`.
    ///
    /// Query strings, fragments, and a trailing slash are ignored when
    /// matching; `Render` carries the cleaned path.
    pub fn decide(&self, session: &Session, requested: &str) -> RouteDecision {
        let path = clean(requested);
        let t = &self.table;

        if path == t.login || path == t.register {
            return RouteDecision::Render(path.to_string());
        }
        if !t.protected.iter().any(|p| p == path) {
            return RouteDecision::Redirect(t.home.clone());
        }

        let decision = match session {
            Session::Loading => RouteDecision::RenderLoading,
            Session::SignedOut => RouteDecision::Redirect(t.login.clone()),
            Session::SignedIn { user, .. } if user.banter_mode && path != t.banter => {
                RouteDecision::Redirect(t.banter.clone())
            }
            Session::SignedIn { .. } => RouteDecision::Render(path.to_string()),
        };
        tracing::trace!(path, ?decision, "route decided");
        decision
    }
}

fn clean(requested: &str) -> &str {
    let end = requested.find(['?', '#']).unwrap_or(requested.len());
    let path = &requested[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
