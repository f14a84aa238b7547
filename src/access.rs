//! Route access guards.
//!
//! Decides, before a page renders, whether the request may proceed or must
//! be redirected. The decision is a pure function of the requested path and
//! the access token; the web layer applies it (issue the redirect, clear the
//! cookie, forward the `Authorization` header).
//!
//! # Built-in guards
//!
//! | Guard | Priority | Purpose |
//! |-------|----------|---------|
//! | [`GuestOnlyGuard`] | 110 | Sends signed-in users away from `/login`, `/signup` |
//! | [`AuthGuard`] | 100 | Requires a live token under the protected prefix |
//! | [`RoleGuard`] | 90 | Requires an allowed `role` claim under the protected prefix |
//!
//! Guards run in descending priority and the first non-[`Continue`](GuardAction::Continue)
//! answer wins.
//!
//! # Example
//!
//! ```
//! use dashboard_nav::access::{AccessDecision, AccessPolicy, AccessRequest};
//! use dashboard_nav::NavConfig;
//!
//! let policy = AccessPolicy::from_config(&NavConfig::default());
//!
//! let decision = policy.evaluate(&AccessRequest::new("/dashboard/artists", None));
//! assert_eq!(decision.redirect_path(), Some("/login?redirectedFrom=%2Fdashboard%2Fartists"));
//!
//! let decision = policy.evaluate(&AccessRequest::new("/about", None));
//! assert!(decision.is_allow());
//! ```

use crate::config::{AccessConfig, NavConfig};
use crate::error::NavError;
use crate::logging::{debug_log, warn_log};
use crate::path::normalize_path;
use crate::role::{resolve_role, Role};
use crate::token::{decode_access_token, AccessClaims};

// ============================================================================
// Request
// ============================================================================

/// What the token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Missing,
    Valid(AccessClaims),
    Expired,
    Invalid { message: String },
}

impl TokenState {
    /// Decode once; every guard reads the same result.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.filter(|t| !t.is_empty()) {
            None => TokenState::Missing,
            Some(raw) => match decode_access_token(raw) {
                Ok(claims) => TokenState::Valid(claims),
                Err(NavError::ExpiredToken) => TokenState::Expired,
                Err(err) => TokenState::Invalid {
                    message: err.to_string(),
                },
            },
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, TokenState::Missing)
    }

    pub fn claims(&self) -> Option<&AccessClaims> {
        match self {
            TokenState::Valid(claims) => Some(claims),
            _ => None,
        }
    }
}

/// A page request as the guards see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    path: String,
    token: Option<String>,
    state: TokenState,
}

impl AccessRequest {
    pub fn new(path: &str, token: Option<&str>) -> Self {
        Self {
            path: normalize_path(path).into_owned(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
            state: TokenState::from_token(token),
        }
    }

    /// Build from a `Cookie` header, reading the configured access cookie.
    pub fn from_cookie_header(path: &str, cookie_header: &str, access: &AccessConfig) -> Self {
        let token = crate::session::cookie_value(cookie_header, &access.access_cookie);
        Self::new(path, token.as_deref())
    }

    /// Normalized request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn token_state(&self) -> &TokenState {
        &self.state
    }

    /// Role claim, if the token is valid and carries a recognized role.
    pub fn role(&self) -> Option<Role> {
        resolve_role(self.state.claims().and_then(|c| c.role.as_deref()))
    }

    /// Whether the path is at or below `prefix`.
    pub fn is_under(&self, prefix: &str) -> bool {
        let prefix = normalize_path(prefix);
        prefix == "/"
            || self.path.as_str() == &*prefix
            || self
                .path
                .strip_prefix(&*prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

// ============================================================================
// Guard results
// ============================================================================

/// Answer of a single guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    Continue,
    Redirect {
        to: String,
        reason: String,
        /// The access cookie should be removed from the response
        clear_access_cookie: bool,
    },
}

impl GuardAction {
    pub fn redirect(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: reason.into(),
            clear_access_cookie: false,
        }
    }

    /// Redirect and drop the stale access cookie.
    pub fn redirect_clearing(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: reason.into(),
            clear_access_cookie: true,
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Final answer of an [`AccessPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow {
        /// `Bearer <token>` to forward to the API, for protected paths
        authorization: Option<String>,
    },
    Redirect {
        to: String,
        reason: String,
        clear_access_cookie: bool,
    },
}

impl AccessDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            Self::Allow { .. } => None,
        }
    }

    pub fn clears_access_cookie(&self) -> bool {
        matches!(
            self,
            Self::Redirect {
                clear_access_cookie: true,
                ..
            }
        )
    }
}

// ============================================================================
// AccessGuard trait
// ============================================================================

/// A single access check.
pub trait AccessGuard: Send + Sync + 'static {
    fn check(&self, request: &AccessRequest) -> GuardAction;

    /// Guard name for logs.
    fn name(&self) -> &'static str {
        "AccessGuard"
    }

    /// Higher runs first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

/// Guard from a closure.
///
/// ```
/// use dashboard_nav::access::{guard_fn, AccessGuard, AccessRequest, GuardAction};
///
/// let maintenance = guard_fn(|req: &AccessRequest| {
///     if req.path().starts_with("/dashboard/gallery") {
///         GuardAction::redirect("/maintenance", "Gallery offline")
///     } else {
///         GuardAction::Continue
///     }
/// });
/// assert!(maintenance.check(&AccessRequest::new("/dashboard", None)).is_continue());
/// ```
pub const fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&AccessRequest) -> GuardAction + Send + Sync + 'static,
{
    FnGuard { f }
}

/// See [`guard_fn`].
pub struct FnGuard<F> {
    f: F,
}

impl<F> AccessGuard for FnGuard<F>
where
    F: Fn(&AccessRequest) -> GuardAction + Send + Sync + 'static,
{
    fn check(&self, request: &AccessRequest) -> GuardAction {
        (self.f)(request)
    }
}

// ============================================================================
// Built-in guards
// ============================================================================

/// Redirects requests that carry any access token away from guest-only pages.
pub struct GuestOnlyGuard {
    paths: Vec<String>,
    home: String,
}

impl GuestOnlyGuard {
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>, home: impl Into<String>) -> Self {
        Self {
            paths: paths
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    normalize_path(&p).into_owned()
                })
                .collect(),
            home: home.into(),
        }
    }
}

impl AccessGuard for GuestOnlyGuard {
    fn check(&self, request: &AccessRequest) -> GuardAction {
        if request.token().is_some() && self.paths.iter().any(|p| p == request.path()) {
            GuardAction::redirect(&self.home, "Already signed in")
        } else {
            GuardAction::Continue
        }
    }

    fn name(&self) -> &'static str {
        "GuestOnlyGuard"
    }

    fn priority(&self) -> i32 {
        110
    }
}

/// Requires a live token under the protected prefix.
pub struct AuthGuard {
    prefix: String,
    login_path: String,
    redirect_param: String,
}

impl AuthGuard {
    pub fn new(
        prefix: impl Into<String>,
        login_path: impl Into<String>,
        redirect_param: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            login_path: login_path.into(),
            redirect_param: redirect_param.into(),
        }
    }

    fn login_with_return(&self, path: &str) -> String {
        format!(
            "{}?{}={}",
            self.login_path,
            self.redirect_param,
            urlencoding::encode(path)
        )
    }
}

impl AccessGuard for AuthGuard {
    fn check(&self, request: &AccessRequest) -> GuardAction {
        if !request.is_under(&self.prefix) {
            return GuardAction::Continue;
        }
        match request.token_state() {
            TokenState::Valid(_) => GuardAction::Continue,
            TokenState::Missing => GuardAction::redirect(
                self.login_with_return(request.path()),
                "Authentication required",
            ),
            TokenState::Expired => {
                GuardAction::redirect_clearing(&self.login_path, "Access token expired")
            }
            TokenState::Invalid { message } => GuardAction::redirect_clearing(
                &self.login_path,
                format!("Invalid access token: {message}"),
            ),
        }
    }

    fn name(&self) -> &'static str {
        "AuthGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

/// Requires the token's role claim to be one of the allowed roles.
pub struct RoleGuard {
    prefix: String,
    allowed: Vec<Role>,
    denied_path: String,
}

impl RoleGuard {
    pub fn new(
        prefix: impl Into<String>,
        allowed: impl IntoIterator<Item = Role>,
        denied_path: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            allowed: allowed.into_iter().collect(),
            denied_path: denied_path.into(),
        }
    }
}

impl AccessGuard for RoleGuard {
    fn check(&self, request: &AccessRequest) -> GuardAction {
        if !request.is_under(&self.prefix) {
            return GuardAction::Continue;
        }
        match request.role() {
            Some(role) if self.allowed.contains(&role) => GuardAction::Continue,
            _ => {
                let raw = request
                    .token_state()
                    .claims()
                    .and_then(|c| c.role.as_deref())
                    .unwrap_or_default();
                GuardAction::redirect(
                    &self.denied_path,
                    format!("Role {raw:?} not permitted for {}", request.path()),
                )
            }
        }
    }

    fn name(&self) -> &'static str {
        "RoleGuard"
    }

    fn priority(&self) -> i32 {
        90
    }
}

// ============================================================================
// Composition
// ============================================================================

/// AND-composition: all guards must continue. Runs in priority order and
/// stops at the first redirect.
pub struct Guards {
    guards: Vec<Box<dyn AccessGuard>>,
}

impl Guards {
    pub fn new(mut guards: Vec<Box<dyn AccessGuard>>) -> Self {
        guards.sort_by_key(|g| std::cmp::Reverse(g.priority()));
        Self { guards }
    }

    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl AccessGuard for Guards {
    fn check(&self, request: &AccessRequest) -> GuardAction {
        for guard in &self.guards {
            let action = guard.check(request);
            if !action.is_continue() {
                debug_log!("{} stopped request for '{}'", guard.name(), request.path());
                return action;
            }
        }
        GuardAction::Continue
    }

    fn name(&self) -> &'static str {
        "Guards"
    }

    fn priority(&self) -> i32 {
        self.guards.iter().map(|g| g.priority()).max().unwrap_or(0)
    }
}

/// Fluent builder for [`Guards`].
#[must_use]
#[derive(Default)]
pub struct GuardBuilder {
    guards: Vec<Box<dyn AccessGuard>>,
}

impl GuardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard<G: AccessGuard>(mut self, guard: G) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    pub fn build(self) -> Guards {
        Guards::new(self.guards)
    }
}

// ============================================================================
// Policy
// ============================================================================

/// The dashboard's access rules.
pub struct AccessPolicy {
    guards: Guards,
    protected_prefix: String,
}

impl AccessPolicy {
    /// Guest-only, auth and role guards wired from configuration.
    pub fn from_config(config: &NavConfig) -> Self {
        let access = &config.access;
        let guards = Guards::builder()
            .guard(GuestOnlyGuard::new(
                access.guest_only_paths.iter().cloned(),
                config.dashboard_root.clone(),
            ))
            .guard(AuthGuard::new(
                access.protected_prefix.clone(),
                access.login_path.clone(),
                access.redirect_param.clone(),
            ))
            .guard(RoleGuard::new(
                access.protected_prefix.clone(),
                access.allowed_roles.iter().copied(),
                access.permission_denied_path.clone(),
            ))
            .build();
        Self::new(guards, access.protected_prefix.clone())
    }

    /// Custom guard set.
    pub fn new(guards: Guards, protected_prefix: impl Into<String>) -> Self {
        Self {
            guards,
            protected_prefix: protected_prefix.into(),
        }
    }

    pub fn evaluate(&self, request: &AccessRequest) -> AccessDecision {
        match self.guards.check(request) {
            GuardAction::Continue => {
                let authorization = request
                    .token()
                    .filter(|_| request.is_under(&self.protected_prefix))
                    .map(|token| format!("Bearer {token}"));
                AccessDecision::Allow { authorization }
            }
            GuardAction::Redirect {
                to,
                reason,
                clear_access_cookie,
            } => {
                warn_log!("Redirecting '{}' to '{}': {}", request.path(), to, reason);
                AccessDecision::Redirect {
                    to,
                    reason,
                    clear_access_cookie,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_state_missing_for_empty() {
        assert_eq!(TokenState::from_token(Some("")), TokenState::Missing);
        assert_eq!(TokenState::from_token(None), TokenState::Missing);
    }

    #[test]
    fn test_token_state_invalid() {
        let state = TokenState::from_token(Some("garbage"));
        assert!(matches!(state, TokenState::Invalid { .. }));
        assert!(state.is_present());
        assert!(state.claims().is_none());
    }

    #[test]
    fn test_is_under() {
        let req = AccessRequest::new("/dashboard/artists/", None);
        assert_eq!(req.path(), "/dashboard/artists");
        assert!(req.is_under("/dashboard"));
        assert!(req.is_under("/dashboard/artists"));
        assert!(!req.is_under("/dash"));
        assert!(AccessRequest::new("/dashboard", None).is_under("/dashboard"));
    }

    #[test]
    fn test_guest_only_guard() {
        let guard = GuestOnlyGuard::new(["/login", "/signup"], "/dashboard");
        assert_eq!(guard.name(), "GuestOnlyGuard");
        assert_eq!(guard.priority(), 110);

        assert!(guard.check(&AccessRequest::new("/login", None)).is_continue());
        let action = guard.check(&AccessRequest::new("/signup", Some("x.y.z")));
        assert_eq!(action, GuardAction::redirect("/dashboard", "Already signed in"));
    }

    #[test]
    fn test_auth_guard_ignores_public_paths() {
        let guard = AuthGuard::new("/dashboard", "/login", "redirectedFrom");
        assert!(guard.check(&AccessRequest::new("/about", None)).is_continue());
    }

    #[test]
    fn test_auth_guard_invalid_token_clears_cookie() {
        let guard = AuthGuard::new("/dashboard", "/login", "redirectedFrom");
        match guard.check(&AccessRequest::new("/dashboard", Some("garbage"))) {
            GuardAction::Redirect {
                to,
                clear_access_cookie,
                ..
            } => {
                assert_eq!(to, "/login");
                assert!(clear_access_cookie);
            }
            GuardAction::Continue => panic!("expected redirect"),
        }
    }

    #[test]
    fn test_role_guard_without_token_denies() {
        let guard = RoleGuard::new("/dashboard", Role::ALL, "/permission-denied");
        let action = guard.check(&AccessRequest::new("/dashboard", None));
        assert!(matches!(action, GuardAction::Redirect { ref to, .. } if to == "/permission-denied"));
    }

    #[test]
    fn test_guards_run_in_priority_order() {
        let guards = Guards::builder()
            .guard(guard_fn(|_| GuardAction::redirect("/low", "low")))
            .guard(RoleGuard::new("/", [], "/role-denied"))
            .build();
        assert_eq!(guards.len(), 2);
        assert_eq!(guards.priority(), 90);

        let action = guards.check(&AccessRequest::new("/anything", None));
        assert!(matches!(action, GuardAction::Redirect { ref to, .. } if to == "/role-denied"));
    }

    #[test]
    fn test_empty_guards_continue() {
        let guards = Guards::builder().build();
        assert!(guards.is_empty());
        assert!(guards.check(&AccessRequest::new("/x", None)).is_continue());
    }
}
