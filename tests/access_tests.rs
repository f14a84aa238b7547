//! Route access decisions against real tokens.

mod common;

use common::*;
use dashboard_nav::access::{AccessDecision, AccessPolicy, AccessRequest, TokenState};
use dashboard_nav::{NavConfig, Role, Session};
use pretty_assertions::assert_eq;

fn policy() -> AccessPolicy {
    AccessPolicy::from_config(&NavConfig::default())
}

#[test]
fn test_valid_token_is_forwarded_as_bearer() {
    init_logging();
    let token = issue_token(Some("artist"), Some(3600));
    let decision = policy().evaluate(&AccessRequest::new("/dashboard/gallery", Some(&token)));

    assert_eq!(
        decision,
        AccessDecision::Allow {
            authorization: Some(format!("Bearer {token}"))
        }
    );
}

#[test]
fn test_missing_token_redirects_with_return_path() {
    let decision = policy().evaluate(&AccessRequest::new("/dashboard/users/7/edit", None));
    assert_eq!(
        decision.redirect_path(),
        Some("/login?redirectedFrom=%2Fdashboard%2Fusers%2F7%2Fedit")
    );
    assert!(!decision.clears_access_cookie());
}

#[test]
fn test_expired_token_clears_cookie() {
    let token = issue_token(Some("super_admin"), Some(-60));
    let request = AccessRequest::new("/dashboard", Some(&token));
    assert_eq!(request.token_state(), &TokenState::Expired);

    let decision = policy().evaluate(&request);
    assert_eq!(decision.redirect_path(), Some("/login"));
    assert!(decision.clears_access_cookie());
}

#[test]
fn test_malformed_token_clears_cookie() {
    let decision = policy().evaluate(&AccessRequest::new("/dashboard", Some("abc.def")));
    assert_eq!(decision.redirect_path(), Some("/login"));
    assert!(decision.clears_access_cookie());
}

#[test]
fn test_unknown_role_is_permission_denied() {
    let token = issue_token(Some("intern"), Some(3600));
    let decision = policy().evaluate(&AccessRequest::new("/dashboard", Some(&token)));
    assert_eq!(decision.redirect_path(), Some("/permission-denied"));
    assert!(!decision.clears_access_cookie());
}

#[test]
fn test_missing_role_claim_is_permission_denied() {
    let token = issue_token(None, None);
    let decision = policy().evaluate(&AccessRequest::new("/dashboard/calendar", Some(&token)));
    assert_eq!(decision.redirect_path(), Some("/permission-denied"));
}

#[test]
fn test_restricted_allowed_roles() {
    let config = NavConfig::from_toml_str(
        r#"
        [access]
        allowed_roles = ["super_admin", "artist_manager"]
        "#,
    )
    .unwrap();
    let policy = AccessPolicy::from_config(&config);

    let artist = issue_token(Some("artist"), Some(3600));
    let manager = issue_token(Some("artist_manager"), Some(3600));
    assert!(policy
        .evaluate(&AccessRequest::new("/dashboard", Some(&artist)))
        .is_redirect());
    assert!(policy
        .evaluate(&AccessRequest::new("/dashboard", Some(&manager)))
        .is_allow());
}

#[test]
fn test_signed_in_user_bounced_from_login() {
    let token = issue_token(Some("artist"), Some(3600));
    for path in ["/login", "/signup", "/signup/"] {
        let decision = policy().evaluate(&AccessRequest::new(path, Some(&token)));
        assert_eq!(decision.redirect_path(), Some("/dashboard"), "path {path}");
    }
}

#[test]
fn test_guest_pages_open_without_token() {
    for path in ["/login", "/signup", "/", "/about"] {
        let decision = policy().evaluate(&AccessRequest::new(path, None));
        assert_eq!(decision, AccessDecision::Allow { authorization: None });
    }
}

#[test]
fn test_public_page_does_not_forward_token() {
    let token = issue_token(Some("artist"), Some(3600));
    let decision = policy().evaluate(&AccessRequest::new("/about", Some(&token)));
    assert_eq!(decision, AccessDecision::Allow { authorization: None });
}

#[test]
fn test_request_from_cookie_header() {
    let token = issue_token(Some("artist_manager"), Some(3600));
    let header = format!("theme=dark; Access={token}; role=artist_manager");
    let config = NavConfig::default();

    let request = AccessRequest::from_cookie_header("/dashboard/artists", &header, &config.access);
    assert_eq!(request.role(), Some(Role::ArtistManager));
    assert!(policy().evaluate(&request).is_allow());

    let claims = request.token_state().claims().unwrap();
    assert_eq!(
        Session::from_claims(claims),
        Session {
            role: Some(Role::ArtistManager),
            name: Some("Test User".into())
        }
    );
}
