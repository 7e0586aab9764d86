//! HTTP Basic-Auth gate.
//!
//! Stateless request check: with both credentials configured, a request must
//! carry a matching `Authorization: Basic ...` header or it gets a 401
//! challenge. With either credential missing the gate lets everything through.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

pub const AUTH_USER_ENV: &str = "AUTH_USER";
pub const AUTH_PASS_ENV: &str = "AUTH_PASS";

pub const UNAUTHORIZED_STATUS: u16 = 401;
pub const UNAUTHORIZED_BODY: &str = "401 Unauthorized";
pub const WWW_AUTHENTICATE: &str = "Basic realm=\"Restricted Area\"";

// Path prefixes (after the leading '/') that are never gated.
const UNGATED_PREFIXES: [&str; 4] = ["api", "_next/static", "_next/image", "favicon.ico"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Credentials {
    user: String,
    pass: String,
}

/// The 401 response the caller should send back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub status: u16,
    pub www_authenticate: &'static str,
    pub body: &'static str,
}

const CHALLENGE: Challenge = Challenge {
    status: UNAUTHORIZED_STATUS,
    www_authenticate: WWW_AUTHENTICATE,
    body: UNAUTHORIZED_BODY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Pass,
    Challenge(Challenge),
}

impl AuthDecision {
    pub fn is_pass(self) -> bool {
        matches!(self, AuthDecision::Pass)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicAuthGate {
    credentials: Option<Credentials>,
}

impl BasicAuthGate {
    /// Gate is only enabled when both values are present and non-empty.
    pub fn new(user: Option<String>, pass: Option<String>) -> Self {
        let credentials = match (user, pass) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Credentials { user, pass })
            }
            _ => None,
        };
        Self { credentials }
    }

    /// Credentials from `AUTH_USER`/`AUTH_PASS`, each falling back to the
    /// given value when the variable is unset or empty.
    pub fn from_env_or(user: Option<String>, pass: Option<String>) -> Self {
        let user = prefer_set(std::env::var(AUTH_USER_ENV).ok(), user);
        let pass = prefer_set(std::env::var(AUTH_PASS_ENV).ok(), pass);
        Self::new(user, pass)
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Whether requests for `path` go through the gate at all.
    pub fn guards_path(path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        !UNGATED_PREFIXES.iter().any(|prefix| rest.starts_with(prefix))
    }

    /// Decide on a request given its path and raw `Authorization` header.
    pub fn check_request(&self, path: &str, authorization: Option<&str>) -> AuthDecision {
        if !Self::guards_path(path) {
            return AuthDecision::Pass;
        }
        self.check(authorization)
    }

    pub fn check(&self, authorization: Option<&str>) -> AuthDecision {
        let Some(expected) = &self.credentials else {
            return AuthDecision::Pass;
        };
        let Some(header) = authorization.filter(|h| h.starts_with("Basic ")) else {
            return AuthDecision::Challenge(CHALLENGE);
        };

        match decode_credentials(header) {
            Some((user, pass)) if user == expected.user && pass == expected.pass => {
                AuthDecision::Pass
            }
            _ => AuthDecision::Challenge(CHALLENGE),
        }
    }
}

fn prefer_set(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary.filter(|value| !value.is_empty()).or(fallback)
}

/// The first two `:`-separated parts of the decoded token.
fn decode_credentials(header: &str) -> Option<(String, String)> {
    let token = header.split(' ').nth(1)?;
    let decoded = B64.decode(token).ok()?;
    let decoded = String::from_utf8_lossy(&decoded);
    let mut parts = decoded.split(':');
    let user = parts.next()?.to_string();
    let pass = parts.next()?.to_string();
    Some((user, pass))
}

/// Header value a client sends for `user`/`pass`.
pub fn basic_authorization(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{}:{}", user, pass)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> BasicAuthGate {
        BasicAuthGate::new(Some("goldie".to_string()), Some("treats".to_string()))
    }

    #[test]
    fn unset_or_empty_credentials_disable_gate() {
        assert!(!BasicAuthGate::new(None, Some("x".to_string())).is_enabled());
        assert!(!BasicAuthGate::new(Some(String::new()), Some("x".to_string())).is_enabled());
        assert_eq!(BasicAuthGate::default().check(None), AuthDecision::Pass);
    }

    #[test]
    fn empty_env_value_falls_back_to_configured_credential() {
        let user = prefer_set(Some(String::new()), Some("goldie".to_string()));
        let pass = prefer_set(None, Some("treats".to_string()));
        assert_eq!(user.as_deref(), Some("goldie"));
        assert_eq!(pass.as_deref(), Some("treats"));

        let gate = BasicAuthGate::new(user, pass);
        assert!(gate.is_enabled());
        assert_eq!(
            gate.check_request("/", None),
            AuthDecision::Challenge(CHALLENGE)
        );
    }

    #[test]
    fn set_env_value_wins_over_configured_credential() {
        let user = prefer_set(Some("env-user".to_string()), Some("goldie".to_string()));
        assert_eq!(user.as_deref(), Some("env-user"));
    }

    #[test]
    fn matching_header_passes() {
        let header = basic_authorization("goldie", "treats");
        assert_eq!(header, "Basic Z29sZGllOnRyZWF0cw==");
        assert!(gate().check(Some(&header)).is_pass());
    }

    #[test]
    fn missing_wrong_or_malformed_header_is_challenged() {
        let gate = gate();
        let expected = AuthDecision::Challenge(CHALLENGE);
        assert_eq!(gate.check(None), expected);
        assert_eq!(gate.check(Some("Bearer abc")), expected);
        assert_eq!(gate.check(Some(&basic_authorization("goldie", "kibble"))), expected);
        assert_eq!(gate.check(Some("Basic !!!not-base64")), expected);
        assert_eq!(gate.check(Some(&format!("Basic {}", B64.encode("goldie")))), expected);
    }

    #[test]
    fn challenge_carries_realm_header() {
        let AuthDecision::Challenge(challenge) = gate().check(None) else {
            panic!("expected a challenge");
        };
        assert_eq!(challenge.status, 401);
        assert_eq!(challenge.www_authenticate, "Basic realm=\"Restricted Area\"");
        assert_eq!(challenge.body, "401 Unauthorized");
    }

    #[test]
    fn password_with_colon_never_matches() {
        let gate = BasicAuthGate::new(Some("goldie".to_string()), Some("a:b".to_string()));
        assert!(!gate.check(Some(&basic_authorization("goldie", "a:b"))).is_pass());
    }

    #[test]
    fn static_and_api_paths_skip_the_gate() {
        let gate = gate();
        assert!(gate.check_request("/api/health", None).is_pass());
        assert!(gate.check_request("/_next/static/app.js", None).is_pass());
        assert!(gate.check_request("/favicon.ico", None).is_pass());
        assert!(!gate.check_request("/training", None).is_pass());
        assert!(!gate.check_request("/", None).is_pass());
    }
}
