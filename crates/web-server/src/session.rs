//! Session plumbing: the SPA keeps its signed-in profile client-side, so
//! every authenticated request carries an explicit token header instead of
//! a cookie.

pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

const TOKEN_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("No session token supplied")]
    MissingToken,
    #[error("Session token is not valid UTF-8")]
    MalformedToken,
}

pub fn token_from(req: &actix_web::HttpRequest) -> Result<String, TokenError> {
    req.headers()
        .get(SESSION_TOKEN_HEADER)
        .ok_or(TokenError::MissingToken)?
        .to_str()
        .map(str::to_string)
        .map_err(|_| TokenError::MalformedToken)
}

pub fn issue_token() -> String {
    use rand::Rng;

    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Demo-grade credential storage, like everything else about verification
/// here. A real deployment gets a real KDF.
pub fn password_digest(password: &str) -> String {
    format!("{:x}", md5::compute(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_enough_and_distinct() {
        let a = issue_token();
        let b = issue_token();
        assert_eq!(a.len(), TOKEN_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn password_digest_is_deterministic() {
        assert_eq!(password_digest("hunter2"), password_digest("hunter2"));
        assert_ne!(password_digest("hunter2"), password_digest("hunter3"));
    }
}
