//! Request DTOs
//!
//! Data structures for API request bodies and query parameters.

use serde::Deserialize;
use validator::Validate;

/// Server list query parameters.
///
/// All options are optional and independent. Boolean options are carried as
/// raw strings: the literal `"true"` enables them, any other value counts as
/// false rather than being rejected.
#[derive(Debug, Deserialize, Default)]
pub struct ServerListParams {
    pub category: Option<String>,
    pub qty: Option<String>,
    pub by_user: Option<String>,
    pub by_serverid: Option<String>,
    pub with_num_members: Option<String>,
}

impl ServerListParams {
    /// Whether results should be restricted to the caller's memberships.
    pub fn by_user(&self) -> bool {
        self.by_user.as_deref() == Some("true")
    }

    /// Whether results should carry the member-count annotation.
    pub fn with_num_members(&self) -> bool {
        self.with_num_members.as_deref() == Some("true")
    }
}

/// Create server request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServerRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    pub category_id: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("true"), true)]
    #[test_case(Some("false"), false)]
    #[test_case(Some("1"), false)]
    #[test_case(Some("TRUE"), false)]
    #[test_case(None, false)]
    fn boolean_params_only_accept_literal_true(raw: Option<&str>, expected: bool) {
        let params = ServerListParams {
            by_user: raw.map(str::to_string),
            with_num_members: raw.map(str::to_string),
            ..Default::default()
        };

        assert_eq!(params.by_user(), expected);
        assert_eq!(params.with_num_members(), expected);
    }
}
