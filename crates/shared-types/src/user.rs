use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A case officer account. Users are provisioned out of band and can
/// only be retrieved or updated through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub membership_number: String,
    pub contact_number: String,
    pub email: String,
    pub case_office: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UpdateUserRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name cannot be empty"))
    )]
    pub name: Option<String>,
    pub membership_number: Option<String>,
    pub contact_number: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: Option<String>,
    /// `Some(None)` clears the office assignment.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub case_office: Option<Option<i64>>,
}

/// Keeps an explicit `null` distinct from an absent field.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Username/password pair posted to the token endpoint and the login form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct Credentials {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Username is required"))
    )]
    pub username: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Token issued for API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenResponse {
    pub token: String,
    pub user_id: i64,
}

/// The signed-in user as seen by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_office: Option<i64>,
}

impl From<User> for AuthUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            case_office: u.case_office,
        }
    }
}

impl AuthUser {
    /// Name shown in the navbar: the full name, or the username when blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn officer() -> User {
        User {
            id: 4,
            username: "tmokoena".into(),
            name: "Thabo Mokoena".into(),
            membership_number: "M-1182".into(),
            contact_number: "+27115550101".into(),
            email: "thabo@example.org".into(),
            case_office: Some(2),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn auth_user_from_user_keeps_identity() {
        let auth: AuthUser = officer().into();
        assert_eq!(auth.id, 4);
        assert_eq!(auth.username, "tmokoena");
        assert_eq!(auth.case_office, Some(2));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut auth: AuthUser = officer().into();
        assert_eq!(auth.display_name(), "Thabo Mokoena");
        auth.name = "  ".into();
        assert_eq!(auth.display_name(), "tmokoena");
    }

    #[test]
    fn update_request_distinguishes_clearing_office() {
        let keep: UpdateUserRequest = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(keep.case_office, None);
        let clear: UpdateUserRequest = serde_json::from_str(r#"{"case_office":null}"#).unwrap();
        assert_eq!(clear.case_office, Some(None));
        let set: UpdateUserRequest = serde_json::from_str(r#"{"case_office":3}"#).unwrap();
        assert_eq!(set.case_office, Some(Some(3)));
    }

    #[test]
    fn token_response_wire_shape() {
        let json = serde_json::to_value(TokenResponse {
            token: "abc".into(),
            user_id: 9,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"token": "abc", "user_id": 9}));
    }
}
