use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::{Role, User};
use crate::validation::{Constraint, Field, Schema};

pub const REGISTER_SCHEMA: Schema = Schema {
    fields: &[
        Field {
            name: "email",
            required: true,
            constraint: Constraint::Email { min: 10, max: 100 },
        },
        Field {
            name: "username",
            required: true,
            constraint: Constraint::Text {
                min: Some(2),
                max: Some(255),
            },
        },
        Field {
            name: "password",
            required: true,
            constraint: Constraint::Text {
                min: Some(8),
                max: None,
            },
        },
        Field {
            name: "isAdmin",
            required: false,
            constraint: Constraint::Bool,
        },
    ],
};

pub const LOGIN_SCHEMA: Schema = Schema {
    fields: &[
        Field {
            name: "email",
            required: true,
            constraint: Constraint::Email { min: 10, max: 100 },
        },
        Field {
            name: "password",
            required: true,
            constraint: Constraint::Text {
                min: Some(8),
                max: None,
            },
        },
    ],
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default, rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of a user; never carries the password hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use serde_json::json;

    fn message(err: ApiError) -> String {
        match err {
            ApiError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn register_accepts_a_valid_payload() {
        let payload = json!({
            "email": "cook@example.com",
            "username": "cook",
            "password": "let-me-in-please",
            "isAdmin": true,
        });
        assert!(REGISTER_SCHEMA.check(&payload).is_ok());
        let body: RegisterRequest = serde_json::from_value(payload).unwrap();
        assert!(body.is_admin);
    }

    #[test]
    fn register_is_admin_defaults_to_false() {
        let payload = json!({
            "email": "cook@example.com",
            "username": "cook",
            "password": "let-me-in-please",
        });
        assert!(REGISTER_SCHEMA.check(&payload).is_ok());
        let body: RegisterRequest = serde_json::from_value(payload).unwrap();
        assert!(!body.is_admin);
    }

    #[test]
    fn register_rejects_a_short_password() {
        let err = message(
            REGISTER_SCHEMA
                .check(&json!({
                    "email": "cook@example.com",
                    "username": "cook",
                    "password": "short",
                }))
                .unwrap_err(),
        );
        assert_eq!(err, "\"password\" must be at least 8 characters");
    }

    #[test]
    fn register_rejects_a_bad_email() {
        let err = message(
            REGISTER_SCHEMA
                .check(&json!({
                    "email": "definitely-not-an-email",
                    "username": "cook",
                    "password": "let-me-in-please",
                }))
                .unwrap_err(),
        );
        assert_eq!(err, "\"email\" must be a valid email address");
    }

    #[test]
    fn login_requires_both_fields() {
        let err = message(
            LOGIN_SCHEMA
                .check(&json!({ "email": "cook@example.com" }))
                .unwrap_err(),
        );
        assert_eq!(err, "\"password\" is required");
    }

    #[test]
    fn login_rejects_extra_fields() {
        let err = message(
            LOGIN_SCHEMA
                .check(&json!({
                    "email": "cook@example.com",
                    "password": "let-me-in-please",
                    "remember_me": true,
                }))
                .unwrap_err(),
        );
        assert_eq!(err, "\"remember_me\" is not allowed");
    }

    #[test]
    fn public_user_serializes_role_and_no_secrets() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "cook@example.com".into(),
            username: "cook".into(),
            role: Role::Admin,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"role\":\"admin\""));
        assert!(!json.contains("password"));
    }
}
