use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::UserError;

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user. `created_at` is never exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// `data` payload of the list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UsersList {
    pub users: Vec<UserData>,
}

/// JSON body accepted by `POST /users`.
///
/// Only a JSON object is accepted. Arrays and scalars are rejected during
/// extraction, as are non-string field values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(try_from = "Map<String, Value>")]
pub struct CreateUser {
    #[validate(required, length(min = 1))]
    #[schema(example = "igor")]
    pub username: Option<String>,

    #[validate(required, length(min = 1))]
    #[schema(example = "igorchipana@upeu.edu.pe")]
    pub email: Option<String>,
}

impl TryFrom<Map<String, Value>> for CreateUser {
    type Error = String;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            username: string_field(&mut body, "username")?,
            email: string_field(&mut body, "email")?,
        })
    }
}

fn string_field(body: &mut Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match body.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(format!("`{key}` must be a string, got {other}")),
    }
}

/// Form fields posted by the HTML index page.
///
/// Missing fields deserialize as empty strings and are rejected downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Validated input for inserting a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    pub(crate) fn ensure_present(&self) -> Result<(), UserError> {
        if self.username.is_empty() {
            return Err(UserError::InvalidPayload("username is empty".to_string()));
        }
        if self.email.is_empty() {
            return Err(UserError::InvalidPayload("email is empty".to_string()));
        }
        Ok(())
    }
}

impl TryFrom<CreateUser> for NewUser {
    type Error = UserError;

    fn try_from(input: CreateUser) -> Result<Self, Self::Error> {
        let username = input
            .username
            .ok_or_else(|| UserError::InvalidPayload("username is required".to_string()))?;
        let email = input
            .email
            .ok_or_else(|| UserError::InvalidPayload("email is required".to_string()))?;
        Ok(Self { username, email })
    }
}

impl From<UserForm> for NewUser {
    fn from(form: UserForm) -> Self {
        Self {
            username: form.username,
            email: form.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUser {
            username: Some("igor".to_string()),
            email: Some("igorchipana@upeu.edu.pe".to_string()),
        };
        assert!(valid.validate().is_ok());

        let missing_email = CreateUser {
            username: Some("igor".to_string()),
            email: None,
        };
        assert!(missing_email.validate().is_err());

        let empty_username = CreateUser {
            username: Some(String::new()),
            email: Some("igorchipana@upeu.edu.pe".to_string()),
        };
        assert!(empty_username.validate().is_err());
    }

    #[test]
    fn test_create_user_requires_json_object() {
        let parsed: CreateUser =
            serde_json::from_str(r#"{"username":"igor","email":"igorchipana@upeu.edu.pe"}"#)
                .unwrap();
        assert_eq!(parsed.username.as_deref(), Some("igor"));

        let missing: CreateUser = serde_json::from_str(r#"{"username":null}"#).unwrap();
        assert!(missing.username.is_none());
        assert!(missing.email.is_none());

        for body in [
            r#"["igor","igorchipana@upeu.edu.pe"]"#,
            r#""igor""#,
            r#"{"username":7,"email":"igorchipana@upeu.edu.pe"}"#,
        ] {
            assert!(serde_json::from_str::<CreateUser>(body).is_err(), "{body}");
        }
    }

    #[test]
    fn test_new_user_from_create_user() {
        let input = CreateUser {
            username: Some("cesar".to_string()),
            email: Some("cesarpareja@upeu.edu.pe".to_string()),
        };
        let user = NewUser::try_from(input).unwrap();
        assert_eq!(user, NewUser::new("cesar", "cesarpareja@upeu.edu.pe"));

        assert!(NewUser::try_from(CreateUser::default()).is_err());
    }

    #[test]
    fn test_ensure_present_rejects_empty_fields() {
        assert!(NewUser::new("igor", "").ensure_present().is_err());
        assert!(NewUser::new("", "igor@upeu.edu.pe").ensure_present().is_err());
        assert!(NewUser::new("igor", "igor@upeu.edu.pe").ensure_present().is_ok());
    }

    #[test]
    fn test_user_data_hides_created_at() {
        let user = User {
            id: 7,
            username: "igor".to_string(),
            email: "igor@upeu.edu.pe".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserData::from(&user)).unwrap();
        assert!(json.get("created_at").is_none());
        assert_eq!(json["id"], 7);
    }
}
