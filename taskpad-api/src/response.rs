/// Response envelopes shared by the auth and task handlers
///
/// Task operations respond with `{status, message, data}`; auth
/// operations add the credential fields (`access_token`, `token_type`,
/// `expires_in`). Both families use `status` as a 0/1 flag, `message`
/// for the human-readable outcome, and `data` for the record(s).
/// Validation failures use the `message` key on both surfaces.

use serde::Serialize;
use serde_json::{json, Value};
use taskpad_shared::models::user::User;

/// Envelope for task operations: `{status, message, data}`
///
/// The message key is omitted for index responses and the data key for
/// internal-error responses.
#[derive(Debug, Serialize)]
pub struct TaskEnvelope {
    /// 1 on success, 0 on failure
    pub status: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TaskEnvelope {
    /// Success envelope carrying a record
    pub fn ok(message: &str, data: &impl Serialize) -> Self {
        Self {
            status: 1,
            message: Some(message.to_string()),
            data: Some(serde_json::to_value(data).unwrap_or(Value::Null)),
        }
    }

    /// Success envelope carrying a list, without a message key
    pub fn list(data: &impl Serialize) -> Self {
        Self {
            status: 1,
            message: None,
            data: Some(serde_json::to_value(data).unwrap_or(Value::Null)),
        }
    }

    /// Validation failure: first error message, empty data
    pub fn validation_failed(message: String) -> Self {
        Self {
            status: 0,
            message: Some(message),
            data: Some(json!({})),
        }
    }

    /// Missing task: fixed message, empty data
    pub fn not_found() -> Self {
        Self {
            status: 0,
            message: Some("Task not found.".to_string()),
            data: Some(json!({})),
        }
    }

    /// Unexpected persistence failure: verbatim message, no data key
    pub fn internal_error(message: String) -> Self {
        Self {
            status: 0,
            message: Some(message),
            data: None,
        }
    }
}

/// Envelope for auth operations
///
/// Failure responses keep the credential fields present but empty so
/// clients can parse success and failure with one shape. `expires_in`
/// appears only when a token is actually issued.
#[derive(Debug, Serialize)]
pub struct AuthEnvelope {
    /// 1 on success, 0 on failure
    pub status: u8,

    pub message: String,

    /// The issued bearer token, empty on failure
    pub access_token: String,

    /// Always "bearer"
    pub token_type: &'static str,

    /// Token time-to-live in seconds, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// The user record on success, empty object on failure
    pub data: Value,
}

impl AuthEnvelope {
    /// Failure envelope with empty credential fields
    pub fn denied(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
            access_token: String::new(),
            token_type: "bearer",
            expires_in: None,
            data: json!({}),
        }
    }

    /// Success envelope carrying a fresh token and the principal
    pub fn granted(message: &str, access_token: String, expires_in: i64, user: &User) -> Self {
        Self {
            status: 1,
            message: message.to_string(),
            access_token,
            token_type: "bearer",
            expires_in: Some(expires_in),
            data: serde_json::to_value(user).unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_denied_envelope_shape() {
        let value = serde_json::to_value(AuthEnvelope::denied("Unauthorized")).unwrap();

        assert_eq!(value["status"], 0);
        assert_eq!(value["message"], "Unauthorized");
        assert_eq!(value["access_token"], "");
        assert_eq!(value["token_type"], "bearer");
        assert!(value.get("expires_in").is_none());
        assert_eq!(value["data"], json!({}));
    }

    #[test]
    fn test_granted_envelope_shape() {
        let user = sample_user();
        let envelope = AuthEnvelope::granted("User successfully registered", "tok".into(), 3600, &user);
        let value = serde_json::to_value(envelope).unwrap();

        assert_eq!(value["status"], 1);
        assert_eq!(value["access_token"], "tok");
        assert_eq!(value["expires_in"], 3600);
        assert_eq!(value["data"]["email"], "ann@x.com");
        // The hash must not leak through the embedded user record
        assert!(value["data"].get("password_hash").is_none());
    }

    #[test]
    fn test_list_envelope_has_no_message_key() {
        let value = serde_json::to_value(TaskEnvelope::list(&Vec::<u8>::new())).unwrap();

        assert_eq!(value["status"], 1);
        assert!(value.get("message").is_none());
        assert_eq!(value["data"], json!([]));
    }

    #[test]
    fn test_internal_error_envelope_has_no_data_key() {
        let value =
            serde_json::to_value(TaskEnvelope::internal_error("boom".to_string())).unwrap();

        assert_eq!(value["status"], 0);
        assert_eq!(value["message"], "boom");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_not_found_envelope() {
        let value = serde_json::to_value(TaskEnvelope::not_found()).unwrap();

        assert_eq!(value["status"], 0);
        assert_eq!(value["message"], "Task not found.");
        assert_eq!(value["data"], json!({}));
    }
}
