/// Authentication primitives for Taskpad
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token issuing and validation (HS256)
/// - [`session`]: The per-request authenticated session type
///
/// Token *revocation* is persistence, not cryptography, so it lives in
/// `models::revoked_token` next to the other database models.
///
/// # Example
///
/// ```no_run
/// use taskpad_shared::auth::password::{hash_password, verify_password};
/// use taskpad_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), Duration::seconds(3600));
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// let validated = validate_token(&token, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod password;
pub mod session;
