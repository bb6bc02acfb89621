/// Database models for Taskpad
///
/// Each model owns the SQL for its table. Handlers never write SQL; they
/// call these associated functions with a pool reference.
///
/// # Models
///
/// - `user`: registered accounts and credential lookup
/// - `task`: the CRUD resource managed by the task endpoints
/// - `revoked_token`: bearer token revocation list
///
/// # Example
///
/// ```no_run
/// use taskpad_shared::models::user::{CreateUser, User};
/// use taskpad_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Ann".to_string(),
///         email: "ann@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod revoked_token;
pub mod task;
pub mod user;
