//! Accounts, password login and the HS256 tokens that guard mutating routes.
//!
//! Everything here is inert while `auth.enable` is off: login answers with no
//! token and updates are accepted without touching the table.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::ensure_unique;
use crate::config::AuthConfig;
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{User, ROLE_ADMIN};
use crate::repository::{self, Filter, Scope};

pub const DEFAULT_ADMIN: &str = "admin";

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub role: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: i64,
    pub username: String,
    pub role: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub password: String,
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// Seed `admin`/`admin` when no account exists. Returns whether it did.
pub async fn ensure_admin(pool: &SqlitePool) -> Result<bool, ServiceError> {
    let mut tx = pool.begin().await?;
    if !repository::pluck_ids::<User>(&mut tx, Scope::Unscoped, &[])
        .await?
        .is_empty()
    {
        return Ok(false);
    }
    let password_hash = hash_password(DEFAULT_ADMIN)?;
    let admin = repository::create::<User>(
        &mut tx,
        &[
            ("username", DEFAULT_ADMIN.into()),
            ("password_hash", password_hash.into()),
            ("role", ROLE_ADMIN.into()),
        ],
    )
    .await?;
    tx.commit().await?;
    info!(user_id = admin.id, "default admin account created");
    Ok(true)
}

/// Sign a token for `user`. `expire_days == 0` leaves out `exp`.
pub fn generate_token(user: &User, auth: &AuthConfig) -> Result<String, ServiceError> {
    let exp = if auth.expire_days > 0 {
        let lifetime = TimeDelta::try_days(auth.expire_days)
            .ok_or_else(|| ServiceError::invalid("auth.expire_days is out of range"))?;
        Utc::now()
            .checked_add_signed(lifetime)
            .and_then(|at| u64::try_from(at.timestamp()).ok())
    } else {
        None
    };
    let claims = Claims {
        id: user.id,
        username: user.username.clone(),
        role: user.role,
        exp,
    };
    sign(&claims, auth)
}

fn sign(claims: &Claims, auth: &AuthConfig) -> Result<String, ServiceError> {
    Ok(encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )?)
}

/// Check an `Authorization` header value, with or without a `Bearer ` prefix.
pub fn verify_token(auth: &AuthConfig, header: &str) -> Result<Claims, ServiceError> {
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        return Err(ServiceError::Unauthorized);
    }
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "token rejected");
        ServiceError::Unauthorized
    })
}

/// Exchange credentials for a token. `None` while authentication is off.
pub async fn login(
    ctx: &AppContext,
    req: &LoginRequest,
) -> Result<Option<LoginResponse>, ServiceError> {
    if !ctx.auth.enable {
        return Ok(None);
    }
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ServiceError::invalid("username and password are required"));
    }
    let mut conn = ctx.pool.acquire().await?;
    let user = repository::find::<User>(&mut conn, Scope::Active, &[Filter::eq("username", username)])
        .await?
        .filter(|user| verify_password(&req.password, &user.password_hash))
        .ok_or(ServiceError::InvalidCredentials)?;
    let token = generate_token(&user, &ctx.auth)?;
    info!(user_id = user.id, "user logged in");
    Ok(Some(LoginResponse {
        token,
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}

/// Change the username and password of account `user_id`.
pub async fn update(
    ctx: &AppContext,
    user_id: i64,
    req: &UpdateUserRequest,
) -> Result<(), ServiceError> {
    if !ctx.auth.enable {
        return Ok(());
    }
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ServiceError::invalid("username and password are required"));
    }
    let password_hash = hash_password(&req.password)?;
    let mut tx = ctx.pool.begin().await?;
    repository::get::<User>(&mut tx, user_id).await?;
    ensure_unique::<User>(&mut tx, vec![Filter::eq("username", username)], Some(user_id)).await?;
    repository::update::<User>(
        &mut tx,
        &[Filter::eq("id", user_id)],
        &[
            ("username", username.into()),
            ("password_hash", password_hash.into()),
        ],
    )
    .await?;
    tx.commit().await?;
    info!(user_id, "user credentials updated");
    Ok(())
}
