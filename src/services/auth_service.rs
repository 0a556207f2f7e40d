use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::database::StoreError;
use crate::middleware::auth::Role;
use crate::models::{Admin, User};
use crate::state::AppState;
use crate::utils::AppError;

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Credentials taken from the `username` / `password` request headers
#[derive(Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

fn account_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::User => "User",
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    web::block(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing was cancelled: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let outcome = web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification was cancelled: {}", e)))?;

    match outcome {
        Ok(valid) => Ok(valid),
        Err(e) => {
            // Records written before hashing was introduced land here
            log::warn!("⚠️  Stored password is not a bcrypt hash: {}", e);
            Ok(false)
        }
    }
}

/// Creates an account of the given role and returns a fresh token for it.
///
/// The insert is conditional on the username being free, so two concurrent
/// signups for the same name cannot both succeed.
pub async fn signup(
    state: &AppState,
    role: Role,
    request: SignupRequest,
) -> Result<AuthResponse, AppError> {
    let label = account_label(role);
    let SignupRequest { username, password } = request;
    let password_hash = hash_password(password, state.bcrypt_cost).await?;

    let inserted = match role {
        Role::Admin => {
            state
                .store
                .insert_admin(Admin::new(username.clone(), password_hash))
                .await
        }
        Role::User => {
            state
                .store
                .insert_user(User::new(username.clone(), password_hash))
                .await
        }
    };

    match inserted {
        Ok(()) => {}
        Err(StoreError::AlreadyExists(_)) => {
            return Err(AppError::Conflict(format!("{} already exists", label)));
        }
        Err(e) => return Err(e.into()),
    }

    let token = state
        .tokens
        .issue(&username, role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        message: format!("{} created successfully", label),
        token,
    })
}

pub async fn login(
    state: &AppState,
    role: Role,
    request: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let stored_hash = match role {
        Role::Admin => state
            .store
            .find_admin(&request.username)
            .await?
            .map(|admin| admin.password),
        Role::User => state
            .store
            .find_user(&request.username)
            .await?
            .map(|user| user.password),
    };

    let stored_hash = stored_hash.ok_or(AppError::InvalidCredentials)?;

    if !verify_password(request.password, stored_hash).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(&request.username, role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        message: "Logged in successfully".to_string(),
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::services::token_service::TokenService;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            store: Arc::new(MemoryStore::new()),
            tokens: TokenService::new("test-secret", 3600),
            bcrypt_cost: 4,
        }
    }

    fn signup_request(username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[actix_web::test]
    async fn test_signup_stores_hash_not_plaintext() {
        let state = state();
        signup(&state, Role::User, signup_request("alice", "pw1")).await.unwrap();

        let user = state.store.find_user("alice").await.unwrap().unwrap();
        assert_ne!(user.password, "pw1");
        assert!(bcrypt::verify("pw1", &user.password).unwrap());
    }

    #[actix_web::test]
    async fn test_second_signup_conflicts() {
        let state = state();
        let first = signup(&state, Role::Admin, signup_request("bob", "pw2")).await.unwrap();
        assert_eq!(first.message, "Admin created successfully");

        let second = signup(&state, Role::Admin, signup_request("bob", "other")).await;
        assert!(matches!(second, Err(AppError::Conflict(msg)) if msg == "Admin already exists"));
    }

    #[actix_web::test]
    async fn test_admin_and_user_namespaces_are_separate() {
        let state = state();
        signup(&state, Role::Admin, signup_request("carol", "pw")).await.unwrap();
        assert!(signup(&state, Role::User, signup_request("carol", "pw")).await.is_ok());
    }

    #[actix_web::test]
    async fn test_login_checks_password() {
        let state = state();
        signup(&state, Role::User, signup_request("alice", "pw1")).await.unwrap();

        let ok = login(
            &state,
            Role::User,
            LoginRequest { username: "alice".into(), password: "pw1".into() },
        )
        .await
        .unwrap();
        let claims = state.tokens.verify(&ok.token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::User);

        let bad = login(
            &state,
            Role::User,
            LoginRequest { username: "alice".into(), password: "nope".into() },
        )
        .await;
        assert!(matches!(bad, Err(AppError::InvalidCredentials)));
    }

    #[actix_web::test]
    async fn test_login_unknown_account() {
        let state = state();
        signup(&state, Role::User, signup_request("alice", "pw1")).await.unwrap();

        // A learner account cannot log in as an administrator
        let res = login(
            &state,
            Role::Admin,
            LoginRequest { username: "alice".into(), password: "pw1".into() },
        )
        .await;
        assert!(matches!(res, Err(AppError::InvalidCredentials)));
    }

    #[actix_web::test]
    async fn test_plaintext_record_cannot_log_in() {
        let state = state();
        state
            .store
            .insert_user(User::new("legacy".into(), "pw".into()))
            .await
            .unwrap();

        let res = login(
            &state,
            Role::User,
            LoginRequest { username: "legacy".into(), password: "pw".into() },
        )
        .await;
        assert!(matches!(res, Err(AppError::InvalidCredentials)));
    }
}
