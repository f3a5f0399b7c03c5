//! Authentication service
//!
//! Handles sign-up, login and token refresh.

use tracing::{info, instrument, warn};
use typesense_common::auth::validate_password_strength;
use typesense_common::{AppError, TokenPair};
use typesense_core::{DomainError, User, UserId};
use uuid::Uuid;

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, SignupRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::users::{StoredUser, UserRecords};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;
        let name = User::validate_name(&request.name)?;
        let email = normalize_email(&request.email);

        let user_id = UserId::new(Uuid::new_v4().to_string())?;
        let records = UserRecords::new(self.ctx.store());

        // The email index entry is the uniqueness guard
        if !records.reserve_email(&email, &user_id).await? {
            warn!("Sign-up rejected: email already registered");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let stored = match self.ctx.password_service().hash(&request.password) {
            Ok(password_hash) => StoredUser {
                user: User::new(user_id.clone(), email.clone(), name),
                password_hash: Some(password_hash),
            },
            Err(e) => {
                records.release_email(&email).await?;
                return Err(e.into());
            }
        };

        if let Err(e) = records.save(&stored).await {
            records.release_email(&email).await?;
            return Err(e);
        }

        info!(user_id = %user_id, "User registered successfully");

        let tokens = self.ctx.jwt_service().generate_token_pair(&user_id)?;
        Ok(auth_response(tokens, &stored.user))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let records = UserRecords::new(self.ctx.store());
        let stored = records
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = stored.password_hash.as_deref().ok_or_else(|| {
            warn!(user_id = %stored.user.id, "Login failed: no password hash");
            ServiceError::App(AppError::InvalidCredentials)
        })?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&request.password, password_hash)
        {
            warn!(user_id = %stored.user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %stored.user.id, "User logged in successfully");

        let tokens = self.ctx.jwt_service().generate_token_pair(&stored.user.id)?;
        Ok(auth_response(tokens, &stored.user))
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let stored = UserRecords::new(self.ctx.store())
            .find(&user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh rejected: account no longer exists");
                ServiceError::App(AppError::InvalidToken)
            })?;

        let tokens = self.ctx.jwt_service().generate_token_pair(&user_id)?;
        info!(user_id = %user_id, "Tokens refreshed successfully");

        Ok(auth_response(tokens, &stored.user))
    }

    /// Validate an access token and return the user ID
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> ServiceResult<UserId> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn auth_response(tokens: TokenPair, user: &User) -> AuthResponse {
    AuthResponse::new(
        tokens.access_token,
        tokens.refresh_token,
        tokens.expires_in,
        UserResponse::from(user),
    )
}
