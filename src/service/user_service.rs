use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    auth::{self, TokenIssuer},
    domain::*,
    error::{AppError, Result},
    notifications::{NotificationEvent, NotificationManager},
    repository::UserRepository,
};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenIssuer>,
    notifications: Arc<NotificationManager>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        tokens: Arc<TokenIssuer>,
        notifications: Arc<NotificationManager>,
    ) -> Self {
        Self { repo, tokens, notifications }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession> {
        // Check for duplicate email
        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            password_hash: auth::hash_password(&request.password).await?,
            role: request.role,
            membership_tier: request.membership_tier,
            active: true,
            created_at: now,
            updated_at: now,
        };

        // A concurrent registration can still win the race to the unique index
        let user = self.repo.create(user).await.map_err(|e| match e {
            AppError::Database(msg) if msg.contains("UNIQUE") => {
                AppError::Conflict("Email already registered".to_string())
            }
            _ => e,
        })?;

        tracing::info!("Registered user {} with role {}", user.id, user.role);

        self.notifications
            .dispatch(NotificationEvent::UserRegistered(user.clone()))
            .await;

        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthSession { token, user })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession> {
        let user = match self.repo.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login for unknown email");
                return Err(AppError::Unauthorized);
            }
        };

        if !auth::verify_password(&request.password, &user.password_hash).await? {
            tracing::debug!("Wrong password for user {}", user.id);
            return Err(AppError::Unauthorized);
        }

        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthSession { token, user })
    }
}
