//! 用户服务：注册、资料查询、管理员删除

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{
        password::PasswordHasher,
        permission::{require_permission, Action},
    },
    config::SecurityConfig,
    error::{AppError, Resource},
    models::user::{validate_username, Role, SignupUserRequest, User},
    repository::Repositories,
};

pub struct UserService {
    repos: Repositories,
    hasher: Arc<PasswordHasher>,
    policy: SecurityConfig,
}

impl UserService {
    pub fn new(repos: Repositories, hasher: Arc<PasswordHasher>, policy: SecurityConfig) -> Self {
        Self {
            repos,
            hasher,
            policy,
        }
    }

    /// 注册普通用户
    pub async fn sign_up(&self, req: SignupUserRequest) -> Result<User, AppError> {
        self.register(req, Role::NonAdmin).await
    }

    /// 以指定角色注册用户（管理员初始化等场景）
    pub async fn register(&self, mut req: SignupUserRequest, role: Role) -> Result<User, AppError> {
        req.user_name = req.normalized_username();
        req.email_address = req.normalized_email();

        req.validate()?;
        validate_username(&req.user_name)?;
        PasswordHasher::validate_password_policy(&req.password, &self.policy)?;

        let hashed = self.hasher.hash(&req.password)?;

        let user = User {
            id: Uuid::new_v4(),
            username: req.user_name,
            email: req.email_address,
            first_name: req.first_name,
            last_name: req.last_name,
            dob: req.dob,
            country: req.country,
            about_me: req.about_me,
            contact_number: req.contact_number,
            role: role.as_str().to_string(),
            password_hash: hashed.digest,
            salt: hashed.salt,
            created_at: Utc::now(),
        };

        // 用户名、邮箱唯一性由存储层约束保证
        let user = self.repos.users.create(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    /// 查询用户资料
    pub async fn get_profile(&self, actor: &User, user_id: Uuid) -> Result<User, AppError> {
        require_permission(actor, Action::ViewProfile)?;

        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    /// 管理员删除用户
    pub async fn delete_user(&self, actor: &User, user_id: Uuid) -> Result<Uuid, AppError> {
        require_permission(actor, Action::DeleteUser)?;

        if !self.repos.users.delete(user_id).await? {
            return Err(AppError::NotFound(Resource::User));
        }

        tracing::info!(user_id = %user_id, deleted_by = %actor.id, "User deleted");

        Ok(user_id)
    }
}
