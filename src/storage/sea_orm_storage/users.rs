use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CFSystemError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建后台用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            incharge_category: Set(req.incharge_category.map(|c| c.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出所有后台用户
    pub async fn list_users_impl(&self) -> Result<Vec<User>> {
        let result = Users::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户密码
    pub async fn update_user_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.password_hash = Set(password_hash.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());
        model
            .update(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("更新用户密码失败: {e}")))?;

        Ok(true)
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();
        let mut model: ActiveModel = existing.into();
        model.last_login = Set(Some(now));
        model.updated_at = Set(now);
        model
            .update(&self.db)
            .await
            .map_err(|e| CFSystemError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(true)
    }
}
