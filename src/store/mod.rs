//! 实例持久化层

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entity::{Instance, instance};
use crate::error::ApiError;

/// 已开通实例的持久化记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub id: String,
    pub partner_id: i32,
    pub admin_secret: String,
}

/// 实例仓库 Trait
///
/// 实现:
/// - 生产: `DatabaseInstanceStore` (`SeaORM`)
/// - 测试: 内存实现
#[async_trait]
pub trait InstanceStore: Send + Sync {
    /// 持久化新实例
    ///
    /// 相同 ID 的重复创建依赖主键约束拒绝，本层不做去重
    async fn create(&self, record: InstanceRecord) -> Result<(), ApiError>;

    /// 根据实例 ID 查找
    async fn find(&self, id: &str) -> Result<Option<InstanceRecord>, ApiError>;

    /// 删除实例，返回是否确实删除了记录
    async fn delete(&self, id: &str) -> Result<bool, ApiError>;
}

/// `SeaORM` 实现，单行操作，无跨行事务
pub struct DatabaseInstanceStore {
    db: DatabaseConnection,
}

impl DatabaseInstanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InstanceStore for DatabaseInstanceStore {
    async fn create(&self, record: InstanceRecord) -> Result<(), ApiError> {
        let model = instance::ActiveModel {
            id: Set(record.id),
            partner_id: Set(record.partner_id),
            admin_secret: Set(record.admin_secret),
            created_at: Set(Utc::now()),
        };

        model.insert(&self.db).await?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<InstanceRecord>, ApiError> {
        let found = Instance::find_by_id(id).one(&self.db).await?;

        Ok(found.map(|m| InstanceRecord {
            id: m.id,
            partner_id: m.partner_id,
            admin_secret: m.admin_secret,
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, ApiError> {
        let result = Instance::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! 单元测试用的内存实现

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryInstanceStore {
        records: Mutex<HashMap<String, InstanceRecord>>,
    }

    #[async_trait]
    impl InstanceStore for MemoryInstanceStore {
        async fn create(&self, record: InstanceRecord) -> Result<(), ApiError> {
            let mut records = self.records.lock().unwrap();
            if records.contains_key(&record.id) {
                // 模拟主键约束
                return Err(ApiError::Database(format!("唯一约束冲突: {}", record.id)));
            }
            records.insert(record.id.clone(), record);
            Ok(())
        }

        async fn find(&self, id: &str) -> Result<Option<InstanceRecord>, ApiError> {
            Ok(self.records.lock().unwrap().get(id).cloned())
        }

        async fn delete(&self, id: &str) -> Result<bool, ApiError> {
            Ok(self.records.lock().unwrap().remove(id).is_some())
        }
    }
}
