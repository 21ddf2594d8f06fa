//! 已开通实例实体
//!
//! 每个实例一行，partner_id 与 admin_secret 来自同一次注册响应，
//! 创建后不再更新

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "kaltura_instances")]
pub struct Model {
    /// 平台分配的服务实例 ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub partner_id: i32,
    pub admin_secret: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
