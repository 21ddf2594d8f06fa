//! 应用状态

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::kaltura::{KalturaClient, PartnerRegistrar};
use crate::store::{DatabaseInstanceStore, InstanceStore};

/// 应用共享状态
///
/// store 与 registrar 均为注入的能力接口，测试可替换实现
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InstanceStore>,
    pub registrar: Arc<dyn PartnerRegistrar>,
}

impl AppState {
    /// 生产配置: `SeaORM` 仓库 + 真实 Kaltura 客户端
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_components(
            Arc::new(DatabaseInstanceStore::new(db)),
            Arc::new(KalturaClient::new()),
        )
    }

    pub fn with_components(
        store: Arc<dyn InstanceStore>,
        registrar: Arc<dyn PartnerRegistrar>,
    ) -> Self {
        Self { store, registrar }
    }
}
