//! Service Broker 生命周期处理模块

pub mod binding;
pub mod catalog;
pub mod instance;
