//! 基础设施层：存储和日志

pub mod logger;
pub mod storage;
