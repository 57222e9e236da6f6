//! 应用层：按业务域组织的模块

pub mod users;
