//! 核心层：与具体业务无关的错误类型和中间件

pub mod error;
pub mod middleware;
