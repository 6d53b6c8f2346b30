/// 共有設定管理
pub mod environment;

pub use environment::{get_database_filename, get_environment, Environment, EnvironmentConfig};
