/// 共有データベース接続管理
pub mod connection;
pub mod migrations;

pub use connection::{initialize_database, initialize_in_memory};
pub use migrations::run_migrations;
