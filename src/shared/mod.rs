/// 共有時刻コラボレータ
pub mod clock;

/// 共有設定管理
pub mod config;

/// 共有データベース接続管理
pub mod database;

/// 共有エラー型とエラーハンドリング
pub mod errors;

// 便利な再エクスポート
pub use clock::{Clock, SystemClock};
pub use config::{get_database_filename, get_environment, Environment, EnvironmentConfig};
pub use database::{initialize_database, initialize_in_memory};
pub use errors::{AppError, AppResult};
