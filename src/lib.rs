pub mod features;
pub mod models;
pub mod shared;

use std::path::Path;
use std::sync::Arc;

use log::info;

pub use features::subscriptions::{
    SqliteSubscriptionRepository, SubscriptionRepository, SubscriptionService, ValidationResult,
};
pub use models::{CreateSubscriptionDto, Provider, Status, Subscription};
pub use shared::clock::{Clock, SystemClock};
pub use shared::config::EnvironmentConfig;
pub use shared::errors::{AppError, AppResult};

/// ログシステムを初期化する
///
/// LOG_LEVEL環境変数でログレベルを制御する（デフォルトはinfo）。
/// プロセス起動時に一度だけ呼び出すこと。
pub fn initialize_logging_system() {
    // 環境設定を取得
    let env_config = EnvironmentConfig::from_env();

    // ログレベルを設定
    let log_level = match env_config.log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    // env_loggerを初期化
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();

    info!(
        "ログシステムを初期化しました: level={}, environment={:?}",
        env_config.log_level, env_config.environment
    );
}

/// 既定の構成でサブスクリプションサービスを構築する
///
/// 環境設定に基づいたデータベースファイルを開き、マイグレーションを実行した上で
/// システム時計を持つサービスを返す。
///
/// # 戻り値
/// サブスクリプションサービス、または初期化失敗時はエラー
pub fn create_service() -> AppResult<SubscriptionService<SqliteSubscriptionRepository, SystemClock>>
{
    let env_config = EnvironmentConfig::load();

    info!(
        "サブスクリプションサービスを初期化しています... database={}",
        env_config.database_file
    );
    let conn = shared::database::initialize_database(Path::new(&env_config.database_file))?;
    let repository = Arc::new(SqliteSubscriptionRepository::new(conn));

    Ok(SubscriptionService::new(repository, SystemClock))
}
