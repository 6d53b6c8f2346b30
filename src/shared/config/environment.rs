use log::warn;
use once_cell::sync::Lazy;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

impl Environment {
    /// プロダクション環境かどうか
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    // 実行時環境変数を確認
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        return match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
    }

    // フォールバック: ビルド設定に基づく判定
    if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # 引数
/// * `env` - 実行環境
///
/// # 戻り値
/// データベースファイル名
///
/// # ファイル名の規則
/// - 開発環境: "dev_subscriptions.db"
/// - プロダクション環境: "subscriptions.db"
pub fn get_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_subscriptions.db",
        Environment::Production => "subscriptions.db",
    }
}

/// 環境変数から読み込んだアプリケーション設定
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: Environment,
    pub log_level: String,
    pub database_file: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// .envファイルがある場合は先に読み込む。DATABASE_FILEで
    /// データベースファイルの既定値を上書きできる。
    ///
    /// # 戻り値
    /// 読み込んだ設定
    pub fn from_env() -> Self {
        // 環境変数を読み込み（.envファイルがある場合）
        if dotenv::dotenv().is_err() {
            // .envファイルがない場合は無視（本番環境では環境変数が直接設定される）
            warn!(".envファイルが見つかりません。環境変数が直接設定されていることを確認してください。");
        }

        let environment = get_environment();
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let database_file = std::env::var("DATABASE_FILE")
            .unwrap_or_else(|_| get_database_filename(environment).to_string());

        Self {
            environment,
            log_level,
            database_file,
        }
    }

    /// プロセス全体で共有する設定を取得する（初回アクセス時に読み込む）
    pub fn load() -> &'static EnvironmentConfig {
        static CONFIG: Lazy<EnvironmentConfig> = Lazy::new(EnvironmentConfig::from_env);
        &CONFIG
    }
}
