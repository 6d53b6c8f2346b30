use std::path::Path;

use log::info;
use rusqlite::Connection;

use crate::shared::database::migrations;
use crate::shared::errors::{AppError, AppResult};

/// データベース接続を初期化し、マイグレーションを実行する
///
/// # 引数
/// * `path` - データベースファイルのパス
///
/// # 戻り値
/// データベース接続、または失敗時はエラー
pub fn initialize_database(path: &Path) -> AppResult<Connection> {
    let conn = Connection::open(path)
        .map_err(|e| AppError::Database(format!("データベースのオープンに失敗しました: {e}")))?;

    migrations::run_migrations(&conn)?;

    info!("データベースの初期化が完了しました: {}", path.display());
    Ok(conn)
}

/// インメモリデータベース接続を初期化する（テスト・一時利用向け）
///
/// # 戻り値
/// マイグレーション適用済みの接続、または失敗時はエラー
pub fn initialize_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| AppError::Database(format!("データベースのオープンに失敗しました: {e}")))?;

    migrations::run_migrations(&conn)?;
    Ok(conn)
}
