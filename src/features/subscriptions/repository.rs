use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::models::{Provider, Status, Subscription};
use crate::shared::errors::{AppError, AppResult};

/// サブスクリプション永続化のコラボレータ契約
///
/// サービスはこのトレイトにのみ依存する。挿入時のID採番と
/// トランザクション安全性は実装側の責務。
pub trait SubscriptionRepository {
    /// すべてのサブスクリプションを取得する
    fn find_all(&self) -> AppResult<Vec<Subscription>>;

    /// IDでサブスクリプションを取得する
    fn find_by_id(&self, id: i64) -> AppResult<Option<Subscription>>;

    /// ユーザーIDでサブスクリプション一覧を取得する
    fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Subscription>>;

    /// サブスクリプションを新規保存し、採番されたIDを持つエンティティを返す
    fn insert(&self, subscription: &Subscription) -> AppResult<Subscription>;

    /// 既存のサブスクリプションを更新し、更新後のエンティティを返す
    fn update(&self, subscription: &Subscription) -> AppResult<Subscription>;

    /// ID未採番なら挿入、採番済みなら更新する
    fn upsert(&self, subscription: &Subscription) -> AppResult<Subscription>;

    /// サブスクリプションを削除する（行が存在して削除された場合のみtrue）
    fn delete(&self, id: i64) -> AppResult<bool>;
}

/// SQLiteによるサブスクリプションリポジトリ実装
pub struct SqliteSubscriptionRepository {
    conn: Connection,
}

const SELECT_COLUMNS: &str = "id, user_id, name, provider, expiration_date, status";

impl SqliteSubscriptionRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// 行をエンティティへ変換する
    fn map_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
        let provider_value: String = row.get(3)?;
        let provider = Provider::find_by_name_opt(&provider_value).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("不明なプロバイダ値: {provider_value}").into(),
            )
        })?;

        let expiration_value: String = row.get(4)?;
        let expiration_date = DateTime::parse_from_rfc3339(&expiration_value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    Type::Text,
                    format!("不正な日時値: {expiration_value} ({e})").into(),
                )
            })?;

        let status_value: String = row.get(5)?;
        let status = Status::parse(&status_value).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("不明なステータス値: {status_value}").into(),
            )
        })?;

        Ok(Subscription {
            id: Some(row.get(0)?),
            user_id: row.get(1)?,
            name: row.get(2)?,
            provider,
            expiration_date,
            status,
        })
    }

    /// IDでエンティティを取得する（存在しない場合はエラー）
    fn fetch(&self, id: i64) -> AppResult<Subscription> {
        self.find_by_id(id)?
            .ok_or_else(|| AppError::Database(format!("ID {id} の行の再読込に失敗しました")))
    }
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    fn find_all(&self) -> AppResult<Vec<Subscription>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SELECT_COLUMNS} FROM subscriptions ORDER BY id"))?;
        let subscriptions = stmt.query_map([], Self::map_row)?;

        subscriptions
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Subscription>> {
        let result = self.conn.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM subscriptions WHERE id = ?1"),
            params![id],
            Self::map_row,
        );

        match result {
            Ok(subscription) => Ok(Some(subscription)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Subscription>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM subscriptions WHERE user_id = ?1 ORDER BY id"
        ))?;
        let subscriptions = stmt.query_map(params![user_id], Self::map_row)?;

        subscriptions
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)
    }

    fn insert(&self, subscription: &Subscription) -> AppResult<Subscription> {
        self.conn.execute(
            "INSERT INTO subscriptions (user_id, name, provider, expiration_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                subscription.user_id,
                subscription.name,
                subscription.provider.as_str(),
                subscription.expiration_date.to_rfc3339(),
                subscription.status.as_str(),
            ],
        )?;

        // 採番されたIDで再読込する
        let id = self.conn.last_insert_rowid();
        self.fetch(id)
    }

    fn update(&self, subscription: &Subscription) -> AppResult<Subscription> {
        let id = subscription.id.ok_or_else(|| {
            AppError::invalid_argument("IDが未採番のサブスクリプションは更新できません")
        })?;

        let affected = self.conn.execute(
            "UPDATE subscriptions
             SET user_id = ?1, name = ?2, provider = ?3, expiration_date = ?4, status = ?5
             WHERE id = ?6",
            params![
                subscription.user_id,
                subscription.name,
                subscription.provider.as_str(),
                subscription.expiration_date.to_rfc3339(),
                subscription.status.as_str(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(AppError::not_found(format!("ID {id} のサブスクリプション")));
        }

        self.fetch(id)
    }

    fn upsert(&self, subscription: &Subscription) -> AppResult<Subscription> {
        match subscription.id {
            None => self.insert(subscription),
            Some(_) => self.update(subscription),
        }
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM subscriptions WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}
