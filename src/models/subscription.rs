use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// 課金プロバイダ（対応プロバイダの閉集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    /// 対応しているすべてのプロバイダ
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Apple];

    /// データベース格納用の正規化されたプロバイダ名
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "GOOGLE",
            Provider::Apple => "APPLE",
        }
    }

    /// プロバイダ名からプロバイダを検索する（大文字小文字を区別しない）
    ///
    /// # 引数
    /// * `name` - プロバイダ名（自由入力）
    ///
    /// # 戻り値
    /// 一致したプロバイダ、一致しない場合はNone
    pub fn find_by_name_opt(name: &str) -> Option<Provider> {
        Provider::ALL
            .iter()
            .copied()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(name))
    }

    /// プロバイダ名からプロバイダを検索する（未対応の名前はエラー）
    ///
    /// 入力が検証済みであることを呼び出し側が保証する場合に使用する。
    /// ここでの解決失敗はユーザー入力の問題ではなく呼び出し側の契約違反。
    ///
    /// # 引数
    /// * `name` - プロバイダ名
    ///
    /// # 戻り値
    /// 一致したプロバイダ、または未対応の名前の場合はエラー
    pub fn find_by_name(name: &str) -> AppResult<Provider> {
        Provider::find_by_name_opt(name)
            .ok_or_else(|| AppError::not_found(format!("プロバイダ「{name}」")))
    }
}

/// サブスクリプションの状態
///
/// CANCELEDとEXPIREDは終端状態であり、upsertによる更新でのみACTIVEに戻る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Canceled,
    Expired,
}

impl Status {
    /// データベース格納用の正規化された状態名
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Canceled => "CANCELED",
            Status::Expired => "EXPIRED",
        }
    }

    /// データベース格納値から状態を復元する
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "ACTIVE" => Some(Status::Active),
            "CANCELED" => Some(Status::Canceled),
            "EXPIRED" => Some(Status::Expired),
            _ => None,
        }
    }
}

/// サブスクリプションデータモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Subscription {
    /// 永続化時にデータベースが採番するID（未保存の間はNone）
    pub id: Option<i64>,
    pub user_id: i64,
    pub name: String,
    pub provider: Provider,
    pub expiration_date: DateTime<Utc>,
    pub status: Status,
}

/// サブスクリプション作成・更新リクエスト用DTO
///
/// 外部から受け取る生のリクエストであり、全フィールドがバリデーション前は
/// 未設定の可能性がある。バリデーションとマッピングで一度だけ消費される。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionDto {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl CreateSubscriptionDto {
    /// JSON文字列からDTOを生成する
    ///
    /// # 引数
    /// * `json` - リクエストのJSON表現
    ///
    /// # 戻り値
    /// DTO、またはJSON解析失敗時はエラー
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
