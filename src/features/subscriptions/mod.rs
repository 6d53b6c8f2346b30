/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプションのライフサイクル管理に関連する
/// すべての機能を提供します：
/// - 作成・更新リクエストのバリデーション（全違反の集約）
/// - 検証済みDTOからエンティティへのマッピング
/// - サブスクリプションの永続化（リポジトリ契約とSQLite実装）
/// - ライフサイクル状態遷移（upsert / cancel / expire）
// サブモジュールの宣言
pub mod mapper;
pub mod repository;
pub mod service;
pub mod validator;

// 公開インターフェース
pub use repository::{SqliteSubscriptionRepository, SubscriptionRepository};
pub use service::SubscriptionService;
pub use validator::{validate, Error, ValidationResult};
