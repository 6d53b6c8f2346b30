use std::sync::Arc;

use log::info;

use crate::features::subscriptions::repository::SubscriptionRepository;
use crate::features::subscriptions::{mapper, validator};
use crate::models::{CreateSubscriptionDto, Provider, Status, Subscription};
use crate::shared::clock::Clock;
use crate::shared::errors::{AppError, AppResult};

/// サブスクリプションのライフサイクルを管理するサービス
///
/// 状態遷移はACTIVE → CANCELED、ACTIVE → EXPIREDのみが定義されており、
/// 終端状態からはupsertによる更新（再ACTIVE化）以外の遷移は存在しない。
/// 呼び出し間で可変状態を持たないため、コラボレータが共有可能であれば
/// サービス自体も複数の呼び出し元で共有できる。
pub struct SubscriptionService<R: SubscriptionRepository, C: Clock> {
    repository: Arc<R>,
    clock: C,
}

impl<R: SubscriptionRepository, C: Clock> SubscriptionService<R, C> {
    pub fn new(repository: Arc<R>, clock: C) -> Self {
        Self { repository, clock }
    }

    /// サブスクリプションを作成または更新する
    ///
    /// 同一ユーザーの同一（プロバイダ, 名前）のサブスクリプションが既にあれば
    /// 有効期限を付け替えてACTIVEに戻す（解約済み・期限切れからの再開を含む）。
    /// なければDTOをマッピングして新規に作成する。
    ///
    /// # 引数
    /// * `dto` - サブスクリプション作成用DTO
    ///
    /// # 戻り値
    /// 永続化されたサブスクリプション、または失敗時はエラー
    pub fn upsert(&self, dto: &CreateSubscriptionDto) -> AppResult<Subscription> {
        // バリデーション（全違反を集約し、永続化には触れない）
        let validation_result = validator::validate(dto);
        if validation_result.has_errors() {
            return Err(AppError::Validation(validation_result));
        }

        // バリデーション通過後は必須フィールドがすべて揃っている
        let (Some(user_id), Some(name), Some(provider_name), Some(expiration_date)) = (
            dto.user_id,
            dto.name.as_deref(),
            dto.provider.as_deref(),
            dto.expiration_date,
        ) else {
            return Err(AppError::invalid_argument(
                "検証済みのリクエストに必須フィールドがありません",
            ));
        };
        let provider = Provider::find_by_name(provider_name)?;

        // 更新対象: 同一ユーザーの同一（プロバイダ, 名前）の既存サブスクリプション
        let existing = self
            .repository
            .find_by_user_id(user_id)?
            .into_iter()
            .find(|subscription| subscription.provider == provider && subscription.name == name);

        match existing {
            Some(mut subscription) => {
                subscription.expiration_date = expiration_date;
                subscription.status = Status::Active;

                let updated = self.repository.upsert(&subscription)?;
                info!(
                    "サブスクリプションを更新しました: id={:?}, user_id={user_id}, provider={}",
                    updated.id,
                    provider.as_str()
                );
                Ok(updated)
            }
            None => {
                let subscription = mapper::map(dto)?;

                let created = self.repository.upsert(&subscription)?;
                info!(
                    "サブスクリプションを新規作成しました: id={:?}, user_id={user_id}, provider={}",
                    created.id,
                    provider.as_str()
                );
                Ok(created)
            }
        }
    }

    /// サブスクリプションを解約する
    ///
    /// ACTIVEのサブスクリプションのみ解約できる。有効期限は変更しない。
    ///
    /// # 引数
    /// * `subscription_id` - サブスクリプションID
    ///
    /// # 戻り値
    /// 成功時はOk(())、失敗時はエラー
    pub fn cancel(&self, subscription_id: i64) -> AppResult<()> {
        let mut subscription = self
            .repository
            .find_by_id(subscription_id)?
            .ok_or_else(|| {
                AppError::invalid_argument(format!(
                    "ID {subscription_id} のサブスクリプションは存在しません"
                ))
            })?;

        ensure_active(&subscription)?;

        subscription.status = Status::Canceled;
        self.repository.update(&subscription)?;

        info!("サブスクリプションを解約しました: id={subscription_id}");
        Ok(())
    }

    /// サブスクリプションを期限切れにする
    ///
    /// ACTIVEのサブスクリプションのみ対象。有効期限は現在時刻に付け替える。
    ///
    /// # 引数
    /// * `subscription_id` - サブスクリプションID
    ///
    /// # 戻り値
    /// 成功時はOk(())、失敗時はエラー
    pub fn expire(&self, subscription_id: i64) -> AppResult<()> {
        let mut subscription = self
            .repository
            .find_by_id(subscription_id)?
            .ok_or_else(|| {
                AppError::invalid_argument(format!(
                    "ID {subscription_id} のサブスクリプションは存在しません"
                ))
            })?;

        ensure_active(&subscription)?;

        subscription.status = Status::Expired;
        subscription.expiration_date = self.clock.now();
        self.repository.update(&subscription)?;

        info!("サブスクリプションを期限切れにしました: id={subscription_id}");
        Ok(())
    }
}

/// ACTIVE以外の状態からの遷移を拒否する
fn ensure_active(subscription: &Subscription) -> AppResult<()> {
    match subscription.status {
        Status::Active => Ok(()),
        Status::Canceled | Status::Expired => Err(AppError::lifecycle(format!(
            "ACTIVEのサブスクリプションのみ状態を変更できます: 現在の状態={}",
            subscription.status.as_str()
        ))),
    }
}
