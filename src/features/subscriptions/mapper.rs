use crate::models::{CreateSubscriptionDto, Provider, Status, Subscription};
use crate::shared::errors::{AppError, AppResult};

/// 検証済みDTOから新規サブスクリプションエンティティを生成する
///
/// 永続化やコラボレータ呼び出しを行わない純粋な変換処理。DTOはバリデーション
/// 済みであることが前提であり、ここでのフィールド欠落やプロバイダ解決の失敗は
/// ユーザー入力の問題ではなく呼び出し側の契約違反として扱う。
///
/// # 引数
/// * `dto` - 検証済みのサブスクリプション作成用DTO
///
/// # 戻り値
/// 未採番（id未設定）のACTIVEなサブスクリプション、または契約違反時はエラー
pub fn map(dto: &CreateSubscriptionDto) -> AppResult<Subscription> {
    let user_id = dto
        .user_id
        .ok_or_else(|| AppError::invalid_argument("userIdが未設定のDTOはマッピングできません"))?;

    let name = dto
        .name
        .clone()
        .ok_or_else(|| AppError::invalid_argument("nameが未設定のDTOはマッピングできません"))?;

    let provider_name = dto.provider.as_deref().ok_or_else(|| {
        AppError::invalid_argument("providerが未設定のDTOはマッピングできません")
    })?;
    let provider = Provider::find_by_name(provider_name)?;

    let expiration_date = dto.expiration_date.ok_or_else(|| {
        AppError::invalid_argument("expirationDateが未設定のDTOはマッピングできません")
    })?;

    Ok(Subscription {
        id: None,
        user_id,
        name,
        provider,
        expiration_date,
        // 新規作成されるサブスクリプションは常にACTIVEから始まる
        status: Status::Active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_map_returns_subscription() {
        let expiration_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let dto = CreateSubscriptionDto {
            user_id: Some(12),
            name: Some("name".to_string()),
            provider: Some("GOOGLE".to_string()),
            expiration_date: Some(expiration_date),
        };

        let actual_result = map(&dto).unwrap();

        assert_eq!(actual_result.id, None);
        assert_eq!(actual_result.user_id, 12);
        assert_eq!(actual_result.name, "name");
        assert_eq!(actual_result.provider, Provider::Google);
        assert_eq!(actual_result.expiration_date, expiration_date);
        assert_eq!(actual_result.status, Status::Active);
    }

    #[test]
    fn test_map_resolves_provider_case_insensitively() {
        let dto = CreateSubscriptionDto {
            user_id: Some(12),
            name: Some("name".to_string()),
            provider: Some("apple".to_string()),
            expiration_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        };

        let actual_result = map(&dto).unwrap();
        assert_eq!(actual_result.provider, Provider::Apple);
    }

    #[test]
    fn test_map_unknown_provider_is_contract_violation() {
        // 検証をすり抜けた未対応プロバイダは呼び出し側の契約違反
        let dto = CreateSubscriptionDto {
            user_id: Some(12),
            name: Some("name".to_string()),
            provider: Some("bogus".to_string()),
            expiration_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        };

        let actual_result = map(&dto);
        assert!(matches!(actual_result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_map_missing_field_is_contract_violation() {
        let dto = CreateSubscriptionDto {
            user_id: None,
            name: Some("name".to_string()),
            provider: Some("GOOGLE".to_string()),
            expiration_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        };

        let actual_result = map(&dto);
        assert!(matches!(actual_result, Err(AppError::InvalidArgument(_))));
    }
}
