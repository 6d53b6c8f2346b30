use std::fmt;

use serde::Serialize;

use crate::models::{CreateSubscriptionDto, Provider};

/// バリデーションエラー（コードとメッセージの不変ペア）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    code: i32,
    message: String,
}

impl Error {
    /// コードとメッセージからエラーを生成する
    pub fn of<S: Into<String>>(code: i32, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 1回のバリデーションで発生したエラーの集まり
///
/// 追加された順序を保持する（重複も許可）。バリデーション呼び出しごとに
/// 新しいインスタンスを生成し、サービスが検査した後は破棄される。
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<Error>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを末尾に追加する
    pub fn add(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// 追加された順序でエラー一覧を返す
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// 1件以上のエラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.code, error.message))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{joined}")
    }
}

/// サブスクリプション作成DTOのバリデーション
///
/// すべてのルールを評価し、違反を集約して返す（最初の違反で打ち切らない）。
/// ルールの評価順序は固定であり、エラー一覧の順序も実行ごとに安定する。
///
/// # 引数
/// * `dto` - サブスクリプション作成用DTO
///
/// # 戻り値
/// 集約されたバリデーション結果
pub fn validate(dto: &CreateSubscriptionDto) -> ValidationResult {
    let mut validation_result = ValidationResult::new();

    // バリデーション: userIdは必須
    if dto.user_id.is_none() {
        validation_result.add(Error::of(100, "userId is invalid"));
    }

    // バリデーション: nameは必須かつ空白のみは不可
    if dto
        .name
        .as_deref()
        .map_or(true, |name| name.trim().is_empty())
    {
        validation_result.add(Error::of(101, "name is invalid"));
    }

    // バリデーション: providerは必須かつ対応プロバイダに解決できること
    if dto
        .provider
        .as_deref()
        .and_then(Provider::find_by_name_opt)
        .is_none()
    {
        validation_result.add(Error::of(102, "provider is invalid"));
    }

    // バリデーション: expirationDateは必須
    if dto.expiration_date.is_none() {
        validation_result.add(Error::of(103, "expirationDate is invalid"));
    }

    validation_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quickcheck_macros::quickcheck;

    fn valid_dto() -> CreateSubscriptionDto {
        CreateSubscriptionDto {
            user_id: Some(123),
            name: Some("name".to_string()),
            provider: Some("GOOGLE".to_string()),
            expiration_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_validate_passes_for_valid_dto() {
        let actual_result = validate(&valid_dto());
        assert!(!actual_result.has_errors());
    }

    #[test]
    fn test_validate_invalid_user_id() {
        let dto = CreateSubscriptionDto {
            user_id: None,
            ..valid_dto()
        };

        let actual_result = validate(&dto);

        assert_eq!(actual_result.errors().len(), 1);
        let error = &actual_result.errors()[0];
        assert_eq!(error.code(), 100);
        assert_eq!(error.message(), "userId is invalid");
    }

    #[test]
    fn test_validate_invalid_name() {
        let dto = CreateSubscriptionDto {
            name: None,
            ..valid_dto()
        };

        let actual_result = validate(&dto);

        assert_eq!(actual_result.errors().len(), 1);
        let error = &actual_result.errors()[0];
        assert_eq!(error.code(), 101);
        assert_eq!(error.message(), "name is invalid");
    }

    #[test]
    fn test_validate_blank_name() {
        // 空白のみの名前も不正として扱う
        let dto = CreateSubscriptionDto {
            name: Some("   ".to_string()),
            ..valid_dto()
        };

        let actual_result = validate(&dto);

        assert_eq!(actual_result.errors().len(), 1);
        assert_eq!(actual_result.errors()[0].code(), 101);
    }

    #[test]
    fn test_validate_invalid_provider() {
        let dto = CreateSubscriptionDto {
            provider: None,
            ..valid_dto()
        };

        let actual_result = validate(&dto);

        assert_eq!(actual_result.errors().len(), 1);
        let error = &actual_result.errors()[0];
        assert_eq!(error.code(), 102);
        assert_eq!(error.message(), "provider is invalid");
    }

    #[test]
    fn test_validate_unsupported_provider() {
        // 未対応のプロバイダ名も解決できないため不正
        let dto = CreateSubscriptionDto {
            provider: Some("AMAZON".to_string()),
            ..valid_dto()
        };

        let actual_result = validate(&dto);

        assert_eq!(actual_result.errors().len(), 1);
        assert_eq!(actual_result.errors()[0].code(), 102);
    }

    #[test]
    fn test_validate_lowercase_provider_passes() {
        // プロバイダ名の解決は大文字小文字を区別しない
        let dto = CreateSubscriptionDto {
            provider: Some("google".to_string()),
            ..valid_dto()
        };

        assert!(!validate(&dto).has_errors());
    }

    #[test]
    fn test_validate_invalid_expiration_date() {
        let dto = CreateSubscriptionDto {
            expiration_date: None,
            ..valid_dto()
        };

        let actual_result = validate(&dto);

        assert_eq!(actual_result.errors().len(), 1);
        let error = &actual_result.errors()[0];
        assert_eq!(error.code(), 103);
        assert_eq!(error.message(), "expirationDate is invalid");
    }

    #[test]
    fn test_validate_accumulates_all_errors() {
        // 複数の違反がすべて集約されることを確認（打ち切りなし）
        let dto = CreateSubscriptionDto {
            user_id: None,
            name: None,
            provider: None,
            expiration_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        };

        let actual_result = validate(&dto);

        let codes: Vec<i32> = actual_result
            .errors()
            .iter()
            .map(|error| error.code())
            .collect();
        assert_eq!(codes, vec![100, 101, 102]);
    }

    #[test]
    fn test_validate_all_fields_missing() {
        let dto = CreateSubscriptionDto {
            user_id: None,
            name: None,
            provider: None,
            expiration_date: None,
        };

        let actual_result = validate(&dto);

        let codes: Vec<i32> = actual_result
            .errors()
            .iter()
            .map(|error| error.code())
            .collect();
        assert_eq!(codes, vec![100, 101, 102, 103]);
    }

    #[quickcheck]
    fn prop_add_preserves_insertion_order(entries: Vec<(i32, String)>) -> bool {
        // addは挿入順を保持し、has_errorsは空でない場合にのみ真になる
        let mut validation_result = ValidationResult::new();
        for (code, message) in &entries {
            validation_result.add(Error::of(*code, message.clone()));
        }

        let order_preserved = validation_result
            .errors()
            .iter()
            .zip(&entries)
            .all(|(error, (code, message))| error.code() == *code && error.message() == message);

        order_preserved
            && validation_result.errors().len() == entries.len()
            && validation_result.has_errors() == !entries.is_empty()
    }

    #[test]
    fn test_validation_result_display() {
        let mut validation_result = ValidationResult::new();
        validation_result.add(Error::of(100, "userId is invalid"));
        validation_result.add(Error::of(103, "expirationDate is invalid"));

        assert_eq!(
            validation_result.to_string(),
            "100: userId is invalid, 103: expirationDate is invalid"
        );
    }
}
