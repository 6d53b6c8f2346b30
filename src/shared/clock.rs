use chrono::{DateTime, Utc};

/// 現在時刻を提供するコラボレータ
///
/// サービスには注入して使用する。テストでは固定時刻の実装に差し替えることで
/// 有効期限の決定的な検証ができる。
pub trait Clock {
    /// 現在時刻を返す
    fn now(&self) -> DateTime<Utc>;
}

/// システム時計
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻を返すテスト用時計
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
