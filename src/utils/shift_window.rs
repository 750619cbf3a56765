use crate::error::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};

/// 吧台视图的营业窗口: 门店本地时间当天 [open, close)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    offset: FixedOffset,
    open: NaiveTime,
    close: NaiveTime,
}

impl ShiftWindow {
    pub fn new(offset: FixedOffset, open: NaiveTime, close: NaiveTime) -> AppResult<Self> {
        if open >= close {
            return Err(AppError::ConfigError(format!(
                "Shift start {open} must be before shift end {close}"
            )));
        }
        Ok(Self {
            offset,
            open,
            close,
        })
    }

    /// `now` 所在本地日期的窗口边界 (UTC)
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let local_date = now.with_timezone(&self.offset).date_naive();
        let shift = TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        let to_utc = |time: NaiveTime| (local_date.and_time(time) - shift).and_utc();
        (to_utc(self.open), to_utc(self.close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(offset_hours: i32) -> ShiftWindow {
        ShiftWindow::new(
            FixedOffset::east_opt(offset_hours * 3600).unwrap(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_bounds_in_utc() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let (start, end) = window(0).bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_bounds_follow_local_date() {
        // 2026-10-19 20:00 UTC 已是本地 (UTC+7) 10-20 03:00
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap();
        let (start, end) = window(7).bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 19, 23, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 10, 20, 16, 30, 0).unwrap());
    }

    #[test]
    fn test_rejects_inverted_window() {
        let result = ShiftWindow::new(
            FixedOffset::east_opt(0).unwrap(),
            NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        );
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
