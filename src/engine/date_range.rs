// ==========================================
// 轧线排程校验系统 - 日期区间检查
// ==========================================
// 职责: 日期键格式 / 区间 / 顺序 / 完整覆盖
// 红线: 不读取任何条目级数据
// ==========================================

use crate::domain::types::DateWindow;
use crate::engine::error::{ValidationError, ValidationResult};
use chrono::NaiveDate;
use std::collections::HashSet;

// ==========================================
// DateRangeChecker - 日期区间检查器
// ==========================================
pub struct DateRangeChecker {
    window: DateWindow,
}

impl DateRangeChecker {
    pub fn new(window: DateWindow) -> Self {
        Self { window }
    }

    /// 检查提交文档的日期键
    ///
    /// # 规则 (按序短路)
    /// 1. 每个键可按 YYYY-MM-DD 解析
    /// 2. 每个日期落在 [start, end] 区间内
    /// 3. 日期按文档顺序严格递增
    /// 4. 区间内每一天都出现在键集合中 (无缺口)
    pub fn check<'a>(&self, keys: impl Iterator<Item = &'a str>) -> ValidationResult<()> {
        let mut seen: HashSet<NaiveDate> = HashSet::new();
        let mut prev: Option<(NaiveDate, &str)> = None;

        for key in keys {
            // 规则 1: 格式
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|_| {
                ValidationError::DateFormat {
                    date: key.to_string(),
                }
            })?;

            // 规则 2: 区间
            if !self.window.contains(date) {
                return Err(ValidationError::DateRange {
                    date: key.to_string(),
                    start: self.window.start,
                    end: self.window.end,
                });
            }

            // 规则 3: 顺序
            if let Some((prev_date, prev_key)) = prev {
                if date < prev_date {
                    return Err(ValidationError::DateOrder {
                        date: key.to_string(),
                        prev: prev_key.to_string(),
                    });
                }
            }
            prev = Some((date, key));
            seen.insert(date);
        }

        // 规则 4: 覆盖
        for day in self.window.days() {
            if !seen.contains(&day) {
                return Err(ValidationError::DateCoverage { missing: day });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(start: &str, end: &str) -> DateRangeChecker {
        DateRangeChecker::new(DateWindow::parse(start, end).unwrap())
    }

    #[test]
    fn test_full_coverage_passes() {
        let c = checker("2019-07-01", "2019-07-03");
        let keys = ["2019-07-01", "2019-07-02", "2019-07-03"];
        assert!(c.check(keys.iter().copied()).is_ok());
    }

    #[test]
    fn test_bad_format() {
        let c = checker("2019-07-01", "2019-07-03");
        let keys = ["2019-07-01", "2019/07/02"];
        assert!(matches!(
            c.check(keys.iter().copied()),
            Err(ValidationError::DateFormat { date }) if date == "2019/07/02"
        ));
    }

    #[test]
    fn test_out_of_range() {
        let c = checker("2019-07-01", "2019-07-03");
        let keys = ["2019-07-01", "2019-07-04"];
        assert!(matches!(
            c.check(keys.iter().copied()),
            Err(ValidationError::DateRange { .. })
        ));
    }

    #[test]
    fn test_wrong_order() {
        let c = checker("2019-07-01", "2019-07-03");
        let keys = ["2019-07-02", "2019-07-01", "2019-07-03"];
        assert!(matches!(
            c.check(keys.iter().copied()),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_missing_day() {
        let c = checker("2019-07-01", "2019-07-03");
        let keys = ["2019-07-01", "2019-07-03"];
        assert!(matches!(
            c.check(keys.iter().copied()),
            Err(ValidationError::DateCoverage { missing })
                if missing == NaiveDate::from_ymd_opt(2019, 7, 2).unwrap()
        ));
    }

    #[test]
    fn test_empty_submission_fails_coverage() {
        let c = checker("2019-07-01", "2019-07-01");
        assert!(matches!(
            c.check(std::iter::empty()),
            Err(ValidationError::DateCoverage { .. })
        ));
    }
}
