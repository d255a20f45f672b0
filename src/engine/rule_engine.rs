// ==========================================
// 轧线排程校验系统 - 排程规则引擎
// ==========================================
// 职责: 按 (日期 → 产线 → 排程项) 文档顺序单遍扫描, 首错即止
// 红线: 严格顺序处理, 不得重排或并行 (规则依赖 "上一项" 状态)
// 红线: 扫描状态随每次调用新建, 重复调用互不影响
// ==========================================

use crate::config::PlantConfig;
use crate::domain::order::OrderCatalog;
use crate::domain::schedule::{ScheduleEntry, SubmissionDoc};
use crate::domain::types::{Composition, DateWindow, EntryKind, ProductType, TuneKind};
use crate::engine::date_range::DateRangeChecker;
use crate::engine::error::{ValidationError, ValidationResult, Verdict};
use crate::engine::line_state::LineState;
use crate::engine::quantity::QuantityReconciler;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// 排程项必备键
const ENTRY_KEYS: [&str; 4] = ["order_code", "product_code", "hours", "mfg_width"];

// ==========================================
// ScheduleRuleEngine - 排程规则引擎
// ==========================================
pub struct ScheduleRuleEngine<'a> {
    catalog: &'a OrderCatalog,
    submission: &'a SubmissionDoc,
    config: &'a PlantConfig,
    window: DateWindow,
}

impl<'a> ScheduleRuleEngine<'a> {
    pub fn new(
        catalog: &'a OrderCatalog,
        submission: &'a SubmissionDoc,
        config: &'a PlantConfig,
        window: DateWindow,
    ) -> Self {
        Self {
            catalog,
            submission,
            config,
            window,
        }
    }

    /// 日期检查 (独立前置遍历, 不读取条目级数据)
    pub fn validate_dates(&self) -> Verdict {
        DateRangeChecker::new(self.window)
            .check(self.submission.date_keys())
            .into()
    }

    /// 排程规则检查 (单遍扫描 + 收尾产量对账)
    pub fn check_valid_schedule(&self) -> Verdict {
        self.run_schedule_pass().into()
    }

    fn run_schedule_pass(&self) -> ValidationResult<()> {
        // 扫描状态: 每次调用新建, 跨日持续, 不跨调用残留
        let mut line_states: HashMap<&str, LineState> = self
            .config
            .valid_lines
            .iter()
            .map(|line| {
                let initial = self
                    .config
                    .initial_type(line)
                    .unwrap_or(ProductType::Plate);
                (line.as_str(), LineState::new(initial))
            })
            .collect();
        let mut reconciler = QuantityReconciler::new(self.config.quantity_per_hour);

        for (date, lines) in self.submission.iter_days() {
            let prod_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                ValidationError::DateFormat {
                    date: date.to_string(),
                }
            })?;

            tracing::debug!("校验排程日 {} ({} 条产线)", date, lines.len());

            let mut seen_lines: HashSet<&str> = HashSet::new();
            let mut open_lines: HashSet<&str> = HashSet::new();

            for (line, line_value) in lines {
                seen_lines.insert(line.as_str());

                // 产线编号须在配置集合内
                if !self.config.is_valid_line(line) {
                    return Err(ValidationError::InvalidLine {
                        date: date.to_string(),
                        line: line.clone(),
                    });
                }

                // 排程序列须为非空列表
                let entries =
                    line_value
                        .as_array()
                        .ok_or_else(|| ValidationError::FieldType {
                            date: date.to_string(),
                            line: line.clone(),
                            field: "排程序列".to_string(),
                            expected: "列表".to_string(),
                        })?;
                if entries.is_empty() {
                    return Err(ValidationError::EmptySchedule {
                        date: date.to_string(),
                        line: line.clone(),
                    });
                }

                let state =
                    line_states
                        .get_mut(line.as_str())
                        .ok_or_else(|| ValidationError::InvalidLine {
                            date: date.to_string(),
                            line: line.clone(),
                        })?;

                let mut day_hours: u64 = 0;
                for raw_entry in entries {
                    let entry = Self::parse_entry(date, line, raw_entry)?;

                    // 开机产线 = 当日存在非 stop 排程项的产线 (调机也算开机)
                    let kind = EntryKind::of(&entry.order_code);
                    if kind != EntryKind::Stop {
                        open_lines.insert(line.as_str());
                    }

                    match kind {
                        EntryKind::Production => self.check_production_entry(
                            date,
                            line,
                            prod_date,
                            &entry,
                            state,
                            &mut reconciler,
                        )?,
                        EntryKind::Tune(tune) => {
                            Self::check_tune_entry(date, line, &entry, tune, state)?
                        }
                        EntryKind::Stop => state.record_stop(),
                    }

                    day_hours += u64::from(entry.hours);
                }

                // 每 (日, 产线) 总时数须恰为 24
                if day_hours != u64::from(self.config.daily_hours) {
                    return Err(ValidationError::DailyHours {
                        date: date.to_string(),
                        line: line.clone(),
                        hours: day_hours,
                    });
                }
            }

            // 每日须排入全部产线 (停机产线也须整日 stop)
            if self
                .config
                .valid_lines
                .iter()
                .any(|required| !seen_lines.contains(required.as_str()))
            {
                return Err(ValidationError::LineCoverage {
                    date: date.to_string(),
                });
            }

            // 开机产线数须在配置区间内
            let open_count = open_lines.len();
            if open_count < self.config.min_open_lines || open_count > self.config.max_open_lines {
                return Err(ValidationError::OpenLineCount {
                    date: date.to_string(),
                    count: open_count,
                    min: self.config.min_open_lines,
                    max: self.config.max_open_lines,
                });
            }
        }

        // 收尾: 订单覆盖与产量对账
        reconciler.reconcile(self.catalog)
    }

    /// 结构检查: 键集恰为四键, 代码为字符串, 时数/幅宽为非负整数
    fn parse_entry(date: &str, line: &str, raw: &Value) -> ValidationResult<ScheduleEntry> {
        let obj = raw.as_object().ok_or_else(|| ValidationError::Schema {
            date: date.to_string(),
            line: line.to_string(),
        })?;

        if obj.len() != ENTRY_KEYS.len() || !ENTRY_KEYS.iter().all(|k| obj.contains_key(*k)) {
            return Err(ValidationError::Schema {
                date: date.to_string(),
                line: line.to_string(),
            });
        }

        let as_str = |field: &str| -> ValidationResult<String> {
            obj[field]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::FieldType {
                    date: date.to_string(),
                    line: line.to_string(),
                    field: field.to_string(),
                    expected: "字符串".to_string(),
                })
        };

        let order_code = as_str("order_code")?;
        let product_code = as_str("product_code")?;
        let hours = Self::parse_entry_int(date, line, &order_code, "hours", &obj["hours"])?;
        let mfg_width =
            Self::parse_entry_int(date, line, &order_code, "mfg_width", &obj["mfg_width"])?;

        Ok(ScheduleEntry {
            order_code,
            product_code,
            hours,
            mfg_width,
        })
    }

    fn parse_entry_int(
        date: &str,
        line: &str,
        order_code: &str,
        field: &str,
        value: &Value,
    ) -> ValidationResult<u32> {
        let n = value.as_i64().ok_or_else(|| ValidationError::FieldType {
            date: date.to_string(),
            line: line.to_string(),
            field: field.to_string(),
            expected: "整数".to_string(),
        })?;
        if n < 0 {
            return Err(ValidationError::NegativeValue {
                date: date.to_string(),
                line: line.to_string(),
                order_code: order_code.to_string(),
                field: field.to_string(),
            });
        }
        u32::try_from(n).map_err(|_| ValidationError::FieldType {
            date: date.to_string(),
            line: line.to_string(),
            field: field.to_string(),
            expected: "非负整数".to_string(),
        })
    }

    /// 调机排程项检查
    ///
    /// # 规则 (按序短路)
    /// 1. product_code 与调机代码一致
    /// 2. 两种调机不可紧邻衔接
    /// 3. 单条时数不超过档位上限 (tune_8: 8 / tune_48: 24)
    /// 4. 过程累计不超过档位上限 (tune_8: 8 / tune_48: 48)
    fn check_tune_entry(
        date: &str,
        line: &str,
        entry: &ScheduleEntry,
        tune: TuneKind,
        state: &mut LineState,
    ) -> ValidationResult<()> {
        // 规则 1: product_code 一致
        if entry.product_code != tune.code() {
            return Err(ValidationError::ProductCodeMismatch {
                date: date.to_string(),
                line: line.to_string(),
                order_code: entry.order_code.clone(),
            });
        }

        // 规则 2: 不可紧接另一种调机
        if state.previous_code() == Some(tune.opposite().code()) {
            return Err(ValidationError::TuneSequence {
                date: date.to_string(),
                line: line.to_string(),
                prev_code: tune.opposite().code().to_string(),
                code: tune.code().to_string(),
            });
        }

        // 规则 3: 单条时数上限
        if entry.hours > tune.entry_hour_cap() {
            return Err(ValidationError::TuneOverflow {
                date: date.to_string(),
                line: line.to_string(),
                code: tune.code().to_string(),
                hours: entry.hours,
                limit: tune.entry_hour_cap(),
            });
        }

        // 规则 4: 过程累计上限
        let total = state.record_tune(tune, entry.hours);
        if total > tune.episode_hour_cap() {
            return Err(ValidationError::TuneOverflow {
                date: date.to_string(),
                line: line.to_string(),
                code: tune.code().to_string(),
                hours: total,
                limit: tune.episode_hour_cap(),
            });
        }

        Ok(())
    }

    /// 普通订单排程项检查
    ///
    /// # 规则 (按序短路)
    /// 1. 订单存在于目录
    /// 2. 开机前须调机 (产线首项或紧随 stop 均不可直接生产)
    /// 3. product_code 与目录一致
    /// 4. 排程日期落在订单交期区间
    /// 5. MS 材质仅允许 C1 产线
    /// 6. 含 K 标记的产品仅允许 K 线
    /// 7. 幅宽约束 (产线上限 / 类型裕量)
    /// 8. 产品类型变更须紧随恰好 48 小时的 tune_48
    /// 9. 成分切换至 0% 须紧随恰好 8 小时的 tune_8 (同时变更类型时为 tune_48/48)
    /// 10. 制造幅宽变更须紧随同档位调机
    fn check_production_entry(
        &self,
        date: &str,
        line: &str,
        prod_date: NaiveDate,
        entry: &ScheduleEntry,
        state: &mut LineState,
        reconciler: &mut QuantityReconciler,
    ) -> ValidationResult<()> {
        let order_code = entry.order_code.as_str();
        // 违规上下文 (日期, 产线, 订单号)
        let at = || (date.to_string(), line.to_string(), order_code.to_string());

        // 规则 1: 订单存在
        let order = self.catalog.get(order_code).ok_or_else(|| {
            let (date, line, order_code) = at();
            ValidationError::UnknownOrder {
                date,
                line,
                order_code,
            }
        })?;

        // 规则 2: 开机前须调机
        if matches!(state.previous_code(), None | Some("stop")) {
            let (date, line, order_code) = at();
            return Err(ValidationError::MissingTune {
                date,
                line,
                order_code,
            });
        }

        // 规则 3: product_code 与目录一致
        if order.product_code != entry.product_code {
            let (date, line, order_code) = at();
            return Err(ValidationError::ProductCodeMismatch {
                date,
                line,
                order_code,
            });
        }

        // 生产即终结当前调机过程, 读取并清零累计
        let tune_hours = state.take_tune_hours();

        // 规则 4: 交期区间
        if !(order.not_before <= prod_date && prod_date <= order.not_after) {
            let (date, line, order_code) = at();
            return Err(ValidationError::ScheduleWindow {
                date,
                line,
                order_code,
                not_before: order.not_before,
                not_after: order.not_after,
            });
        }

        // 规则 5: MS 材质仅 C1
        if order.material == "MS" && line != "C1" {
            let (date, line, order_code) = at();
            return Err(ValidationError::MaterialLine {
                date,
                line,
                order_code,
            });
        }

        // 规则 6: K 标记产品仅 K 线
        if entry.product_code.contains('K') && !self.config.is_k_line(line) {
            let (date, line, order_code) = at();
            return Err(ValidationError::KLine {
                date,
                line,
                order_code,
            });
        }

        // 规则 7: 幅宽约束
        let limit = self
            .config
            .width_limit(line, order.product_type)
            .ok_or_else(|| {
                let (date, line, order_code) = at();
                ValidationError::TypeLineMismatch {
                    date,
                    line,
                    order_code,
                    product_type: order.product_type.to_string(),
                }
            })?;
        if entry.mfg_width > limit.max_mfg_width {
            let (date, line, order_code) = at();
            return Err(ValidationError::WidthConstraint {
                date,
                line,
                order_code,
                detail: "\"mfg_width\" 超出产线上限".to_string(),
            });
        }
        if order.width > limit.max_width {
            let (date, line, order_code) = at();
            return Err(ValidationError::WidthConstraint {
                date,
                line,
                order_code,
                detail: "\"width\" 超出产线上限".to_string(),
            });
        }
        let margin = order.product_type.min_mfg_margin();
        if entry.mfg_width < order.width + margin {
            let (date, line, order_code) = at();
            return Err(ValidationError::WidthConstraint {
                date,
                line,
                order_code,
                detail: format!(
                    "\"mfg_width\" 应比 \"width\" 至少宽 {}mm（type \"{}\"）",
                    margin, order.product_type
                ),
            });
        }

        // 规则 8: 产品类型变更
        let type_change = state.previous_type() != order.product_type;
        if type_change
            && (state.previous_code() != Some(TuneKind::Tune48.code())
                || tune_hours != TuneKind::Tune48.episode_hour_cap())
        {
            let (date, line, order_code) = at();
            return Err(ValidationError::TypeChangeTune {
                date,
                line,
                order_code,
            });
        }

        // 类型变更时须 tune_48/48h, 否则 tune_8/8h
        let required = if type_change {
            TuneKind::Tune48
        } else {
            TuneKind::Tune8
        };
        let required_hours = required.episode_hour_cap();
        let tuned_as_required =
            state.previous_code() == Some(required.code()) && tune_hours == required_hours;

        // 规则 9: 成分切换至 0%
        if let Some(prev_comp) = state.previous_composition() {
            if prev_comp != Composition::Zero
                && order.composition == Composition::Zero
                && !tuned_as_required
            {
                let (date, line, order_code) = at();
                return Err(ValidationError::CompositionTune {
                    date,
                    line,
                    order_code,
                    required_code: required.code().to_string(),
                    required_hours,
                });
            }
        }

        // 规则 10: 制造幅宽变更
        if let Some(prev_width) = state.previous_mfg_width() {
            if entry.mfg_width != prev_width && !tuned_as_required {
                let (date, line, order_code) = at();
                return Err(ValidationError::WidthChangeTune {
                    date,
                    line,
                    order_code,
                    required_code: required.code().to_string(),
                    required_hours,
                });
            }
        }

        // 产量累计与状态推进
        reconciler.record(order_code, entry.hours);
        state.record_production(order_code, order.product_type, order.composition, entry.mfg_width);

        Ok(())
    }
}
