// ==========================================
// 轧线排程校验系统 - 排程提交文档模型
// ==========================================
// 结构: 日期 → 产线 → 排程项序列 (保持文档顺序)
// 红线: 排程项保留原始 JSON, 条目级错误由引擎按日期/产线定位报出
// ==========================================

use serde_json::{Map, Value};

// ==========================================
// ScheduleEntry - 已通过结构检查的排程项
// ==========================================
// 由引擎逐项从原始 JSON 构造 (键集/类型/非负检查之后)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub order_code: String,   // 订单号或特殊代码 (stop / tune_8 / tune_48)
    pub product_code: String, // 产品代码
    pub hours: u32,           // 占用时数
    pub mfg_width: u32,       // 制造幅宽 (mm)
}

// ==========================================
// SubmissionDoc - 排程提交文档
// ==========================================
// 顶层与日层均为对象 (serde_json preserve_order 保持文档顺序);
// 产线层以下保留原始 Value
#[derive(Debug, Clone, Default)]
pub struct SubmissionDoc {
    days: Vec<(String, Map<String, Value>)>,
}

impl SubmissionDoc {
    /// 从顶层 JSON 值构建文档
    ///
    /// # 返回
    /// - Err(String): 顶层或某日期的值不是对象, 返回定位说明
    pub fn from_value(value: Value) -> Result<Self, String> {
        let top = match value {
            Value::Object(map) => map,
            _ => return Err("顶层应为 JSON 对象".to_string()),
        };

        let mut days = Vec::with_capacity(top.len());
        for (date, lines) in top {
            match lines {
                Value::Object(map) => days.push((date, map)),
                _ => return Err(format!("{}: 当日排程应为 JSON 对象", date)),
            }
        }
        Ok(Self { days })
    }

    /// 文档顺序的日期键
    pub fn date_keys(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|(k, _)| k.as_str())
    }

    /// 文档顺序的 (日期, 当日产线映射) 序列
    pub fn iter_days(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.days.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
