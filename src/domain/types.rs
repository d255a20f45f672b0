// ==========================================
// 轧线排程校验系统 - 领域类型定义
// ==========================================
// 职责: 封闭集类型 (产品类型/成分/特殊代码) 与日期区间
// 红线: 规则常量 (调机上限/幅宽裕量) 随类型定义, 不散落引擎
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 产品类型 (Product Type)
// ==========================================
// 封闭集: plate / lenti
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Plate, // 平板
    Lenti, // 花纹板
}

impl ProductType {
    /// 从目录字符串解析产品类型
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim() {
            "plate" => Some(ProductType::Plate),
            "lenti" => Some(ProductType::Lenti),
            _ => None,
        }
    }

    /// mfg_width 相对 width 的最小裕量 (mm)
    ///
    /// # 规则
    /// - lenti: 至少 70mm
    /// - plate: 至少 50mm
    pub fn min_mfg_margin(&self) -> u32 {
        match self {
            ProductType::Plate => 50,
            ProductType::Lenti => 70,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Plate => write!(f, "plate"),
            ProductType::Lenti => write!(f, "lenti"),
        }
    }
}

// ==========================================
// 成分标签 (Composition)
// ==========================================
// 封闭集: 0% / 8% / 100%
// 规则关注点: 非 0% → 0% 的切换需要调机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Composition {
    #[serde(rename = "0%")]
    Zero,
    #[serde(rename = "8%")]
    Eight,
    #[serde(rename = "100%")]
    Hundred,
}

impl Composition {
    /// 从目录字符串解析成分标签
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "0%" => Some(Composition::Zero),
            "8%" => Some(Composition::Eight),
            "100%" => Some(Composition::Hundred),
            _ => None,
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composition::Zero => write!(f, "0%"),
            Composition::Eight => write!(f, "8%"),
            Composition::Hundred => write!(f, "100%"),
        }
    }
}

// ==========================================
// 调机种类 (Tune Kind)
// ==========================================
// tune_8: 同型换宽/成分切换前的短调机
// tune_48: 产品类型变更前的长调机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TuneKind {
    Tune8,
    Tune48,
}

impl TuneKind {
    /// 对应的 order_code / product_code 字面值
    pub fn code(&self) -> &'static str {
        match self {
            TuneKind::Tune8 => "tune_8",
            TuneKind::Tune48 => "tune_48",
        }
    }

    /// 单条排程项的调机时数上限
    pub fn entry_hour_cap(&self) -> u32 {
        match self {
            TuneKind::Tune8 => 8,
            TuneKind::Tune48 => 24,
        }
    }

    /// 单次调机过程的累计时数上限 (同时是生效所需的准确时数)
    pub fn episode_hour_cap(&self) -> u32 {
        match self {
            TuneKind::Tune8 => 8,
            TuneKind::Tune48 => 48,
        }
    }

    /// 另一种调机 (不可紧邻衔接)
    pub fn opposite(&self) -> TuneKind {
        match self {
            TuneKind::Tune8 => TuneKind::Tune48,
            TuneKind::Tune48 => TuneKind::Tune8,
        }
    }
}

impl fmt::Display for TuneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ==========================================
// 排程项种类 (Entry Kind)
// ==========================================
// order_code 按特殊代码分流: stop / tune_8 / tune_48 / 普通订单
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Production,
    Stop,
    Tune(TuneKind),
}

impl EntryKind {
    /// 按 order_code 判定排程项种类
    pub fn of(order_code: &str) -> EntryKind {
        match order_code {
            "stop" => EntryKind::Stop,
            "tune_8" => EntryKind::Tune(TuneKind::Tune8),
            "tune_48" => EntryKind::Tune(TuneKind::Tune48),
            _ => EntryKind::Production,
        }
    }
}

// ==========================================
// 日期区间 (Date Window)
// ==========================================
// 排程应完整覆盖 [start, end] (含端点)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 从 "YYYY-MM-DD" 字符串对解析日期区间
    pub fn parse(start: &str, end: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            start: NaiveDate::parse_from_str(start, "%Y-%m-%d")?,
            end: NaiveDate::parse_from_str(end, "%Y-%m-%d")?,
        })
    }

    /// 日期是否落在区间内 (含端点)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 区间内全部日期 (升序, 含端点)
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}
