// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use rolling_schedule_validator::domain::order::{Order, OrderCatalog};
use rolling_schedule_validator::domain::types::{Composition, ProductType};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

/// 标准产线全集
pub const ALL_LINES: [&str; 9] = ["A1", "A2", "A3", "B1", "B2", "B3", "B4", "B5", "C1"];

// ==========================================
// OrderRow 构建器
// ==========================================

pub struct OrderRow {
    order_code: String,
    product_code: String,
    material: String,
    composition: String,
    product_type: String,
    width: u32,
    not_before: String,
    not_after: String,
    quantity: u64,
}

impl OrderRow {
    pub fn new(order_code: &str, product_code: &str) -> Self {
        Self {
            order_code: order_code.to_string(),
            product_code: product_code.to_string(),
            material: "CS".to_string(),
            composition: "8%".to_string(),
            product_type: "plate".to_string(),
            width: 1200,
            not_before: "2019-07-01T00:00:00".to_string(),
            not_after: "2019-12-31T00:00:00".to_string(),
            quantity: 2000,
        }
    }

    pub fn material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    pub fn composition(mut self, composition: &str) -> Self {
        self.composition = composition.to_string();
        self
    }

    pub fn product_type(mut self, product_type: &str) -> Self {
        self.product_type = product_type.to_string();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn window(mut self, not_before: &str, not_after: &str) -> Self {
        self.not_before = not_before.to_string();
        self.not_after = not_after.to_string();
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = quantity;
        self
    }

    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.order_code,
            self.product_code,
            self.material,
            self.composition,
            self.product_type,
            self.width,
            self.not_before,
            self.not_after,
            self.quantity
        )
    }

    fn to_order(&self) -> Order {
        let date = |s: &str| {
            let part = s.split('T').next().unwrap();
            NaiveDate::parse_from_str(part, "%Y-%m-%d").unwrap()
        };
        Order {
            order_code: self.order_code.clone(),
            product_code: self.product_code.clone(),
            material: self.material.clone(),
            composition: Composition::from_label(&self.composition).unwrap(),
            product_type: ProductType::from_code(&self.product_type).unwrap(),
            width: self.width,
            not_before: date(&self.not_before),
            not_after: date(&self.not_after),
            quantity: self.quantity,
        }
    }
}

/// 写出目录 CSV 临时文件
pub fn write_catalog_csv(rows: &[OrderRow]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "order_code,product_code,material,composition,type,width,not_before,not_after,quantity"
    )
    .unwrap();
    for row in rows {
        writeln!(file, "{}", row.to_csv_line()).unwrap();
    }
    file.flush().unwrap();
    file
}

/// 由同一批行构建内存目录 (与 CSV 内容一致)
pub fn catalog_from(rows: &[OrderRow]) -> OrderCatalog {
    OrderCatalog::new(rows.iter().map(OrderRow::to_order).collect())
}

// ==========================================
// 排程项构建
// ==========================================

pub fn prod_entry(order_code: &str, product_code: &str, hours: u32, mfg_width: u32) -> Value {
    json!({
        "order_code": order_code,
        "product_code": product_code,
        "hours": hours,
        "mfg_width": mfg_width,
    })
}

pub fn tune_entry(code: &str, hours: u32) -> Value {
    json!({
        "order_code": code,
        "product_code": code,
        "hours": hours,
        "mfg_width": 0,
    })
}

pub fn stop_entry(hours: u32) -> Value {
    json!({
        "order_code": "stop",
        "product_code": "stop",
        "hours": hours,
        "mfg_width": 0,
    })
}

// ==========================================
// SubmissionBuilder 构建器
// ==========================================
// 按调用顺序生成日期键; 未覆盖的产线整日停机

pub struct SubmissionBuilder {
    days: Vec<(String, Vec<(String, Value)>)>,
}

impl SubmissionBuilder {
    pub fn new() -> Self {
        Self { days: Vec::new() }
    }

    /// 追加一个完整排程日 (9 条产线, overrides 之外整日停机)
    pub fn full_day(mut self, date: &str, overrides: &[(&str, Value)]) -> Self {
        let mut lines = Vec::new();
        for line in ALL_LINES {
            let value = overrides
                .iter()
                .find(|(l, _)| *l == line)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| json!([stop_entry(24)]));
            lines.push((line.to_string(), value));
        }
        self.days.push((date.to_string(), lines));
        self
    }

    /// 追加一个自定义排程日 (仅给定产线)
    pub fn partial_day(mut self, date: &str, lines: &[(&str, Value)]) -> Self {
        self.days.push((
            date.to_string(),
            lines
                .iter()
                .map(|(l, v)| (l.to_string(), v.clone()))
                .collect(),
        ));
        self
    }

    pub fn build(&self) -> Value {
        let mut top = serde_json::Map::new();
        for (date, lines) in &self.days {
            let mut day = serde_json::Map::new();
            for (line, value) in lines {
                day.insert(line.clone(), value.clone());
            }
            top.insert(date.clone(), Value::Object(day));
        }
        Value::Object(top)
    }

    /// 写出提交 JSON 临时文件
    pub fn write_json(&self) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", serde_json::to_string_pretty(&self.build()).unwrap()).unwrap();
        file.flush().unwrap();
        file
    }
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
