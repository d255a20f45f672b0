// ==========================================
// 轧线排程校验系统 - 订单领域模型
// ==========================================
// 用途: 导入层写入, 引擎层只读
// 红线: 目录在一次校验生命周期内不可变
// ==========================================

use crate::domain::types::{Composition, ProductType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Order - 订单主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub order_code: String, // 订单唯一标识

    // ===== 产品信息 =====
    pub product_code: String,       // 产品代码 (排程项须与之一致)
    pub material: String,           // 材质代码 (MS 材质仅允许 C1 产线)
    pub composition: Composition,   // 成分标签 (0% / 8% / 100%)
    pub product_type: ProductType,  // 产品类型 (plate / lenti)
    pub width: u32,                 // 订单成品宽度 (mm)

    // ===== 交期与产量 =====
    pub not_before: NaiveDate, // 最早可生产日期 (含)
    pub not_after: NaiveDate,  // 最晚可生产日期 (含)
    pub quantity: u64,         // 订单产量 (= 排程总时数 × 125)
}

// ==========================================
// OrderCatalog - 订单目录
// ==========================================
// 按 order_code 索引的只读查找表
#[derive(Debug, Clone, Default)]
pub struct OrderCatalog {
    orders: Vec<Order>,
    index: HashMap<String, usize>,
}

impl OrderCatalog {
    /// 从订单列表构建目录
    ///
    /// 重复的 order_code 由导入层拒绝, 此处以后到者覆盖兜底
    pub fn new(orders: Vec<Order>) -> Self {
        let index = orders
            .iter()
            .enumerate()
            .map(|(i, o)| (o.order_code.clone(), i))
            .collect();
        Self { orders, index }
    }

    /// 按订单号查找
    pub fn get(&self, order_code: &str) -> Option<&Order> {
        self.index.get(order_code).map(|&i| &self.orders[i])
    }

    pub fn contains(&self, order_code: &str) -> bool {
        self.index.contains_key(order_code)
    }

    /// 目录内订单 (载入顺序)
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
