// ==========================================
// 轧线排程校验系统 - 产量对账
// ==========================================
// 职责: 全量扫描后的订单覆盖与产量核对
// 规则: 已排订单集合 = 目录订单集合; 每单 时数×折算系数 = 目录产量
// ==========================================

use crate::domain::order::OrderCatalog;
use crate::engine::error::{ValidationError, ValidationResult};
use std::collections::HashMap;

// ==========================================
// QuantityReconciler - 产量对账器
// ==========================================
#[derive(Debug, Default)]
pub struct QuantityReconciler {
    quantity_per_hour: u64,
    produced: HashMap<String, u64>, // 订单号 → 累计产量
}

impl QuantityReconciler {
    pub fn new(quantity_per_hour: u64) -> Self {
        Self {
            quantity_per_hour,
            produced: HashMap::new(),
        }
    }

    /// 记录一个普通订单排程项的产量
    pub fn record(&mut self, order_code: &str, hours: u32) {
        *self.produced.entry(order_code.to_string()).or_insert(0) +=
            u64::from(hours) * self.quantity_per_hour;
    }

    /// 全量扫描结束后的对账
    ///
    /// # 规则 (按序短路)
    /// 1. 目录内每一笔订单至少被排入一次
    /// 2. 每笔订单累计产量与目录产量完全一致 (按目录顺序报出首个不符)
    pub fn reconcile(&self, catalog: &OrderCatalog) -> ValidationResult<()> {
        let missing: Vec<String> = catalog
            .iter()
            .filter(|o| !self.produced.contains_key(&o.order_code))
            .map(|o| o.order_code.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::OrderCoverage { missing });
        }

        for order in catalog.iter() {
            let actual = self.produced.get(&order.order_code).copied().unwrap_or(0);
            if actual != order.quantity {
                return Err(ValidationError::QuantityMismatch {
                    order_code: order.order_code.clone(),
                    expected: order.quantity,
                    actual,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Order;
    use crate::domain::types::{Composition, ProductType};
    use chrono::NaiveDate;

    fn order(code: &str, quantity: u64) -> Order {
        Order {
            order_code: code.to_string(),
            product_code: "N001".to_string(),
            material: "CS".to_string(),
            composition: Composition::Eight,
            product_type: ProductType::Plate,
            width: 1200,
            not_before: NaiveDate::from_ymd_opt(2019, 7, 1).unwrap(),
            not_after: NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_reconcile_pass() {
        let catalog = OrderCatalog::new(vec![order("O001", 2000), order("O002", 3000)]);
        let mut reconciler = QuantityReconciler::new(125);
        reconciler.record("O001", 10);
        reconciler.record("O001", 6);
        reconciler.record("O002", 24);

        assert!(reconciler.reconcile(&catalog).is_ok());
    }

    #[test]
    fn test_reconcile_missing_order() {
        let catalog = OrderCatalog::new(vec![order("O001", 2000), order("O002", 3000)]);
        let mut reconciler = QuantityReconciler::new(125);
        reconciler.record("O001", 16);

        assert!(matches!(
            reconciler.reconcile(&catalog),
            Err(ValidationError::OrderCoverage { missing }) if missing == vec!["O002".to_string()]
        ));
    }

    #[test]
    fn test_reconcile_quantity_mismatch() {
        let catalog = OrderCatalog::new(vec![order("O001", 2000)]);
        let mut reconciler = QuantityReconciler::new(125);
        reconciler.record("O001", 15); // 1875 ≠ 2000

        assert!(matches!(
            reconciler.reconcile(&catalog),
            Err(ValidationError::QuantityMismatch { expected: 2000, actual: 1875, .. })
        ));
    }
}
