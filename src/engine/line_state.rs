// ==========================================
// 轧线排程校验系统 - 产线状态跟踪
// ==========================================
// 职责: 单条产线跨日持续状态 (上一项代码/类型/成分/幅宽/调机累计)
// 红线: 状态随一次校验创建, 不跨校验残留
// 红线: 区分 "无前项" 与 "前项为初始类型" (previous_code 为 None 即无前项)
// ==========================================

use crate::domain::types::{Composition, ProductType, TuneKind};

// ==========================================
// LineState - 单产线状态
// ==========================================
// 规则仅需回看紧邻前项, 故保留 "最近一次" 字段而非完整历史
#[derive(Debug, Clone)]
pub struct LineState {
    initial_type: ProductType,          // 产线初始产品类型
    last_code: Option<String>,          // 上一排程项的 order_code (任意种类)
    last_type: Option<ProductType>,     // 最近一个普通订单的产品类型
    last_composition: Option<Composition>, // 最近一个普通订单的成分
    last_mfg_width: Option<u32>,        // 最近一个普通订单的制造幅宽
    tune_hours: u32,                    // 当前调机过程累计时数
}

impl LineState {
    pub fn new(initial_type: ProductType) -> Self {
        Self {
            initial_type,
            last_code: None,
            last_type: None,
            last_composition: None,
            last_mfg_width: None,
            tune_hours: 0,
        }
    }

    /// 上一排程项的 order_code; None 表示该产线尚无任何排程项
    pub fn previous_code(&self) -> Option<&str> {
        self.last_code.as_deref()
    }

    /// 上一个普通订单的产品类型; 尚无普通订单时取产线初始类型
    pub fn previous_type(&self) -> ProductType {
        self.last_type.unwrap_or(self.initial_type)
    }

    /// 上一个普通订单的成分; 尚无普通订单时为 None
    pub fn previous_composition(&self) -> Option<Composition> {
        self.last_composition
    }

    /// 上一个普通订单的制造幅宽; 尚无普通订单时为 None
    pub fn previous_mfg_width(&self) -> Option<u32> {
        self.last_mfg_width
    }

    /// 当前调机过程累计时数
    pub fn tune_hours(&self) -> u32 {
        self.tune_hours
    }

    /// 读取并清零调机累计 (普通订单开始生产时调用)
    pub fn take_tune_hours(&mut self) -> u32 {
        std::mem::take(&mut self.tune_hours)
    }

    /// 记录一个普通订单排程项
    pub fn record_production(
        &mut self,
        order_code: &str,
        product_type: ProductType,
        composition: Composition,
        mfg_width: u32,
    ) {
        self.last_code = Some(order_code.to_string());
        self.last_type = Some(product_type);
        self.last_composition = Some(composition);
        self.last_mfg_width = Some(mfg_width);
        self.tune_hours = 0;
    }

    /// 记录一个调机排程项, 返回累加后的过程累计时数
    pub fn record_tune(&mut self, kind: TuneKind, hours: u32) -> u32 {
        self.last_code = Some(kind.code().to_string());
        self.tune_hours += hours;
        self.tune_hours
    }

    /// 记录一个停机排程项 (中断调机过程, 累计清零)
    pub fn record_stop(&mut self) {
        self.last_code = Some("stop".to_string());
        self.tune_hours = 0;
    }
}
