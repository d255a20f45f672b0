// ==========================================
// 轧线排程校验系统 - 产线配置
// ==========================================
// 职责: 产线集合 / K 线集合 / 产品代码集合 / 幅宽上限表 / 初始产品类型
// 存储: 内置缺省表, 可由 JSON 文件覆盖
// ==========================================

use crate::domain::types::ProductType;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// WidthLimit - 单 (产线, 产品类型) 幅宽上限
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthLimit {
    pub max_width: u32,     // 订单成品宽度上限 (mm)
    pub max_mfg_width: u32, // 制造幅宽上限 (mm)
}

// ==========================================
// PlantConfig - 产线配置全集
// ==========================================
// 缺省值即现场固定表; 部分覆盖时未出现的字段取缺省
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    pub valid_lines: Vec<String>,         // 全部产线 (每日都须出现)
    pub k_lines: Vec<String>,             // 允许排 K 标记产品的产线
    pub valid_product_codes: Vec<String>, // 已知产品代码全集
    pub width_limits: HashMap<String, HashMap<ProductType, WidthLimit>>,
    pub initial_types: HashMap<String, ProductType>, // 各产线的初始产品类型
    pub min_open_lines: usize,            // 每日开机产线数下限
    pub max_open_lines: usize,            // 每日开机产线数上限
    pub daily_hours: u32,                 // 每 (日, 产线) 的总时数
    pub quantity_per_hour: u64,           // 产量折算系数 (产量 = 时数 × 该系数)
}

impl Default for PlantConfig {
    fn default() -> Self {
        let valid_lines: Vec<String> = ["A1", "A2", "A3", "B1", "B2", "B3", "B4", "B5", "C1"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let k_lines: Vec<String> = ["B1", "B2", "B3", "B4"].iter().map(|s| s.to_string()).collect();

        let valid_product_codes: Vec<String> = [
            "N001", "N002", "N003", "N004", "N005", "N006", "N007", "K008", "N009", "N010",
            "N011", "N012", "N013", "N014", "N015", "N016", "N017", "N018", "N019", "N020",
            "K021", "K022", "K023", "N024", "N025", "N026", "N027", "N028", "N029", "N030",
            "N031", "N032", "N033", "N034", "N035", "N036", "K037", "N038", "N039", "N040",
            "N041", "N042", "N043", "N044", "N045", "N046", "N047", "N048", "N049",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        // (产线, 产品类型) → 幅宽上限; A 线仅能生产 plate
        let mut width_limits = HashMap::new();
        let mut insert = |line: &str, entries: &[(ProductType, u32, u32)]| {
            let table: HashMap<ProductType, WidthLimit> = entries
                .iter()
                .map(|&(t, max_width, max_mfg_width)| {
                    (t, WidthLimit { max_width, max_mfg_width })
                })
                .collect();
            width_limits.insert(line.to_string(), table);
        };
        insert("A1", &[(ProductType::Plate, 1300, 1450)]);
        insert("A2", &[(ProductType::Plate, 1300, 1450)]);
        insert("A3", &[(ProductType::Plate, 1300, 1470)]);
        insert(
            "B1",
            &[(ProductType::Plate, 1575, 1725), (ProductType::Lenti, 1575, 1725)],
        );
        insert(
            "B2",
            &[(ProductType::Plate, 1945, 2000), (ProductType::Lenti, 1945, 2000)],
        );
        insert(
            "B3",
            &[(ProductType::Plate, 1945, 2000), (ProductType::Lenti, 1945, 2000)],
        );
        insert(
            "B4",
            &[(ProductType::Plate, 1300, 1450), (ProductType::Lenti, 1300, 1450)],
        );
        insert(
            "B5",
            &[(ProductType::Plate, 1300, 1450), (ProductType::Lenti, 1300, 1450)],
        );
        insert(
            "C1",
            &[(ProductType::Plate, 1300, 1450), (ProductType::Lenti, 1300, 1450)],
        );

        let initial_types: HashMap<String, ProductType> = [
            ("A1", ProductType::Plate),
            ("A2", ProductType::Plate),
            ("A3", ProductType::Plate),
            ("B1", ProductType::Plate),
            ("B2", ProductType::Lenti),
            ("B3", ProductType::Lenti),
            ("B4", ProductType::Lenti),
            ("B5", ProductType::Lenti),
            ("C1", ProductType::Lenti),
        ]
        .iter()
        .map(|&(line, t)| (line.to_string(), t))
        .collect();

        Self {
            valid_lines,
            k_lines,
            valid_product_codes,
            width_limits,
            initial_types,
            min_open_lines: 2,
            max_open_lines: 6,
            daily_hours: 24,
            quantity_per_hour: 125,
        }
    }
}

impl PlantConfig {
    /// 从 JSON 文件加载配置覆盖 (缺失字段取内置缺省)
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: PlantConfig = serde_json::from_str(&raw)
            .map_err(|e| ImportError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(config)
    }

    pub fn is_valid_line(&self, line_no: &str) -> bool {
        self.valid_lines.iter().any(|l| l == line_no)
    }

    pub fn is_k_line(&self, line_no: &str) -> bool {
        self.k_lines.iter().any(|l| l == line_no)
    }

    pub fn is_known_product(&self, product_code: &str) -> bool {
        self.valid_product_codes.iter().any(|p| p == product_code)
    }

    /// (产线, 产品类型) 的幅宽上限; 该产线不能生产该类型时为 None
    pub fn width_limit(&self, line_no: &str, product_type: ProductType) -> Option<WidthLimit> {
        self.width_limits
            .get(line_no)
            .and_then(|table| table.get(&product_type))
            .copied()
    }

    /// 产线的初始产品类型 (开机后第一个普通订单据此判定类型变更)
    pub fn initial_type(&self, line_no: &str) -> Option<ProductType> {
        self.initial_types.get(line_no).copied()
    }
}
