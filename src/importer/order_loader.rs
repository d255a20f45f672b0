// ==========================================
// 轧线排程校验系统 - 订单目录载入
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xls)
// 流程: 原始行 (表头 → 值映射) → 类型化 Order → OrderCatalog
// ==========================================

use crate::config::PlantConfig;
use crate::domain::order::{Order, OrderCatalog};
use crate::domain::types::{Composition, ProductType};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

/// 目录文件必备列
const REQUIRED_COLUMNS: [&str; 9] = [
    "order_code",
    "product_code",
    "material",
    "composition",
    "type",
    "width",
    "not_before",
    "not_after",
    "quantity",
];

/// 载入订单目录文件
///
/// # 参数
/// - path: 目录文件路径 (.csv/.xlsx/.xls)
/// - config: 产线配置 (用于产品代码校验)
///
/// # 返回
/// - Ok(OrderCatalog): 全部行均映射成功
/// - Err(ImportError): 首个失败行的映射错误
pub fn load_order_catalog<P: AsRef<Path>>(
    path: P,
    config: &PlantConfig,
) -> ImportResult<OrderCatalog> {
    let records = parse_raw_records(path.as_ref())?;

    let mut orders = Vec::with_capacity(records.len());
    let mut seen_codes = HashSet::new();
    for (idx, record) in records.iter().enumerate() {
        // 行号按数据行计 (表头为第 1 行)
        let row = idx + 2;
        let order = map_record(row, record, config)?;
        if !seen_codes.insert(order.order_code.clone()) {
            return Err(ImportError::DuplicateOrder {
                row,
                order_code: order.order_code,
            });
        }
        orders.push(order);
    }

    tracing::info!("订单目录载入完成: {} 笔订单", orders.len());
    Ok(OrderCatalog::new(orders))
}

/// 按扩展名解析为原始行 (表头 → 字符串值)
fn parse_raw_records(path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => parse_csv_records(path),
        "xlsx" | "xls" => parse_excel_records(path),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}

fn parse_csv_records(path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

fn parse_excel_records(path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for data_row in rows {
        let mut row_map = HashMap::new();
        for (col_idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), cell.to_string().trim().to_string());
            }
        }
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

/// 表头须含全部必备列
fn check_headers(headers: &[String]) -> ImportResult<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ImportError::FieldMappingError {
                row: 1,
                field: column.to_string(),
                message: "表头缺少该列".to_string(),
            });
        }
    }
    Ok(())
}

/// 单行原始值 → 类型化 Order
fn map_record(
    row: usize,
    record: &HashMap<String, String>,
    config: &PlantConfig,
) -> ImportResult<Order> {
    let field = |name: &str| -> ImportResult<&str> {
        record
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ImportError::FieldMappingError {
                row,
                field: name.to_string(),
                message: "字段缺失或为空".to_string(),
            })
    };

    let order_code = field("order_code")?.to_string();

    let product_code = field("product_code")?.to_string();
    if !config.is_known_product(&product_code) {
        return Err(ImportError::UnknownProductCode { row, product_code });
    }

    let material = field("material")?.to_string();

    let composition_raw = field("composition")?;
    let composition = Composition::from_label(composition_raw).ok_or_else(|| {
        ImportError::FieldMappingError {
            row,
            field: "composition".to_string(),
            message: format!("无效成分标签: {}", composition_raw),
        }
    })?;

    let type_raw = field("type")?;
    let product_type =
        ProductType::from_code(type_raw).ok_or_else(|| ImportError::FieldMappingError {
            row,
            field: "type".to_string(),
            message: format!("无效产品类型: {}", type_raw),
        })?;

    let width = parse_u32(row, "width", field("width")?)?;
    let quantity = u64::from(parse_u32(row, "quantity", field("quantity")?)?);

    let not_before = parse_date(row, "not_before", field("not_before")?)?;
    let not_after = parse_date(row, "not_after", field("not_after")?)?;

    Ok(Order {
        order_code,
        product_code,
        material,
        composition,
        product_type,
        width,
        not_before,
        not_after,
        quantity,
    })
}

fn parse_u32(row: usize, field: &str, value: &str) -> ImportResult<u32> {
    value
        .parse::<u32>()
        .map_err(|_| ImportError::FieldMappingError {
            row,
            field: field.to_string(),
            message: format!("应为非负整数，实际 {}", value),
        })
}

/// 日期时间字符串只取 "T" 之前的日期部分
fn parse_date(row: usize, field: &str, value: &str) -> ImportResult<NaiveDate> {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| ImportError::DateFormatError {
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
