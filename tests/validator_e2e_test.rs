// ==========================================
// 端到端集成测试 - 文件载入 + 两段校验
// ==========================================
// 测试范围: 目录 CSV / 提交 JSON → validate_dates → check_valid_schedule
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use rolling_schedule_validator::config::PlantConfig;
use rolling_schedule_validator::domain::types::DateWindow;
use rolling_schedule_validator::engine::{ScheduleRuleEngine, Verdict};
use rolling_schedule_validator::importer::{load_order_catalog, load_submission, ImportError};
use serde_json::json;
use std::io::Write;

fn abc_rows() -> Vec<OrderRow> {
    vec![
        OrderRow::new("O001", "N001").quantity(2000),
        OrderRow::new("O002", "N002").quantity(2000),
        OrderRow::new("O003", "N010")
            .product_type("lenti")
            .width(1500)
            .quantity(2000),
    ]
}

/// 经由临时文件执行完整流程
fn run_from_files(
    rows: &[OrderRow],
    submission: &SubmissionBuilder,
    start: &str,
    end: &str,
) -> (Verdict, Verdict) {
    let catalog_file = write_catalog_csv(rows);
    let submit_file = submission.write_json();

    let config = PlantConfig::default();
    let catalog = load_order_catalog(catalog_file.path(), &config).unwrap();
    let doc = load_submission(submit_file.path()).unwrap();
    let window = DateWindow::parse(start, end).unwrap();
    let engine = ScheduleRuleEngine::new(&catalog, &doc, &config, window);

    (engine.validate_dates(), engine.check_valid_schedule())
}

// ==========================================
// 场景 A: 单日, 9 线齐备, 3 线开机, 产量吻合
// ==========================================

#[test]
fn test_scenario_a_compliant_single_day() {
    let submission = SubmissionBuilder::new().full_day(
        "2019-07-01",
        &[
            ("A1", json!([tune_entry("tune_8", 8), prod_entry("O001", "N001", 16, 1260)])),
            ("A2", json!([tune_entry("tune_8", 8), prod_entry("O002", "N002", 16, 1260)])),
            ("B2", json!([tune_entry("tune_8", 8), prod_entry("O003", "N010", 16, 1570)])),
        ],
    );

    let (dates, schedule) = run_from_files(&abc_rows(), &submission, "2019-07-01", "2019-07-01");
    assert!(dates.pass, "{}", dates.message);
    assert!(schedule.pass, "{}", schedule.message);
    assert!(schedule.message.contains("校验通过"));
}

// ==========================================
// 场景 B: 同场景 A, 但一条开机产线仅 23 小时
// ==========================================

#[test]
fn test_scenario_b_daily_hours_short() {
    let submission = SubmissionBuilder::new().full_day(
        "2019-07-01",
        &[
            ("A1", json!([tune_entry("tune_8", 8), prod_entry("O001", "N001", 16, 1260)])),
            ("A2", json!([tune_entry("tune_8", 8), prod_entry("O002", "N002", 15, 1260)])),
            ("B2", json!([tune_entry("tune_8", 8), prod_entry("O003", "N010", 16, 1570)])),
        ],
    );

    let (dates, schedule) = run_from_files(&abc_rows(), &submission, "2019-07-01", "2019-07-01");
    assert!(dates.pass);
    assert!(!schedule.pass);
    // 诊断信息指明日期与产线
    assert!(schedule.message.contains("2019-07-01"), "{}", schedule.message);
    assert!(schedule.message.contains("A2"));
    assert!(schedule.message.contains("24"));
}

// ==========================================
// 场景 C: product_code 与目录不符
// ==========================================

#[test]
fn test_scenario_c_product_code_mismatch() {
    let submission = SubmissionBuilder::new().full_day(
        "2019-07-01",
        &[
            // O001 目录产品为 N001, 提交却写 N002
            ("A1", json!([tune_entry("tune_8", 8), prod_entry("O001", "N002", 16, 1260)])),
            ("A2", json!([tune_entry("tune_8", 8), prod_entry("O002", "N002", 16, 1260)])),
            ("B2", json!([tune_entry("tune_8", 8), prod_entry("O003", "N010", 16, 1570)])),
        ],
    );

    let (dates, schedule) = run_from_files(&abc_rows(), &submission, "2019-07-01", "2019-07-01");
    assert!(dates.pass);
    assert!(!schedule.pass);
    assert!(schedule.message.contains("2019-07-01"), "{}", schedule.message);
    assert!(schedule.message.contains("A1"));
    assert!(schedule.message.contains("O001"));
    assert!(schedule.message.contains("product_code"));
}

// ==========================================
// 日期覆盖: 区间内缺一日
// ==========================================

#[test]
fn test_missing_day_fails_date_coverage() {
    let submission = SubmissionBuilder::new().full_day(
        "2019-07-01",
        &[
            ("A1", json!([tune_entry("tune_8", 8), prod_entry("O001", "N001", 16, 1260)])),
            ("A2", json!([tune_entry("tune_8", 8), prod_entry("O002", "N002", 16, 1260)])),
            ("B2", json!([tune_entry("tune_8", 8), prod_entry("O003", "N010", 16, 1570)])),
        ],
    );

    let (dates, _) = run_from_files(&abc_rows(), &submission, "2019-07-01", "2019-07-02");
    assert!(!dates.pass);
    assert!(dates.message.contains("2019-07-02"), "{}", dates.message);
}

// ==========================================
// 输入失败: 规则校验前以导入错误报出
// ==========================================

#[test]
fn test_malformed_catalog_reports_import_error() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "order_code,product_code,material,composition,type,width,not_before,not_after,quantity"
    )
    .unwrap();
    writeln!(file, "O001,N001,CS,8%,plate,wide,2019-07-01,2019-12-31,2000").unwrap();

    let result = load_order_catalog(file.path(), &PlantConfig::default());
    let err = result.unwrap_err();
    assert!(matches!(err, ImportError::FieldMappingError { .. }));

    // CLI 将导入错误包装为失败裁定
    let verdict = Verdict::failed(err.to_string());
    assert!(!verdict.pass);
    assert!(verdict.message.contains("width"));
}

#[test]
fn test_malformed_submission_reports_import_error() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{broken").unwrap();

    let result = load_submission(file.path());
    assert!(matches!(result, Err(ImportError::JsonParseError(_))));
}
