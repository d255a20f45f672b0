// ==========================================
// 轧线排程校验系统 - 命令行入口
// ==========================================
// 用法: rolling-schedule-validator --order-file orders.csv \
//           --submit-file submission.json \
//           --start-date 2019-07-01 --end-date 2019-12-31
// 输出: 单条裁定信息; 通过时退出码 0, 否则 1
// ==========================================

use clap::Parser;
use rolling_schedule_validator::config::PlantConfig;
use rolling_schedule_validator::domain::types::DateWindow;
use rolling_schedule_validator::engine::{ScheduleRuleEngine, Verdict};
use rolling_schedule_validator::importer::{load_order_catalog, load_submission};
use rolling_schedule_validator::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rolling-schedule-validator",
    version,
    about = "轧线排程提交文件校验工具"
)]
struct Cli {
    /// 订单目录文件 (.csv/.xlsx/.xls)
    #[arg(long = "order-file", default_value = "orders_2019.csv")]
    order_file: PathBuf,

    /// 排程提交文件 (JSON)
    #[arg(long = "submit-file", default_value = "submission_example.json")]
    submit_file: PathBuf,

    /// 排程起始日期 (YYYY-MM-DD)
    #[arg(long = "start-date", default_value = "2019-07-01")]
    start_date: String,

    /// 排程结束日期 (YYYY-MM-DD)
    #[arg(long = "end-date", default_value = "2019-12-31")]
    end_date: String,

    /// 产线配置文件 (JSON, 缺省使用内置配置)
    #[arg(long = "plant-config")]
    plant_config: Option<PathBuf>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    tracing::info!("{} v{}", rolling_schedule_validator::APP_NAME, rolling_schedule_validator::VERSION);

    let verdict = run(&cli);
    println!("{}", verdict.message);
    std::process::exit(if verdict.pass { 0 } else { 1 });
}

/// 载入输入并依序执行两段校验 (任一失败即止)
fn run(cli: &Cli) -> Verdict {
    // 输入载入失败同样以失败裁定报出, 不进入规则校验
    let config = match &cli.plant_config {
        Some(path) => match PlantConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => return Verdict::failed(e.to_string()),
        },
        None => PlantConfig::default(),
    };

    let window = match DateWindow::parse(&cli.start_date, &cli.end_date) {
        Ok(window) => window,
        Err(e) => return Verdict::failed(format!("日期区间参数错误: {}", e)),
    };

    let catalog = match load_order_catalog(&cli.order_file, &config) {
        Ok(catalog) => catalog,
        Err(e) => return Verdict::failed(e.to_string()),
    };

    let submission = match load_submission(&cli.submit_file) {
        Ok(submission) => submission,
        Err(e) => return Verdict::failed(e.to_string()),
    };

    let engine = ScheduleRuleEngine::new(&catalog, &submission, &config, window);

    let verdict = engine.validate_dates();
    if !verdict.pass {
        return verdict;
    }
    engine.check_valid_schedule()
}
