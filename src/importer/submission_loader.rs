// ==========================================
// 轧线排程校验系统 - 排程提交文件载入
// ==========================================
// 格式: JSON (日期 → 产线 → 排程项序列)
// 红线: 仅做结构最小解释, 条目级错误留给引擎按位置报出
// ==========================================

use crate::domain::schedule::SubmissionDoc;
use crate::importer::error::{ImportError, ImportResult};
use serde_json::Value;
use std::path::Path;

/// 载入排程提交文件
///
/// # 返回
/// - Ok(SubmissionDoc): 顶层为 JSON 对象, 键顺序保持文档顺序
/// - Err(ImportError): 文件不可读或非法 JSON
pub fn load_submission<P: AsRef<Path>>(path: P) -> ImportResult<SubmissionDoc> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let doc = SubmissionDoc::from_value(value)
        .map_err(|msg| ImportError::JsonParseError(format!("提交文件结构错误: {}", msg)))?;

    tracing::info!("排程提交文件载入完成: {} 个排程日", doc.len());
    Ok(doc)
}
