//! Label tokens that introduce header lines and tables.

use serde::{Deserialize, Serialize};

/// Fixed label tokens recognised by [`crate::DocParser`].
///
/// Each header label may be followed by an ASCII `:` or a full-width `：`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocLabels {
    pub interface: String,
    pub target: String,
    pub description: String,
    pub limit: String,
    pub input_table: String,
    pub output_table: String,
    pub data_example: String,
}

impl Default for DocLabels {
    fn default() -> Self {
        Self {
            interface: "接口".to_string(),
            target: "目标地址".to_string(),
            description: "描述".to_string(),
            limit: "限量".to_string(),
            input_table: "输入参数".to_string(),
            output_table: "输出参数".to_string(),
            data_example: "数据示例".to_string(),
        }
    }
}

impl DocLabels {
    pub fn english() -> Self {
        Self {
            interface: "Interface".to_string(),
            target: "Target".to_string(),
            description: "Description".to_string(),
            limit: "Limit".to_string(),
            input_table: "Input parameters".to_string(),
            output_table: "Output parameters".to_string(),
            data_example: "Data example".to_string(),
        }
    }
}
