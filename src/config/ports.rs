use zip::CompressionMethod;

use crate::config::config::TargetFormat;
use crate::error::Result;

// 應用配置結構體，封裝一次執行所需的所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: Vec<String>,
    pub output: String,
    pub format: TargetFormat,
    pub compress: bool,
    pub max_size_mb: f64,
    pub use_worker: bool,
    pub export_archive: bool,
    pub archive_compression: CompressionMethod,
    pub include: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> Result<String>;
}

pub fn parse_archive_compression(value: &str) -> CompressionMethod {
    match value {
        "deflated" => CompressionMethod::Deflated,
        _ => CompressionMethod::Stored,
    }
}

/// 將逗號分隔的模式攤平成單一列表
pub fn split_patterns(patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|p| p.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
