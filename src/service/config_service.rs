use crate::config::config::{TargetFormat, DEFAULT_INCLUDE, DEFAULT_MAX_SIZE_MB};
use crate::config::ports::{split_patterns, AppConfig, ConfigPort};
use crate::error::Result;
use zip::CompressionMethod;

// 配置服務，負責包裝所選的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：PNG、不壓縮、1 MB 上限、ZIP 不壓縮
pub struct DefaultConfigAdapter {
    inputs: Vec<String>,
    output: String,
}

impl DefaultConfigAdapter {
    pub fn new(inputs: Vec<String>, output: String) -> Self {
        DefaultConfigAdapter { inputs, output }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            format: TargetFormat::Png,
            compress: false,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            use_worker: true,
            export_archive: false,
            archive_compression: CompressionMethod::Stored,
            include: split_patterns(&[DEFAULT_INCLUDE.to_string()]),
            exclude: None,
            no_progress: false,
        })
    }
}
