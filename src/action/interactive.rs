use dialoguer::{Confirm, Input, Select};
use std::path::Path;

use crate::action::convert::{ArchiveDecision, ConversionAdapter};
use crate::config::config::{validate_file_patterns, TargetFormat, DEFAULT_INCLUDE, DEFAULT_MAX_SIZE_MB};
use crate::config::ports::{split_patterns, AppConfig, ConfigPort, ConversionPort};
use crate::error::{ConvertError, Result};
use crate::models::archive::ARCHIVE_FILE_NAME;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;
use zip::CompressionMethod;

pub fn process_interactive_mode() -> Result<String> {
    println!("=== 歡迎使用互動模式 ===");
    setup_logging("info")?;
    let use_default_config = get_default_config_option()?;
    let inputs = get_input_paths()?;
    let output = get_output_path()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：輸出 PNG，不壓縮");
        Box::new(DefaultConfigAdapter::new(inputs, output))
    } else {
        Box::new(InteractiveConfigAdapter::new(inputs, output))
    };

    let config = ConfigService::new(config_port).get_config()?;
    ConversionAdapter::new(ArchiveDecision::Prompt).execute(config)
}

fn prompt_error(action: &str, e: dialoguer::Error) -> ConvertError {
    ConvertError::Config(format!("{}失敗: {}", action, e))
}

pub fn get_default_config_option() -> Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（輸出 PNG、不壓縮，僅需指定輸入和輸出路徑）")
        .default(true)
        .interact()
        .map_err(|e| prompt_error("預設配置選擇", e))
}

/// 逗號分隔的路徑；留空代表未選取任何影像
pub fn parse_input_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn get_input_paths() -> Result<Vec<String>> {
    let raw: String = Input::new()
        .with_prompt("請輸入影像檔案或目錄路徑，以逗號分隔（例如：./a.png,./photos）")
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            match parse_input_paths(input).into_iter().find(|p| !Path::new(p).exists()) {
                Some(missing) => Err(format!("路徑 '{}' 不存在", missing)),
                None => Ok(()),
            }
        })
        .interact_text()
        .map_err(|e| prompt_error("輸入路徑", e))?;
    Ok(parse_input_paths(&raw))
}

pub fn get_output_path() -> Result<String> {
    Input::new()
        .with_prompt("輸入輸出目錄（例如：./output，預設為 output）")
        .default("output".to_string())
        .interact_text()
        .map_err(|e| prompt_error("輸出目錄", e))
}

pub fn get_target_format() -> Result<TargetFormat> {
    let items: Vec<&str> = TargetFormat::ALL.iter().map(|f| f.extension()).collect();
    let index = Select::new()
        .with_prompt("選擇輸出格式（使用方向鍵選擇，按 Enter 確認）")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| prompt_error("輸出格式選擇", e))?;
    Ok(TargetFormat::ALL[index])
}

pub fn get_compression_options() -> Result<(bool, f64)> {
    let compress = Confirm::new()
        .with_prompt("是否在轉換前先壓縮影像？")
        .default(false)
        .interact()
        .map_err(|e| prompt_error("壓縮選項", e))?;
    if !compress {
        return Ok((false, DEFAULT_MAX_SIZE_MB));
    }
    let max_size_mb: f64 = Input::new()
        .with_prompt("壓縮大小上限（MB）")
        .default(DEFAULT_MAX_SIZE_MB)
        .validate_with(|v: &f64| -> std::result::Result<(), String> {
            if v.is_finite() && *v > 0.0 {
                Ok(())
            } else {
                Err("必須為正數".to_string())
            }
        })
        .interact_text()
        .map_err(|e| prompt_error("壓縮大小上限", e))?;
    Ok((true, max_size_mb))
}

pub fn get_file_patterns() -> Result<(Vec<String>, Option<Vec<String>>)> {
    let include: String = Input::new()
        .with_prompt("目錄中要包含的模式（預設為常見影像副檔名）")
        .default(DEFAULT_INCLUDE.to_string())
        .interact_text()
        .map_err(|e| prompt_error("包含模式輸入", e))?;

    let exclude: String = Input::new()
        .with_prompt("輸入排除模式（例如：thumb_*，預設為空）")
        .default("".to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| prompt_error("排除模式輸入", e))?;

    resolve_file_patterns(&include, &exclude)
}

/// 拆分並驗證包含與排除模式，包含模式不可為空
pub fn resolve_file_patterns(include: &str, exclude: &str) -> Result<(Vec<String>, Option<Vec<String>>)> {
    let include = split_patterns(&[include.to_string()]);
    let exclude = split_patterns(&[exclude.to_string()]);
    let exclude = if exclude.is_empty() { None } else { Some(exclude) };

    if include.is_empty() {
        return Err(ConvertError::Config("包含模式不可為空".to_string()));
    }
    validate_file_patterns(&include, &exclude)?;
    Ok((include, exclude))
}

/// 批次完成且有多個結果時詢問是否另存 files.zip
pub fn confirm_archive_export(outputs: usize) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("是否將 {} 個結果打包下載為 {}？", outputs, ARCHIVE_FILE_NAME))
        .default(true)
        .interact()
        .map_err(|e| prompt_error("壓縮檔選項", e))
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    inputs: Vec<String>,
    output: String,
}

impl InteractiveConfigAdapter {
    pub fn new(inputs: Vec<String>, output: String) -> Self {
        InteractiveConfigAdapter { inputs, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        let format = get_target_format()?;
        let (compress, max_size_mb) = get_compression_options()?;
        let (include, exclude) = get_file_patterns()?;

        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            format,
            compress,
            max_size_mb,
            use_worker: true,
            export_archive: false,
            archive_compression: CompressionMethod::Stored,
            include,
            exclude,
            no_progress: false,
        })
    }
}
