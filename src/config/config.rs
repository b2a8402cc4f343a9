use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::Path;

use crate::error::{ConvertError, Result};

/// 預設壓縮目標上限（MB）
pub const DEFAULT_MAX_SIZE_MB: f64 = 1.0;
/// 目錄輸入時預設納入的影像類型
pub const DEFAULT_INCLUDE: &str = "*.png,*.jpg,*.jpeg,*.webp,*.bmp,*.gif";

#[derive(Parser, Clone, Debug)]
#[command(
    name = "image_convert",
    about = "將影像批次轉換為指定格式，可選擇先行壓縮並打包為 ZIP",
    long_about = "選取一個或多個影像檔案（或目錄），可選擇先壓縮至指定大小上限，再轉換為 PNG、JPEG、WebP、BMP、GIF 或 SVG。\n每個結果寫入輸出目錄；多於一個結果時可用 --zip 另外產生 files.zip。\n不帶任何參數執行時進入互動模式。",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 影像檔案或目錄，依給定順序處理
    pub inputs: Vec<String>,
    #[arg(short, long, default_value = "output")]
    pub output: String,
    #[arg(short, long, value_enum, default_value_t = TargetFormat::Png)]
    pub format: TargetFormat,
    #[arg(long, default_value_t = false)]
    pub compress: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE_MB)]
    pub max_size_mb: f64,
    #[arg(long, default_value_t = false)]
    pub no_worker: bool,
    #[arg(long, default_value_t = false)]
    pub zip: bool,
    #[arg(long, default_value = "stored", value_parser = ["stored", "deflated"])]
    pub archive_compression: String,
    #[arg(long, default_value = DEFAULT_INCLUDE, value_delimiter = ',')]
    pub include: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

/// 輸出格式：點陣格式或向量標記（SVG）
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetFormat {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
    Webp,
    Bmp,
    Gif,
    Svg,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 6] = [
        TargetFormat::Png,
        TargetFormat::Jpeg,
        TargetFormat::Webp,
        TargetFormat::Bmp,
        TargetFormat::Gif,
        TargetFormat::Svg,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Webp => "webp",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Gif => "gif",
            TargetFormat::Svg => "svg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            TargetFormat::Svg => "image/svg+xml",
            TargetFormat::Png => "image/png",
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Webp => "image/webp",
            TargetFormat::Bmp => "image/bmp",
            TargetFormat::Gif => "image/gif",
        }
    }

    pub fn is_vector(self) -> bool {
        self == TargetFormat::Svg
    }

    /// 點陣格式對應的編碼器，SVG 沒有
    pub fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            TargetFormat::Png => Some(image::ImageFormat::Png),
            TargetFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            TargetFormat::Webp => Some(image::ImageFormat::WebP),
            TargetFormat::Bmp => Some(image::ImageFormat::Bmp),
            TargetFormat::Gif => Some(image::ImageFormat::Gif),
            TargetFormat::Svg => None,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn validate_input_path(input: &str) -> Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(ConvertError::Config(format!("輸入路徑 '{}' 不存在", input)));
    }
    Ok(path)
}

pub fn validate_input_paths(inputs: &[String]) -> Result<()> {
    for input in inputs {
        validate_input_path(input)?;
    }
    Ok(())
}

pub fn is_valid_pattern(pattern: &str) -> bool {
    let invalid_chars = ['/', '\\', ':', '?', '"', '<', '>', '|'];
    !pattern.is_empty() && !pattern.contains(&invalid_chars[..])
}

pub fn validate_file_patterns(include: &[String], exclude: &Option<Vec<String>>) -> Result<()> {
    for pattern in include {
        if !is_valid_pattern(pattern) {
            return Err(ConvertError::Config(format!("無效的包含模式: {}", pattern)));
        }
    }
    if let Some(exclude_patterns) = exclude {
        for pattern in exclude_patterns {
            if !is_valid_pattern(pattern) {
                return Err(ConvertError::Config(format!("無效的排除模式: {}", pattern)));
            }
        }
    }
    Ok(())
}

pub fn validate_max_size(max_size_mb: f64) -> Result<()> {
    if !(max_size_mb.is_finite() && max_size_mb > 0.0) {
        return Err(ConvertError::Config(format!(
            "壓縮大小上限必須為正數，收到：{}",
            max_size_mb
        )));
    }
    Ok(())
}
