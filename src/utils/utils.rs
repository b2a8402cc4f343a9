use indicatif::{ProgressBar, ProgressStyle};
use regex::RegexSet;

use crate::error::{ConvertError, Result};

pub fn setup_logging(log_level: &str) -> Result<()> {
    let log_level_filter = match log_level {
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| ConvertError::Config(format!("日誌初始化失敗: {}", e)))
}

/// 批次進度：0 到 100 的單一數值，只在批次執行期間可見
///
/// 由一次批次擁有並以 `&mut` 傳入每次轉換，同一時間只有一個轉換在回報。
pub struct ProgressState {
    pb: Option<ProgressBar>,
    no_progress: bool,
    value: u32,
    visible: bool,
}

impl ProgressState {
    pub fn new(no_progress: bool) -> Self {
        ProgressState {
            pb: None,
            no_progress,
            value: 0,
            visible: false,
        }
    }

    /// 不繪製到終端機的進度狀態
    pub fn hidden() -> Self {
        Self::new(true)
    }

    pub fn show(&mut self) {
        self.value = 0;
        self.visible = true;
        let pb = if self.no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}%")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        self.pb = Some(pb);
    }

    /// 開始新的轉換，數值歸零
    pub fn begin_conversion(&mut self, label: &str) {
        self.value = 0;
        if let Some(pb) = &self.pb {
            pb.set_position(0);
            pb.set_message(label.to_string());
        }
    }

    /// 記錄目前轉換的進度，超過 100 視為 100，只保留最遠的值
    pub fn report(&mut self, percentage: u32) {
        let clamped = percentage.min(100);
        if clamped <= self.value {
            return;
        }
        self.value = clamped;
        if let Some(pb) = &self.pb {
            pb.set_position(clamped as u64);
        }
    }

    pub fn complete(&mut self) {
        self.report(100);
    }

    pub fn reset_and_hide(&mut self) {
        self.value = 0;
        self.visible = false;
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// 去除最後一個副檔名；沒有點或點在開頭時原樣返回
pub fn get_file_name_without_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        None | Some(0) => file_name,
        Some(index) => &file_name[..index],
    }
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

fn pattern_to_regex(pattern: &str) -> String {
    format!("(?i)^{}$", regex::escape(pattern).replace("\\*", ".*"))
}

/// 將萬用字元模式轉為比對檔名的 RegexSet
pub fn create_regex_sets(include: &[String], exclude: &[String]) -> (RegexSet, RegexSet) {
    let include_patterns: Vec<_> = include.iter().map(|p| pattern_to_regex(p)).collect();
    let exclude_patterns: Vec<_> = exclude.iter().map(|p| pattern_to_regex(p)).collect();

    let include_set = RegexSet::new(&include_patterns).unwrap_or_else(|e| {
        log::warn!("無效的包含模式: {}，使用空集作為回退", e);
        RegexSet::empty()
    });

    let exclude_set = RegexSet::new(&exclude_patterns).unwrap_or_else(|e| {
        log::warn!("無效的排除模式: {}，使用空集作為回退", e);
        RegexSet::empty()
    });

    (include_set, exclude_set)
}
