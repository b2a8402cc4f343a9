use std::path::PathBuf;

use crate::error::Result;
use crate::models::conversion::ConvertedOutput;

// 下載的 Port：交付單一轉換結果或整批壓縮檔
pub trait DownloadPort: Send + Sync {
    /// 提供單一結果的下載，回傳下載位置
    fn offer(&self, output: &ConvertedOutput) -> Result<PathBuf>;

    /// 以暫存參照交付壓縮檔，完成後釋放暫存參照
    fn offer_archive(&self, file_name: &str, data: &[u8]) -> Result<PathBuf>;
}
