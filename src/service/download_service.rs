use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::{ConvertError, Result};
use crate::facade::ports::facade_ports::DownloadPort;
use crate::models::conversion::ConvertedOutput;

/// 將下載寫入輸出目錄的適配器
pub struct DirectoryDownloadAdapter {
    output_dir: PathBuf,
}

impl DirectoryDownloadAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        DirectoryDownloadAdapter {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // 第一次下載時才建立輸出目錄
    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ConvertError::Output(self.output_dir.clone(), e))
    }
}

impl DownloadPort for DirectoryDownloadAdapter {
    fn offer(&self, output: &ConvertedOutput) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join(&output.name);
        fs::write(&path, &output.data).map_err(|e| ConvertError::Output(path.clone(), e))?;
        info!("寫入 {}（{}，{} 位元組）", path.display(), output.mime, output.data.len());
        Ok(path)
    }

    fn offer_archive(&self, file_name: &str, data: &[u8]) -> Result<PathBuf> {
        self.ensure_output_dir()
            .map_err(|e| ConvertError::Archive(e.to_string()))?;
        let temp_path = self.output_dir.join(format!(".{}.part", file_name));
        let final_path = self.output_dir.join(file_name);

        let written = fs::write(&temp_path, data)
            .and_then(|_| fs::rename(&temp_path, &final_path));
        if let Err(e) = written {
            // 釋放暫存參照
            let _ = fs::remove_file(&temp_path);
            error!("寫入壓縮檔 {} 失敗: {}", final_path.display(), e);
            return Err(ConvertError::Archive(format!("{}: {}", final_path.display(), e)));
        }
        info!("寫入壓縮檔 {}，大小：{} 位元組", final_path.display(), data.len());
        Ok(final_path)
    }
}
