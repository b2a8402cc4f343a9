use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// 來源檔案內容：磁碟上的路徑或記憶體中的資料
#[derive(Clone, Debug)]
pub enum SourceData {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// 使用者選取的影像檔案，建立後不再修改
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub mime: String,
    pub data: SourceData,
}

impl SourceFile {
    /// 由磁碟路徑建立，MIME 由副檔名推測
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        SourceFile {
            name,
            mime: guess_mime(path),
            data: SourceData::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        SourceFile {
            name: name.into(),
            mime: mime.into(),
            data: SourceData::Memory(bytes),
        }
    }

    /// 完整讀入記憶體
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.data {
            SourceData::Path(path) => {
                fs::read(path).map_err(|e| ConvertError::Read(path.clone(), e))
            }
            SourceData::Memory(bytes) => Ok(bytes.clone()),
        }
    }

    /// 位元組大小，讀取失敗時回傳錯誤
    pub fn size(&self) -> Result<u64> {
        match &self.data {
            SourceData::Path(path) => fs::metadata(path)
                .map(|m| m.len())
                .map_err(|e| ConvertError::Read(path.clone(), e)),
            SourceData::Memory(bytes) => Ok(bytes.len() as u64),
        }
    }
}

pub fn guess_mime(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

#[derive(Clone, Debug)]
pub struct FileCollectInput {
    pub inputs: Vec<PathBuf>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct FileCollectOutput {
    pub files: Vec<SourceFile>,
    pub total_size: u64,
}
