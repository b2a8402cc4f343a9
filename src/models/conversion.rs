use crate::config::config::TargetFormat;
use crate::models::file::SourceFile;

/// 單一檔案的轉換請求，每批次每檔建立一次
#[derive(Clone, Debug)]
pub struct ConversionRequest {
    pub source: SourceFile,
    pub format: TargetFormat,
    pub compress: bool,
}

/// 轉換管線的產出
#[derive(Clone, Debug)]
pub struct ConvertedBlob {
    pub data: Vec<u8>,
    pub mime: String,
}

/// 已命名的轉換結果，建立後不再修改
#[derive(Clone, Debug)]
pub struct ConvertedOutput {
    pub name: String,
    pub data: Vec<u8>,
    pub mime: String,
}

impl ConvertedOutput {
    pub fn new(base_name: &str, format: TargetFormat, blob: ConvertedBlob) -> Self {
        ConvertedOutput {
            name: format!("{}.{}", base_name, format.extension()),
            data: blob.data,
            mime: blob.mime,
        }
    }
}
