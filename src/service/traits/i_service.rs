use image::RgbaImage;

use crate::config::config::TargetFormat;
use crate::error::Result;
use crate::models::archive::{ArchiveBuildInput, ArchiveBuildOutput};
use crate::models::file::{FileCollectInput, FileCollectOutput, SourceFile};
use crate::service::compression_service::CompressionOptions;

// File 服務接口，負責將輸入路徑展開為選取的檔案
pub trait FileServiceTrait: Send + Sync {
    /// 收集選取的影像檔案，保持輸入順序
    fn collect_files(&self, input: FileCollectInput) -> Result<FileCollectOutput>;
}

// 壓縮服務接口
pub trait CompressionServiceTrait: Send + Sync {
    /// 將檔案壓縮至上限以內，過程中以百分比回報進度
    /// # 回傳
    /// - 成功時返回不大於原檔的檔案，失敗時返回 Compression 錯誤
    fn compress(
        &self,
        file: SourceFile,
        options: &CompressionOptions,
        on_progress: &mut dyn FnMut(u32),
    ) -> Result<SourceFile>;
}

// 點陣化服務接口：解碼、重新編碼與向量描繪
pub trait RasterServiceTrait: Send + Sync {
    /// 解碼為原始尺寸的 RGBA 像素平面
    fn decode(&self, data: &[u8]) -> Result<RgbaImage>;

    /// 編碼為指定的點陣格式
    fn encode(&self, surface: &RgbaImage, format: TargetFormat) -> Result<Vec<u8>>;

    /// 描繪為 SVG 標記文字
    fn trace(&self, surface: &RgbaImage) -> String;
}

// 壓縮檔服務接口
pub trait ArchiveServiceTrait: Send + Sync {
    /// 依插入順序將每個輸出寫成一個 ZIP 項目
    fn build_archive(&self, input: ArchiveBuildInput) -> Result<ArchiveBuildOutput>;
}
