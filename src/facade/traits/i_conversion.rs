use crate::error::Result;
use crate::models::conversion::{ConversionRequest, ConvertedBlob};
use crate::utils::utils::ProgressState;

// Facade 接口，負責單一檔案的轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 執行轉換：必要時先壓縮，再解碼並重新編碼為目標格式
    /// # 參數
    /// - request: 來源檔案、目標格式與是否壓縮
    /// - progress: 本次批次的進度狀態
    /// # 回傳
    /// - 成功時返回輸出資料與其 MIME 類型
    fn convert(&self, request: ConversionRequest, progress: &mut ProgressState) -> Result<ConvertedBlob>;
}
