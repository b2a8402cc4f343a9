use crate::config::config::TargetFormat;
use crate::error::ConvertError;
use crate::models::conversion::ConvertedOutput;
use crate::models::file::SourceFile;

#[derive(Clone, Debug)]
pub struct BatchInput {
    pub files: Vec<SourceFile>,
    pub format: TargetFormat,
    pub compress: bool,
}

/// 批次結果：全部完成，或在第一個錯誤處中止並保留已完成的部分
#[derive(Debug)]
pub enum BatchOutcome {
    Completed(Vec<ConvertedOutput>),
    Aborted {
        partial: Vec<ConvertedOutput>,
        error: ConvertError,
    },
}

impl BatchOutcome {
    pub fn outputs(&self) -> &[ConvertedOutput] {
        match self {
            BatchOutcome::Completed(outputs) => outputs,
            BatchOutcome::Aborted { partial, .. } => partial,
        }
    }

    /// 只有完整完成且輸出多於一個時才可匯出壓縮檔
    pub fn archive_available(&self) -> bool {
        matches!(self, BatchOutcome::Completed(outputs) if outputs.len() > 1)
    }

    pub fn into_result(self) -> Result<Vec<ConvertedOutput>, ConvertError> {
        match self {
            BatchOutcome::Completed(outputs) => Ok(outputs),
            BatchOutcome::Aborted { error, .. } => Err(error),
        }
    }
}
