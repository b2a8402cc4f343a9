use std::ops::{ControlFlow, Deref, DerefMut};
use std::path::PathBuf;

use log::{error, info, warn};
use zip::CompressionMethod;

use crate::config::config::TargetFormat;
use crate::error::{ConvertError, Result};
use crate::facade::ports::facade_ports::DownloadPort;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::archive::{ArchiveBuildInput, ARCHIVE_FILE_NAME};
use crate::models::batch::{BatchInput, BatchOutcome};
use crate::models::conversion::{ConversionRequest, ConvertedOutput};
use crate::models::file::SourceFile;
use crate::service::traits::i_service::ArchiveServiceTrait;
use crate::utils::utils::{get_file_name_without_extension, ProgressState};

/// 批次期間顯示進度，離開時無論成功或失敗都歸零並隱藏
struct ProgressSession<'a> {
    progress: &'a mut ProgressState,
}

impl<'a> ProgressSession<'a> {
    fn start(progress: &'a mut ProgressState) -> Self {
        progress.show();
        ProgressSession { progress }
    }
}

impl Deref for ProgressSession<'_> {
    type Target = ProgressState;

    fn deref(&self) -> &ProgressState {
        &*self.progress
    }
}

impl DerefMut for ProgressSession<'_> {
    fn deref_mut(&mut self) -> &mut ProgressState {
        &mut *self.progress
    }
}

impl Drop for ProgressSession<'_> {
    fn drop(&mut self) {
        self.progress.reset_and_hide();
    }
}

/// 批次協調：依序轉換選取的檔案並交付下載
pub struct BatchFacade {
    conversion: Box<dyn ConversionFacadeTrait>,
    archive_service: Box<dyn ArchiveServiceTrait>,
    download: Box<dyn DownloadPort>,
    archive_compression: CompressionMethod,
}

impl BatchFacade {
    pub fn new(
        conversion: Box<dyn ConversionFacadeTrait>,
        archive_service: Box<dyn ArchiveServiceTrait>,
        download: Box<dyn DownloadPort>,
        archive_compression: CompressionMethod,
    ) -> Self {
        BatchFacade {
            conversion,
            archive_service,
            download,
            archive_compression,
        }
    }

    /// 依選取順序逐一轉換，遇到第一個錯誤即中止並保留已完成的結果
    pub fn run(&self, input: BatchInput, progress: &mut ProgressState) -> Result<BatchOutcome> {
        if input.files.is_empty() {
            warn!("未選取任何影像");
            return Err(ConvertError::empty_selection());
        }

        let total = input.files.len();
        info!("開始批次轉換 {} 個檔案，格式：{}，壓縮：{}", total, input.format, input.compress);
        let mut session = ProgressSession::start(progress);

        let folded = input.files.into_iter().enumerate().try_fold(
            Vec::with_capacity(total),
            |mut outputs, (index, source)| {
                let name = source.name.clone();
                info!("處理檔案 {}/{}：{}", index + 1, total, name);
                match self.convert_one(source, input.format, input.compress, &mut session) {
                    Ok(output) => {
                        outputs.push(output);
                        ControlFlow::Continue(outputs)
                    }
                    Err(error) => {
                        error!("處理檔案 {} 失敗: {}", name, error);
                        ControlFlow::Break((outputs, error))
                    }
                }
            },
        );

        let outcome = match folded {
            ControlFlow::Continue(outputs) => {
                info!("批次完成，共 {} 個結果", outputs.len());
                BatchOutcome::Completed(outputs)
            }
            ControlFlow::Break((partial, error)) => {
                warn!("批次中止，保留 {} 個已完成的結果", partial.len());
                BatchOutcome::Aborted { partial, error }
            }
        };
        drop(session);
        Ok(outcome)
    }

    fn convert_one(
        &self,
        source: SourceFile,
        format: TargetFormat,
        compress: bool,
        progress: &mut ProgressState,
    ) -> Result<ConvertedOutput> {
        let base_name = get_file_name_without_extension(&source.name).to_string();
        progress.begin_conversion(&source.name);

        let blob = self.conversion.convert(ConversionRequest { source, format, compress }, progress)?;
        let output = ConvertedOutput::new(&base_name, format, blob);
        self.download.offer(&output)?;
        Ok(output)
    }

    /// 將所有結果打包為 files.zip 並交付下載，需要多於一個結果
    pub fn export_archive(&self, outputs: &[ConvertedOutput]) -> Result<PathBuf> {
        if outputs.len() <= 1 {
            return Err(ConvertError::Validation(
                "至少需要兩個轉換結果才能匯出壓縮檔".to_string(),
            ));
        }

        let built = self.archive_service.build_archive(ArchiveBuildInput {
            entries: outputs.to_vec(),
            compression_method: self.archive_compression,
        })?;
        info!("打包 {} 個項目至 {}", built.entry_count, ARCHIVE_FILE_NAME);
        self.download.offer_archive(ARCHIVE_FILE_NAME, &built.zip_buffer)
    }
}
