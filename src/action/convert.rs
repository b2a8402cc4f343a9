use std::path::PathBuf;

use log::{info, warn};

use crate::action::interactive::confirm_archive_export;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::Result;
use crate::facade::batch_facade::BatchFacade;
use crate::facade::conversion_facade::ConversionFacade;
use crate::models::batch::BatchInput;
use crate::models::file::FileCollectInput;
use crate::service::archive_service::ArchiveService;
use crate::service::compression_service::{CompressionOptions, CompressionService};
use crate::service::download_service::DirectoryDownloadAdapter;
use crate::service::file::FileService;
use crate::service::raster_service::RasterService;
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::ProgressState;

/// 多個結果時是否匯出 files.zip 的決定方式
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArchiveDecision {
    /// 依配置的 export_archive
    FromConfig,
    /// 批次完成後詢問使用者
    Prompt,
}

// 轉換執行適配器：收集檔案、執行批次、必要時匯出壓縮檔
pub struct ConversionAdapter {
    archive_decision: ArchiveDecision,
}

impl ConversionAdapter {
    pub fn new(archive_decision: ArchiveDecision) -> Self {
        ConversionAdapter { archive_decision }
    }

    fn wants_archive(&self, config: &AppConfig, outputs: usize) -> Result<bool> {
        match self.archive_decision {
            ArchiveDecision::FromConfig => Ok(config.export_archive),
            ArchiveDecision::Prompt => confirm_archive_export(outputs),
        }
    }
}

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> Result<String> {
        let collected = FileService::new().collect_files(FileCollectInput {
            inputs: config.inputs.iter().map(PathBuf::from).collect(),
            include_patterns: config.include.clone(),
            exclude_patterns: config.exclude.clone(),
        })?;

        let facade = BatchFacade::new(
            Box::new(ConversionFacade::new(
                Box::new(CompressionService::new()),
                Box::new(RasterService::new()),
                CompressionOptions {
                    max_size_mb: config.max_size_mb,
                    use_worker: config.use_worker,
                    ..CompressionOptions::default()
                },
            )),
            Box::new(ArchiveService::new()),
            Box::new(DirectoryDownloadAdapter::new(&config.output)),
            config.archive_compression,
        );

        let mut progress = ProgressState::new(config.no_progress);
        let outcome = facade.run(
            BatchInput {
                files: collected.files,
                format: config.format,
                compress: config.compress,
            },
            &mut progress,
        )?;

        for output in outcome.outputs() {
            println!("下載：{}/{}", config.output, output.name);
        }

        let outputs = outcome.into_result()?;

        if outputs.len() > 1 {
            if self.wants_archive(&config, outputs.len())? {
                let path = facade.export_archive(&outputs)?;
                println!("下載全部：{}", path.display());
            }
        } else if config.export_archive {
            warn!("只有 {} 個結果，不產生壓縮檔", outputs.len());
        }

        info!("輸出目錄：{}", config.output);
        Ok(config.output)
    }
}
