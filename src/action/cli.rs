use clap::Parser;

use crate::action::convert::{ArchiveDecision, ConversionAdapter};
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{
    validate_file_patterns, validate_input_paths, validate_max_size, Cli,
};
use crate::config::ports::{parse_archive_compression, split_patterns, AppConfig, ConfigPort, ConversionPort};
use crate::error::{ConvertError, Result};
use crate::service::config_service::ConfigService;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> Result<String> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode(args)
    }
}

pub fn process_cli_mode(args: Vec<String>) -> Result<String> {
    let cli = Cli::parse_from(args);
    setup_logging(&cli.log_level)?;

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli.clone())));
    let config = config_service.get_config()?;
    log::info!(
        "開始轉換，輸入：{:?}，輸出目錄：{}，格式：{}",
        config.inputs,
        config.output,
        config.format
    );

    let conversion_port: Box<dyn ConversionPort> =
        Box::new(ConversionAdapter::new(ArchiveDecision::FromConfig));
    let output = conversion_port.execute(config.clone())?;

    // 若啟用 --show-config，在轉換後顯示配置
    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(output)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        let include = split_patterns(&self.cli.include);
        let exclude = self.cli.exclude.as_deref().map(split_patterns);

        validate_input_paths(&self.cli.inputs)?;
        validate_file_patterns(&include, &exclude)?;
        validate_max_size(self.cli.max_size_mb)?;
        if include.is_empty() {
            return Err(ConvertError::Config("包含模式不可為空".to_string()));
        }

        Ok(AppConfig {
            inputs: self.cli.inputs.clone(),
            output: self.cli.output.clone(),
            format: self.cli.format,
            compress: self.cli.compress,
            max_size_mb: self.cli.max_size_mb,
            use_worker: !self.cli.no_worker,
            export_archive: self.cli.zip,
            archive_compression: parse_archive_compression(&self.cli.archive_compression),
            include,
            exclude,
            no_progress: self.cli.no_progress,
        })
    }
}
