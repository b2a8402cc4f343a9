use std::path::Path;

use log::{info, warn};
use regex::RegexSet;
use walkdir::WalkDir;

use crate::error::{ConvertError, Result};
use crate::models::file::{FileCollectInput, FileCollectOutput, SourceFile};
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_regex_sets;

/// 檔案選取服務：明確指定的檔案照順序納入，目錄依檔名排序展開並套用過濾
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn collect_files(&self, input: FileCollectInput) -> Result<FileCollectOutput> {
        let exclude = input.exclude_patterns.clone().unwrap_or_default();
        let (include_set, exclude_set) = create_regex_sets(&input.include_patterns, &exclude);

        let mut files = Vec::new();
        for path in &input.inputs {
            if path.is_dir() {
                collect_dir(path, &include_set, &exclude_set, &mut files)?;
            } else if path.is_file() {
                files.push(SourceFile::from_path(path));
            } else {
                warn!("略過不存在的輸入：{}", path.display());
            }
        }

        let mut total_size = 0;
        for file in &files {
            total_size += file.size()?;
        }
        info!("選取 {} 個檔案，總大小：{} 位元組", files.len(), total_size);
        Ok(FileCollectOutput { files, total_size })
    }
}

fn collect_dir(
    dir: &Path,
    include_set: &RegexSet,
    exclude_set: &RegexSet,
    files: &mut Vec<SourceFile>,
) -> Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ConvertError::Read(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if include_set.is_match(&name) && !exclude_set.is_match(&name) {
            files.push(SourceFile::from_path(entry.path()));
        }
    }
    Ok(())
}
