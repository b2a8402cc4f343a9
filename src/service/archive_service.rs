use std::io::{Cursor, Write};

use log::{info, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{ConvertError, Result};
use crate::models::archive::{ArchiveBuildInput, ArchiveBuildOutput};
use crate::models::conversion::ConvertedOutput;
use crate::service::traits::i_service::ArchiveServiceTrait;

/// ZIP 服務，所有項目放在壓縮檔根目錄
pub struct ArchiveService;

impl ArchiveService {
    pub fn new() -> Self {
        ArchiveService
    }
}

impl Default for ArchiveService {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveServiceTrait for ArchiveService {
    fn build_archive(&self, input: ArchiveBuildInput) -> Result<ArchiveBuildOutput> {
        let options = SimpleFileOptions::default().compression_method(input.compression_method);
        let mut zip_buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));

        let entries = dedupe_by_name(&input.entries);
        for entry in &entries {
            zip.start_file(entry.name.as_str(), options)
                .map_err(|e| ConvertError::Archive(e.to_string()))?;
            zip.write_all(&entry.data)
                .map_err(|e| ConvertError::Archive(e.to_string()))?;
        }
        zip.finish().map_err(|e| ConvertError::Archive(e.to_string()))?;

        info!("生成 ZIP，共 {} 個項目，大小：{} 位元組", entries.len(), zip_buffer.len());
        Ok(ArchiveBuildOutput {
            zip_buffer,
            entry_count: entries.len(),
        })
    }
}

/// 同名項目以後者內容取代，位置維持第一次出現處
fn dedupe_by_name(entries: &[ConvertedOutput]) -> Vec<&ConvertedOutput> {
    let mut unique: Vec<&ConvertedOutput> = Vec::with_capacity(entries.len());
    for entry in entries {
        match unique.iter_mut().find(|e| e.name == entry.name) {
            Some(slot) => {
                warn!("ZIP 中已有同名項目 {}，以較新的結果取代", entry.name);
                *slot = entry;
            }
            None => unique.push(entry),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::{CompressionMethod, ZipArchive};

    fn output(name: &str, data: &[u8]) -> ConvertedOutput {
        ConvertedOutput {
            name: name.to_string(),
            data: data.to_vec(),
            mime: "image/png".to_string(),
        }
    }

    #[test]
    fn entries_keep_insertion_order_and_content() {
        let input = ArchiveBuildInput {
            entries: vec![output("b.png", b"second"), output("a.png", b"first")],
            compression_method: CompressionMethod::Deflated,
        };
        let out = ArchiveService::new().build_archive(input).unwrap();
        assert_eq!(out.entry_count, 2);

        let mut archive = ZipArchive::new(Cursor::new(out.zip_buffer)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "b.png");
        let mut content = String::new();
        first.read_to_string(&mut content).unwrap();
        assert_eq!(content, "second");
        drop(first);
        assert_eq!(archive.by_index(1).unwrap().name(), "a.png");
    }

    #[test]
    fn stored_entries_are_not_compressed() {
        let input = ArchiveBuildInput {
            entries: vec![output("x.svg", b"<svg/>")],
            compression_method: CompressionMethod::Stored,
        };
        let out = ArchiveService::new().build_archive(input).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(out.zip_buffer)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().compression(), CompressionMethod::Stored);
    }

    #[test]
    fn duplicate_names_keep_latest_content_in_first_position() {
        let input = ArchiveBuildInput {
            entries: vec![output("same.png", b"1"), output("other.png", b"x"), output("same.png", b"2")],
            compression_method: CompressionMethod::Stored,
        };
        let out = ArchiveService::new().build_archive(input).unwrap();
        assert_eq!(out.entry_count, 2);

        let mut archive = ZipArchive::new(Cursor::new(out.zip_buffer)).unwrap();
        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "same.png");
        let mut content = String::new();
        first.read_to_string(&mut content).unwrap();
        assert_eq!(content, "2");
    }
}
