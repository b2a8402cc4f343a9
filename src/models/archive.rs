use zip::CompressionMethod;

use crate::models::conversion::ConvertedOutput;

pub const ARCHIVE_FILE_NAME: &str = "files.zip";

#[derive(Clone, Debug)]
pub struct ArchiveBuildInput {
    pub entries: Vec<ConvertedOutput>,
    pub compression_method: CompressionMethod,
}

#[derive(Debug)]
pub struct ArchiveBuildOutput {
    pub zip_buffer: Vec<u8>,
    pub entry_count: usize,
}
