use std::io::Cursor;
use std::sync::mpsc;
use std::thread;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use log::{info, warn};

use crate::config::config::DEFAULT_MAX_SIZE_MB;
use crate::error::{ConvertError, Result};
use crate::models::file::SourceFile;
use crate::service::traits::i_service::CompressionServiceTrait;
use crate::utils::utils::format_file_size;

/// 每次迭代的尺寸縮放比例
const SCALE_STEP: f32 = 0.9;
/// 每次迭代的 JPEG 品質衰減比例
const QUALITY_STEP: f32 = 0.9;
const MIN_QUALITY: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct CompressionOptions {
    /// 輸出大小上限（MB）
    pub max_size_mb: f64,
    /// 是否在工作執行緒上執行
    pub use_worker: bool,
    pub max_iteration: u32,
    pub initial_quality: u8,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        CompressionOptions {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            use_worker: true,
            max_iteration: 10,
            initial_quality: 90,
        }
    }
}

/// 以重新編碼搜尋方式壓縮影像：逐步降低品質與尺寸直到符合上限
pub struct CompressionService;

impl CompressionService {
    pub fn new() -> Self {
        CompressionService
    }
}

impl Default for CompressionService {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionServiceTrait for CompressionService {
    fn compress(
        &self,
        file: SourceFile,
        options: &CompressionOptions,
        on_progress: &mut dyn FnMut(u32),
    ) -> Result<SourceFile> {
        let data = file
            .read_bytes()
            .map_err(|e| ConvertError::Compression(e.to_string()))?;
        let original_size = data.len();

        let (best, format) = if options.use_worker {
            run_on_worker(&data, options, on_progress)?
        } else {
            search(&data, options, on_progress)?
        };

        if best.len() >= original_size {
            info!(
                "壓縮 {} 未縮小檔案（{}），保留原檔",
                file.name,
                format_file_size(original_size as u64)
            );
            return Ok(file);
        }

        info!(
            "壓縮 {}：{} -> {}",
            file.name,
            format_file_size(original_size as u64),
            format_file_size(best.len() as u64)
        );
        Ok(SourceFile::from_bytes(file.name, format.to_mime_type(), best))
    }
}

/// 在工作執行緒上搜尋，進度經由通道轉交呼叫端，呼叫會等待工作完成
fn run_on_worker(
    data: &[u8],
    options: &CompressionOptions,
    on_progress: &mut dyn FnMut(u32),
) -> Result<(Vec<u8>, ImageFormat)> {
    let (tx, rx) = mpsc::channel::<u32>();
    thread::scope(|scope| {
        let worker = scope.spawn(move || {
            search(data, options, &mut |percentage| {
                let _ = tx.send(percentage);
            })
        });
        for percentage in rx {
            on_progress(percentage);
        }
        worker
            .join()
            .map_err(|_| ConvertError::Compression("壓縮工作執行緒異常終止".to_string()))?
    })
}

fn search(
    data: &[u8],
    options: &CompressionOptions,
    report: &mut dyn FnMut(u32),
) -> Result<(Vec<u8>, ImageFormat)> {
    report(0);
    let format = image::guess_format(data).map_err(|e| ConvertError::Compression(e.to_string()))?;
    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| ConvertError::Compression(e.to_string()))?;

    let max_bytes = (options.max_size_mb * 1024.0 * 1024.0) as usize;
    let max_iteration = options.max_iteration.max(1);
    let mut quality = options.initial_quality.clamp(1, 100) as f32;
    let (mut width, mut height) = img.dimensions();

    let mut best = encode_candidate(&img, format, quality as u8)?;
    let mut iteration = 1;
    report(iteration * 100 / max_iteration);

    while best.len() > max_bytes && iteration < max_iteration {
        width = scale_down(width);
        height = scale_down(height);
        if format == ImageFormat::Jpeg {
            quality = (quality * QUALITY_STEP).max(MIN_QUALITY);
        }
        let resized = img.resize_exact(width, height, FilterType::Triangle);
        let candidate = encode_candidate(&resized, format, quality as u8)?;
        if candidate.len() < best.len() {
            best = candidate;
        }
        iteration += 1;
        report(iteration * 100 / max_iteration);
    }

    if best.len() > max_bytes {
        warn!(
            "經過 {} 次迭代仍超過上限 {}，使用最小結果 {}",
            iteration,
            format_file_size(max_bytes as u64),
            format_file_size(best.len() as u64)
        );
    }
    report(100);
    Ok((best, format))
}

fn scale_down(value: u32) -> u32 {
    ((value as f32 * SCALE_STEP) as u32).max(1)
}

fn encode_candidate(img: &DynamicImage, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoded = if format == ImageFormat::Jpeg {
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
    } else {
        img.write_to(&mut Cursor::new(&mut buffer), format)
    };
    encoded.map_err(|e| ConvertError::Compression(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    fn png_bytes(img: RgbaImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn noise(width: u32, height: u32) -> RgbaImage {
        let mut state: u32 = 0x1234_5678;
        RgbaImage::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            Rgba([r, g, b, 255])
        })
    }

    fn options(max_size_mb: f64, use_worker: bool) -> CompressionOptions {
        CompressionOptions {
            max_size_mb,
            use_worker,
            ..CompressionOptions::default()
        }
    }

    #[test]
    fn small_file_is_never_enlarged() {
        let bytes = png_bytes(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255])));
        let original = bytes.len();
        let file = SourceFile::from_bytes("tiny.png", "image/png", bytes);

        let mut seen = Vec::new();
        let out = CompressionService::new()
            .compress(file, &options(1.0, false), &mut |p| seen.push(p))
            .unwrap();

        assert!(out.size().unwrap() as usize <= original);
        assert_eq!(out.name, "tiny.png");
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn oversized_file_shrinks_below_original() {
        let bytes = png_bytes(noise(96, 96));
        let original = bytes.len();
        let file = SourceFile::from_bytes("noise.png", "image/png", bytes);

        let out = CompressionService::new()
            .compress(file, &options(0.001, false), &mut |_| {})
            .unwrap();

        let compressed = out.read_bytes().unwrap();
        assert!(compressed.len() < original);
        assert_eq!(out.mime, "image/png");
        let decoded = image::load_from_memory(&compressed).unwrap();
        assert!(decoded.width() < 96);
    }

    #[test]
    fn jpeg_lowers_quality() {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(noise(64, 64)).to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, 100))
            .unwrap();
        let original = buffer.len();
        let file = SourceFile::from_bytes("noise.jpg", "image/jpeg", buffer);

        let out = CompressionService::new()
            .compress(file, &options(0.001, false), &mut |_| {})
            .unwrap();
        assert!((out.size().unwrap() as usize) < original);
        assert_eq!(out.mime, "image/jpeg");
    }

    #[test]
    fn worker_matches_inline_result() {
        let bytes = png_bytes(noise(48, 48));
        let service = CompressionService::new();

        let mut worker_progress = Vec::new();
        let on_worker = service
            .compress(
                SourceFile::from_bytes("a.png", "image/png", bytes.clone()),
                &options(0.001, true),
                &mut |p| worker_progress.push(p),
            )
            .unwrap();
        let inline = service
            .compress(
                SourceFile::from_bytes("a.png", "image/png", bytes),
                &options(0.001, false),
                &mut |_| {},
            )
            .unwrap();

        assert_eq!(on_worker.read_bytes().unwrap(), inline.read_bytes().unwrap());
        assert_eq!(worker_progress.last(), Some(&100));
    }

    #[test]
    fn undecodable_input_is_compression_error() {
        let file = SourceFile::from_bytes("bad.png", "image/png", b"not an image".to_vec());
        let err = CompressionService::new()
            .compress(file, &CompressionOptions::default(), &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, ConvertError::Compression(_)));
        assert!(err.to_string().starts_with("Compression failed: "));
    }

    #[test]
    fn unreadable_input_is_compression_error() {
        let file = SourceFile::from_path(Path::new("/no/such/dir/photo.png"));
        let err = CompressionService::new()
            .compress(file, &CompressionOptions::default(), &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, ConvertError::Compression(_)));
    }
}
