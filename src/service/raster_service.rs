use std::io::Cursor;

use image::{DynamicImage, ImageReader, RgbaImage};
use log::info;

use crate::config::config::TargetFormat;
use crate::error::{ConvertError, Result};
use crate::service::traits::i_service::RasterServiceTrait;
use crate::utils::svg::trace_to_svg;

/// 以 image crate 實作的點陣化服務
pub struct RasterService;

impl RasterService {
    pub fn new() -> Self {
        RasterService
    }
}

impl Default for RasterService {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterServiceTrait for RasterService {
    fn decode(&self, data: &[u8]) -> Result<RgbaImage> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ConvertError::Decode(e.to_string()))?;
        if reader.format().is_none() {
            return Err(ConvertError::Decode("無法辨識的影像格式".to_string()));
        }
        let img = reader.decode().map_err(|e| ConvertError::Decode(e.to_string()))?;
        info!("解碼影像：{}x{}", img.width(), img.height());
        Ok(img.to_rgba8())
    }

    fn encode(&self, surface: &RgbaImage, format: TargetFormat) -> Result<Vec<u8>> {
        let image_format = format
            .image_format()
            .ok_or_else(|| ConvertError::Encode(format!("{} 不是點陣格式", format)))?;
        // JPEG 不支援透明通道
        let img = match format {
            TargetFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(surface.clone()).to_rgb8()),
            _ => DynamicImage::ImageRgba8(surface.clone()),
        };
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image_format)
            .map_err(|e| ConvertError::Encode(e.to_string()))?;
        Ok(buffer)
    }

    fn trace(&self, surface: &RgbaImage) -> String {
        trace_to_svg(surface)
    }
}
