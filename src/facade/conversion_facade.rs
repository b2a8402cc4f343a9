use log::info;

use crate::error::Result;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionRequest, ConvertedBlob};
use crate::service::compression_service::CompressionOptions;
use crate::service::traits::i_service::{CompressionServiceTrait, RasterServiceTrait};
use crate::utils::utils::ProgressState;

pub struct ConversionFacade {
    compression_service: Box<dyn CompressionServiceTrait>,
    raster_service: Box<dyn RasterServiceTrait>,
    compression_options: CompressionOptions,
}

impl ConversionFacade {
    pub fn new(
        compression_service: Box<dyn CompressionServiceTrait>,
        raster_service: Box<dyn RasterServiceTrait>,
        compression_options: CompressionOptions,
    ) -> Self {
        ConversionFacade {
            compression_service,
            raster_service,
            compression_options,
        }
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn convert(&self, request: ConversionRequest, progress: &mut ProgressState) -> Result<ConvertedBlob> {
        let ConversionRequest { source, format, compress } = request;

        let source = if compress {
            self.compression_service.compress(
                source,
                &self.compression_options,
                &mut |percentage| progress.report(percentage),
            )?
        } else {
            source
        };

        let data = source.read_bytes()?;
        let surface = self.raster_service.decode(&data)?;

        let blob = if format.is_vector() {
            let svg = self.raster_service.trace(&surface);
            ConvertedBlob {
                data: svg.into_bytes(),
                mime: format.mime().to_string(),
            }
        } else {
            ConvertedBlob {
                data: self.raster_service.encode(&surface, format)?,
                mime: format.mime().to_string(),
            }
        };
        progress.complete();

        info!(
            "轉換 {}（{}）為 {}，輸出 {} 位元組",
            source.name,
            source.mime,
            format,
            blob.data.len()
        );
        Ok(blob)
    }
}
