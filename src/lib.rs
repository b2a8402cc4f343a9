pub mod error;

pub mod service {
    pub mod archive_service;
    pub mod compression_service;
    pub mod config_service;
    pub mod download_service;
    pub mod file;
    pub mod raster_service;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod convert;
    pub mod interactive;
}

pub mod facade {
    pub mod batch_facade;
    pub mod conversion_facade;
    pub mod ports {
        pub mod facade_ports;
    }
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod archive;
    pub mod batch;
    pub mod conversion;
    pub mod file;
}

pub mod utils {
    pub mod svg;
    pub mod utils;
}
