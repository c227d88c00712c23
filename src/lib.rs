pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{LocalStorage, SigelClient, SIGEL_QUERY_URL};
pub use crate::core::{
    etl::EtlEngine,
    export::{export_to_csv, to_csv_bytes},
    pipeline::AerogeneratorPipeline,
    transform::build_geo_table,
};
pub use domain::model::{Cell, Crs, GeoRow, GeoTable};
pub use utils::error::{EtlError, Result};
