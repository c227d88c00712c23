pub mod etl;
pub mod export;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{Cell, Crs, GeoRow, GeoTable};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
