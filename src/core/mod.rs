pub mod aggregator;
pub mod etl;
pub mod parser;
pub mod pipeline;
pub mod renderer;
pub mod schema;
pub mod sorter;

pub use crate::domain::model::{
    CellValue, ConversionSummary, ParsedExport, Report, ReportTotals, Reservation, SavedReport,
};
pub use crate::domain::ports::{CellSource, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
