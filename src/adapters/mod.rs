// Adapters layer: concrete cell sources behind the `CellSource` port.

pub mod memory;
pub mod xlsx_source;

pub use memory::MemorySheet;
pub use xlsx_source::XlsxSource;
