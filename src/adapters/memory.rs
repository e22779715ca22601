use crate::domain::model::CellValue;
use crate::domain::ports::CellSource;
use std::collections::HashMap;

/// Sparse in-memory worksheet, addressed 1-indexed like [`CellSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    cells: HashMap<(u32, u16), CellValue>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, row: u32, col: u16, value: impl Into<CellValue>) -> &mut Self {
        self.cells.insert((row, col), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellSource for MemorySheet {
    fn cell(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }
}
