use std::collections::BTreeMap;

use crate::excel::CellValue;

/// One worksheet: a name plus a sparse cell map keyed by `(row, col)`,
/// both zero-based. The map keeps cells in row-major order so saving
/// writes them deterministically.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub name: String,
    pub cells: BTreeMap<(u32, u16), CellValue>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
        }
    }
}
