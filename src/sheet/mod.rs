pub mod cell;
pub mod reader;

pub use cell::{CellValue, ColumnKind};
pub use reader::{Sheet, SheetError, SheetRow};
