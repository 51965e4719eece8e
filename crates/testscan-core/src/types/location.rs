use serde::{Deserialize, Serialize};

/// A span inside a source file. Lines are 1-based; columns are 0-based UTF-8 byte
/// offsets into the line. Produced once by an extractor and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file_path: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Location {
    pub fn new(
        file_path: impl Into<String>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A single-point location (start and end coincide).
    pub fn point(file_path: impl Into<String>, line: u32, column: u32) -> Self {
        let file_path = file_path.into();
        Self {
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
            file_path,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_line >= 1 && self.start_line <= self.end_line
    }
}
