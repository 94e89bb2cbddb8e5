//! Export core modules shared by the CLI sink and future front ends.

pub mod record;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use record::{
    build_record, build_rows, file_name, headers, share_caption, ExportLayout, ExportRecord,
    ExportRow, SHEET_NAME, SKIP_MARKER,
};
