//! Format conversion utilities
//!
//! Converts legacy QLP containers into the two-entry PXM layout.

mod options;
mod qlp_to_pxm;

pub use options::{ConvertOptions, DEFAULT_BACKUP_SUFFIX};
pub use qlp_to_pxm::{
    LEGACY_ENTRY_COUNT, convert_qlp_bytes, convert_qlp_file, convert_qlp_in_place,
    load_legacy, load_legacy_bytes, write_pxm_from_qlp,
};
