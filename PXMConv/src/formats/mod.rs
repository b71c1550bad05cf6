//! Container format implementations
//!
//! - [`qlp`] - legacy three-entry container with named, word-addressed records
//! - [`pxm`] - current container with byte-addressed offset/size records

pub mod pxm;
pub mod qlp;

/// Alignment unit shared by both containers (one word).
pub const WORD_SIZE: usize = 4;

/// Number of zero bytes needed after `size` bytes to reach the next word boundary.
#[must_use]
pub fn padding_for(size: usize) -> usize {
    (WORD_SIZE - size % WORD_SIZE) % WORD_SIZE
}
