//! Recording infrastructure module
//!
//! Captures from the default input device with cpal and writes mono 16-bit
//! WAV files with hound.

mod cpal_recorder;

pub use cpal_recorder::CpalRecorder;

use std::path::PathBuf;

/// Create the default recorder writing into `output_dir`
pub fn create_recorder(output_dir: impl Into<PathBuf>) -> CpalRecorder {
    CpalRecorder::new(output_dir)
}
