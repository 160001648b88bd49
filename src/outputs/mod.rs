//! Everything the run writes: image files on disk and the console report.
//!
//! # Submodules
//!
//! - [`image`]: Streams a resolved image URL into the assets directory
//! - [`report`]: Human-facing progress lines and the final summary block
//!
//! # Output Structure
//!
//! ```text
//! assets/
//! ├── first-post.png      # base name of the entry's `thumbnail`
//! └── second-post.jpeg
//! ```

pub mod image;
pub mod report;
