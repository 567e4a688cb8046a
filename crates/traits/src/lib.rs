pub mod annotation;
pub mod font;
pub mod write;

pub use annotation::{DEFAULT_APPEARANCE_KEY, StringAttributeSink};
pub use font::{FontNameError, FontNameSource, read_name};
pub use write::FileWrite;
