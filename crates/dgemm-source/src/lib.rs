pub mod constant;
pub mod error;
pub mod sequence;
pub mod uniform;

pub use constant::ConstantSource;
pub use dgemm_core::ValueSource;
pub use error::{Result, SourceError};
pub use sequence::SequenceSource;
pub use uniform::UniformSource;
