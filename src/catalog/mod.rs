pub mod conversion;
pub mod template;
pub mod types;

pub use conversion::*;
pub use template::*;
pub use types::*;
