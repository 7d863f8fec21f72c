pub mod manifest;
pub mod result;
pub mod types;

pub use result::ViteconfError;
pub use result::ViteconfResult;
