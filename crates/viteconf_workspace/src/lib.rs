mod internal_packages;

pub use internal_packages::find_internal_packages;
pub use internal_packages::NODE_MODULES;
