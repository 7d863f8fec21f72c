mod config_env;
pub use self::config_env::*;

mod package_json;
pub use self::package_json::*;

mod package_ref;
pub use self::package_ref::*;
