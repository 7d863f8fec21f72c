pub mod merge;
pub mod node_externals;
pub mod plugin;
pub mod profiles;
pub mod user_config;

pub use merge::deep_merge;
pub use merge::merge_configs;
pub use merge::MergeOptions;
pub use profiles::create_node_config;
pub use profiles::create_template_config;
pub use profiles::Profile;
pub use user_config::UserConfig;
pub use user_config::UserConfigFn;
