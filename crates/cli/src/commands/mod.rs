pub mod browse;
pub mod config;
pub mod show;
pub mod wishlist;

pub use browse::{handle_browse_command, handle_genres_command};
pub use config::handle_config_command;
pub use show::handle_show_command;
pub use wishlist::{handle_like_command, handle_wishlist_command};
