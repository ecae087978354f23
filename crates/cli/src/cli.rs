use std::num::NonZeroUsize;
use std::path::PathBuf;

use folio_types::BookId;

#[derive(clap::Parser, Debug)]
#[clap(name = "folio", about = "Browse the book catalog and keep a wishlist")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[clap(long, short, global = true)]
    pub verbose: bool,

    /// Use this configuration file instead of the default location
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List catalog books, optionally filtered and paginated
    Browse(BrowseArgs),
    /// List every genre present in the catalog
    Genres,
    /// Show details for a single book
    Show {
        /// Book ID
        id: BookId,
    },
    /// Add a book to the wishlist, or remove it if already there
    Like {
        /// Book ID
        id: BookId,
    },
    /// List the books on the wishlist
    Wishlist,
    /// Manage configuration
    Config {
        #[clap(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct BrowseArgs {
    /// Case-insensitive text to look for in titles
    #[clap(long, short, default_value = "")]
    pub search: String,
    /// Only show books carrying this exact subject
    #[clap(long, short)]
    pub genre: Option<String>,
    /// Page number, starting at 1
    #[clap(long, short, default_value = "1")]
    pub page: NonZeroUsize,
    /// Books per page (defaults to browse.page_size from the config)
    #[clap(long)]
    pub page_size: Option<NonZeroUsize>,
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
    /// Show all configuration
    Show,
    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[clap(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_browse_arguments() {
        let cli = Cli::parse_from([
            "folio", "browse", "--search", "the", "--genre", "Fiction", "--page", "2",
        ]);

        match cli.command {
            Commands::Browse(args) => {
                assert_eq!(args.search, "the");
                assert_eq!(args.genre.as_deref(), Some("Fiction"));
                assert_eq!(args.page.get(), 2);
                assert!(args.page_size.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_page_and_bad_ids() {
        assert!(Cli::try_parse_from(["folio", "browse", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["folio", "show", "abc"]).is_err());
        assert!(Cli::try_parse_from(["folio", "like", "-3"]).is_err());
    }

    #[test]
    fn test_parse_book_id() {
        let cli = Cli::parse_from(["folio", "--verbose", "show", "1342"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Show { id: BookId(1342) }));
    }
}
