//! # Command Line
//!
//! `rocketshoes [--config PATH] <show | add ID | remove ID | update ID AMOUNT>`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{self, CartResponse};
use crate::error::ApiError;
use crate::state::CartStore;

#[derive(Debug, Parser)]
#[command(name = "rocketshoes", version, about = "RocketShoes shopping cart")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the cart
    Show,

    /// Add one unit of a product
    Add {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Remove a product
    Remove {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Set a product's amount (amounts of 0 or less are ignored)
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl CartCommand {
    /// Runs the command against `store`.
    pub async fn execute(self, store: &CartStore) -> Result<CartResponse, ApiError> {
        match self {
            CartCommand::Show => Ok(commands::get_cart(store)),
            CartCommand::Add { id } => commands::add_product(store, id).await,
            CartCommand::Remove { id } => commands::remove_product(store, id).await,
            CartCommand::Update { id, amount } => {
                commands::update_product_amount(store, id, amount).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["rocketshoes", "add", "7"]).unwrap();
        assert_eq!(cli.command, CartCommand::Add { id: 7 });
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["rocketshoes", "update", "1", "-2", "--config", "x.toml"])
            .unwrap();
        assert_eq!(cli.command, CartCommand::Update { id: 1, amount: -2 });
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["rocketshoes"]).is_err());
        assert!(Cli::try_parse_from(["rocketshoes", "add", "seven"]).is_err());
        assert!(Cli::try_parse_from(["rocketshoes", "update", "1"]).is_err());
    }
}
