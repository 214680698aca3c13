use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::services::query::{CheckedFilter, ItemQuery, ItemSort, ListSort};

#[derive(Parser)]
#[command(author, version, about = "Local shopping lists")]
pub struct Cli {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show lists
    Lists(ListsArgs),
    /// Create a new list
    Create(CreateArgs),
    /// Show one list with its items
    Show(ShowArgs),
    /// Rename a list or change its note
    Rename(RenameArgs),
    /// Append an item to a list
    AddItem(AddItemArgs),
    /// Flip an item's checked state
    Toggle { list_id: String, item_id: String },
    /// Remove an item from a list
    RemoveItem { list_id: String, item_id: String },
    Archive { list_id: String },
    Unarchive { list_id: String },
    /// Delete a list and all its items
    Delete { list_id: String },
    /// Write every list to a file (stdout when no file is given)
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Create lists from an export file
    Import { file: PathBuf },
    /// Print the category taxonomy
    Tags,
    /// Remove all stored data
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser, Clone)]
pub struct ListsArgs {
    /// Include archived lists
    #[arg(long, conflicts_with = "archived")]
    pub all: bool,
    /// Only archived lists
    #[arg(long)]
    pub archived: bool,
    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,
    /// Only lists with this tag id
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long, value_enum, default_value_t = SortArg::Newest)]
    pub sort: SortArg,
}

#[derive(Parser, Clone)]
pub struct ShowArgs {
    pub list_id: String,
    /// Only checked items
    #[arg(long, conflicts_with = "unchecked")]
    pub checked: bool,
    /// Only unchecked items
    #[arg(long)]
    pub unchecked: bool,
    /// Case-insensitive name or description search
    #[arg(long)]
    pub search: Option<String>,
    /// Only items with this sub-tag id
    #[arg(long)]
    pub sub_tag: Option<String>,
    #[arg(long, value_enum, default_value_t = ItemSortArg::Manual)]
    pub sort: ItemSortArg,
}

impl ShowArgs {
    pub fn query(&self) -> ItemQuery {
        let checked = match (self.checked, self.unchecked) {
            (true, _) => CheckedFilter::Checked,
            (_, true) => CheckedFilter::Unchecked,
            _ => CheckedFilter::All,
        };
        ItemQuery {
            search: self.search.clone(),
            checked,
            sub_tag: self.sub_tag.clone(),
            sort: self.sort.into(),
        }
    }
}

#[derive(Parser, Clone)]
pub struct CreateArgs {
    pub title: String,
    #[arg(long)]
    pub note: Option<String>,
    /// Tag id from `shoplist tags`
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Parser, Clone)]
pub struct RenameArgs {
    pub list_id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Parser, Clone)]
pub struct AddItemArgs {
    pub list_id: String,
    pub name: String,
    /// Amount and unit, e.g. "2 kg"
    #[arg(long, default_value = "1 pcs")]
    pub quantity: String,
    #[arg(long)]
    pub price: Option<f64>,
    /// Sub-tag id under the list's tag
    #[arg(long)]
    pub sub_tag: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Newest,
    Oldest,
    Title,
    Total,
}

impl From<SortArg> for ListSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => ListSort::Newest,
            SortArg::Oldest => ListSort::Oldest,
            SortArg::Title => ListSort::Title,
            SortArg::Total => ListSort::TotalPrice,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ItemSortArg {
    Manual,
    Name,
    Unchecked,
    Price,
}

impl From<ItemSortArg> for ItemSort {
    fn from(arg: ItemSortArg) -> Self {
        match arg {
            ItemSortArg::Manual => ItemSort::Manual,
            ItemSortArg::Name => ItemSort::Name,
            ItemSortArg::Unchecked => ItemSort::UncheckedFirst,
            ItemSortArg::Price => ItemSort::Price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_args(argv: &[&str]) -> ShowArgs {
        match Cli::parse_from(argv).command {
            Commands::Show(args) => args,
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn show_flags_build_an_item_query() {
        let args = show_args(&["shoplist", "show", "abc", "--unchecked", "--sort", "price"]);
        let query = args.query();
        assert_eq!(args.list_id, "abc");
        assert_eq!(query.checked, CheckedFilter::Unchecked);
        assert_eq!(query.sort, ItemSort::Price);

        let query = show_args(&["shoplist", "show", "abc"]).query();
        assert_eq!(query.checked, CheckedFilter::All);
        assert_eq!(query.sort, ItemSort::Manual);
    }

    #[test]
    fn checked_and_unchecked_conflict() {
        let result = Cli::try_parse_from(["shoplist", "show", "abc", "--checked", "--unchecked"]);
        assert!(result.is_err());
    }
}
