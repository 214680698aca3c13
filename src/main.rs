use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;

use shoplist::{
    cli::{AddItemArgs, Cli, Commands, CreateArgs, ListsArgs, RenameArgs},
    config::AppConfig,
    db::{SeaKv, connection},
    logging::init_tracing,
    models::{Item, ListPatch, NewList, Quantity, ShoppingList, TAXONOMY, tag::find_tag},
    services::{
        StoreContext,
        currency::format_price,
        interchange::item_category,
        query::{ItemQuery, ListQuery, filter_items, filter_lists},
    },
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("shoplist failed: {err:?}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = AppConfig::from_env().context("failed to load config")?;
    if let Some(url) = cli.database_url {
        cfg = cfg.with_database_url(url);
    }
    init_tracing(&cfg)?;

    let db = connection::connect(&cfg).await?;
    let ctx = StoreContext::new(Arc::new(SeaKv::new(&db)));
    execute(&ctx, &cfg, cli.command).await
}

async fn execute(ctx: &StoreContext, cfg: &AppConfig, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Lists(args) => print_lists(ctx, cfg, args).await?,
        Commands::Create(args) => create_list(ctx, args).await?,
        Commands::Show(args) => show_list(ctx, cfg, &args.list_id, &args.query()).await?,
        Commands::Rename(args) => rename_list(ctx, args).await?,
        Commands::AddItem(args) => add_item(ctx, args).await?,
        Commands::Toggle { list_id, item_id } => {
            require_list(ctx, &list_id).await?;
            ctx.items().toggle_item(&list_id, &item_id).await?;
            show_list(ctx, cfg, &list_id, &ItemQuery::default()).await?;
        }
        Commands::RemoveItem { list_id, item_id } => {
            require_list(ctx, &list_id).await?;
            ctx.items().remove_item(&list_id, &item_id).await?;
            show_list(ctx, cfg, &list_id, &ItemQuery::default()).await?;
        }
        Commands::Archive { list_id } => ctx.lists().archive_list(&list_id).await?,
        Commands::Unarchive { list_id } => ctx.lists().unarchive_list(&list_id).await?,
        Commands::Delete { list_id } => ctx.lists().delete_list(&list_id).await?,
        Commands::Export { out } => match out {
            Some(path) => {
                let bytes = ctx.interchange().export_to_file(&path).await?;
                eprintln!("wrote {bytes} bytes to {}", path.display());
            }
            None => print!("{}", ctx.interchange().export_all().await?),
        },
        Commands::Import { file } => {
            let report = ctx
                .interchange()
                .import_from_file(&file)
                .await
                .with_context(|| format!("import from {} failed", file.display()))?;
            println!(
                "imported {} list(s), skipped {} block(s)",
                report.created.len(),
                report.skipped_blocks
            );
        }
        Commands::Tags => {
            for tag in TAXONOMY {
                println!("{:<14} {}", tag.id, tag.label);
                for sub in tag.sub_tags {
                    println!("  {:<12} {}", sub.id, sub.label);
                }
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to wipe all lists without --yes");
            }
            ctx.reset().await?;
        }
    }
    Ok(())
}

async fn require_list(ctx: &StoreContext, list_id: &str) -> anyhow::Result<ShoppingList> {
    ctx.lists()
        .get_list(list_id)
        .await?
        .with_context(|| format!("list {list_id} not found"))
}

async fn print_lists(ctx: &StoreContext, cfg: &AppConfig, args: ListsArgs) -> anyhow::Result<()> {
    let lists = if args.archived {
        ctx.lists().list_archived().await?
    } else {
        ctx.lists().list_lists(args.all).await?
    };
    let query = ListQuery {
        search: args.search,
        tag_id: args.tag,
        sort: args.sort.into(),
    };
    for list in filter_lists(lists, &query) {
        let tag = list.tag.as_ref().map(|t| t.label.as_str()).unwrap_or("-");
        let archived = if list.is_archived { " (archived)" } else { "" };
        println!(
            "{}  {}  [{}]  {} item(s)  {}{}",
            list.id,
            list.title,
            tag,
            list.item_count,
            format_price(list.total_price, &cfg.locale),
            archived
        );
    }
    Ok(())
}

async fn create_list(ctx: &StoreContext, args: CreateArgs) -> anyhow::Result<()> {
    let mut input = NewList::titled(args.title);
    if let Some(note) = args.note {
        input = input.with_note(note);
    }
    if let Some(tag_id) = args.tag {
        let tag = find_tag(&tag_id).with_context(|| format!("unknown tag `{tag_id}`"))?;
        input = input.with_tag(tag.to_tag());
    }
    let list = ctx.lists().create_list(input).await?;
    println!("{}", list.id);
    Ok(())
}

async fn show_list(
    ctx: &StoreContext,
    cfg: &AppConfig,
    list_id: &str,
    query: &ItemQuery,
) -> anyhow::Result<()> {
    let list = require_list(ctx, list_id).await?;
    let items = filter_items(ctx.items().get_items(list_id).await?, query);

    println!("{} ({})", list.title, list.created_at.format("%b %-d, %Y"));
    if let Some(note) = list.note.as_deref().filter(|n| !n.is_empty()) {
        println!("  {note}");
    }
    for item in &items {
        let mark = if item.checked { "x" } else { " " };
        let price = item
            .price
            .map(|p| format!("  {}", format_price(p, &cfg.locale)))
            .unwrap_or_default();
        println!(
            "[{mark}] {}  {}  {}{}  ({})",
            item.name,
            item.quantity,
            item_category(&list, item),
            price,
            item.id
        );
    }
    println!(
        "{} item(s), total {}",
        list.item_count,
        format_price(list.total_price, &cfg.locale)
    );
    Ok(())
}

async fn rename_list(ctx: &StoreContext, args: RenameArgs) -> anyhow::Result<()> {
    if args.title.is_none() && args.note.is_none() {
        bail!("nothing to change: pass --title and/or --note");
    }
    let patch = ListPatch {
        title: args.title,
        note: args.note.map(Some),
        tag: None,
    };
    ctx.lists()
        .update_list(&args.list_id, patch)
        .await?
        .with_context(|| format!("list {} not found", args.list_id))?;
    Ok(())
}

async fn add_item(ctx: &StoreContext, args: AddItemArgs) -> anyhow::Result<()> {
    let list = require_list(ctx, &args.list_id).await?;
    let quantity: Quantity = args
        .quantity
        .parse()
        .with_context(|| format!("invalid quantity `{}`", args.quantity))?;

    let mut item = Item::new(args.name, quantity.to_string());
    if let Some(price) = args.price {
        item = item.with_price(price);
    }
    if let Some(description) = args.description {
        item = item.with_description(description);
    }
    if let Some(sub_tag) = args.sub_tag {
        let known = list
            .tag
            .as_ref()
            .and_then(|tag| find_tag(&tag.id))
            .is_some_and(|tag| tag.sub_tag(&sub_tag).is_some());
        if !known {
            bail!("sub-tag `{sub_tag}` does not belong to this list's tag");
        }
        item = item.with_sub_tag(sub_tag);
    }

    let item_id = item.id.clone();
    ctx.items().add_item(&list.id, item).await?;
    println!("{item_id}");
    Ok(())
}
