//! # CLI Layer
//!
//! One possible client of the catalog library, and the only place that
//! touches stdout, stderr and exit codes.
//!
//! - `run()`: parses arguments, sets up logging and the context, dispatches
//! - `handle_*()`: per-command handlers that call [`DjApi`] and print
//! - rendering lives in `render.rs`

use super::logging::init_logging;
use super::render::{
    print_config, print_full_records, print_messages, print_record_list, print_stats,
    print_text_list,
};
use super::setup::{AddArgs, Cli, Commands, SearchArgs};
use clap::Parser;
use diskjockey::api::{ConfigAction, DjApi, NewMedium, ScanMode};
use diskjockey::error::Result;
use diskjockey::init::initialize;
use diskjockey::model::MediumDetails;
use diskjockey::query::Query;
use diskjockey::store::fs::FileStore;

struct AppContext {
    api: DjApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add(&ctx, args),
        Some(Commands::Rescan { id, target, append }) => {
            handle_rescan(&ctx, &id, target.as_deref(), append)
        }
        Some(Commands::Media) => handle_media(&ctx),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Show { ids }) => handle_show(&ctx, &ids),
        Some(Commands::Tag { id, tags }) => handle_tag(&ctx, &id, &tags),
        Some(Commands::Search(args)) => handle_search(&ctx, args),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Types { add }) => handle_types(&ctx, add),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.testing)?;
    Ok(AppContext { api: ctx.api })
}

fn handle_add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let root = ctx.api.select_medium(args.target.as_deref())?;
    let mut request = NewMedium::new(root)
        .with_tags(args.tags)
        .with_details(MediumDetails {
            is_encrypted: args.encrypted,
            storage_location: args.location,
            capacity: args.capacity,
        });
    if let Some(label) = args.label {
        request = request.with_label(label);
    }

    let result = ctx.api.add_medium(request)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rescan(ctx: &AppContext, id: &str, target: Option<&str>, append: bool) -> Result<()> {
    let root = ctx.api.select_medium(target)?;
    let mode = if append {
        ScanMode::Append
    } else {
        ScanMode::Reset
    };
    let result = ctx.api.rescan_medium(id, &root, mode)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_media(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.candidate_media()?;
    print_text_list(&result.candidates);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_media()?;
    print_record_list(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let result = ctx.api.show_media(ids)?;
    print_full_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tag(ctx: &AppContext, id: &str, tags: &[String]) -> Result<()> {
    let result = ctx.api.tag_medium(id, tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let query = match (args.tag, args.label, args.path) {
        (Some(tag), _, _) => Query::Tag(tag),
        (_, Some(label), _) => Query::Label(label),
        (_, _, Some(path)) => Query::Path(path),
        (None, None, None) => return handle_list(ctx),
    };
    let result = ctx.api.search(&query)?;
    print_record_list(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show_stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_types(ctx: &AppContext, add: Option<String>) -> Result<()> {
    let result = match add {
        Some(name) => ctx.api.add_media_type(&name)?,
        None => ctx.api.media_types()?,
    };
    print_text_list(&result.media_types);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
