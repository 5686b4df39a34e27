use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use docsync::api::{CmdMessage, ConfigAction, DocsyncApi, MessageLevel, Payload, Transfer};
use docsync::config::DocsyncConfig;
use docsync::error::{DocsyncError, Result};
use docsync::format::format_modified;
use docsync::index::DisplayEntry;
use docsync::logging::init_logging;
use docsync::model::EntryType;
use docsync::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{BlobCommand, Cli, Commands, Direction, EntryKind};

const HOME_ENV: &str = "DOCSYNC_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DocsyncApi<FileStore>,
    pretty_json: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::Mkdir { name, parent }) => handle_mkdir(&mut ctx, name, parent),
        Some(Commands::Upload {
            name,
            id,
            kind,
            parent,
        }) => handle_upload(&mut ctx, name, id, kind, parent),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Show { entries }) => handle_show(&ctx, entries),
        Some(Commands::Delete { entries, recursive }) => handle_delete(&mut ctx, entries, recursive),
        Some(Commands::Blob { action }) => handle_blob(&ctx, action),
        Some(Commands::SyncComplete { generation }) => handle_sync_complete(&mut ctx, generation),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx),
    }
}

fn resolve_home(cli: &Cli) -> Result<PathBuf> {
    if let Some(home) = &cli.home {
        return Ok(home.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "docsync", "docsync")
        .ok_or_else(|| DocsyncError::Api("Could not determine data dir".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = resolve_home(cli)?;
    tracing::debug!(home = %home.display(), "using data directory");

    let config = DocsyncConfig::load(&home).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        DocsyncConfig::default()
    });
    let store = FileStore::new(home.clone());
    let api = DocsyncApi::new(store, home);

    Ok(AppContext {
        api,
        pretty_json: config.pretty_json,
    })
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_mkdir(ctx: &mut AppContext, name: String, parent: Option<String>) -> Result<()> {
    let result = ctx.api.mkdir(&name, parent.as_deref())?;
    print_payloads(&result.payloads, ctx.pretty_json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_upload(
    ctx: &mut AppContext,
    name: String,
    id: Option<String>,
    kind: EntryKind,
    parent: Option<String>,
) -> Result<()> {
    let entry_type = match kind {
        EntryKind::Document => EntryType::Document,
        EntryKind::Collection => EntryType::Collection,
    };
    let result = ctx
        .api
        .upload(&name, id.as_deref(), entry_type, parent.as_deref())?;
    print_payloads(&result.payloads, ctx.pretty_json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print_entries(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, entries: Vec<String>) -> Result<()> {
    let result = ctx.api.show(&entries)?;
    print_messages(&result.messages);
    print_payloads(&result.payloads, ctx.pretty_json)?;
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, entries: Vec<String>, recursive: bool) -> Result<()> {
    let result = ctx.api.delete(&entries, recursive)?;
    print_payloads(&result.payloads, ctx.pretty_json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_blob(ctx: &AppContext, action: BlobCommand) -> Result<()> {
    let result = match action {
        BlobCommand::Get(args) => ctx.api.blob_request(
            Transfer::Download,
            &args.path,
            args.parent.as_deref(),
            args.initial,
        )?,
        BlobCommand::Put(args) => ctx.api.blob_request(
            Transfer::Upload,
            &args.path,
            args.parent.as_deref(),
            args.initial,
        )?,
        BlobCommand::Root {
            direction,
            path,
            initial,
        } => {
            let transfer = match direction {
                Direction::Get => Transfer::Download,
                Direction::Put => Transfer::Upload,
            };
            ctx.api.blob_root_request(transfer, &path, initial)?
        }
    };
    print_payloads(&result.payloads, ctx.pretty_json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sync_complete(ctx: &mut AppContext, generation: Option<i64>) -> Result<()> {
    let result = ctx.api.sync_complete(generation)?;
    print_payloads(&result.payloads, ctx.pretty_json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in DocsyncConfig::keys() {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_payloads(payloads: &[Payload], pretty: bool) -> Result<()> {
    for payload in payloads {
        let body = if pretty {
            serde_json::to_string_pretty(&payload.body)?
        } else {
            serde_json::to_string(&payload.body)?
        };
        println!("{}", format!("# {}", payload.kind).cyan());
        println!("{}", body);
    }
    Ok(())
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const INDENT: &str = "  ";
const FOLDER_MARKER: &str = "▸";

fn print_entries(entries: &[DisplayEntry]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    let now = Utc::now();
    let mut detached_header = false;
    for entry in entries {
        if entry.detached && !detached_header {
            println!();
            println!("{}", "Detached:".yellow());
            detached_header = true;
        }

        let doc = &entry.document;
        let idx_str = format!("{}. ", entry.index);
        let marker = if doc.is_collection() {
            format!("{} ", FOLDER_MARKER)
        } else {
            "  ".to_string()
        };
        let left = format!("{}{}{}", INDENT.repeat(entry.depth + 1), idx_str, marker);
        let version = format!("v{} ", doc.version);
        let modified = format!(
            "{:>width$}",
            format_modified(&doc.modified_client, now),
            width = TIME_WIDTH
        );

        let fixed_width = left.width() + version.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name = truncate_to_width(&doc.visible_name, available);
        let padding = available.saturating_sub(name.width());

        let name_colored = if doc.is_collection() {
            name.bold()
        } else {
            name.normal()
        };

        println!(
            "{}{}{}{}{}",
            left,
            name_colored,
            " ".repeat(padding),
            version.dimmed(),
            modified.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
