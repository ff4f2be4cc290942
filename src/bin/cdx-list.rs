use cdx_list::config::{ToolConfig, config_file_path};
use cdx_list::host::RecordingHost;
use cdx_list::policy::tool_policy;
use cdx_list::{
    CaretContext, Key, KeyOutcome, ListData, ListError, ListRecord, ListStyle, ListTool,
    MemoryView,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cdx-list")]
#[command(about = "Inspect and exercise list block data", long_about = None)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render saved data as the block's HTML
    Render {
        /// JSON record file, or - for stdin
        record: PathBuf,
    },
    /// Load saved data and save it again (drops blank items)
    Save {
        /// JSON record file, or - for stdin
        record: PathBuf,
    },
    /// Normalize pasted <ol>, <ul> or <li> markup into list data
    Paste {
        /// Pasted markup
        markup: String,
    },
    /// Convert list data to a plain string
    Export {
        /// JSON record file, or - for stdin
        record: PathBuf,
    },
    /// Convert a plain string to list data
    Import {
        /// Text to put into the first item
        text: String,
    },
    /// Replay key presses against saved data and print the result
    Keys {
        /// JSON record file, or - for stdin
        record: PathBuf,
        /// Key presses as KEY@ITEM, e.g. enter@2 backspace@0 select-all@1
        #[arg(required = true)]
        keys: Vec<KeyPress>,
        /// Switch style before replaying
        #[arg(long)]
        style: Option<ListStyle>,
    },
    /// Print the sanitize, paste and toolbox tables
    Policy,
}

#[derive(Debug, Clone)]
struct KeyPress {
    key: Key,
    caret: CaretContext,
}

impl FromStr for KeyPress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, item) = match s.split_once('@') {
            Some((name, item)) => (name, Some(item)),
            None => (s, None),
        };
        let key = match name {
            "enter" => Key::Enter,
            "backspace" => Key::Backspace,
            "select-all" => Key::SelectAll,
            "other" => Key::Other,
            _ => return Err(format!("unknown key '{}'", name)),
        };
        let caret = match item {
            Some(item) => CaretContext::in_item(
                item.parse::<usize>()
                    .map_err(|e| format!("invalid item index '{}': {}", item, e))?,
            ),
            None => CaretContext::outside(),
        };
        Ok(KeyPress { key, caret })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn load_config(path: Option<PathBuf>) -> Result<ToolConfig, ListError> {
    match path.or_else(config_file_path) {
        Some(path) => ToolConfig::load(&path),
        None => Ok(ToolConfig::default()),
    }
}

fn read_input(path: &Path) -> Result<String, ListError> {
    if path == Path::new("-") {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .map_err(|source| ListError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(contents);
    }

    fs::read_to_string(path).map_err(|source| ListError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_data(path: &Path) -> Result<ListData, ListError> {
    let contents = read_input(path)?;
    Ok(serde_json::from_str::<ListData>(&contents)?)
}

fn rendered_tool(data: ListData, config: ToolConfig) -> ListTool<MemoryView, RecordingHost> {
    let mut tool = ListTool::new(Some(data), config, RecordingHost::new());
    let view = MemoryView::new(tool.css().clone());
    tool.render(view);
    tool
}

fn print_record(record: &ListRecord) -> Result<(), ListError> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

fn cmd_render(record: &Path, config: ToolConfig) -> Result<(), ListError> {
    let tool = rendered_tool(read_data(record)?, config);
    if let Some(view) = tool.view() {
        println!("{}", view.to_html());
    }
    Ok(())
}

fn cmd_save(record: &Path, config: ToolConfig) -> Result<(), ListError> {
    let mut tool = rendered_tool(read_data(record)?, config);
    print_record(&tool.save())
}

fn cmd_paste(markup: &str, config: ToolConfig) -> Result<(), ListError> {
    let mut tool = rendered_tool(ListData::default(), config);
    tool.paste_markup(markup)?;
    print_record(&tool.save())
}

fn cmd_export(record: &Path, config: ToolConfig) -> Result<(), ListError> {
    let record = read_data(record)?.resolve(config.default_style);
    println!("{}", record.export());
    Ok(())
}

fn cmd_import(text: &str) -> Result<(), ListError> {
    print_record(&ListRecord::import(text))
}

fn cmd_keys(
    record: &Path,
    keys: &[KeyPress],
    style: Option<ListStyle>,
    config: ToolConfig,
) -> Result<(), ListError> {
    let mut tool = rendered_tool(read_data(record)?, config);
    if let Some(style) = style {
        tool.toggle_style(style);
    }

    for press in keys {
        let outcome = tool.handle_key(press.key, press.caret);
        println!("{:?} {:?} -> {:?}", press.key, press.caret.item, outcome);

        // Stand in for the native behaviour the host would run
        if outcome == KeyOutcome::Continue
            && press.key == Key::Enter
            && let (Some(item), Some(view)) = (press.caret.item, tool.view_mut())
        {
            view.insert_item_after(item);
        }
    }

    if let Some(view) = tool.view() {
        println!("{}", view.to_html());
    }
    println!("inserted blocks: {}", tool.host().inserted_blocks);
    print_record(&tool.save())
}

fn cmd_policy() -> Result<(), ListError> {
    println!("{}", serde_json::to_string_pretty(&tool_policy())?);
    Ok(())
}

fn main() {
    init_tracing();

    let args = Args::parse();

    let config = match load_config(args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Render { record } => cmd_render(&record, config),
        Commands::Save { record } => cmd_save(&record, config),
        Commands::Paste { markup } => cmd_paste(&markup, config),
        Commands::Export { record } => cmd_export(&record, config),
        Commands::Import { text } => cmd_import(&text),
        Commands::Keys { record, keys, style } => cmd_keys(&record, &keys, style, config),
        Commands::Policy => cmd_policy(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
