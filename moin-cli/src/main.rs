// Command-line interface for the moin markup migration
//
// This binary converts MoinMoin wiki pages written in the 1.5 markup to the 1.6 markup,
// renaming page and attachment references along the way. The conversion itself lives in
// the moin-babel crate; this binary only reads files, loads configuration and reports.
//
// Usage:
//  moinconv <input> [--page <name>] [--renames <file>] [-o <file>]   - Convert one page (default)
//  moinconv convert <input> ...                                      - Same as above (explicit)
//  moinconv migrate <pages-dir> [--renames <file>] [-o <dir>]        - Convert a page directory
//  moinconv inspect <input>                                          - Show the rule matches per line
//  moinconv macros                                                   - List the known macro names
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<key> <value>, for example
//  moinconv page.txt --extra-bang-meta false --extra-interwiki-name MyWiki

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use moin_babel::converter::is_processing_instruction;
use moin_babel::{
    migrate_pages, ConversionRequest, ConvertError, Grammar, InterwikiMap, MemoryPageStore,
    Migration, MigrationReport, PageStore, RenameMap, Wiki,
};
use moin_cli::store::DirPageStore;
use moin_config::{Loader, MoinConfig};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "migrate", "inspect", "macros", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn page_source_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("renames")
            .long("renames")
            .value_name("FILE")
            .help("Rename list (PAGE|old|new and FILE|page|old|new lines)")
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("intermap")
            .long("intermap")
            .value_name("FILE")
            .help("intermap.txt with additional interwiki tags")
            .value_hint(ValueHint::FilePath),
    )
}

fn build_cli() -> Command {
    Command::new("moinconv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Migrate MoinMoin 1.5 wiki pages to the 1.6 markup")
        .long_about(
            "moinconv rewrites wiki pages written in the MoinMoin 1.5 markup so that\n\
            they read the same under the 1.6 markup, and applies page and attachment\n\
            renames to every link on the way.\n\n\
            Commands:\n  \
            - convert: Convert a single page (default)\n  \
            - migrate: Convert every page of a page directory\n  \
            - inspect: Show which markup rule matches where\n  \
            - macros:  List the macro names the converter knows\n\n\
            Extra Parameters:\n  \
            Use --extra-<key> [value] to override configuration keys:\n  \
            bang-meta, interwiki-name, extension, macros (comma separated).\n\n\
            Examples:\n  \
            moinconv FrontPage.txt --page FrontPage          # Convert to stdout\n  \
            moinconv migrate pages/ --renames renames.txt    # Convert a page directory in place\n  \
            moinconv migrate pages/ -o converted/ --json     # Write elsewhere, JSON report",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a moin.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(page_source_args(
            Command::new("convert")
                .about("Convert a single page (default command)")
                .long_about(
                    "Convert one page file from the 1.5 to the 1.6 markup.\n\n\
                    The page name decides how relative links and attachments resolve;\n\
                    it defaults to the file name without its extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    moinconv convert Alpha.txt --page Projects/Alpha\n  \
                    moinconv Alpha.txt --page Projects/Alpha --renames renames.txt -o Alpha.new",
                )
                .arg(
                    Arg::new("input")
                        .help("Page file in 1.5 markup")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_name("NAME")
                        .help("Name of the page (defaults to the file name)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .value_name("DIR")
                        .help("Page directory used to look up existing pages")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        ))
        .subcommand(page_source_args(
            Command::new("migrate")
                .about("Convert every page of a page directory")
                .long_about(
                    "Convert every page file below a page directory.\n\n\
                    Pages are rewritten in place unless -o names an output directory.\n\
                    A page that fails to convert is reported and left alone; the exit\n\
                    status is 1 when any page failed.",
                )
                .arg(
                    Arg::new("pages")
                        .help("Page directory")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Directory for the converted pages")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(
            Command::new("inspect")
                .about("List the rule matches of every line of a page")
                .arg(
                    Arg::new("path")
                        .help("Page file in 1.5 markup")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("macros").about("List the known macro names"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A file as first argument means the convert command
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    if let Some(key) = extra_params.keys().min() {
        eprintln!("Error: unknown option --extra-{key}");
        std::process::exit(1);
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        Some(("migrate", sub_matches)) => handle_migrate_command(sub_matches, &config),
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            handle_inspect_command(path, &config);
        }
        Some(("macros", _)) => handle_macros_command(&config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// --verbose logs at info level, otherwise RUST_LOG decides
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn required<'m>(matches: &'m ArgMatches, id: &str) -> &'m str {
    match matches.get_one::<String>(id) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument <{id}>");
            std::process::exit(1);
        }
    }
}

/// What every page of a run is converted with
struct Session {
    grammar: Grammar,
    interwiki: InterwikiMap,
    renames: RenameMap,
}

fn load_session(matches: &ArgMatches, config: &MoinConfig) -> Session {
    let grammar = Grammar::build(&config.grammar_config()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let mut interwiki = config.interwiki_map();
    if let Some(path) = matches.get_one::<String>("intermap") {
        interwiki.extend_from_intermap(&read_file(path));
    }

    let renames = match matches.get_one::<String>("renames") {
        Some(path) => RenameMap::parse(&read_file(path)).unwrap_or_else(|e| {
            eprintln!("Error: {path}: {e}");
            std::process::exit(1);
        }),
        None => RenameMap::new(),
    };

    Session {
        grammar,
        interwiki,
        renames,
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn open_store(dir: &str, config: &MoinConfig) -> DirPageStore {
    DirPageStore::open(dir, &config.migrate.extension).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// Page name for a page file given without --page
fn page_name_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &MoinConfig) {
    let input = required(matches, "input");
    let source = read_file(input);
    let page_name = matches
        .get_one::<String>("page")
        .cloned()
        .unwrap_or_else(|| page_name_from_path(input));
    let session = load_session(matches, config);

    // Without a page directory only the page itself is known to exist
    let store: Box<dyn PageStore> = match matches.get_one::<String>("pages") {
        Some(dir) => Box::new(open_store(dir, config)),
        None => Box::new(MemoryPageStore::with_names([page_name.as_str()])),
    };
    let wiki = Wiki {
        grammar: &session.grammar,
        store: store.as_ref(),
        interwiki: &session.interwiki,
    };
    info!(page = %page_name, renames = session.renames.len(), "converting page");
    let request = ConversionRequest::new(&page_name, &source, &session.renames)
        .with_bang_meta(config.convert.bang_meta);
    let converted = moin_babel::convert(&request, &wiki).unwrap_or_else(|e| {
        eprintln!("Error: {page_name}: {e}");
        std::process::exit(1);
    });

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, converted).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{converted}"),
    }
}

/// Handle the migrate command
fn handle_migrate_command(matches: &ArgMatches, config: &MoinConfig) {
    let pages = required(matches, "pages");
    let session = load_session(matches, config);
    let mut store = open_store(pages, config);
    if let Some(output) = matches.get_one::<String>("output") {
        store = store.with_output(output);
    }
    info!(
        pages,
        renames = session.renames.len(),
        interwiki = session.interwiki.len(),
        "migrating page directory"
    );

    let migration = Migration {
        grammar: &session.grammar,
        interwiki: &session.interwiki,
        renames: &session.renames,
        bang_meta: config.convert.bang_meta,
    };
    let report = migrate_pages(&mut store, &migration).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
        println!("{json}");
    } else {
        print!("{}", format_report(&report));
    }

    if !report.is_success() {
        eprintln!(
            "Error: {} of {} pages failed to migrate",
            report.failed.len(),
            report.total()
        );
        std::process::exit(1);
    }
}

fn format_report(report: &MigrationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Converted: {}", report.converted.len());
    for page in &report.converted {
        let _ = writeln!(out, "  {page}");
    }
    let _ = writeln!(out, "Unchanged: {}", report.unchanged.len());
    if !report.failed.is_empty() {
        let _ = writeln!(out, "Failed: {}", report.failed.len());
        for failed in &report.failed {
            let _ = writeln!(out, "  {}: {}", failed.page, failed.error);
        }
    }
    out
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, config: &MoinConfig) {
    let source = read_file(path);
    let grammar = Grammar::build(&config.grammar_config()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let output = inspect_lines(&grammar, &source).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    print!("{output}");
}

/// One row per match: line number, rule and matched text
fn inspect_lines(grammar: &Grammar, source: &str) -> Result<String, ConvertError> {
    let mut out = String::new();
    let mut in_pre = false;
    let mut in_processing_instructions = true;
    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if in_processing_instructions {
            if is_processing_instruction(line) {
                let _ = writeln!(out, "{:>4}  {:<16} {line}", index + 1, "directive");
                continue;
            }
            in_processing_instructions = false;
        }
        let events = grammar.matches(line, in_pre)?;
        for event in &events {
            let rule = format!("{:?}", event.rule);
            let _ = writeln!(out, "{:>4}  {rule:<16} {}", index + 1, event.text);
            in_pre = event.pre_after(in_pre);
        }
    }
    Ok(out)
}

/// Handle the macros command
fn handle_macros_command(config: &MoinConfig) {
    for name in config.macro_registry().names() {
        println!("{name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MoinConfig {
    let loader = Loader::new().with_optional_file("moin.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Error: failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut MoinConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["bang-meta", "bang_meta"]) {
        config.convert.bang_meta = parse_bool_arg("bang-meta", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["interwiki-name", "interwikiname"]) {
        config.convert.interwiki_name = raw;
    }
    if let Some(raw) = take_override(extra_params, &["extension"]) {
        config.migrate.extension = raw;
    }
    if let Some(raw) = take_override(extra_params, &["macros"]) {
        config.macros.extra.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Error: invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
