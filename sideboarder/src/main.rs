//! Sideboarder - MTG sideboard guide builder
//!
//! Builds a sideboard guide from decklist files (or an MTGGoldfish link)
//! and `--matchup` swaps, saves it as JSON, and renders saved guides as a
//! text table or PNG.

use clap::{Args, Parser, Subcommand};
use mtg_common::{CardId, RawDecklist, Zone};
use sideboarder::api::{DeckSource, GoldfishClient};
use sideboarder::cache::{render_png_cached, ParseCache, RenderCache};
use sideboarder::formatters::{
    format_changes, format_deck_summary, format_matchup_list, format_matrix_table,
};
use sideboarder::image_export::{encode_png, print_page, ImageLayout};
use sideboarder::persist::{default_file_name, load_guide, save_guide};
use sideboarder::{assemble, Adjustment, Error, Result, RowOrder, Selections, Session};
use std::path::{Path, PathBuf};

/// MTG sideboard guide builder - per-matchup OUT/IN swaps as JSON, table or PNG
#[derive(Parser, Debug)]
#[command(name = "sideboarder")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a new guide from a decklist and matchup swaps
    New(NewArgs),
    /// Print a saved guide (most recent matchup first)
    Show {
        /// Saved guide JSON file
        guide: PathBuf,
    },
    /// Render a saved guide to PNG
    Render(RenderArgs),
    /// Rename, replace or delete a matchup in a saved guide
    Edit(EditArgs),
}

#[derive(Args, Debug)]
struct NewArgs {
    /// Mainboard decklist file, one "4 Lightning Bolt" per line
    #[arg(long, required_unless_present = "goldfish")]
    main: Option<PathBuf>,

    /// Sideboard decklist file
    #[arg(long, requires = "main")]
    side: Option<PathBuf>,

    /// MTGGoldfish deck URL instead of decklist files
    #[arg(long, conflicts_with_all = ["main", "side"])]
    goldfish: Option<String>,

    /// Matchup swaps: "NAME=-2 Card;+2 Other Card" (repeatable)
    #[arg(short, long = "matchup", value_parser = parse_matchup_arg)]
    matchups: Vec<MatchupArg>,

    /// Output file (default: sideboarder_<date>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Saved guide JSON file
    guide: PathBuf,

    /// PNG output file (default: sideboarder_<date>.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the image centered on an A4 page to this file
    #[arg(long)]
    print_page: Option<PathBuf>,

    /// Fixed 3.5" x 2.5" canvas instead of sizing to the matrix
    #[arg(long, default_value_t = false)]
    card_sized: bool,

    /// Render cache directory (default: user cache dir)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Always redraw, never read or write the render cache
    #[arg(long, default_value_t = false, conflicts_with = "cache_dir")]
    no_cache: bool,
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Saved guide JSON file
    guide: PathBuf,

    /// Matchup number as listed by `show`
    #[arg(short, long)]
    index: Option<usize>,

    /// New name for the matchup, keeping its swaps
    #[arg(long, requires = "index", conflicts_with_all = ["replace", "delete"])]
    rename: Option<String>,

    /// Replacement swaps: "NAME=-2 Card;+2 Other Card"
    #[arg(long, requires = "index", conflicts_with = "delete", value_parser = parse_matchup_arg)]
    replace: Option<MatchupArg>,

    /// Remove the matchup
    #[arg(long, default_value_t = false, requires = "index")]
    delete: bool,

    /// Output file (default: overwrite the input guide)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the changes without saving
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

/// One `--matchup` argument
#[derive(Debug, Clone, PartialEq, Eq)]
struct MatchupArg {
    name: String,
    out_selections: Selections,
    in_selections: Selections,
}

/// Parse "NAME=-2 Card;+1 Other Card". `-N` takes mainboard copies out,
/// `+N` brings sideboard copies in.
fn parse_matchup_arg(raw: &str) -> std::result::Result<MatchupArg, String> {
    let (name, swaps) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SWAPS, got {:?}", raw))?;

    let mut out_selections = Selections::new();
    let mut in_selections = Selections::new();

    for swap in swaps.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (amount, card) = swap
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("expected \"-N Card\" or \"+N Card\", got {:?}", swap))?;
        let card = card.trim();
        if card.is_empty() {
            return Err(format!("missing card name in {:?}", swap));
        }
        match Adjustment::parse(amount) {
            Some(Adjustment::Out(n)) => out_selections.insert(CardId::new(Zone::Mainboard, card), n),
            Some(Adjustment::In(n)) => in_selections.insert(CardId::new(Zone::Sideboard, card), n),
            None => return Err(format!("{:?} is not -N or +N", amount)),
        };
    }

    Ok(MatchupArg {
        name: name.trim().to_string(),
        out_selections,
        in_selections,
    })
}

fn read_text(path: &Path) -> Result<String> {
    log::debug!("Reading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

fn run_new(args: NewArgs) -> Result<()> {
    let raw = match (&args.goldfish, &args.main) {
        (Some(url), _) => {
            let source = GoldfishClient::new();
            if !source.accepts(url) {
                return Err(Error::Import(format!(
                    "{} does not look like a {} deck link",
                    url,
                    source.name()
                )));
            }
            source.fetch_deck(url)?
        }
        (None, Some(main)) => {
            let mut parser = ParseCache::new();
            let mainboard = parser.parse(&read_text(main)?);
            let sideboard = match &args.side {
                Some(side) => parser.parse(&read_text(side)?),
                None => Default::default(),
            };
            RawDecklist::new(mainboard, sideboard)
        }
        (None, None) => {
            return Err(Error::Import("no decklist given".to_string()));
        }
    };

    let mut session = Session::new();
    let report = session.load_deck(raw)?;
    if !report.is_complete() {
        let zones: Vec<&str> = report.empty_zones.iter().map(|z| z.as_str()).collect();
        println!("Warning: empty {}", zones.join(" and "));
    }

    for matchup in &args.matchups {
        if let Some(totals) =
            session.propose_add(&matchup.name, &matchup.out_selections, &matchup.in_selections)?
        {
            println!("Warning: '{}' is {}", matchup.name, totals);
        }
        session.confirm()?;
    }

    if let (Some(deck), Some(labels)) = (session.deck(), session.labels()) {
        print!("{}", format_deck_summary(deck, labels));
        print!("{}", format_matrix_table(&session.preview(), labels)?);
    }

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_file_name("json")));
    let guide = session.export()?;
    std::fs::write(&output, guide.to_json_pretty()?)?;
    println!("Saved guide to {}", output.display());
    Ok(())
}

fn run_show(guide: &Path) -> Result<()> {
    let session = Session::from_guide(load_guide(guide)?);
    let (Some(deck), Some(labels)) = (session.deck(), session.labels()) else {
        return Ok(());
    };

    print!("{}", format_deck_summary(deck, labels));
    print!("{}", format_matchup_list(session.matchups()));
    println!();
    print!("{}", format_matrix_table(&session.preview(), labels)?);
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<()> {
    let guide = load_guide(&args.guide)?;
    let matrix = assemble(&guide.deck, &guide.matchups, RowOrder::Insertion);
    let layout = if args.card_sized {
        ImageLayout::CardSized
    } else {
        ImageLayout::Scaled
    };

    let cache = if args.no_cache {
        None
    } else {
        Some(match args.cache_dir {
            Some(dir) => RenderCache::with_dir(dir),
            None => RenderCache::new(),
        })
    };

    let png = render_png_cached(cache.as_ref(), &matrix, &guide.labels, layout)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_file_name("png")));
    std::fs::write(&output, &png)?;
    println!("Wrote {}", output.display());

    if let Some(page_path) = args.print_page {
        let image = image::load_from_memory(&png)?.to_rgb8();
        std::fs::write(&page_path, encode_png(&print_page(&image))?)?;
        println!("Wrote print page {}", page_path.display());
    }
    Ok(())
}

fn run_edit(args: EditArgs) -> Result<()> {
    let mut session = Session::from_guide(load_guide(&args.guide)?);

    let Some(number) = args.index else {
        print!("{}", format_matchup_list(session.matchups()));
        return Ok(());
    };
    // Listed from 1; 0 maps past the end so the session reports it
    let index = number.checked_sub(1).unwrap_or(usize::MAX);

    let labels = session.labels().cloned().unwrap_or_default();
    if args.delete {
        let row = session.propose_delete(index)?;
        println!("Deleting matchup '{}'", row.name());
    } else {
        let current = session.matchups().get(index).cloned();
        let (name, outs, ins) = match (&args.replace, &args.rename, current) {
            (Some(replace), _, _) => (
                replace.name.clone(),
                replace.out_selections.clone(),
                replace.in_selections.clone(),
            ),
            (None, Some(name), Some(row)) => (name.clone(), row.out_selections(), row.in_selections()),
            (None, Some(name), None) => (name.clone(), Selections::new(), Selections::new()),
            (None, None, _) => {
                return Err(Error::Import(
                    "nothing to do: pass --rename, --replace or --delete".to_string(),
                ))
            }
        };
        let proposal = session.propose_edit(index, &name, &outs, &ins)?;
        print!("{}", format_changes(&proposal.changes, &labels));
        if let Some(totals) = proposal.mismatch {
            println!("Warning: '{}' is {}", name, totals);
        }
    }

    if args.dry_run {
        session.cancel();
        println!("Dry run, nothing saved");
        return Ok(());
    }
    session.confirm()?;

    let output = args.output.unwrap_or(args.guide);
    let deck = session.deck().cloned().unwrap_or_default();
    save_guide(&output, &deck, session.matchups())?;
    println!("Saved guide to {}", output.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::New(args) => run_new(args),
        Command::Show { guide } => run_show(&guide),
        Command::Render(args) => run_render(args),
        Command::Edit(args) => run_edit(args),
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn id(raw: &str) -> CardId {
        CardId::parse(raw).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_matchup_arg() {
        let arg = parse_matchup_arg("Burn=-2 Lightning Bolt;+2 Prismatic Ending").unwrap();

        assert_eq!(arg.name, "Burn");
        assert_eq!(arg.out_selections.get(&id("MB:Lightning Bolt")), Some(&2));
        assert_eq!(arg.in_selections.get(&id("SB:Prismatic Ending")), Some(&2));
    }

    #[test]
    fn test_parse_matchup_arg_trims_and_skips_empty_swaps() {
        let arg = parse_matchup_arg(" UW Control = -1 Goblin Guide ; ;+1 Path to Exile ;").unwrap();

        assert_eq!(arg.name, "UW Control");
        assert_eq!(arg.out_selections.len(), 1);
        assert_eq!(arg.in_selections.get(&id("SB:Path to Exile")), Some(&1));
    }

    #[test]
    fn test_parse_matchup_arg_errors() {
        assert!(parse_matchup_arg("Burn -2 Lightning Bolt").is_err());
        assert!(parse_matchup_arg("Burn=2 Lightning Bolt").is_err());
        assert!(parse_matchup_arg("Burn=-0 Lightning Bolt").is_err());
        assert!(parse_matchup_arg("Burn=-2").is_err());
        assert!(parse_matchup_arg("Burn=-2 ").is_err());
    }

    #[test]
    fn test_cli_parses_new_with_matchups() {
        let cli = Cli::try_parse_from([
            "sideboarder",
            "new",
            "--main",
            "main.txt",
            "--side",
            "side.txt",
            "-m",
            "Burn=-2 Lightning Bolt;+2 Prismatic Ending",
            "-m",
            "Tron=-1 Goblin Guide",
        ])
        .unwrap();

        match cli.command {
            Command::New(args) => {
                assert_eq!(args.main, Some(PathBuf::from("main.txt")));
                assert_eq!(args.matchups.len(), 2);
                assert_eq!(args.matchups[1].name, "Tron");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_new_requires_a_deck() {
        assert!(Cli::try_parse_from(["sideboarder", "new"]).is_err());
        assert!(Cli::try_parse_from([
            "sideboarder",
            "new",
            "--main",
            "main.txt",
            "--goldfish",
            "https://www.mtggoldfish.com/deck/1"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_edit_actions_conflict() {
        assert!(Cli::try_parse_from([
            "sideboarder",
            "edit",
            "guide.json",
            "--index",
            "1",
            "--rename",
            "Burn",
            "--delete"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["sideboarder", "edit", "guide.json", "--delete"]).is_err());
    }
}
