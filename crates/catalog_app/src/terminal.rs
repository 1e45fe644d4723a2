use std::fmt::Write as _;
use std::sync::Mutex;

use catalog_core::{Artwork, ListSurface, ResultItem, RowSlot, Scope, Snapshot};
use catalog_engine::PresentationSink;

pub const HELP: &str = "\
Type a search term and press enter. Commands:
  /scope <all|movies|music|apps|books>   change the scope
  /art <section> <row> [grid]            load artwork for a listed row
  /clear                                 clear the search term
  /cancel                                cancel outstanding requests
  /help                                  show this help
  /quit                                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    SetScope(Scope),
    Artwork(RowSlot),
    Clear,
    Cancel,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one input line. Anything not starting with `/` is a search term.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Search(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some("scope") => match parts.next().map(str::parse::<Scope>) {
            Some(Ok(scope)) => Command::SetScope(scope),
            Some(Err(err)) => Command::Invalid(err.to_string()),
            None => Command::Invalid("usage: /scope <name>".into()),
        },
        Some("art") => {
            let section = parts.next().and_then(|s| s.parse().ok());
            let row = parts.next().and_then(|s| s.parse().ok());
            let surface = match parts.next() {
                Some("grid") => ListSurface::Grid,
                _ => ListSurface::Table,
            };
            match (section, row) {
                (Some(section), Some(row)) => {
                    Command::Artwork(RowSlot::new(surface, section, row))
                }
                _ => Command::Invalid("usage: /art <section> <row> [grid]".into()),
            }
        }
        Some("clear") => Command::Clear,
        Some("cancel") => Command::Cancel,
        Some("help") => Command::Help,
        Some("quit") | Some("exit") => Command::Quit,
        Some(other) => Command::Invalid(format!("unknown command /{other}")),
        None => Command::Invalid("empty command".into()),
    }
}

pub fn render_snapshot(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return "(no results)\n".to_string();
    }
    let mut out = String::new();
    for (section_index, section) in snapshot.sections().iter().enumerate() {
        let _ = writeln!(out, "[{section_index}] {}", section.title());
        for (row, item) in section.items.iter().enumerate() {
            let _ = writeln!(out, "  {row:>3}  {} by {}", item.name, item.artist);
        }
    }
    out
}

/// Prints every published snapshot and remembers the latest for row lookups.
#[derive(Default)]
pub struct TerminalSink {
    latest: Mutex<Snapshot>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_at(&self, slot: RowSlot) -> Option<ResultItem> {
        let latest = self.latest.lock().ok()?;
        latest
            .sections()
            .get(slot.section)
            .and_then(|section| section.items.get(slot.row))
            .cloned()
    }
}

#[async_trait::async_trait]
impl PresentationSink for TerminalSink {
    async fn apply(&self, snapshot: Snapshot) {
        print!("{}", render_snapshot(&snapshot));
        if let Ok(mut latest) = self.latest.lock() {
            *latest = snapshot;
        }
    }

    async fn show_artwork(&self, slot: RowSlot, artwork: Artwork) {
        let surface = match slot.surface {
            ListSurface::Table => "table",
            ListSurface::Grid => "grid",
        };
        match artwork {
            Artwork::Placeholder => {
                println!("artwork {surface} [{}:{}] placeholder", slot.section, slot.row)
            }
            Artwork::Image(bytes) => println!(
                "artwork {surface} [{}:{}] {} bytes",
                slot.section,
                slot.row,
                bytes.len()
            ),
        }
    }
}
