//! themecraft - terminal color-theme authoring tool
//!
//! Paste a list of group names and a list of color values, assign colors
//! to groups, rename them, and export the result as a config-file text
//! blob. One-shot subcommands operate on a persisted session; the
//! `interactive` mode drives the same engine through a step wizard.

mod clipboard;
mod color;
mod config;
mod group;
mod serialize;
mod snapshot;
mod theme;
mod wizard;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use config::Config;
use snapshot::Session;
use theme::{reduce, ThemeAction};

#[derive(Parser)]
#[command(name = "themecraft")]
#[command(about = "Color-theme authoring: group, rename, export", long_about = None)]
struct Cli {
    /// Custom data directory (default: ~/.themecraft)
    /// Can also be set via THEMECRAFT_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Session name (default comes from themecraft.toml)
    #[arg(short, long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session from two source files (one item per line)
    Init {
        /// File with group names
        #[arg(long, value_name = "FILE")]
        groups: PathBuf,
        /// File with color values
        #[arg(long, value_name = "FILE")]
        colors: PathBuf,
    },
    /// Re-parse edited source files into the session, keeping renames
    /// and surviving group assignments
    Reload {
        #[arg(long, value_name = "FILE")]
        groups: PathBuf,
        #[arg(long, value_name = "FILE")]
        colors: PathBuf,
    },
    /// Toggle a color's selection
    Select {
        /// Color id, any parseable form of it, or its display name
        color: String,
    },
    /// Assign all selected colors to a group
    Assign {
        /// Normalized group name
        group: String,
    },
    /// Remove a color from a group
    Unassign {
        color: String,
        group: String,
    },
    /// Rename a color
    Rename {
        color: String,
        /// New display name
        name: Vec<String>,
    },
    /// Print the grouped/ungrouped preview tree
    Show,
    /// Serialize the theme to config text
    Export {
        /// Also copy the output to the clipboard
        #[arg(long)]
        copy: bool,
        /// Write to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Step-by-step wizard on stdin/stdout
    Interactive,
}

fn main() -> Result<()> {
    // Log to stderr so exported text on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => snapshot::data_dir()?,
    };
    let config = Config::load(&config::config_path(&data_dir))?;
    let session_name = cli
        .session
        .clone()
        .unwrap_or_else(|| config.session_name.clone());
    let session_file = snapshot::session_path(&data_dir, &session_name);

    match cli.command {
        Commands::Init { groups, colors } => {
            let (groups_text, colors_text) = read_sources(&groups, &colors)?;
            let state = theme::parse_theme(&groups_text, &colors_text);
            println!(
                "Parsed {} colors and {} groups into session {:?}",
                state.colors.len(),
                state.groups.len(),
                session_name
            );
            Session::new(state).save(&session_file)?;
        }

        Commands::Reload { groups, colors } => {
            let (groups_text, colors_text) = read_sources(&groups, &colors)?;
            let mut session = Session::load(&session_file)?;
            session.theme = theme::merge_theme(&session.theme, &groups_text, &colors_text);
            println!(
                "Session now holds {} colors and {} groups",
                session.theme.colors.len(),
                session.theme.groups.len()
            );
            session.save(&session_file)?;
        }

        Commands::Select { color } => {
            let mut session = Session::load(&session_file)?;
            let color_id = resolve(&session.theme, &color)?;
            session.theme = reduce(
                &session.theme,
                ThemeAction::ToggleSelection {
                    color_id: color_id.clone(),
                },
            );
            let item = session
                .theme
                .items
                .iter()
                .find(|i| i.color_id == color_id)
                .context("Color vanished from session")?;
            println!("{} is now {:?}", color_id, item.status);
            session.save(&session_file)?;
        }

        Commands::Assign { group } => {
            let mut session = Session::load(&session_file)?;
            if !session.theme.groups.contains_key(&group) {
                bail!("No group named {:?} in this session", group);
            }
            let selected = session.theme.selected_count();
            if selected == 0 {
                bail!("Nothing selected; use `select <color>` first");
            }
            session.theme = reduce(
                &session.theme,
                ThemeAction::AssignSelectedToGroup {
                    group_name: group.clone(),
                },
            );
            println!("Moved {} color(s) into {}", selected, group);
            session.save(&session_file)?;
        }

        Commands::Unassign { color, group } => {
            let mut session = Session::load(&session_file)?;
            let color_id = resolve(&session.theme, &color)?;
            session.theme = reduce(
                &session.theme,
                ThemeAction::RemoveFromGroup {
                    color_id: color_id.clone(),
                    group_name: group.clone(),
                },
            );
            println!("{} removed from {}", color_id, group);
            session.save(&session_file)?;
        }

        Commands::Rename { color, name } => {
            let name = name.join(" ");
            if name.trim().is_empty() {
                bail!("New name must not be empty");
            }
            let mut session = Session::load(&session_file)?;
            let color_id = resolve(&session.theme, &color)?;
            session.theme = reduce(
                &session.theme,
                ThemeAction::RenameColor {
                    color_id: color_id.clone(),
                    name: name.clone(),
                },
            );
            println!("{} renamed to {:?}", color_id, name.trim());
            session.save(&session_file)?;
        }

        Commands::Show => {
            let session = Session::load(&session_file)?;
            print!("{}", wizard::render_tree(&session.theme));
        }

        Commands::Export { copy, out } => {
            let session = Session::load(&session_file)?;
            let output = serialize::serialize(&session.theme);
            match out {
                Some(path) => {
                    fs::write(&path, &output).context("Failed to write export file")?;
                    println!("Export written to {:?}", path);
                }
                None => println!("{}", output),
            }
            if copy {
                match clipboard::copy(&output) {
                    Ok(()) => eprintln!("Copied to clipboard"),
                    Err(e) => {
                        // Visible fallback; the export itself already succeeded
                        eprintln!("Clipboard unavailable ({}), copy the output manually", e);
                    }
                }
            }
        }

        Commands::Interactive => {
            wizard::run(&config)?;
        }
    }

    Ok(())
}

fn read_sources(groups: &PathBuf, colors: &PathBuf) -> Result<(String, String)> {
    let groups_text = fs::read_to_string(groups)
        .with_context(|| format!("Failed to read group names from {:?}", groups))?;
    let colors_text = fs::read_to_string(colors)
        .with_context(|| format!("Failed to read colors from {:?}", colors))?;
    Ok((groups_text, colors_text))
}

fn resolve(state: &theme::ThemeState, token: &str) -> Result<String> {
    state
        .resolve_color_id(token)
        .with_context(|| format!("No color matching {:?} in this session", token))
}
