//! Step-driven editing flow
//!
//! The multi-step shell is a tagged union: each variant holds exactly
//! the state relevant to that step, and `route` pattern-matches on the
//! tag to move between steps. Data mutation inside a step always
//! delegates to the theme reducer.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Instant;

use crate::clipboard::{self, CopyFlash};
use crate::config::Config;
use crate::serialize::serialize;
use crate::theme::{merge_theme, parse_theme, reduce, SelectionStatus, ThemeAction, ThemeState};

/// Current wizard step and the state that step owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Pasting the two source text blocks
    EnterSources {
        groups_text: String,
        colors_text: String,
    },
    /// Selecting colors and assigning them to groups
    AssignGroups { theme: ThemeState },
    /// Tree preview with inline renaming
    Preview { theme: ThemeState },
    /// Export finished; holds the serialized text
    Done { theme: ThemeState, output: String },
}

/// Input routed to the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    /// Parse the entered sources into a theme
    Parse,
    /// Apply one theme action in place
    Edit(ThemeAction),
    /// Move from assignment to the preview tree
    ShowPreview,
    /// Step back one screen
    Back,
    /// Serialize the theme
    Export,
    /// Return to source entry, keeping the current source text
    Restart,
}

/// Advance the wizard. Inputs that make no sense for the current step
/// leave it unchanged.
pub fn route(step: Step, input: StepInput) -> Step {
    match (step, input) {
        (
            Step::EnterSources {
                groups_text,
                colors_text,
            },
            StepInput::Parse,
        ) => Step::AssignGroups {
            theme: parse_theme(&groups_text, &colors_text),
        },

        (Step::AssignGroups { theme }, StepInput::Edit(action)) => Step::AssignGroups {
            theme: reduce(&theme, action),
        },
        (Step::AssignGroups { theme }, StepInput::ShowPreview) => Step::Preview { theme },

        (Step::Preview { theme }, StepInput::Edit(action)) => Step::Preview {
            theme: reduce(&theme, action),
        },
        (Step::Preview { theme }, StepInput::Back) => Step::AssignGroups { theme },
        (Step::Preview { theme }, StepInput::Export) => {
            let output = serialize(&theme);
            Step::Done { theme, output }
        }

        (Step::Done { theme, .. }, StepInput::Back) => Step::Preview { theme },

        (Step::AssignGroups { theme }, StepInput::Restart)
        | (Step::Preview { theme }, StepInput::Restart)
        | (Step::Done { theme, .. }, StepInput::Restart) => Step::EnterSources {
            groups_text: theme.group_names_text,
            colors_text: theme.colors_text,
        },

        (step, input) => {
            tracing::debug!("Input {:?} ignored for current step", input);
            step
        }
    }
}

/// Human-readable preview tree: groups in dictionary order with
/// name-sorted members, then the ungrouped colors
pub fn render_tree(state: &ThemeState) -> String {
    let mut out = String::new();
    for group in state.groups.values() {
        out.push_str(&format!("{}/\n", group.name));
        let mut members: Vec<_> = group
            .members
            .iter()
            .filter_map(|id| state.colors.get(id))
            .collect();
        members.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        for color in members {
            out.push_str(&format!("    {} = {}\n", color.display_name(), color.css_value));
        }
    }
    out.push_str("ungrouped/\n");
    for item in &state.items {
        if item.status == SelectionStatus::Grouped {
            continue;
        }
        if let Some(color) = state.colors.get(&item.color_id) {
            let marker = if item.status == SelectionStatus::Selected {
                "  (selected)"
            } else {
                ""
            };
            out.push_str(&format!(
                "    {} = {}{}\n",
                color.display_name(),
                color.css_value,
                marker
            ));
        }
    }
    out
}

/// Interactive mode: drive the wizard from stdin line commands
pub fn run(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut step = Step::EnterSources {
        groups_text: String::new(),
        colors_text: String::new(),
    };
    let mut flash = CopyFlash::new();

    loop {
        step = match step {
            Step::EnterSources {
                groups_text,
                colors_text,
            } => {
                if !groups_text.is_empty() || !colors_text.is_empty() {
                    println!("Previous sources:\n{}\n{}", groups_text, colors_text);
                }
                println!("Paste group names, one per line (finish with a blank line):");
                let groups_text = read_block(&mut lines)?;
                println!("Paste colors, one per line (finish with a blank line):");
                let colors_text = read_block(&mut lines)?;
                route(
                    Step::EnterSources {
                        groups_text,
                        colors_text,
                    },
                    StepInput::Parse,
                )
            }

            Step::AssignGroups { theme } => {
                println!(
                    "{} colors, {} groups, {} selected",
                    theme.colors.len(),
                    theme.groups.len(),
                    theme.selected_count()
                );
                let line = match prompt(&mut lines, "assign> ")? {
                    Some(line) => line,
                    None => return Ok(()),
                };
                let step = Step::AssignGroups { theme };
                match parse_command(&step, &line) {
                    Ok(Some(input)) => route(step, input),
                    Ok(None) => return Ok(()),
                    Err(msg) => {
                        println!("{}", msg);
                        step
                    }
                }
            }

            Step::Preview { theme } => {
                print!("{}", render_tree(&theme));
                let line = match prompt(&mut lines, "preview> ")? {
                    Some(line) => line,
                    None => return Ok(()),
                };
                let step = Step::Preview { theme };
                match parse_command(&step, &line) {
                    Ok(Some(input)) => route(step, input),
                    Ok(None) => return Ok(()),
                    Err(msg) => {
                        println!("{}", msg);
                        step
                    }
                }
            }

            Step::Done { theme, output } => {
                println!("{}", output);
                match clipboard::copy(&output) {
                    Ok(()) => flash.trigger_at(Instant::now(), config.flash_duration()),
                    Err(e) => {
                        // Visible fallback; the export text is already on screen
                        println!("Clipboard unavailable ({}), copy the text above manually", e);
                    }
                }
                let label = if flash.is_visible_at(Instant::now()) {
                    "[copied] done> "
                } else {
                    "done> "
                };
                let line = match prompt(&mut lines, label)? {
                    Some(line) => line,
                    None => return Ok(()),
                };
                let step = Step::Done { theme, output };
                match line.trim() {
                    "back" => route(step, StepInput::Back),
                    "restart" => route(step, StepInput::Restart),
                    "quit" | "q" | "" => return Ok(()),
                    other => {
                        println!("Unknown command {:?} (back, restart, quit)", other);
                        step
                    }
                }
            }
        };
    }
}

/// Read lines until a blank line or end of input
fn read_block(lines: &mut impl Iterator<Item = std::io::Result<String>>) -> Result<String> {
    let mut block = String::new();
    for line in lines {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            break;
        }
        block.push_str(&line);
        block.push('\n');
    }
    Ok(block)
}

fn prompt(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    label: &str,
) -> Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("Failed to read stdin")?)),
        None => Ok(None),
    }
}

/// Translate one command line into a step input. `Ok(None)` means quit;
/// `Err` carries the message to show the user.
fn parse_command(step: &Step, line: &str) -> std::result::Result<Option<StepInput>, String> {
    let theme = match step {
        Step::AssignGroups { theme } | Step::Preview { theme } => theme,
        _ => return Err("No theme loaded".to_string()),
    };
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(word) => word,
        None => return Err("Commands: select, assign, unassign, rename, preview, back, export, restart, quit".to_string()),
    };

    let resolve = |token: &str| {
        theme
            .resolve_color_id(token)
            .ok_or_else(|| format!("Unknown color {:?}", token))
    };

    match command {
        "select" | "s" => {
            let token = words.next().ok_or("Usage: select <color>")?;
            Ok(Some(StepInput::Edit(ThemeAction::ToggleSelection {
                color_id: resolve(token)?,
            })))
        }
        "assign" | "a" => {
            let group = words.next().ok_or("Usage: assign <group>")?;
            Ok(Some(StepInput::Edit(ThemeAction::AssignSelectedToGroup {
                group_name: group.to_string(),
            })))
        }
        "unassign" | "u" => {
            let token = words.next().ok_or("Usage: unassign <color> <group>")?;
            let group = words.next().ok_or("Usage: unassign <color> <group>")?;
            Ok(Some(StepInput::Edit(ThemeAction::RemoveFromGroup {
                color_id: resolve(token)?,
                group_name: group.to_string(),
            })))
        }
        "rename" | "r" => {
            let token = words.next().ok_or("Usage: rename <color> <name>")?;
            let color_id = resolve(token)?;
            let name = words.collect::<Vec<_>>().join(" ");
            Ok(Some(StepInput::Edit(ThemeAction::RenameColor {
                color_id,
                name,
            })))
        }
        "preview" | "p" => Ok(Some(StepInput::ShowPreview)),
        "back" | "b" => Ok(Some(StepInput::Back)),
        "export" | "e" => Ok(Some(StepInput::Export)),
        "restart" => Ok(Some(StepInput::Restart)),
        "quit" | "q" => Ok(None),
        other => Err(format!("Unknown command {:?}", other)),
    }
}

/// Merge fresh source text into whatever theme the current step holds
pub fn reload_sources(step: Step, groups_text: &str, colors_text: &str) -> Step {
    match step {
        Step::EnterSources { .. } => Step::EnterSources {
            groups_text: groups_text.to_string(),
            colors_text: colors_text.to_string(),
        },
        Step::AssignGroups { theme } => Step::AssignGroups {
            theme: merge_theme(&theme, groups_text, colors_text),
        },
        Step::Preview { theme } => Step::Preview {
            theme: merge_theme(&theme, groups_text, colors_text),
        },
        Step::Done { theme, .. } => {
            let merged = merge_theme(&theme, groups_text, colors_text);
            let output = serialize(&merged);
            Step::Done {
                theme: merged,
                output,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entered() -> Step {
        Step::EnterSources {
            groups_text: "green\n".to_string(),
            colors_text: "#64FFDA\n#A5D6A7\n".to_string(),
        }
    }

    fn toggle(id: &str) -> StepInput {
        StepInput::Edit(ThemeAction::ToggleSelection {
            color_id: id.to_string(),
        })
    }

    #[test]
    fn test_parse_moves_to_assignment() {
        let step = route(entered(), StepInput::Parse);
        match step {
            Step::AssignGroups { theme } => {
                assert_eq!(theme.colors.len(), 2);
                assert!(theme.groups.contains_key("green"));
            }
            other => panic!("Expected AssignGroups, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_delegates_to_reducer() {
        let step = route(entered(), StepInput::Parse);
        let step = route(step, toggle("#64FFDA"));
        match &step {
            Step::AssignGroups { theme } => assert_eq!(theme.selected_count(), 1),
            other => panic!("Expected AssignGroups, got {:?}", other),
        }
    }

    #[test]
    fn test_full_flow_to_export() {
        let mut step = route(entered(), StepInput::Parse);
        step = route(step, toggle("#64FFDA"));
        step = route(
            step,
            StepInput::Edit(ThemeAction::AssignSelectedToGroup {
                group_name: "green".to_string(),
            }),
        );
        step = route(step, StepInput::ShowPreview);
        step = route(step, StepInput::Export);
        match step {
            Step::Done { output, .. } => {
                assert!(output.starts_with("module.exports = {"));
                assert!(output.contains("\"green\""));
            }
            other => panic!("Expected Done, got {:?}", other),
        }
    }

    #[test]
    fn test_nonsense_input_leaves_step_unchanged() {
        let step = route(entered(), StepInput::Export);
        assert_eq!(step, entered());
    }

    #[test]
    fn test_back_from_preview() {
        let step = route(entered(), StepInput::Parse);
        let step = route(step, StepInput::ShowPreview);
        let step = route(step, StepInput::Back);
        assert!(matches!(step, Step::AssignGroups { .. }));
    }

    #[test]
    fn test_restart_keeps_source_text() {
        let step = route(entered(), StepInput::Parse);
        let step = route(step, StepInput::Restart);
        match step {
            Step::EnterSources {
                groups_text,
                colors_text,
            } => {
                assert_eq!(groups_text, "green\n");
                assert_eq!(colors_text, "#64FFDA\n#A5D6A7\n");
            }
            other => panic!("Expected EnterSources, got {:?}", other),
        }
    }

    #[test]
    fn test_reload_merges_into_current_step() {
        let step = route(entered(), StepInput::Parse);
        let step = route(
            step,
            StepInput::Edit(ThemeAction::RenameColor {
                color_id: "#64FFDA".to_string(),
                name: "200".to_string(),
            }),
        );
        let step = reload_sources(step, "green\nblues\n", "#64FFDA\n");
        match step {
            Step::AssignGroups { theme } => {
                assert_eq!(theme.colors.len(), 1);
                assert_eq!(theme.colors["#64FFDA"].name.as_deref(), Some("200"));
                assert!(theme.groups.contains_key("blues"));
            }
            other => panic!("Expected AssignGroups, got {:?}", other),
        }
    }

    #[test]
    fn test_render_tree_groups_then_ungrouped() {
        let mut step = route(entered(), StepInput::Parse);
        step = route(step, toggle("#64FFDA"));
        step = route(
            step,
            StepInput::Edit(ThemeAction::AssignSelectedToGroup {
                group_name: "green".to_string(),
            }),
        );
        let theme = match step {
            Step::AssignGroups { theme } => theme,
            other => panic!("Expected AssignGroups, got {:?}", other),
        };
        let tree = render_tree(&theme);
        assert_eq!(
            tree,
            "green/\n    #64ffda = #64ffda\nungrouped/\n    #a5d6a7 = #a5d6a7\n"
        );
    }
}
