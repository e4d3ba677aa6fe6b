//! Theme export
//!
//! Projects a `ThemeState` into the config-file text blob the tool hands
//! to the clipboard: a `module.exports` assignment wrapping a nested
//! object literal, pretty-printed with 2-space indentation. The output
//! is deterministic so the clipboard round-trip is reproducible.

use serde_json::{Map, Value};

use crate::color::ColorValue;
use crate::theme::ThemeState;

/// Render the exported config text for a theme.
///
/// Groups are emitted in dictionary (parse) order; colors within a group
/// and ungrouped colors are sorted by display name ascending. Ungrouped
/// colors follow all groups, directly under `colors`.
pub fn serialize(state: &ThemeState) -> String {
    let mut colors_obj = Map::new();

    for group in state.groups.values() {
        let mut members: Vec<&ColorValue> = group
            .members
            .iter()
            .filter_map(|id| state.colors.get(id))
            .collect();
        sort_by_display_name(&mut members);

        let mut group_obj = Map::new();
        for color in members {
            group_obj.insert(
                color.display_name().to_string(),
                Value::String(color.css_value.clone()),
            );
        }
        colors_obj.insert(group.name.clone(), Value::Object(group_obj));
    }

    let mut ungrouped: Vec<&ColorValue> = state
        .ungrouped_ids()
        .into_iter()
        .filter_map(|id| state.colors.get(id))
        .collect();
    sort_by_display_name(&mut ungrouped);
    for color in ungrouped {
        colors_obj.insert(
            color.display_name().to_string(),
            Value::String(color.css_value.clone()),
        );
    }

    let mut theme_obj = Map::new();
    theme_obj.insert("colors".to_string(), Value::Object(colors_obj));
    let mut root = Map::new();
    root.insert("theme".to_string(), Value::Object(theme_obj));

    let rendered = serde_json::to_string_pretty(&Value::Object(root))
        .expect("string-keyed object rendering cannot fail");
    format!("module.exports = {}", rendered)
}

fn sort_by_display_name(colors: &mut [&ColorValue]) {
    colors.sort_by(|a, b| a.display_name().cmp(b.display_name()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{parse_theme, reduce, ThemeAction};

    fn grouped_sample() -> ThemeState {
        let mut state = parse_theme("green\n", "#64FFDA\n#A5D6A7\n");
        for id in ["#64FFDA", "#A5D6A7"] {
            state = reduce(
                &state,
                ThemeAction::ToggleSelection {
                    color_id: id.to_string(),
                },
            );
        }
        state = reduce(
            &state,
            ThemeAction::AssignSelectedToGroup {
                group_name: "green".to_string(),
            },
        );
        state = reduce(
            &state,
            ThemeAction::RenameColor {
                color_id: "#64FFDA".to_string(),
                name: "200".to_string(),
            },
        );
        reduce(
            &state,
            ThemeAction::RenameColor {
                color_id: "#A5D6A7".to_string(),
                name: "100".to_string(),
            },
        )
    }

    #[test]
    fn test_empty_state_export() {
        let state = parse_theme("", "");
        let expected = "\
module.exports = {
  \"theme\": {
    \"colors\": {}
  }
}";
        assert_eq!(serialize(&state), expected);
    }

    #[test]
    fn test_group_members_sorted_by_display_name() {
        // Assigned in insertion order 200 then 100; export sorts by name
        let output = serialize(&grouped_sample());
        let expected = "\
module.exports = {
  \"theme\": {
    \"colors\": {
      \"green\": {
        \"100\": \"#a5d6a7\",
        \"200\": \"#64ffda\"
      }
    }
  }
}";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_determinism() {
        let state = grouped_sample();
        assert_eq!(serialize(&state), serialize(&state));
    }

    #[test]
    fn test_ungrouped_colors_follow_groups() {
        let mut state = parse_theme("brand\n", "#111111\n#FFEE00\n#222222\n");
        state = reduce(
            &state,
            ThemeAction::ToggleSelection {
                color_id: "#FFEE00".to_string(),
            },
        );
        state = reduce(
            &state,
            ThemeAction::AssignSelectedToGroup {
                group_name: "brand".to_string(),
            },
        );
        let expected = "\
module.exports = {
  \"theme\": {
    \"colors\": {
      \"brand\": {
        \"#ffee00\": \"#ffee00\"
      },
      \"#111111\": \"#111111\",
      \"#222222\": \"#222222\"
    }
  }
}";
        assert_eq!(serialize(&state), expected);
    }

    #[test]
    fn test_groups_emit_in_parse_order_not_sorted() {
        let state = parse_theme("zeta\nalpha\n", "");
        let output = serialize(&state);
        let zeta = output.find("\"zeta\"").unwrap();
        let alpha = output.find("\"alpha\"").unwrap();
        assert!(zeta < alpha, "groups must keep dictionary order:\n{}", output);
    }

    #[test]
    fn test_empty_group_renders_empty_object() {
        let state = parse_theme("green\n", "");
        assert!(serialize(&state).contains("\"green\": {}"));
    }
}
