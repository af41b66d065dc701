//! The fixed shortcut map shown in the settings window.
//!
//! The table is presentational: labels and key-combination glyph strings.
//! Nothing here registers or dispatches hotkeys.
use egui::{Align, Layout, RichText, Ui, vec2};

/// One row of the shortcut table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutEntry {
    /// Human readable action name.
    pub label: &'static str,
    /// Key combination rendered with macOS modifier glyphs.
    pub key_combo: &'static str,
}

/// Shorthand constructor for the static table.
const fn entry(label: &'static str, key_combo: &'static str) -> ShortcutEntry {
    ShortcutEntry { label, key_combo }
}

/// Number of entries in every group.
pub const GROUP_WIDTH: usize = 6;

/// A named row of related shortcuts.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutGroup {
    /// Group name, used for widget ids and logs.
    pub name: &'static str,
    /// Entries, rendered left to right.
    pub entries: [ShortcutEntry; GROUP_WIDTH],
}

/// The full table, top to bottom.
pub const SHORTCUT_GROUPS: [ShortcutGroup; 4] = [
    ShortcutGroup {
        name: "positions",
        entries: [
            entry("Center", "⌃⌥⌘C"),
            entry("Fullscreen", "⌃⌥⌘F"),
            entry("Next Display", "⌃⌥⌘→"),
            entry("Previous Display", "⌃⌥⌘←"),
            entry("Almost Maximize", "⌃⌥⌘M"),
            entry("Restore", "⌃⌥⌘⌫"),
        ],
    },
    ShortcutGroup {
        name: "halves",
        entries: [
            entry("Left Half", "⌃⌥⌘←"),
            entry("Right Half", "⌃⌥⌘→"),
            entry("Top Half", "⌃⌥⌘↑"),
            entry("Bottom Half", "⌃⌥⌘↓"),
            entry("Left Third", "⌃⌥⌘D"),
            entry("Right Third", "⌃⌥⌘G"),
        ],
    },
    ShortcutGroup {
        name: "corners",
        entries: [
            entry("Upper Left", "⇧⌥⌘←"),
            entry("Upper Right", "⇧⌥⌘→"),
            entry("Lower Left", "⇧⌥⌘↓←"),
            entry("Lower Right", "⇧⌥⌘↓→"),
            entry("Upper Center", "⇧⌥⌘↑"),
            entry("Lower Center", "⇧⌥⌘↓"),
        ],
    },
    ShortcutGroup {
        name: "resize",
        entries: [
            entry("Make Larger", "⇧⌥⌘+"),
            entry("Make Smaller", "⇧⌥⌘-"),
            entry("Undo", "⌃⌘Z"),
            entry("Redo", "⌃⌥⌘Z"),
            entry("Make Wider", "⇧⌥⌘]"),
            entry("Make Narrower", "⇧⌥⌘["),
        ],
    },
];

/// Iterate every entry of the table in display order.
pub fn entries() -> impl Iterator<Item = &'static ShortcutEntry> {
    SHORTCUT_GROUPS.iter().flat_map(|g| g.entries.iter())
}

/// Modifier keys explained by the legend under the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// ⌃
    Control,
    /// ⌥
    Option,
    /// ⌘
    Command,
    /// ⇧
    Shift,
}

impl Modifier {
    /// Glyph used in key-combination strings.
    pub fn glyph(self) -> char {
        match self {
            Self::Control => '⌃',
            Self::Option => '⌥',
            Self::Command => '⌘',
            Self::Shift => '⇧',
        }
    }

    /// Name printed under the glyph.
    pub fn name(self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Option => "Option",
            Self::Command => "Command",
            Self::Shift => "Shift",
        }
    }
}

/// Legend cells, left to right.
pub const LEGEND: [Modifier; 4] = [
    Modifier::Control,
    Modifier::Option,
    Modifier::Command,
    Modifier::Shift,
];

/// A label and its key combination, laid out on one line.
pub struct ShortcutRow<'a> {
    /// Action name.
    label: &'a str,
    /// Key combination glyphs.
    key_combo: &'a str,
}

impl<'a> ShortcutRow<'a> {
    /// Build a row for `label` bound to `key_combo`.
    pub fn new(label: &'a str, key_combo: &'a str) -> Self {
        Self { label, key_combo }
    }

    /// Render the row into `ui`.
    pub fn ui(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.add_space(10.0);
            ui.label(RichText::new(self.label).size(11.0));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.add_space(4.0);
                ui.label(RichText::new(self.key_combo).size(13.0).strong());
            });
        });
    }
}

impl<'a> From<&'a ShortcutEntry> for ShortcutRow<'a> {
    fn from(e: &'a ShortcutEntry) -> Self {
        Self::new(e.label, e.key_combo)
    }
}

/// Height of one table row.
const ROW_H: f32 = 22.0;

/// Render the whole table: one line of equal-width cells per group.
pub fn table_ui(ui: &mut Ui) {
    let spacing = ui.spacing().item_spacing.x;
    let cell_w = ((ui.available_width() - spacing * (GROUP_WIDTH - 1) as f32)
        / GROUP_WIDTH as f32)
        .max(0.0);
    for group in &SHORTCUT_GROUPS {
        ui.push_id(group.name, |ui| {
            ui.horizontal(|ui| {
                for e in &group.entries {
                    ui.allocate_ui_with_layout(
                        vec2(cell_w, ROW_H),
                        Layout::left_to_right(Align::Center),
                        |ui| ShortcutRow::from(e).ui(ui),
                    );
                }
            });
        });
        ui.add_space(6.0);
    }
}

/// Render the modifier legend.
pub fn legend_ui(ui: &mut Ui) {
    ui.horizontal(|ui| {
        for (i, m) in LEGEND.iter().enumerate() {
            if i > 0 {
                ui.add_space(20.0);
            }
            ui.vertical(|ui| {
                ui.label(RichText::new(m.glyph().to_string()).size(24.0));
                ui.label(m.name());
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_has_twenty_four_entries() {
        assert_eq!(entries().count(), 24);
        assert_eq!(LEGEND.len(), 4);
    }

    #[test]
    fn labels_are_unique() {
        let labels: HashSet<_> = entries().map(|e| e.label).collect();
        assert_eq!(labels.len(), 24);
    }

    #[test]
    fn combos_only_use_legend_modifiers() {
        let glyphs: HashSet<char> = LEGEND.iter().map(|m| m.glyph()).collect();
        for e in entries() {
            let mods: Vec<char> = e.key_combo.chars().take_while(|c| glyphs.contains(c)).collect();
            assert!(mods.len() >= 2, "{} has too few modifiers", e.label);
            assert!(mods.contains(&'⌘'), "{} lacks command", e.label);
            assert!(
                e.key_combo.chars().count() > mods.len(),
                "{} has no key after its modifiers",
                e.label
            );
        }
    }

    #[test]
    fn legend_order_matches_glyphs() {
        let s: String = LEGEND.iter().map(|m| m.glyph()).collect();
        assert_eq!(s, "⌃⌥⌘⇧");
        assert_eq!(Modifier::Option.name(), "Option");
    }
}
