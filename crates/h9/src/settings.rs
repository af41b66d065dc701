//! The settings panel: shortcut map, legend, login toggle and permission status.
use egui::{Color32, Layout, Margin, RichText, Sense, Stroke, Ui, vec2};

use crate::shortcuts;

/// Content size of the settings window.
pub const SETTINGS_SIZE: (f32, f32) = (900.0, 600.0);

/// Outer padding around the panel.
const PAD: f32 = 16.0;

/// Warning color for the missing-permission button.
const RED: Color32 = Color32::from_rgb(220, 50, 47);

/// Something the user asked the panel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Open System Settings at the Accessibility privacy pane.
    OpenAccessibilitySettings,
}

/// What the permission area of the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionAffordance {
    /// A plain confirmation label.
    Granted,
    /// A red button that leads to System Settings.
    NeedsPermission,
}

impl PermissionAffordance {
    /// Pick the affordance for the current grant.
    pub fn for_state(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::NeedsPermission
        }
    }

    /// Text shown for this affordance.
    pub fn text(self) -> &'static str {
        match self {
            Self::Granted => "Accessibility permission granted!",
            Self::NeedsPermission => "* Needs Accessibility Permission",
        }
    }
}

/// One settings window's worth of state.
///
/// A new panel is built every time the settings window is created, so the
/// login toggle starts unchecked each time.
#[derive(Debug, Default)]
pub struct SettingsPanel {
    /// "Launch at login" checkbox. Not registered with the OS.
    launch_at_login: bool,
    /// Saved command shortcut read from preferences when the panel was built.
    saved_shortcut: String,
}

impl SettingsPanel {
    /// Build a panel holding the saved command shortcut.
    pub fn new(saved_shortcut: String) -> Self {
        Self {
            launch_at_login: false,
            saved_shortcut,
        }
    }

    /// Whether the login checkbox is ticked.
    pub fn launch_at_login(&self) -> bool {
        self.launch_at_login
    }

    /// The saved command shortcut.
    pub fn saved_shortcut(&self) -> &str {
        &self.saved_shortcut
    }

    /// Render the panel. Returns the action the user triggered, if any.
    pub fn ui(&mut self, ui: &mut Ui, accessibility_granted: bool) -> Option<PanelAction> {
        let mut action = None;
        ui.add_space(PAD);
        header_ui(ui);
        ui.add_space(12.0);

        egui::Frame::group(ui.style())
            .inner_margin(Margin::same(PAD as i8))
            .show(ui, |ui| {
                ui.label(RichText::new("Window Positions").size(16.0).strong());
                ui.add_space(6.0);
                shortcuts::table_ui(ui);
                ui.separator();
                ui.add_space(PAD);
                shortcuts::legend_ui(ui);
            });

        ui.add_space(PAD);
        ui.horizontal(|ui| {
            ui.add_space(PAD);
            ui.checkbox(&mut self.launch_at_login, "Launch H9 at login");
            ui.add_space(PAD);

            let aff = PermissionAffordance::for_state(accessibility_granted);
            match aff {
                PermissionAffordance::Granted => {
                    ui.label(aff.text());
                }
                PermissionAffordance::NeedsPermission => {
                    if ui
                        .button(RichText::new(aff.text()).color(RED))
                        .clicked()
                    {
                        action = Some(PanelAction::OpenAccessibilitySettings);
                    }
                }
            }

            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(PAD);
                ui.label(
                    RichText::new("Copyright © 2024 Bin Hua")
                        .size(10.0)
                        .color(Color32::GRAY),
                );
            });
        });
        action
    }
}

/// App name and version, right-aligned, next to the logo.
fn header_ui(ui: &mut Ui) {
    ui.with_layout(Layout::right_to_left(egui::Align::Min), |ui| {
        ui.add_space(PAD);
        logo_ui(ui, 32.0);
        ui.with_layout(Layout::top_down(egui::Align::Max), |ui| {
            ui.label(RichText::new("H9").size(20.0).strong());
            ui.label(
                RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                    .size(10.0)
                    .color(Color32::GRAY),
            );
        });
    });
}

/// Draw the H9 mark: a framed screen with a filled left half and a
/// filled upper-right quadrant.
fn logo_ui(ui: &mut Ui, side: f32) {
    let (rect, _) = ui.allocate_exact_size(vec2(side, side), Sense::hover());
    let painter = ui.painter_at(rect);
    let fg = ui.visuals().strong_text_color();
    painter.rect_stroke(
        rect.shrink(1.0),
        3.0,
        Stroke::new(2.0, fg),
        egui::StrokeKind::Inside,
    );
    let inner = rect.shrink(side * 0.2);
    let (left, right) = inner.split_left_right_at_fraction(0.5);
    painter.rect_filled(left.shrink(1.0), 1.0, fg);
    let (top, _) = right.split_top_bottom_at_fraction(0.5);
    painter.rect_filled(top.shrink(1.0), 1.0, fg);
}

#[cfg(test)]
mod tests {
    use egui::{
        CentralPanel, Context, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Shape,
    };

    use super::*;
    use crate::shortcuts::{LEGEND, entries};

    /// Every text shape in `shapes`, with its screen rect.
    fn texts(shapes: impl IntoIterator<Item = Shape>, out: &mut Vec<(String, Rect)>) {
        for shape in shapes {
            match shape {
                Shape::Text(t) => {
                    out.push((t.galley.text().to_string(), t.visual_bounding_rect()));
                }
                Shape::Vec(v) => texts(v, out),
                _ => {}
            }
        }
    }

    /// Run one frame of `panel` with `events`; return the drawn texts and the
    /// action the panel reported.
    fn frame(
        ctx: &Context,
        panel: &mut SettingsPanel,
        granted: bool,
        events: Vec<Event>,
    ) -> (Vec<(String, Rect)>, Option<PanelAction>) {
        let mut action = None;
        let raw = RawInput {
            events,
            ..RawInput::default()
        };
        let out = ctx.run_ui(raw, |ui| {
            CentralPanel::default().show_inside(ui, |ui| {
                if let Some(a) = panel.ui(ui, granted) {
                    action = Some(a);
                }
            });
        });
        let mut found = Vec::new();
        texts(out.shapes.into_iter().map(|c| c.shape), &mut found);
        (found, action)
    }

    fn has(texts: &[(String, Rect)], needle: &str) -> bool {
        texts.iter().any(|(t, _)| t == needle)
    }

    fn press(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn granted_never_offers_button() {
        assert_eq!(
            PermissionAffordance::for_state(true),
            PermissionAffordance::Granted
        );
        assert_eq!(
            PermissionAffordance::for_state(false),
            PermissionAffordance::NeedsPermission
        );
        assert_eq!(
            PermissionAffordance::for_state(false).text(),
            "* Needs Accessibility Permission"
        );
    }

    #[test]
    fn new_panel_starts_unticked() {
        let panel = SettingsPanel::new("⌃⌥⌘K".into());
        assert!(!panel.launch_at_login());
        assert_eq!(panel.saved_shortcut(), "⌃⌥⌘K");
    }

    #[test]
    fn warning_rendered_only_when_denied() {
        let warn = PermissionAffordance::NeedsPermission.text();
        let ok = PermissionAffordance::Granted.text();

        let mut panel = SettingsPanel::default();
        let (granted, _) = frame(&Context::default(), &mut panel, true, vec![]);
        assert!(!has(&granted, warn));
        assert!(has(&granted, ok));

        let (denied, _) = frame(&Context::default(), &mut panel, false, vec![]);
        assert!(has(&denied, warn));
        assert!(!has(&denied, ok));
    }

    #[test]
    fn renders_full_table_legend_and_footer() {
        let mut panel = SettingsPanel::default();
        let (drawn, _) = frame(&Context::default(), &mut panel, true, vec![]);

        for e in entries() {
            assert!(has(&drawn, e.label), "missing label {}", e.label);
            assert!(has(&drawn, e.key_combo), "missing combo {}", e.key_combo);
        }
        assert_eq!(entries().filter(|e| has(&drawn, e.label)).count(), 24);
        for m in LEGEND {
            assert!(has(&drawn, m.name()), "missing legend {}", m.name());
            assert!(has(&drawn, &m.glyph().to_string()));
        }
        assert!(has(&drawn, "Window Positions"));
        assert!(has(&drawn, "Launch H9 at login"));
        assert!(has(&drawn, "Copyright © 2024 Bin Hua"));
    }

    #[test]
    fn clicking_warning_requests_settings_pane() {
        let ctx = Context::default();
        let mut panel = SettingsPanel::default();
        frame(&ctx, &mut panel, false, vec![]);
        let (drawn, _) = frame(&ctx, &mut panel, false, vec![]);
        let target = drawn
            .iter()
            .find(|(t, _)| t == PermissionAffordance::NeedsPermission.text())
            .map(|(_, r)| r.center())
            .unwrap();

        let mut actions = Vec::new();
        for events in [
            vec![Event::PointerMoved(target)],
            vec![press(target, true)],
            vec![press(target, false)],
            vec![],
        ] {
            actions.extend(frame(&ctx, &mut panel, false, events).1);
        }
        assert_eq!(actions, [PanelAction::OpenAccessibilitySettings]);
    }

    #[test]
    fn idle_frames_report_no_action() {
        let ctx = Context::default();
        let mut panel = SettingsPanel::default();
        for _ in 0..3 {
            assert_eq!(frame(&ctx, &mut panel, false, vec![]).1, None);
        }
    }
}
