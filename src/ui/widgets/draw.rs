//! Draw widget module which holds the status line and the modal dialogs.
//!
//! Relies on the dialog helpers from [crate::ui::widgets].
//! All draw functions are used by [crate::ui::render].

use crate::app::{Action, AppState, FindState, ModalAction, SettingsState, StatusLevel};
use crate::config::ThemeRecord;
use crate::ui::widgets::{DialogSize, DialogStyle, dialog_area, draw_dialog};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rows of results shown at once in the find dialog.
const FIND_VISIBLE: usize = 12;

/// Key column width of the help dialog.
const HELP_KEY_WIDTH: usize = 18;

/// Bottom line: current path, position, status message and a key hint.
pub(crate) fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let nav = app.nav();

    let position = match nav.cursor() {
        Some(idx) => format!("{}/{}", idx + 1, nav.len()),
        None => "0/0".to_string(),
    };

    let help_hint = app
        .keymap()
        .keys_for(Action::Modal(ModalAction::Help))
        .first()
        .map(|key| format!("{} help ", key.label()))
        .unwrap_or_default();

    let right = format!("{position}  {help_hint}");
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(right.width() as u16 + 1),
        ])
        .split(area);

    let mut left = vec![Span::styled(
        format!(" {}", shorten_home_path(nav.current_dir())),
        theme.status_style().add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = app.status() {
        let style = match status.level() {
            StatusLevel::Info => theme.status_style().fg(theme.palette().green),
            StatusLevel::Error => theme.status_style().patch(theme.error_style()),
        };
        left.push(Span::styled("  ", theme.status_style()));
        left.push(Span::styled(status.text().to_string(), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(left)).style(theme.status_style()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(right, theme.status_style())))
            .style(theme.status_style())
            .alignment(Alignment::Right),
        chunks[1],
    );
}

/// Key binding reference built from the active keymap.
pub(crate) fn draw_help_dialog(frame: &mut Frame, app: &AppState) {
    let theme = app.theme();
    let area = frame.area();

    let key_style = theme.accent_style().add_modifier(Modifier::BOLD);
    let desc_style = theme.entry_style();

    let mut rows: Vec<Line> = Vec::with_capacity(app.keymap().bindings().len() + 3);
    rows.push(Line::from(vec![
        Span::styled(format!("{:<HELP_KEY_WIDTH$}", "Key"), theme.label_style()),
        Span::raw("  "),
        Span::styled("Action", theme.label_style()),
    ]));
    rows.push(Line::raw(""));

    for (action, keys) in app.keymap().bindings() {
        let labels = if keys.is_empty() {
            "-".to_string()
        } else {
            keys.iter().map(|k| k.label()).collect::<Vec<_>>().join(" / ")
        };
        rows.push(Line::from(vec![
            Span::styled(format!("{labels:<HELP_KEY_WIDTH$}"), key_style),
            Span::raw("  "),
            Span::styled(action.description(), desc_style),
        ]));
    }
    rows.push(Line::from(vec![
        Span::styled(format!("{:<HELP_KEY_WIDTH$}", "Esc"), key_style),
        Span::raw("  "),
        Span::styled("Close this dialog", desc_style),
    ]));

    let height = rows.len() as u16 + 2;
    let size = DialogSize::Custom(area.width.saturating_sub(6).clamp(40, 64), height);
    let style = DialogStyle {
        border_style: theme.focus_border_style(),
        style: theme.surface_style(),
        title: Some(Span::styled(" Keybinds ", theme.title_style())),
    };
    draw_dialog(
        frame,
        dialog_area(area, size),
        &style,
        rows,
        Alignment::Left,
    );
}

/// Fuzzy find dialog: query input, result count, ranked results.
pub(crate) fn draw_find_dialog(frame: &mut Frame, app: &AppState, find: &FindState) {
    let theme = app.theme();
    let area = frame.area();

    let columns = area.width.saturating_sub(8).clamp(20, 90).min(area.width);
    let size = DialogSize::Custom(columns, FIND_VISIBLE as u16 + 4);
    let rect = dialog_area(area, size);
    let field_width = rect.width.saturating_sub(2) as usize;

    let results = find.results();
    let total = results.len();
    let selected = find.selected().min(total.saturating_sub(1));
    let scroll = (selected + 1).saturating_sub(FIND_VISIBLE);

    let indicator = find_indicator(find, selected, total);

    let max_input_width = field_width.saturating_sub(indicator.width() + 2);
    let display_input = tail_to_width(find.query(), max_input_width);
    let cursor_x = display_input.width();

    let mut lines = Vec::with_capacity(FIND_VISIBLE + 2);
    lines.push(Line::from(vec![
        Span::styled(
            format!("{display_input:<max_input_width$}"),
            theme.entry_style().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(indicator, theme.dim_style()),
    ]));
    lines.push(Line::from(Span::styled(
        "─".repeat(field_width),
        theme.border_style(),
    )));

    if results.is_empty() && !find.is_scanning() {
        lines.push(Line::from(Span::styled(" No matches", theme.dim_style())));
    }

    for (idx, m) in results.iter().enumerate().skip(scroll).take(FIND_VISIBLE) {
        let Some(candidate) = find.candidate(m) else {
            continue;
        };
        let is_selected = idx == selected;
        let (marker, row_style) = if is_selected {
            ("› ", theme.selection_style().patch(theme.accent_style()))
        } else {
            ("  ", theme.entry_style())
        };
        let mut text = candidate.relative().to_string();
        if candidate.is_dir() {
            text.push('/');
        }
        let name_style = if candidate.is_dir() {
            row_style.patch(theme.directory_style())
        } else {
            row_style
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme.marker_style()),
            Span::styled(text, name_style),
        ]));
    }

    let style = DialogStyle {
        border_style: theme.focus_border_style(),
        style: theme.surface_style(),
        title: Some(Span::styled(" Find ", theme.title_style())),
    };
    draw_dialog(frame, rect, &style, lines, Alignment::Left);
    frame.set_cursor_position((rect.x + 1 + cursor_x as u16, rect.y + 1));
}

/// Position indicator of the find dialog, prefixed with the walk's progress or limits.
fn find_indicator(find: &FindState, selected: usize, total: usize) -> String {
    let position = format!(
        "[{} / {}]",
        if total == 0 { 0 } else { selected + 1 },
        total
    );
    let index = find.index();
    let mut notes = Vec::new();
    if find.is_scanning() {
        notes.push(format!("scanning… {}", index.len()));
    } else if index.is_capped() {
        notes.push(format!("capped at {}", index.len()));
    }
    if index.skipped_dirs() > 0 {
        notes.push(format!("{} unreadable", index.skipped_dirs()));
    }
    notes.push(position);
    notes.join("  ")
}

/// Theme picker. The active theme is marked with `●`.
pub(crate) fn draw_settings_dialog(frame: &mut Frame, app: &AppState, settings: &SettingsState) {
    let theme = app.theme();
    let area = frame.area();
    let themes = app.themes().themes();

    let mut lines: Vec<Line> = Vec::with_capacity(themes.len() + 2);
    lines.push(Line::from(Span::styled(" Color scheme", theme.label_style())));
    lines.push(Line::raw(""));

    for (idx, record) in themes.iter().enumerate() {
        lines.push(theme_row(
            theme,
            record,
            idx == settings.selected(),
            record.id() == theme.id(),
        ));
    }

    let size = DialogSize::Custom(44, lines.len() as u16 + 2);
    let style = DialogStyle {
        border_style: theme.focus_border_style(),
        style: theme.surface_style(),
        title: Some(Span::styled(" Settings ", theme.title_style())),
    };
    draw_dialog(
        frame,
        dialog_area(area, size),
        &style,
        lines,
        Alignment::Left,
    );
}

fn theme_row<'a>(
    theme: &ThemeRecord,
    record: &'a ThemeRecord,
    is_selected: bool,
    is_active: bool,
) -> Line<'a> {
    let marker = if is_selected { "› " } else { "  " };
    let active = if is_active { "● " } else { "  " };
    let row_style = if is_selected {
        theme.selection_style().patch(theme.entry_style())
    } else {
        theme.entry_style()
    };
    let swatch = Style::default().fg(record.palette().blue);
    Line::from(vec![
        Span::styled(marker, theme.marker_style()),
        Span::styled(active, theme.accent_style()),
        Span::styled("■ ", swatch),
        Span::styled(record.name(), row_style),
    ])
}

/// Longest suffix of `text` that fits in `width` columns.
fn tail_to_width(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &text[idx + ch.len_utf8()..];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QueryOptions;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn find_indicator_reports_progress_and_cap() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["a", "b", "c", "d"] {
            File::create(dir.path().join(name))?;
        }

        let mut capped = FindState::new(dir.path().to_path_buf(), 2, 64, QueryOptions::default());
        while capped.is_scanning() {
            capped.pump();
        }
        assert_eq!(find_indicator(&capped, 0, 2), "capped at 2  [1 / 2]");

        let full = FindState::new(dir.path().to_path_buf(), 100, 64, QueryOptions::default());
        assert_eq!(find_indicator(&full, 0, 0), "[0 / 0]");
        Ok(())
    }

    #[test]
    fn tail_keeps_the_end_of_long_queries() {
        assert_eq!(tail_to_width("main", 10), "main");
        assert_eq!(tail_to_width("abcdefgh", 3), "fgh");
        assert_eq!(tail_to_width("日本語", 4), "本語");
        assert_eq!(tail_to_width("日本語", 3), "語");
        assert_eq!(tail_to_width("", 0), "");
    }
}
