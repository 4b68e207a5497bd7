//! UI pane drawing module for tern.
//!
//! This module provides drawers for the info boxes, the file list and the preview pane.
//! Entry glyphs and per-kind styling of list rows are handled here.
//!
//! Used internally by [crate::ui::render].

use crate::app::AppState;
use crate::config::ThemeRecord;
use crate::core::{
    ChildCounts, Classification, DirectoryEntry, LineCount, PeekEntry, Preview, PreviewContent,
    format_child_counts, format_file_size, format_file_time, format_permissions,
};
use crate::ui::icons::{DIR_GLYPH, entry_glyph, file_group};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

/// Rows kept between the cursor and the list edge while scrolling.
const SCROLL_PADDING: usize = 2;

fn pane_block<'a>(theme: &ThemeRecord, title: Line<'a>, focused: bool) -> Block<'a> {
    let border = if focused {
        theme.focus_border_style()
    } else {
        theme.border_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(theme.base_style())
        .title(title)
}

/// Draws the three header boxes: directory contents, selected size, selected permissions.
pub fn draw_info_boxes(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let nav = app.nav();

    let counts = nav.entries().iter().fold(ChildCounts::default(), |mut acc, e| {
        if e.is_dir() {
            acc.dirs += 1;
        } else {
            acc.files += 1;
        }
        acc
    });
    let selected = nav.selected_entry();

    let size = selected
        .map(|e| format_file_size(e.size(), e.is_dir()))
        .unwrap_or_else(|| "-".to_string());
    let perms = selected
        .filter(|e| e.mode().is_some())
        .map(|e| format_permissions(e.kind(), e.mode()))
        .unwrap_or_else(|| "-".to_string());

    let boxes = [
        ("Contents", format_child_counts(counts)),
        ("Size", size),
        ("Permissions", perms),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for ((label, value), rect) in boxes.into_iter().zip(chunks.iter()) {
        let title = Line::from(Span::styled(format!(" {label} "), theme.label_style()));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {value}"),
            theme.value_style(),
        )))
        .block(pane_block(theme, title, false));
        frame.render_widget(paragraph, *rect);
    }
}

/// Style of a file list row before selection is applied.
fn entry_style(theme: &ThemeRecord, entry: &DirectoryEntry) -> Style {
    if entry.is_unreadable() || entry.is_broken_symlink() {
        theme.dim_style()
    } else if entry.is_dir() {
        theme.directory_style()
    } else if entry.is_symlink() {
        theme.symlink_style()
    } else if entry.is_executable() {
        theme.executable_style()
    } else {
        theme.entry_style()
    }
}

fn make_entry_row<'a>(theme: &ThemeRecord, entry: &'a DirectoryEntry) -> ListItem<'a> {
    let style = entry_style(theme, entry);
    let glyph_style = if entry.is_dir() {
        theme.accent_style()
    } else {
        theme.dim_style()
    };

    let mut name = entry.name_str().into_owned();
    if entry.is_dir() {
        name.push('/');
    }

    ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(entry_glyph(entry), glyph_style),
        Span::raw(" "),
        Span::styled(name, style),
    ]))
}

/// Draws the file list of the current directory.
pub fn draw_file_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let nav = app.nav();
    let focused = app.modals().is_empty();

    let hidden_tag = if nav.show_hidden() { " [hidden]" } else { "" };
    let title = Line::from(vec![
        Span::styled(" Files", theme.title_style()),
        Span::styled(format!("{hidden_tag} "), theme.dim_style()),
    ]);
    let block = pane_block(theme, title, focused);

    if nav.is_empty() {
        let line = Line::from(Span::styled(" [Empty]", theme.dim_style()));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let items: Vec<ListItem> = nav
        .entries()
        .iter()
        .map(|entry| make_entry_row(theme, entry))
        .collect();

    let mut state = ListState::default();
    state.select(nav.cursor());

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(theme.selection_style())
            .scroll_padding(SCROLL_PADDING),
        area,
        &mut state,
    );
}

/// Title of the preview pane: file name plus a language or notice tag.
fn preview_title<'a>(theme: &ThemeRecord, preview: &Preview) -> Line<'a> {
    let name = preview
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| preview.path().display().to_string());
    Line::from(vec![
        Span::styled(format!(" {name} "), theme.title_style()),
        Span::styled(
            format!("[{}] ", preview.classification().label()),
            theme.dim_style(),
        ),
    ])
}

/// Footer text for a truncated preview.
pub fn truncation_footer(preview: &Preview) -> Option<String> {
    if !preview.is_truncated() {
        return None;
    }
    let shown = preview.retained_lines();
    let total = match preview.total_lines() {
        Some(LineCount::Exact(n)) => n.to_string(),
        Some(LineCount::AtLeast(n)) => format!("{n}+"),
        None => "?".to_string(),
    };
    Some(format!("… truncated: showing {shown} of {total} lines"))
}

fn directory_lines<'a>(
    theme: &ThemeRecord,
    summary: &str,
    entries: &'a [PeekEntry],
    total: usize,
) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(entries.len() + 3);
    lines.push(Line::from(Span::styled(
        summary.to_string(),
        theme.label_style(),
    )));
    lines.push(Line::raw(""));
    for entry in entries {
        if entry.is_dir {
            lines.push(Line::from(vec![
                Span::styled(format!("{DIR_GLYPH} "), theme.accent_style()),
                Span::styled(format!("{}/", entry.name), theme.directory_style()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", file_group(&entry.name).glyph()),
                    theme.dim_style(),
                ),
                Span::styled(entry.name.as_str(), theme.entry_style()),
            ]));
        }
    }
    if total > entries.len() {
        lines.push(Line::from(Span::styled(
            format!("… and {} more", total - entries.len()),
            theme.dim_style(),
        )));
    }
    lines
}

/// Draws the preview pane for the current selection.
pub fn draw_preview(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();

    let Some(preview) = app.preview().current() else {
        let block = pane_block(
            theme,
            Line::from(Span::styled(" Preview ", theme.title_style())),
            false,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(" Nothing selected", theme.dim_style())))
                .block(block),
            area,
        );
        return;
    };

    let mut block = pane_block(theme, preview_title(theme, preview), false);
    if let Some(entry) = app.nav().selected_entry()
        && entry.path() == preview.path()
        && entry.modified().is_some()
    {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", format_file_time(entry.modified())),
                theme.dim_style(),
            ))
            .right_aligned(),
        );
    }
    if let Some(footer) = truncation_footer(preview) {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {footer} "),
            theme.notice_style(),
        )));
    }

    let text: Text = match preview.content() {
        PreviewContent::Text(lines) => Text::from(lines.clone()),
        PreviewContent::Directory {
            summary,
            entries,
            total,
        } => Text::from(directory_lines(theme, summary, entries, *total)),
        PreviewContent::Notice(notice) => {
            let style = if matches!(preview.classification(), Classification::Unreadable(_)) {
                theme.error_style()
            } else {
                theme.notice_style()
            };
            Text::from(Line::from(Span::styled(notice.as_str(), style)))
        }
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlainHighlighter, PreviewLimits, PreviewRenderer};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn footer_reports_retained_and_total_lines() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let long = dir.path().join("long.txt");
        let short = dir.path().join("short.txt");
        let body: String = (0..30).map(|i| format!("line {i}\n")).collect();
        fs::write(&long, body)?;
        fs::write(&short, "hi\n")?;

        let limits = PreviewLimits {
            max_lines: 10,
            ..PreviewLimits::default()
        };
        let renderer = PreviewRenderer::new(Box::new(PlainHighlighter), limits);

        let preview = renderer.preview(&long, false);
        assert_eq!(
            truncation_footer(&preview).as_deref(),
            Some("… truncated: showing 10 of 30 lines")
        );
        assert!(truncation_footer(&renderer.preview(&short, false)).is_none());
        Ok(())
    }
}
