//! Markdown preview rendering.
//!
//! Converts `pulldown_cmark` events into styled ratatui lines: headings, emphasis, inline
//! code, fenced code blocks, lists, block quotes, rules and links. Code blocks go through the
//! preview's [Highlighter], so they follow the same dark/light choice as source files.

use crate::core::highlight::{Highlighter, Language};

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use std::path::Path;

const RULE_WIDTH: usize = 40;

/// True for `.md` and `.markdown` files.
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Renders `source` as formatted markdown. Output line count is unrelated to input.
pub fn render_markdown(source: &str, highlighter: &dyn Highlighter) -> Vec<Line<'static>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = Writer::new(highlighter);
    for event in Parser::new_ext(source, opts) {
        writer.handle(event);
    }
    writer.lines
}

/// Code block being collected. Highlighted in one pass when it closes.
struct CodeBlock {
    language: Option<Language>,
    body: String,
}

struct Writer<'h> {
    lines: Vec<Line<'static>>,
    highlighter: &'h dyn Highlighter,
    /// Inline styles, each patched over its parent.
    styles: Vec<Style>,
    /// Prefix spans put in front of every new line (block quote bars).
    prefixes: Vec<Span<'static>>,
    /// `None` for bullets, `Some(n)` for the next ordered index.
    list_indices: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    link_url: Option<String>,
    needs_blank: bool,
}

impl<'h> Writer<'h> {
    fn new(highlighter: &'h dyn Highlighter) -> Self {
        Self {
            lines: Vec::new(),
            highlighter,
            styles: Vec::new(),
            prefixes: Vec::new(),
            list_indices: Vec::new(),
            code: None,
            link_url: None,
            needs_blank: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, mut line: Line<'static>) {
        for prefix in self.prefixes.iter().rev() {
            line.spans.insert(0, prefix.clone());
        }
        self.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.push_line(Line::from(span)),
        }
    }

    fn blank_if_needed(&mut self) {
        if self.needs_blank {
            self.push_line(Line::default());
            self.needs_blank = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => self.text(text),
            Event::Code(code) => self.push_span(Span::styled(code.to_string(), code_style())),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_if_needed();
                self.push_line(Line::from(Span::styled("─".repeat(RULE_WIDTH), muted())));
                self.needs_blank = true;
            }
            Event::TaskListMarker(checked) => {
                self.push_span(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            // html, footnotes and math are shown as nothing
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.blank_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_if_needed();
                let style = heading_style(level);
                let marks = "#".repeat(heading_depth(level));
                self.push_line(Line::from(Span::styled(format!("{marks} "), style)));
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.blank_if_needed();
                self.prefixes.push(Span::styled("│ ", muted()));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM));
            }
            Tag::CodeBlock(kind) => {
                self.blank_if_needed();
                let token = match &kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
                    CodeBlockKind::Indented => "",
                };
                let top = if token.is_empty() {
                    Line::from(Span::styled("╭──", muted()))
                } else {
                    Line::from(vec![
                        Span::styled("╭── ", muted()),
                        Span::styled(token.to_string(), muted().add_modifier(Modifier::BOLD)),
                    ])
                };
                self.push_line(top);
                let language = (!token.is_empty())
                    .then(|| self.highlighter.language_for_token(token))
                    .flatten();
                self.code = Some(CodeBlock {
                    language,
                    body: String::new(),
                });
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                if let Some(index) = self.list_indices.last_mut() {
                    let marker = match index {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let marker = format!("{indent}{n}. ");
                            *n += 1;
                            marker
                        }
                    };
                    self.push_span(Span::styled(marker, muted()));
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(link_style());
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_blank = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.prefixes.pop();
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                if let Some(block) = self.code.take() {
                    self.flush_code(block);
                }
                self.push_line(Line::from(Span::styled("╰──", muted())));
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_blank = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(url, link_style()));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: CowStr<'_>) {
        if let Some(block) = self.code.as_mut() {
            block.body.push_str(&text);
            return;
        }
        let style = self.style();
        self.push_span(Span::styled(text.to_string(), style));
    }

    fn flush_code(&mut self, block: CodeBlock) {
        let lines: Vec<String> = block.body.lines().map(str::to_string).collect();
        let language = block.language.unwrap_or_else(Language::plain);
        let styled = self.highlighter.render(&lines, &language);
        for line in styled {
            let mut spans = vec![Span::styled("│ ", muted())];
            spans.extend(line.spans);
            self.push_line(Line::from(spans));
        }
    }
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn code_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style,
        _ => style.add_modifier(Modifier::ITALIC),
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::{PlainHighlighter, SyntectHighlighter};

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn detects_markdown_extensions() {
        assert!(is_markdown_path(Path::new("README.md")));
        assert!(is_markdown_path(Path::new("notes.Markdown")));
        assert!(!is_markdown_path(Path::new("main.rs")));
        assert!(!is_markdown_path(Path::new("md")));
    }

    #[test]
    fn heading_text_carries_heading_style() {
        let lines = render_markdown("## Usage", &PlainHighlighter);
        let line = &lines[0];
        assert_eq!(text_of(&lines)[0], "## Usage");
        assert!(line.spans.iter().all(|s| s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn emphasis_and_inline_code_are_styled() {
        let lines = render_markdown("Run **now** with `tern`", &PlainHighlighter);
        let spans = &lines[0].spans;
        let bold = spans.iter().find(|s| s.content == "now");
        assert!(bold.is_some_and(|s| s.style.add_modifier.contains(Modifier::BOLD)));
        let code = spans.iter().find(|s| s.content == "tern");
        assert_eq!(code.map(|s| s.style.bg), Some(Some(Color::DarkGray)));
    }

    #[test]
    fn code_block_is_framed_and_highlighted() {
        let src = "```rust\nfn main() {}\nlet x = 1;\n```";
        let lines = render_markdown(src, &SyntectHighlighter::default());
        let text = text_of(&lines);
        assert_eq!(text[0], "╭── rust");
        assert_eq!(text[1], "│ fn main() {}");
        assert_eq!(text[2], "│ let x = 1;");
        assert_eq!(text.last().map(String::as_str), Some("╰──"));
        // more than the border and one plain span means the body was highlighted
        assert!(lines[1].spans.len() > 2);
    }

    #[test]
    fn lists_quotes_and_links() {
        let src = "- one\n- two\n\n1. first\n\n> quoted\n\n[site](https://example.com)";
        let text = text_of(&render_markdown(src, &PlainHighlighter));
        assert!(text.contains(&"• one".to_string()));
        assert!(text.contains(&"• two".to_string()));
        assert!(text.contains(&"1. first".to_string()));
        assert!(text.contains(&"│ quoted".to_string()));
        assert!(text.contains(&"site (https://example.com)".to_string()));
    }

    #[test]
    fn unclosed_fence_still_renders() {
        let text = text_of(&render_markdown("```\nhalf", &PlainHighlighter));
        assert_eq!(text[1], "│ half");
    }
}
