//! Language detection and syntax highlighting for the preview pane.
//!
//! The [Highlighter] trait is the seam between the preview pipeline and the highlighting
//! backend. [SyntectHighlighter] is the default backend; [PlainHighlighter] is used when
//! highlighting is disabled and in tests.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{self, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use std::path::Path;
use std::sync::OnceLock;

const PLAIN_TEXT: &str = "Plain Text";

const DARK_SYNTAX_THEME: &str = "base16-ocean.dark";
const LIGHT_SYNTAX_THEME: &str = "InspiredGitHub";

/// Language tag attached to text classifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    name: String,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn plain() -> Self {
        Self::new(PLAIN_TEXT)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        self.name == PLAIN_TEXT
    }
}

/// Capability interface of a highlighting backend.
pub trait Highlighter {
    /// Guesses the language from the path first, then from the first line of content.
    /// `None` means plain text.
    fn classify(&self, path: &Path, first_line: Option<&str>) -> Option<Language>;

    /// Styles `lines`. Must return exactly one output line per input line.
    fn render(&self, lines: &[String], language: &Language) -> Vec<Line<'static>>;

    /// Language named by a code fence token such as `rust` or `py`.
    fn language_for_token(&self, _token: &str) -> Option<Language> {
        None
    }

    /// Called when the active theme switches between dark and light.
    fn set_dark(&mut self, _dark: bool) {}
}

/// Unstyled output, no language detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn classify(&self, _path: &Path, _first_line: Option<&str>) -> Option<Language> {
        None
    }

    fn render(&self, lines: &[String], _language: &Language) -> Vec<Line<'static>> {
        plain_lines(lines)
    }
}

static SYNTECT: OnceLock<(SyntaxSet, ThemeSet)> = OnceLock::new();

fn syntect() -> &'static (SyntaxSet, ThemeSet) {
    SYNTECT.get_or_init(|| {
        log::debug!("loading syntect syntax and theme sets");
        (
            SyntaxSet::load_defaults_nonewlines(),
            ThemeSet::load_defaults(),
        )
    })
}

/// syntect backed highlighter. Syntax definitions are loaded once per process.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    dark: bool,
}

impl SyntectHighlighter {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    fn find_syntax(path: &Path, first_line: Option<&str>) -> Option<&'static SyntaxReference> {
        let (syntaxes, _) = syntect();

        // Makefile, Dockerfile and friends are registered by full name
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && let Some(syntax) = syntaxes.find_syntax_by_extension(name)
        {
            return Some(syntax);
        }

        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && let Some(syntax) = syntaxes.find_syntax_by_extension(ext)
        {
            return Some(syntax);
        }

        first_line.and_then(|line| syntaxes.find_syntax_by_first_line(line))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for SyntectHighlighter {
    fn classify(&self, path: &Path, first_line: Option<&str>) -> Option<Language> {
        Self::find_syntax(path, first_line)
            .filter(|syntax| syntax.name != PLAIN_TEXT)
            .map(|syntax| Language::new(syntax.name.clone()))
    }

    fn language_for_token(&self, token: &str) -> Option<Language> {
        let (syntaxes, _) = syntect();
        syntaxes
            .find_syntax_by_token(token)
            .filter(|syntax| syntax.name != PLAIN_TEXT)
            .map(|syntax| Language::new(syntax.name.clone()))
    }

    fn render(&self, lines: &[String], language: &Language) -> Vec<Line<'static>> {
        if language.is_plain() {
            return plain_lines(lines);
        }
        let (syntaxes, themes) = syntect();
        let Some(syntax) = syntaxes.find_syntax_by_name(language.name()) else {
            return plain_lines(lines);
        };
        let theme_name = if self.dark {
            DARK_SYNTAX_THEME
        } else {
            LIGHT_SYNTAX_THEME
        };
        let Some(theme) = themes.themes.get(theme_name) else {
            return plain_lines(lines);
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            match highlighter.highlight_line(line, syntaxes) {
                Ok(regions) => out.push(regions_to_line(regions)),
                Err(e) => {
                    log::debug!("highlighting failed for {}: {e}", language.name());
                    let done = out.len();
                    out.extend(plain_lines(&lines[done..]));
                    break;
                }
            }
        }
        out
    }

    fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }
}

fn regions_to_line(regions: Vec<(highlighting::Style, &str)>) -> Line<'static> {
    let spans: Vec<Span<'static>> = regions
        .into_iter()
        .map(|(style, text)| {
            let mut modifier = Modifier::empty();
            if style.font_style.contains(highlighting::FontStyle::BOLD) {
                modifier |= Modifier::BOLD;
            }
            if style.font_style.contains(highlighting::FontStyle::ITALIC) {
                modifier |= Modifier::ITALIC;
            }
            if style.font_style.contains(highlighting::FontStyle::UNDERLINE) {
                modifier |= Modifier::UNDERLINED;
            }
            Span::styled(
                text.to_string(),
                Style::default()
                    .fg(to_ratatui_color(style.foreground))
                    .add_modifier(modifier),
            )
        })
        .collect();
    Line::from(spans)
}

/// Alpha 0 encodes a terminal palette index, alpha 1 the default colour.
fn to_ratatui_color(color: highlighting::Color) -> Color {
    match color.a {
        0 => match color.r {
            0x00 => Color::Black,
            0x01 => Color::Red,
            0x02 => Color::Green,
            0x03 => Color::Yellow,
            0x04 => Color::Blue,
            0x05 => Color::Magenta,
            0x06 => Color::Cyan,
            0x07 => Color::White,
            n => Color::Indexed(n),
        },
        1 => Color::Reset,
        _ => Color::Rgb(color.r, color.g, color.b),
    }
}

pub fn plain_lines(lines: &[String]) -> Vec<Line<'static>> {
    lines.iter().map(|line| Line::from(line.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detects_language_by_extension() {
        let hl = SyntectHighlighter::default();
        let lang = hl.classify(Path::new("src/main.rs"), None);
        assert_eq!(lang.map(|l| l.name().to_string()), Some("Rust".to_string()));
    }

    #[test]
    fn detects_language_by_shebang() {
        let hl = SyntectHighlighter::default();
        let lang = hl.classify(Path::new("run"), Some("#!/usr/bin/env python3"));
        assert_eq!(lang.map(|l| l.name().to_string()), Some("Python".to_string()));
    }

    #[test]
    fn unknown_content_is_plain() {
        let hl = SyntectHighlighter::default();
        assert!(hl.classify(Path::new("notes.zzz"), Some("hello")).is_none());
    }

    #[test]
    fn render_keeps_line_count_and_text() {
        let hl = SyntectHighlighter::default();
        let src = lines(&["fn main() {", "    println!(\"hi\");", "}"]);
        let out = hl.render(&src, &Language::new("Rust"));
        assert_eq!(out.len(), 3);
        let text: String = out[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "    println!(\"hi\");");
    }

    #[test]
    fn fence_tokens_resolve_to_languages() {
        let hl = SyntectHighlighter::default();
        let name = |token| hl.language_for_token(token).map(|l| l.name().to_string());
        assert_eq!(name("rust"), Some("Rust".to_string()));
        assert_eq!(name("py"), Some("Python".to_string()));
        assert_eq!(name("no-such-language"), None);
        assert!(PlainHighlighter.language_for_token("rust").is_none());
    }

    #[test]
    fn light_theme_still_renders() {
        let mut hl = SyntectHighlighter::default();
        hl.set_dark(false);
        let out = hl.render(&lines(&["x = 1"]), &Language::new("Python"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn plain_highlighter_is_passthrough() {
        let hl = PlainHighlighter;
        let out = hl.render(&lines(&["a", "b"]), &Language::plain());
        assert_eq!(out.len(), 2);
        assert!(hl.classify(Path::new("x.rs"), None).is_none());
    }
}
