//! Pure rendering: map a prompt snapshot to styled lines.
//!
//! `render_lines` is the whole projection. `render` only hands those lines
//! to the ratatui frame.

use std::fmt::Display;

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::items::Item;
use super::state::{Instructions, Options, PromptState, Status};
use super::theme;

/// Hint shown when the list is longer than a page.
pub const MORE_CHOICES_HINT: &str = "(Use arrow keys to reveal more choices)";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the snapshot into the terminal frame.
pub fn render<V: Display>(state: &PromptState<V>, options: &Options<V>, frame: &mut Frame) {
    let paragraph = Paragraph::new(render_lines(state, options));
    frame.render_widget(paragraph, frame.area());
}

/// Every line of the prompt, top to bottom.
pub fn render_lines<V: Display>(state: &PromptState<V>, options: &Options<V>) -> Vec<Line<'static>> {
    if state.status == Status::Done {
        return vec![render_answer(state, options)];
    }

    let mut lines = vec![render_header(state, options)];

    lines.extend(
        state
            .window
            .rows()
            .filter_map(|index| state.items.get(index).map(|item| (index, item)))
            .map(|(index, item)| render_item(item, index == state.active)),
    );

    if state.window.is_partial() {
        lines.push(Line::from(Span::styled(MORE_CHOICES_HINT, theme::STYLE_DIM)));
    }

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!("> {}", error),
            theme::STYLE_ERROR,
        )));
    }

    lines
}

/// Rows the inline viewport needs: header, page, hint, error footer.
pub fn viewport_height<V>(state: &PromptState<V>) -> u16 {
    let hint = usize::from(state.window.is_partial());
    let rows = 1 + state.window.height + hint + 1;
    u16::try_from(rows).unwrap_or(u16::MAX)
}

// ============================================================================
// ROWS
// ============================================================================

/// One list row.
///
/// Disabled rows are dimmed with their reason. Otherwise the checkbox glyph
/// reflects `checked`, and the active row gets the pointer and highlight.
pub fn render_item<V: Display>(item: &Item<V>, is_active: bool) -> Line<'static> {
    if !item.is_selectable() {
        let mut text = format!("- {}", item.display_text());
        if let Some(reason) = item.disabled.reason() {
            text.push(' ');
            text.push_str(reason);
        }
        return Line::from(Span::styled(text, theme::STYLE_DIM));
    }

    let checkbox = if item.checked {
        Span::styled(theme::CHECKBOX_ON, theme::STYLE_CHECKED)
    } else {
        Span::styled(theme::CHECKBOX_OFF, theme::STYLE_UNCHECKED)
    };
    let (pointer, style) = if is_active {
        (theme::POINTER, theme::STYLE_ACTIVE)
    } else {
        (" ", Style::default())
    };

    let mut spans = vec![Span::raw(pointer), Span::raw(" "), checkbox, Span::raw(" ")];
    spans.extend(item.display_line().spans);
    Line::from(spans).style(style)
}

// ============================================================================
// HEADER / ANSWER
// ============================================================================

fn render_header<V>(state: &PromptState<V>, options: &Options<V>) -> Line<'static> {
    let prefix = options
        .prefix
        .clone()
        .unwrap_or_else(|| theme::PREFIX_PENDING.to_string());

    let mut spans = vec![
        Span::styled(prefix, theme::STYLE_PREFIX),
        Span::raw(" "),
        Span::styled(options.message.clone(), theme::STYLE_MESSAGE),
    ];
    if state.show_help {
        spans.extend(help_spans(&options.instructions));
    }
    Line::from(spans)
}

fn help_spans(instructions: &Instructions) -> Vec<Span<'static>> {
    match instructions {
        Instructions::Hidden => Vec::new(),
        Instructions::Custom(text) => vec![Span::raw(text.clone())],
        Instructions::Default => vec![
            Span::raw(" (Press "),
            Span::styled("<space>", theme::STYLE_KEY),
            Span::raw(" to select, "),
            Span::styled("<a>", theme::STYLE_KEY),
            Span::raw(" to toggle all, "),
            Span::styled("<i>", theme::STYLE_KEY),
            Span::raw(" to invert selection, and "),
            Span::styled("<enter>", theme::STYLE_KEY),
            Span::raw(" to proceed)"),
        ],
    }
}

/// Final line: the message followed by the chosen labels.
fn render_answer<V: Display>(state: &PromptState<V>, options: &Options<V>) -> Line<'static> {
    let prefix = options
        .prefix
        .clone()
        .unwrap_or_else(|| theme::PREFIX_DONE.to_string());
    let answer = state
        .items
        .iter()
        .filter(|item| item.is_checked())
        .map(Item::display_text)
        .collect::<Vec<_>>()
        .join(", ");

    Line::from(vec![
        Span::styled(prefix, theme::STYLE_PREFIX),
        Span::raw(" "),
        Span::styled(options.message.clone(), theme::STYLE_MESSAGE),
        Span::raw(" "),
        Span::styled(answer, theme::STYLE_ANSWER),
    ])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkbox::items::Disabled;
    use crate::checkbox::update::resolve_validation;
    use crate::checkbox::validate::Validation;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn options() -> Options<&'static str> {
        Options {
            message: "Select for staging:".into(),
            prefix: None,
            instructions: Instructions::Default,
            page_size: 7,
            loop_navigation: true,
            required: false,
            on_toggle: None,
        }
    }

    fn sample() -> PromptState<&'static str> {
        let items = vec![
            Item::new("alpha"),
            Item::new("beta").disabled(Disabled::Yes),
            Item::new("gamma").checked(true),
            Item::new("delta").disabled(Disabled::Reason("locked".into())),
        ];
        PromptState::new(&items, 7, true).unwrap()
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(text).collect()
    }

    #[test]
    fn header_shows_message_and_legend() {
        let lines = render_lines(&sample(), &options());
        let header = text(&lines[0]);
        assert!(header.starts_with("? Select for staging:"));
        assert!(header.contains("<space>"));
        assert!(header.contains("<enter>"));
    }

    #[test]
    fn help_is_hidden_after_dismissal() {
        let state = PromptState {
            show_help: false,
            ..sample()
        };
        let lines = render_lines(&state, &options());
        assert_eq!(text(&lines[0]), "? Select for staging:");
    }

    #[test]
    fn custom_and_hidden_instructions() {
        let custom = Options {
            instructions: Instructions::Custom(" > press <a> to toggle all".into()),
            ..options()
        };
        let lines = render_lines(&sample(), &custom);
        assert!(text(&lines[0]).ends_with(" > press <a> to toggle all"));

        let hidden = Options {
            instructions: Instructions::Hidden,
            ..options()
        };
        let lines = render_lines(&sample(), &hidden);
        assert_eq!(text(&lines[0]), "? Select for staging:");
    }

    #[test]
    fn rows_have_distinct_states() {
        let lines = texts(&render_lines(&sample(), &options()));
        assert_eq!(lines[1], "❯ ◯ alpha");
        assert_eq!(lines[2], "- beta (disabled)");
        assert_eq!(lines[3], "  ◉ gamma");
        assert_eq!(lines[4], "- delta locked");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn active_row_is_highlighted() {
        let active = render_item(&Item::new("x"), true);
        let idle = render_item(&Item::new("x"), false);
        assert_eq!(active.style, theme::STYLE_ACTIVE);
        assert_eq!(idle.style, Style::default());
    }

    #[test]
    fn disabled_with_empty_reason_shows_label_only() {
        let item = Item::new("x").disabled(Disabled::Reason(String::new()));
        assert_eq!(text(&render_item(&item, false)), "- x");
    }

    #[test]
    fn error_footer_is_rendered() {
        let state = PromptState {
            error: Some("pick two".into()),
            ..sample()
        };
        let lines = texts(&render_lines(&state, &options()));
        assert_eq!(lines.last().map(String::as_str), Some("> pick two"));
    }

    #[test]
    fn long_list_shows_page_and_hint() {
        let items: Vec<Item<usize>> = (0..20).map(Item::new).collect();
        let state = PromptState::new(&items, 5, false).unwrap();
        let opts = Options {
            message: "Pick".into(),
            prefix: None,
            instructions: Instructions::Hidden,
            page_size: 5,
            loop_navigation: false,
            required: false,
            on_toggle: None,
        };
        let lines = texts(&render_lines(&state, &opts));
        assert_eq!(lines.len(), 1 + 5 + 1);
        assert_eq!(lines[6], MORE_CHOICES_HINT);
        assert_eq!(viewport_height(&state), 8);
    }

    #[test]
    fn answer_lists_checked_labels() {
        let state = resolve_validation(sample(), Validation::Valid);
        let lines = texts(&render_lines(&state, &options()));
        assert_eq!(lines, vec!["✔ Select for staging: gamma".to_string()]);
    }

    #[test]
    fn custom_prefix_is_used_in_both_states() {
        let opts = Options {
            prefix: Some("🏗️".into()),
            ..options()
        };
        let pending = render_lines(&sample(), &opts);
        assert!(text(&pending[0]).starts_with("🏗️ "));

        let done = resolve_validation(sample(), Validation::Valid);
        let lines = render_lines(&done, &opts);
        assert!(text(&lines[0]).starts_with("🏗️ "));
    }

    #[test]
    fn renders_into_terminal_buffer() {
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        let state = sample();
        let opts = options();
        terminal.draw(|frame| render(&state, &opts, frame)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect();
        assert!(content.contains("alpha"), "Buffer should contain the first row");
        assert!(content.contains("gamma"), "Buffer should contain the checked row");
    }
}
