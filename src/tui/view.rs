//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches on the machine's current state. Widget-building functions
//! are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::WidgetConfig;
use crate::types::MachineState;

use super::state::App;
use super::theme;

const FIELD_CURSOR: &str = "█";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, widget in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),   // widget
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(), chunks[0]);
    frame.render_widget(render_help(app.state(), app.notice.is_some()), chunks[2]);

    let widget_area = chunks[1];

    match app.state() {
        MachineState::Question => render_question(&app.config, frame, widget_area),
        MachineState::Form => {
            render_form(&app.config, &app.draft, app.field_focused(), frame, widget_area)
        }
        MachineState::Thanks => render_thanks(
            &app.config,
            &app.machine.context().response,
            frame,
            widget_area,
        ),
        // Closed widget draws nothing
        MachineState::Closed => {}
    }

    if let Some(notice) = &app.notice {
        render_notice(notice, frame, widget_area);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title() -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![Span::styled("Feedback", theme::STYLE_TITLE)]))
}

/// Help line showing available keybindings for the current screen.
fn render_help(state: MachineState, notice_open: bool) -> Paragraph<'static> {
    let help_text = if notice_open {
        "[any key] OK"
    } else {
        match state {
            MachineState::Question => "[g] good  [b] bad  [x/Esc] close  [q] quit",
            MachineState::Form => "[^S] submit  [^X] close  [Enter] new line  [^C] quit",
            MachineState::Thanks => "[x/Esc] close  [q] quit",
            MachineState::Closed => "[q] quit",
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// The bordered panel every visible screen is drawn in, with a close button
/// labelled by the key that closes it there.
fn screen_block(close_key: &str) -> Block<'static> {
    Block::bordered().title_top(
        Line::from(Span::styled(format!(" [{}] ✕ ", close_key), theme::STYLE_DIM))
            .right_aligned(),
    )
}

/// A rectangle of at most `width`×`height`, centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ============================================================================
// SCREEN: QUESTION
// ============================================================================

fn render_question(config: &WidgetConfig, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", config.question), theme::STYLE_HEADER)),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[g] ", theme::STYLE_INTERACTIVE),
            Span::styled("Good", theme::STYLE_GOOD),
            Span::raw("     "),
            Span::styled("[b] ", theme::STYLE_INTERACTIVE),
            Span::styled("Bad", theme::STYLE_BAD),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(screen_block("x"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: FORM
// ============================================================================

fn render_form(config: &WidgetConfig, draft: &str, focused: bool, frame: &mut Frame, area: Rect) {
    let block = screen_block("^X");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // header
        Constraint::Min(3),   // field
        Constraint::Length(1), // submit
    ])
    .split(inner);

    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", config.form_prompt), theme::STYLE_HEADER)),
    ]);
    frame.render_widget(header, chunks[0]);

    let field_block = if focused {
        Block::bordered().border_style(theme::STYLE_FIELD_FOCUSED)
    } else {
        Block::bordered().border_style(theme::STYLE_DIM)
    };
    let field = Paragraph::new(field_text(config, draft, focused))
        .block(field_block)
        .wrap(Wrap { trim: false });
    frame.render_widget(field, chunks[1]);

    let submit = Paragraph::new(Line::from(vec![
        Span::raw("  "),
        Span::styled("[^S] ", theme::STYLE_INTERACTIVE),
        Span::styled("Submit", theme::STYLE_HEADER),
    ]));
    frame.render_widget(submit, chunks[2]);
}

/// Draft text with a cursor, or the placeholder while empty.
fn field_text(config: &WidgetConfig, draft: &str, focused: bool) -> Text<'static> {
    let cursor = if focused { FIELD_CURSOR } else { "" };

    if draft.is_empty() {
        return Text::from(Line::from(vec![
            Span::raw(cursor),
            Span::styled(config.placeholder.clone(), theme::STYLE_PLACEHOLDER),
        ]));
    }

    Text::raw(format!("{}{}", draft, cursor))
}

// ============================================================================
// SCREEN: THANKS
// ============================================================================

fn render_thanks(config: &WidgetConfig, response: &str, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", config.thanks_line(response)),
            theme::STYLE_GOOD,
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(screen_block("x"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// NOTICE MODAL
// ============================================================================

fn render_notice(notice: &str, frame: &mut Frame, area: Rect) {
    let width = u16::try_from(notice.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(8);
    let rect = centered(area, width, 5);

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", notice), theme::STYLE_NOTICE)),
    ])
    .block(Block::bordered().border_style(theme::STYLE_NOTICE))
    .wrap(Wrap { trim: false });

    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Event;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(60, 20);
        Terminal::new(backend).unwrap()
    }

    fn rendered(app: &App) -> String {
        let mut terminal = make_terminal();
        terminal
            .draw(|frame| render(app, frame))
            .expect("render should not panic");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn app_in(events: &[Event]) -> App {
        let mut app = App::new(WidgetConfig::default());
        app.machine.send_all(events.iter().cloned());
        app
    }

    #[test]
    fn question_screen_shows_prompt_and_both_answers() {
        let content = rendered(&app_in(&[]));
        assert!(content.contains("How was your experience?"));
        assert!(content.contains("Good"));
        assert!(content.contains("Bad"));
        assert!(content.contains("✕"), "Should show close button");
    }

    #[test]
    fn form_screen_shows_placeholder_when_empty() {
        let content = rendered(&app_in(&[Event::Bad]));
        assert!(content.contains("Care to tell us why?"));
        assert!(content.contains("Complain here"));
        assert!(content.contains("Submit"));
    }

    #[test]
    fn form_screen_shows_draft_instead_of_placeholder() {
        let mut app = app_in(&[Event::Bad]);
        app.draft = "too slow".to_string();
        let content = rendered(&app);
        assert!(content.contains("too slow"));
        assert!(!content.contains("Complain here"));
    }

    #[test]
    fn thanks_screen_shows_captured_response() {
        let content = rendered(&app_in(&[Event::Bad, Event::submit("great service")]));
        assert!(content.contains("Thanks for your feedback: great service"));
    }

    #[test]
    fn thanks_after_good_has_empty_response() {
        let content = rendered(&app_in(&[Event::Good]));
        assert!(content.contains("Thanks for your feedback:"));
    }

    #[test]
    fn closed_screen_draws_no_widget() {
        let content = rendered(&app_in(&[Event::Close]));
        assert!(!content.contains("How was your experience?"));
        assert!(!content.contains("✕"));
        assert!(!content.contains("Thanks"));
        assert!(content.contains("[q] quit"));
    }

    #[test]
    fn notice_modal_overlays_form() {
        let mut app = app_in(&[Event::Bad]);
        app.notice = Some("You did not fill out the form!!".to_string());
        let content = rendered(&app);
        assert!(content.contains("You did not fill out the form!!"));
        assert!(content.contains("[any key] OK"));
    }

    #[test]
    fn every_state_renders_in_a_tiny_terminal() {
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        for events in [
            vec![],
            vec![Event::Bad],
            vec![Event::Good],
            vec![Event::Close],
        ] {
            let mut app = app_in(&events);
            app.notice = Some("notice".to_string());
            terminal
                .draw(|frame| render(&app, frame))
                .expect("every screen should render without panic");
        }
    }

    #[test]
    fn close_hint_matches_each_screen() {
        let question = rendered(&app_in(&[]));
        assert!(question.contains("[x] ✕"));

        let form = rendered(&app_in(&[Event::Bad]));
        assert!(form.contains("[^X] ✕"));
        assert!(!form.contains("[x] ✕"));
    }

    #[test]
    fn oversized_notice_renders_clamped() {
        let mut app = app_in(&[Event::Bad]);
        // One past u16::MAX must not wrap around to a tiny modal
        app.notice = Some("!".repeat(usize::from(u16::MAX) + 1));
        let content = rendered(&app);
        assert!(content.contains(&"!".repeat(40)));
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 20, 10), area);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
    }
}
