pub mod grid;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use crate::daily::DAILY_SLOTS;
use crate::game::GamePhase;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn render_playing(app: &mut App, f: &mut Frame) {
    let game = match app.session.game() {
        Some(game) => game,
        None => return,
    };

    // styles
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let yellow_bold_style = Style::default().patch(bold_style).fg(Color::Yellow);

    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);

    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let area = f.area();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);

    let extract_text = if game.is_over() {
        &game.puzzle.extract
    } else {
        &game.puzzle.censored_extract
    };
    let mut extract_occupied_lines =
        ((extract_text.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if extract_text.width() <= max_chars_per_line as usize {
        extract_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // heading
            Constraint::Length(1), // question counter
            Constraint::Length(1), // padding
            Constraint::Length(1), // the title grid
            Constraint::Length(1), // padding
            Constraint::Length(extract_occupied_lines),
            Constraint::Min(0),
            Constraint::Length(1), // score
            Constraint::Length(1), // legend
            Constraint::Length(1), // attribution
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled("מה הערך?", bold_style)),
        Line::from(Span::styled("משחק זיהוי ערכים", dim_style)),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    let counter = match app.session.daily_run() {
        Some(_) => format!(
            "אתגר יומי · שאלה {} מתוך {}",
            app.session.scoreboard.asked, DAILY_SLOTS
        ),
        None => format!("שאלה {}", app.session.scoreboard.asked),
    };
    let counter_widget =
        Paragraph::new(Span::styled(counter, dim_style)).alignment(Alignment::Center);
    f.render_widget(counter_widget, chunks[1]);

    let rects = grid::cell_rects(chunks[3], &game.puzzle.display_words);
    for (idx, rect) in rects.iter().enumerate() {
        if rect.width == 0 {
            continue;
        }
        let shown = game.displayed(idx).unwrap_or('_');
        let mut style = match game.phase {
            GamePhase::Solved => green_bold_style,
            GamePhase::Revealed => yellow_bold_style,
            GamePhase::Active if game.is_flashing() => red_bold_style,
            GamePhase::Active if game.puzzle.cells[idx].is_const => dim_bold_style,
            GamePhase::Active => bold_style,
        };
        if game.phase == GamePhase::Active && idx == game.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let cell_widget = Paragraph::new(Span::styled(shown.to_string(), style));
        f.render_widget(cell_widget, *rect);
    }

    let extract = Paragraph::new(extract_text.as_str())
        .alignment(Alignment::Right)
        .wrap(Wrap { trim: true });
    f.render_widget(extract, chunks[5]);

    let board = app.session.scoreboard;
    let score_line = format!(
        "נקודות: {} · נכון: {} · לא נכון: {} · שיא: {}",
        board.points(),
        board.correct,
        board.incorrect,
        app.session.best.points()
    );
    let score_widget =
        Paragraph::new(Span::styled(score_line, bold_style)).alignment(Alignment::Center);
    f.render_widget(score_widget, chunks[7]);

    let legend = match game.phase {
        GamePhase::Active => Span::styled(
            "(enter) בדיקה / (esc) חשיפה / (ctrl+o) פתיחה בוויקיפדיה / (ctrl+c) יציאה",
            italic_style,
        ),
        GamePhase::Solved => Span::styled("נכון! / (enter) השאלה הבאה", green_bold_style),
        GamePhase::Revealed => Span::styled("זה היה הערך / (enter) השאלה הבאה", yellow_bold_style),
    };
    let legend_widget = Paragraph::new(legend).alignment(Alignment::Center);
    f.render_widget(legend_widget, chunks[8]);

    let attribution = Paragraph::new(Span::styled("מקור: ויקיפדיה · CC BY-SA", dim_style))
        .alignment(Alignment::Center);
    f.render_widget(attribution, chunks[9]);

    app.cell_rects = rects;
}

pub fn render_daily_summary(app: &App, f: &mut Frame) {
    let run = match app.session.daily_run() {
        Some(run) => run,
        None => return,
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let share = run.share_text();
    let lines: Vec<Line> = share.lines().map(Line::from).collect();
    let body_lines = lines.len() as u16;

    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(body_lines + 2) / 2),
            Constraint::Length(body_lines),
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    let card = Paragraph::new(lines)
        .style(bold_style)
        .alignment(Alignment::Center);
    f.render_widget(card, chunks[1]);

    let legend = Paragraph::new(Span::styled(
        String::from(if Browser::is_available() {
            "(t) ציוץ התוצאה / (esc) יציאה"
        } else {
            "(esc) יציאה"
        }),
        italic_style,
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[3]);
}

pub fn render_exhausted(f: &mut Frame) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(3) / 2),
            Constraint::Length(1),
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    let message = Paragraph::new(Span::styled(
        "זהו. זה נגמר. סיימתם הכל. נראה אתכם מחר?",
        bold_style,
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[1]);

    let legend =
        Paragraph::new(Span::styled("(esc) יציאה", italic_style)).alignment(Alignment::Center);
    f.render_widget(legend, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{App, AppState, Cli};
    use clap::Parser;
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app(mode: &str) -> App {
        let cli = Cli::parse_from(["erekh", "--mode", mode]);
        App::new(cli, crate::articles::bundled(), 100)
    }

    fn render<F>(width: u16, height: u16, mut render_fn: F) -> String
    where
        F: FnMut(&mut Frame),
    {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_fn(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_playing_shows_heading_and_attribution() {
        let mut app = create_test_app("free");

        let rendered = render(80, 24, |f| render_playing(&mut app, f));

        assert!(rendered.contains("מה הערך?"));
        assert!(rendered.contains("משחק זיהוי ערכים"));
        assert!(rendered.contains("ויקיפדיה"));
    }

    #[test]
    fn test_render_playing_shows_censored_extract() {
        let mut app = create_test_app("free");

        let rendered = render(80, 24, |f| render_playing(&mut app, f));

        assert!(rendered.contains('█'));
    }

    #[test]
    fn test_render_playing_records_cell_rects() {
        let mut app = create_test_app("free");

        render(80, 24, |f| render_playing(&mut app, f));

        let cells = app.session.game().unwrap().puzzle.cells.len();
        assert_eq!(app.cell_rects.len(), cells);
        assert!(app
            .cell_rects
            .iter()
            .filter(|r| r.width > 0)
            .all(|r| r.x >= HORIZONTAL_MARGIN));
    }

    #[test]
    fn test_render_playing_counter_per_mode() {
        let mut app = create_test_app("free");
        let rendered = render(80, 24, |f| render_playing(&mut app, f));
        assert!(rendered.contains("שאלה 1"));
        assert!(!rendered.contains("אתגר יומי"));

        let mut app = create_test_app("daily");
        let rendered = render(80, 24, |f| render_playing(&mut app, f));
        assert!(rendered.contains("אתגר יומי"));
        assert!(rendered.contains("מתוך 10"));
    }

    #[test]
    fn test_render_playing_small_area() {
        let mut app = create_test_app("free");

        let rendered = render(20, 5, |f| render_playing(&mut app, f));

        assert!(!rendered.trim().is_empty());
    }

    #[test]
    fn test_render_daily_summary_shows_share_card() {
        let mut app = create_test_app("daily");
        app.state = AppState::DailySummary;

        let rendered = render(80, 24, |f| render_daily_summary(&app, f));

        assert!(rendered.contains("מה הערך?"));
        assert!(rendered.contains("0/10"));
        assert!(rendered.contains("נקודות"));
    }

    #[test]
    fn test_render_daily_summary_without_run_is_blank() {
        let app = create_test_app("free");

        let rendered = render(80, 24, |f| render_daily_summary(&app, f));

        assert!(rendered.trim().is_empty());
    }

    #[test]
    fn test_render_exhausted_message() {
        let rendered = render(80, 24, render_exhausted);

        assert!(rendered.contains("זהו. זה נגמר."));
        assert!(rendered.contains("(esc)"));
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 2);

        const _: () = assert!(HORIZONTAL_MARGIN * 2 < 80);
        const _: () = assert!(VERTICAL_MARGIN * 2 < 24);
    }
}
