use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Gauge, Paragraph, Row, Table};

use crate::output::score_bar;
use crate::timing::Phase;
use crate::tui::app::{App, FlashKind, InputMode, Panel, ScoreField};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.height < 10 || area.width < 50 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Panels(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let panels = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_title(frame, chunks[0], app);
    render_score_panel(frame, panels[0], app);
    render_timing_panel(frame, panels[1], app);
    render_status_bar(frame, chunks[2], app);

    match app.input_mode {
        InputMode::Editing => render_edit_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let result = &app.result;
    let title = "Wellcoach";
    let summary = format!(
        "{} {} {}",
        result.score,
        result.trend.symbol(),
        result.tier.label()
    );
    let used = title.len() + summary.chars().count();
    let padding = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(summary, Style::default().fg(theme.tier_color(result.tier))),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn panel_block<'a>(title: &'a str, active: bool, app: &App) -> Block<'a> {
    let color = if active {
        app.theme.panel_active
    } else {
        app.theme.panel_inactive
    };
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(color))
}

fn render_score_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let active = app.panel == Panel::Score;
    let block = panel_block(" Wellness Score ", active, app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(3), // Sliders
        Constraint::Length(1),
        Constraint::Length(1), // Gauge
        Constraint::Length(1), // Trend
        Constraint::Fill(1),
    ])
    .split(inner);

    let slider_width = (inner.width as usize).saturating_sub(18).min(20);
    let sliders: Vec<Line> = ScoreField::ALL
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let value = app.field_value(*field);
            let (filled, empty) = score_bar(value.round() as i64, slider_width);
            let marker = if active && idx == app.score_row {
                "›"
            } else {
                " "
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.panel_active).bold()),
                Span::raw(format!("{:<10}", field.label())),
                Span::styled(filled, Style::default().fg(theme.title_color)),
                Span::styled(empty, Style::default().fg(theme.bar_empty)),
                Span::raw(format!(" {:>3}", value)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(sliders), rows[0]);

    let result = &app.result;
    let tier_color = theme.tier_color(result.tier);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(tier_color).bg(theme.bar_empty))
        .percent(result.score.clamp(0, 100) as u16)
        .label(format!("{} ({})", result.score, result.tier.label()));
    frame.render_widget(gauge, rows[2]);

    let trend_style = Style::default().fg(tier_color).bold();
    let trend = Line::from(vec![
        Span::styled(result.trend.symbol(), trend_style),
        Span::styled(
            format!(" {} from {}", result.trend.label(), app.input.previous),
            Style::default().fg(theme.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(trend), rows[3]);
}

fn render_timing_panel(frame: &mut Frame, area: Rect, app: &mut App) {
    let active = app.panel == Panel::Timing;
    let disabled = app.editor.is_disabled();
    let title = if disabled {
        " Breathing Timer (disabled) "
    } else {
        " Breathing Timer "
    };
    let block = panel_block(title, active, app);

    let timing = *app.editor.current();
    let ranges = *app.editor.ranges();
    let value_style = if disabled {
        Style::default().fg(app.theme.disabled)
    } else {
        Style::default()
    };
    let muted = Style::default().fg(app.theme.muted);

    let rows: Vec<Row> = Phase::ALL
        .iter()
        .map(|phase| {
            let value = format!("{}s", timing.get(*phase));
            Row::new(vec![
                Cell::from(phase.title()),
                Cell::from(value).style(value_style),
                Cell::from(ranges.get(*phase).to_string()).style(muted),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Fill(1),
    ];

    let highlight = if active {
        app.theme.row_selected
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Phase", "Value", "Range"])
                .style(app.theme.header_style)
                .bottom_margin(1),
        )
        .footer(Row::new(vec![
            Cell::from("Cycle"),
            Cell::from(format!("{}s", timing.cycle_seconds())),
        ]))
        .block(block)
        .row_highlight_style(highlight);

    frame.render_stateful_widget(table, area, &mut app.timing_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let color = match kind {
            FlashKind::Success => theme.flash_success,
            FlashKind::Error => theme.flash_error,
            FlashKind::Info => theme.muted,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(color)))
    } else {
        let hints: &[(&str, &str)] = match app.panel {
            Panel::Score => &[
                ("j/k", ":nav "),
                ("←/→", ":adjust "),
                ("r", ":record "),
                ("Tab", ":timer "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Panel::Timing => &[
                ("j/k", ":nav "),
                ("e", ":edit "),
                ("d", ":disable "),
                ("s", ":save "),
                ("Tab", ":score "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    let bar_style = Style::default().bg(theme.status_bar_bg);
    frame.render_widget(Paragraph::new(text).style(bar_style), area);
}

fn render_edit_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(40, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let phase = app.selected_phase();
    let title = format!(" {} ({}) ", phase.title(), app.editor.ranges().get(phase));
    let block = Block::bordered()
        .title(Span::styled(title, app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let muted = Style::default().fg(app.theme.muted);
    let hint = Paragraph::new("Enter: apply | Esc: cancel").style(muted);
    frame.render_widget(Paragraph::new(format!("{}|", app.edit_buffer)), chunks[0]);
    frame.render_widget(hint, chunks[1]);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let entries = [
        ("Tab           ", "Switch panel"),
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("← / →         ", "Adjust sub-score by 5"),
        ("r             ", "Record score as baseline"),
        ("e / Enter     ", "Edit timer phase"),
        ("d             ", "Disable/enable timer edits"),
        ("s             ", "Save timer as default"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_range_labels() {
        let (mut app, _) = test_app("ui_ranges");
        let screen = render(&mut app);
        for label in ["2-10s", "2-15s", "0-20s", "0-120s"] {
            assert!(screen.contains(label), "missing {}", label);
        }
    }

    #[test]
    fn test_renders_disabled_title() {
        let (mut app, _) = test_app("ui_disabled");
        app.toggle_disabled();
        let screen = render(&mut app);
        assert!(screen.contains("Breathing Timer (disabled)"));
    }

    #[test]
    fn test_small_terminal_message() {
        let (mut app, _) = test_app("ui_small");
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Terminal"));
    }
}
