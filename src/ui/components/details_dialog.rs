use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::Theme;
use crate::config::{DialogAction, KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsEvent {
    Closed,
}

/// Read-only popup listing a record's fields as label/value pairs.
pub struct DetailsDialog {
    title: String,
    fields: Vec<(String, String)>,
    scroll: u16,
    resolver: Arc<KeyResolver>,
}

impl DetailsDialog {
    pub fn new(
        title: impl Into<String>,
        fields: Vec<(String, String)>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        Self {
            title: title.into(),
            fields,
            scroll: 0,
            resolver,
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.fields.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

impl Component for DetailsDialog {
    type Output = DetailsEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_dialog(&key, DialogAction::Dismiss) {
            return Ok(DetailsEvent::Closed.into());
        }
        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.scroll = (self.scroll + 1).min(self.max_scroll());
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            self.scroll = self.scroll.saturating_sub(1);
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Percentage(60));
        frame.render_widget(Clear, popup_area);

        let label_width = self
            .fields
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let label_style = Style::default()
            .fg(theme.header())
            .add_modifier(Modifier::BOLD);
        let value_style = Style::default().fg(theme.text());

        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:>label_width$}"), label_style),
                    Span::raw("  "),
                    Span::styled(value.as_str(), value_style),
                ])
            })
            .collect();

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(Line::from(Span::styled(
                format!(
                    " {} close ",
                    self.resolver.display_dialog(DialogAction::Dismiss)
                ),
                Style::default().fg(theme.overlay1()),
            )))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn dialog() -> DetailsDialog {
        DetailsDialog::new(
            "Room A-101",
            vec![
                ("Room Number".to_string(), "A-101".to_string()),
                ("Price".to_string(), "$120.00".to_string()),
            ],
            Arc::new(KeyResolver::default()),
        )
    }

    #[test]
    fn test_renders_fields() {
        let mut dialog = dialog();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| dialog.render(frame, frame.area(), &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Room A-101"));
        assert!(text.contains("$120.00"));
    }

    #[test]
    fn test_dismiss_closes() {
        let mut dialog = dialog();
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(
            dialog.handle_key(key).unwrap(),
            EventResult::Event(DetailsEvent::Closed)
        );
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(dialog.handle_key(key).unwrap(), EventResult::Consumed);
    }
}
