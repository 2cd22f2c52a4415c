use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;

/// Modal message box dismissed with Enter or Esc
pub struct AlertDialog {
    pub visible: bool,
    pub title: String,
    pub message: String,
}

impl AlertDialog {
    pub fn new(title: &str) -> Self {
        Self {
            visible: false,
            title: title.to_string(),
            message: String::new(),
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.message.clear();
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 30, frame.area());
        frame.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.as_str(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to go back to the form",
                Style::default().fg(Color::Gray),
            )),
        ];

        let alert = Paragraph::new(text)
            .block(
                Block::default()
                    .title(Span::styled(
                        format!(" {} ", self.title),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(alert, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_show_and_hide() {
        let mut dialog = AlertDialog::new("Submission failed");
        assert!(!dialog.visible);

        dialog.show("Failed to send notification email");
        assert!(dialog.visible);
        assert_eq!(dialog.message, "Failed to send notification email");

        dialog.hide();
        assert!(!dialog.visible);
        assert!(dialog.message.is_empty());
    }
}
