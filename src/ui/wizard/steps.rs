//! Rendering for the wizard screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::{Field, WizardStep};
use crate::ui::dialogs::centered_rect;
use crate::wizard::SubmissionStatus;

use super::WizardScreen;

const TITLE: &str = "Heubert's Job Ready Program";

const COMPLETION_REQUIREMENTS: &[&str] = &[
    "Pay full fees prior to the end date of the program",
    "At least 95% Attendance",
    "Successfully completed required projects in the course",
    "Collaborated with career coaching team regularly to apply for related jobs",
];

const REFUND_POLICY: &[&str] = &[
    "Students need to pay at least first installment of the course fee before the course start date.",
    "Students who have enrolled in a course need to pay full fee by the end of course end date regardless of their course completion.",
    "Students who enroll in the course but do not complete it also need to pay the full fee by the end of the course.",
    "Students will be able to receive refunds if any sessions are canceled by Heubert.",
    "Any non payment of fee at the specified date on offer letter will be reported to the debt collector.",
];

const FALSE_INFO_DECLARATION: &str = "I understand giving false or misleading information, including \
fraudulent documentation, is a serious offence under Australian law. I understand that if I provide \
false or misleading information, it may invalidate all or any part of this agreement including \
termination of enrolment.";

const TERMS_DECLARATION: &str = "I declare that I have read the terms and conditions and refund \
policy of this application form and accept it.";

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Full wording shown beside each declaration checkbox
pub(crate) fn declaration_text(field: Field) -> &'static str {
    match field {
        Field::AcceptFalseInfo => FALSE_INFO_DECLARATION,
        Field::AcceptTerms => TERMS_DECLARATION,
        other => other.label(),
    }
}

impl WizardScreen {
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(Span::styled(
                format!(" {TITLE} "),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.wizard.status() == SubmissionStatus::Submitted {
            self.render_submitted(frame, inner);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Progress bar
                Constraint::Length(1), // Step label
                Constraint::Length(1), // Spacer
                Constraint::Min(6),    // Step body
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Key hints
            ])
            .split(inner);

        self.render_progress(frame, chunks[0]);

        let label = Paragraph::new(Line::from(Span::styled(
            self.wizard.progress_label(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(label, chunks[1]);

        if self.wizard.step() == WizardStep::Terms {
            self.render_terms_step(frame, chunks[3]);
        } else {
            self.render_fields(frame, chunks[3]);
        }

        self.render_buttons(frame, chunks[4]);

        let hints = Paragraph::new(Line::from(Span::styled(
            "Tab/Up/Down: move  Left/Right: choose  Space: tick  Enter: next  Esc: previous  Ctrl-C: quit",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[5]);

        self.alert.render(frame);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let count = self.wizard.step_count();
        let current = self.wizard.step().index();
        let segments = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count as u32); count])
            .split(area);

        for (index, segment) in segments.iter().enumerate() {
            let color = if index <= current {
                Color::Cyan
            } else {
                Color::DarkGray
            };
            let width = usize::from(segment.width.saturating_sub(1));
            frame.render_widget(
                Paragraph::new(Span::styled("━".repeat(width), Style::default().fg(color))),
                *segment,
            );
        }
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let fields = self.wizard.visible_fields();
        let mut constraints = Vec::with_capacity(fields.len() * 3 + 1);
        for field in &fields {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
            let error_rows = u16::from(self.wizard.errors().get(*field).is_some());
            constraints.push(Constraint::Length(error_rows));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, field) in fields.iter().enumerate() {
            let focused = i == self.focused;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(field.label(), label_style)),
                rows[i * 3],
            );

            if let Some(widget) = self.widgets.get(field) {
                let input = Rect {
                    x: rows[i * 3 + 1].x + 2,
                    width: rows[i * 3 + 1].width.saturating_sub(2),
                    ..rows[i * 3 + 1]
                };
                widget.render(frame, input, focused);
            }

            if let Some(message) = self.wizard.errors().get(*field) {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("  {message}"),
                        Style::default().fg(Color::Red),
                    )),
                    rows[i * 3 + 2],
                );
            }
        }
    }

    fn render_terms_step(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(9)])
            .split(area);

        let mut terms = vec![
            heading("Terms and Conditions of Admission and Offer"),
            Line::from(""),
            heading("Course Completion Requirements"),
        ];
        terms.extend(COMPLETION_REQUIREMENTS.iter().map(|item| Line::from(format!("  - {item}"))));
        terms.push(Line::from(""));
        terms.push(heading("Refund and Fee Payment Policy"));
        terms.extend(REFUND_POLICY.iter().map(|item| Line::from(format!("  - {item}"))));

        frame.render_widget(
            Paragraph::new(terms).wrap(Wrap { trim: false }),
            chunks[0],
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Declaration heading
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(chunks[1]);
        frame.render_widget(Paragraph::new(heading("Declaration *")), rows[0]);

        for (i, field) in self.wizard.visible_fields().iter().enumerate() {
            let Some(row) = rows.get(i + 1) else {
                break;
            };
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(5), Constraint::Min(10)])
                .split(*row);

            let focused = i == self.focused;
            if let Some(widget) = self.widgets.get(field) {
                widget.render(frame, cols[0], focused);
            }
            let style = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(declaration_text(*field), style))
                    .wrap(Wrap { trim: true }),
                cols[1],
            );
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let enabled = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);

        let previous_style = if self.wizard.can_retreat() {
            enabled
        } else {
            disabled
        };
        frame.render_widget(
            Paragraph::new(Span::styled(" Previous ", previous_style)),
            cols[0],
        );

        let primary_style = if self.wizard.can_advance() {
            enabled
        } else {
            disabled
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {} ", self.wizard.primary_label()),
                primary_style,
            ))
            .alignment(Alignment::Right),
            cols[1],
        );
    }

    fn render_submitted(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(70, 50, area);
        let name = self.wizard.draft().text(Field::Name).unwrap_or_default();
        let text = vec![
            Line::from(Span::styled(
                "Application submitted",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Thank you for your application!"),
            Line::from(format!(
                "{name}, we have received your application for {TITLE}."
            )),
            Line::from("A confirmation email is on its way. Our team will contact you shortly."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to exit",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            popup,
        );
    }
}
