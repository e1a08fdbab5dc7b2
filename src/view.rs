//! UI rendering logic

use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Alignment, Color, Element, Length};

use crate::model::{App, Feedback, Message, Screen};
use crate::quiz::{RoundSummary, SummaryEntry};
use crate::strings;
use crate::styles::{
    primary_button_style, secondary_button_style, section_style, window_style, FAILURE, MUTED,
    SUCCESS,
};

const FLAG_SIZE: u32 = 120;

/// Helper to create text in a fixed color.
fn colored_text(content: impl Into<String>, size: u32, color: Color) -> text::Text<'static> {
    text(content.into())
        .size(size)
        .style(move |_theme| iced::widget::text::Style { color: Some(color) })
}

/// Main window view
///
/// ```text
/// ┌──────────────────────────────┐
/// │ Pytanie 3/10                 │
/// │            🇵🇱               │
/// │ [ Nazwa kraju              ] │
/// │ [Sprawdź]        [Nie wiem]  │
/// │ Dobrze!                      │
/// └──────────────────────────────┘
/// ```
pub fn main_view(app: &App) -> Element<'_, Message> {
    let body: Element<'_, Message> = match &app.screen {
        Screen::Question { .. } | Screen::Feedback(_) => question_view(app),
        Screen::Summary => match app.engine.summary() {
            Ok(summary) => summary_view(summary),
            Err(e) => error_view(e.to_string()),
        },
        Screen::Error(message) => error_view(message.clone()),
    };

    let notice: Element<'_, Message> = match &app.settings.catalog_notice {
        Some(notice) => colored_text(notice.clone(), 12, FAILURE).into(),
        None => Space::new().height(Length::Fixed(0.0)).into(),
    };

    container(column![notice, body].spacing(8).max_width(480.0))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .padding([24.0, 16.0])
        .style(window_style)
        .into()
}

fn question_view(app: &App) -> Element<'_, Message> {
    let Ok(question) = app.engine.current_question() else {
        return error_view(strings::round_error("brak pytania"));
    };

    let progress = app
        .engine
        .progress()
        .map(|p| strings::question(p.number, p.total))
        .unwrap_or_default();

    let answering = app.accepts_answer();

    // Always enabled so Enter on the feedback screen moves on; typing is
    // ignored there by `update`.
    let input = text_input(strings::INPUT_PLACEHOLDER, &app.input)
        .size(18)
        .padding(10)
        .on_input(Message::InputChanged)
        .on_submit(Message::Submit);

    // Before an answer: [check] [idk]. After a wrong one: [next/see result].
    let actions = match &app.screen {
        Screen::Feedback(Feedback::Incorrect { .. }) => {
            let label = if app.engine.is_last_question() {
                strings::SEE_RESULT
            } else {
                strings::NEXT
            };
            row![button(text(label).size(16))
                .padding([8.0, 20.0])
                .style(primary_button_style)
                .on_press(Message::Next)]
        }
        _ => row![
            button(text(strings::CHECK).size(16))
                .padding([8.0, 20.0])
                .style(primary_button_style)
                .on_press_maybe(answering.then_some(Message::Submit)),
            Space::new().width(Length::Fill),
            button(text(strings::IDK).size(16))
                .padding([8.0, 20.0])
                .style(secondary_button_style)
                .on_press_maybe(answering.then_some(Message::Skip)),
        ],
    }
    .spacing(8)
    .align_y(Alignment::Center);

    let feedback: Element<'_, Message> = match &app.screen {
        Screen::Question {
            prompt: Some(prompt),
        } => colored_text(*prompt, 16, FAILURE).into(),
        Screen::Feedback(Feedback::Correct) => colored_text(strings::CORRECT, 16, SUCCESS).into(),
        Screen::Feedback(Feedback::Incorrect { canonical } | Feedback::Skipped { canonical }) => {
            colored_text(strings::wrong(canonical), 16, FAILURE).into()
        }
        _ => Space::new().height(Length::Fixed(20.0)).into(),
    };

    column![
        colored_text(progress, 14, MUTED),
        container(text(question.flag().to_string()).size(FLAG_SIZE))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding([16.0, 0.0]),
        input,
        actions,
        feedback,
    ]
    .spacing(14)
    .width(Length::Fill)
    .into()
}

fn summary_row(entry: SummaryEntry, correct: bool) -> Element<'static, Message> {
    let details: Element<'static, Message> = if correct {
        text(entry.name).size(16).into()
    } else {
        let answer = entry.answer.unwrap_or_else(|| strings::NO_ANSWER.to_string());
        column![
            text(strings::correct_label(&entry.name)).size(16),
            colored_text(strings::your_label(&answer), 13, MUTED),
        ]
        .spacing(2)
        .into()
    };

    row![text(entry.flag).size(28), details]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

fn summary_section(
    header: &'static str,
    color: Color,
    entries: Vec<SummaryEntry>,
    correct: bool,
) -> Element<'static, Message> {
    let rows = entries
        .into_iter()
        .fold(column![].spacing(8), |col, entry| {
            col.push(summary_row(entry, correct))
        });

    container(column![colored_text(header, 16, color), rows].spacing(10))
        .width(Length::Fill)
        .padding([12.0, 16.0])
        .style(section_style)
        .into()
}

fn summary_view(summary: RoundSummary) -> Element<'static, Message> {
    let mut sections = column![].spacing(12);
    if !summary.correct.is_empty() {
        sections = sections.push(summary_section(
            strings::CORRECT_HEADER,
            SUCCESS,
            summary.correct,
            true,
        ));
    }
    if !summary.incorrect.is_empty() {
        sections = sections.push(summary_section(
            strings::WRONG_HEADER,
            FAILURE,
            summary.incorrect,
            false,
        ));
    }

    column![
        text(strings::result(summary.score, summary.total)).size(24),
        scrollable(sections).height(Length::Fill),
        button(text(strings::RESTART).size(16))
            .padding([8.0, 20.0])
            .style(primary_button_style)
            .on_press(Message::Restart),
    ]
    .spacing(16)
    .width(Length::Fill)
    .into()
}

fn error_view(message: String) -> Element<'static, Message> {
    column![
        colored_text(message, 16, FAILURE),
        button(text(strings::RESTART).size(16))
            .padding([8.0, 20.0])
            .style(secondary_button_style)
            .on_press(Message::Restart),
    ]
    .spacing(16)
    .into()
}
