use crate::theme::{
    prompt::{CURSOR_STYLE, HINT_STYLE, READY_ENTER_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 40;
const OUTER_HEIGHT: u16 = 9;

/// Longest input accepted
const MAX_INPUT: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Prompt;

impl StatefulWidget for Prompt {
    type State = PromptState;

    /*
     * ........................................
     * .┌──────────── Set card-w ────────────┐.
     * .│                                    │.
     * .│320_                                │.
     * .│number, optional px suffix          │.
     * .│                                    │.
     * .│              [ENTER]               │.
     * .└────────────────────────────────────┘.
     * ........................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(format!(" {} ", state.target.title()))
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// What a prompt's input will be applied to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PromptTarget {
    Param(&'static str),
    /// Position in the range list
    Range(usize),
}

impl PromptTarget {
    fn title(self) -> String {
        match self {
            PromptTarget::Param(name) => format!("Set {name}"),
            PromptTarget::Range(pos) => format!("Edit range {}", pos + 1),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PromptState {
    target: PromptTarget,
    hint: &'static str,
    input: String,
}

impl PromptState {
    pub(crate) fn new(target: PromptTarget, hint: &'static str, initial: String) -> PromptState {
        PromptState {
            target,
            hint,
            input: initial,
        }
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    fn to_text(&self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            Line::from_iter([
                Span::styled(self.input.clone(), BASE_STYLE),
                Span::styled(" ", CURSOR_STYLE),
            ])
            .left_aligned(),
            Line::styled(self.hint, HINT_STYLE).left_aligned(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text and not its centering padding is
            // underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.input.trim().is_empty() {
                    BASE_STYLE
                } else {
                    READY_ENTER_STYLE
                },
            )),
        ])
        .centered()
    }

    pub(crate) fn handle_input(&mut self, input: PromptInput) -> PromptOutput {
        match input {
            PromptInput::Char(c) if !c.is_control() && self.input.chars().count() < MAX_INPUT => {
                self.input.push(c);
                PromptOutput::Ok
            }
            PromptInput::Backspace if self.input.pop().is_some() => PromptOutput::Ok,
            PromptInput::Enter if !self.input.trim().is_empty() => {
                PromptOutput::Submit(self.target, self.input.trim().to_owned())
            }
            _ => PromptOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PromptInput {
    Char(char),
    Backspace,
    Enter,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PromptOutput {
    Ok,
    Invalid,
    Submit(PromptTarget, String),
}
