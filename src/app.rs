use crate::help::Help;
use crate::preview::{Preview, PREVIEW_WIDTH};
use crate::prompt::{Prompt, PromptInput, PromptOutput, PromptState, PromptTarget};
use crate::theme::{BASE_STYLE, FOCUSED_BORDER_STYLE, INACTIVE_STYLE, SELECTED_STYLE, STATUS_STYLE};
use calcard::card::Card;
use calcard::color::Color;
use calcard::highlight::MAX_RANGES;
use calcard::params::{Effective, ParamKind, ParamValue, SetOutcome};
use calcard::raster::{export_png, file_name, ExportGate, FontPaths, FontSet, PIXEL_RATIO};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Width of the name column in the parameter list
const NAME_WIDTH: usize = 18;

#[allow(clippy::cast_possible_truncation)]
const RANGES_HEIGHT: u16 = MAX_RANGES as u16 + 2;

#[derive(Debug)]
pub(crate) struct App {
    card: Card,
    /// Parameter names in display order
    params: Vec<&'static str>,
    font_paths: FontPaths,
    /// Loaded on first export unless supplied up front
    fonts: Option<FontSet>,
    out_dir: PathBuf,
    gate: ExportGate,
    focus: Focus,
    param_pos: usize,
    range_pos: usize,
    status: String,
    state: AppState,
}

impl App {
    pub(crate) fn new(card: Card, font_paths: FontPaths, out_dir: PathBuf) -> App {
        let params = card.params().names().collect();
        App {
            card,
            params,
            font_paths,
            fonts: None,
            out_dir,
            gate: ExportGate::new(),
            focus: Focus::Params,
            param_pos: 0,
            range_pos: 0,
            status: String::from("Press ? for help"),
            state: AppState::Editing,
        }
    }

    pub(crate) fn fonts(mut self, fonts: FontSet) -> App {
        self.fonts = Some(fonts);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the action was
    // refused
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Editing => self.handle_edit_key(key),
            AppState::Helping => {
                self.state = AppState::Editing;
                true
            }
            AppState::Prompting(state) => {
                if key == KeyCode::Esc {
                    self.state = AppState::Editing;
                    return true;
                }
                let output = match key {
                    KeyCode::Char(c) => state.handle_input(PromptInput::Char(c)),
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(PromptInput::Backspace)
                    }
                    KeyCode::Enter => state.handle_input(PromptInput::Enter),
                    _ => PromptOutput::Invalid,
                };
                match output {
                    PromptOutput::Ok => true,
                    PromptOutput::Invalid => false,
                    PromptOutput::Submit(target, input) => {
                        self.state = AppState::Editing;
                        self.submit(target, &input)
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode) -> bool {
        match (key, self.focus) {
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.focus = self.focus.other();
                true
            }
            (KeyCode::Char('j') | KeyCode::Down, _) => self.move_selection(true),
            (KeyCode::Char('k') | KeyCode::Up, _) => self.move_selection(false),
            (KeyCode::Char('l' | '+') | KeyCode::Right, Focus::Params) => self.nudge(true),
            (KeyCode::Char('h' | '-') | KeyCode::Left, Focus::Params) => self.nudge(false),
            (KeyCode::Enter, _) => {
                self.open_prompt();
                true
            }
            (KeyCode::Char('a'), Focus::Ranges) => self.add_range(),
            (KeyCode::Char('d'), Focus::Ranges) => self.remove_range(),
            (KeyCode::Char(' '), Focus::Ranges) => self.toggle_range(),
            (KeyCode::Char('n') | KeyCode::PageDown, _) => self.change_month(true),
            (KeyCode::Char('p') | KeyCode::PageUp, _) => self.change_month(false),
            (KeyCode::Char('x'), _) => self.export(),
            (KeyCode::Char('y'), _) => self.copy_snapshot(),
            (KeyCode::Char('?'), _) => {
                self.state = AppState::Helping;
                true
            }
            (KeyCode::Char('q') | KeyCode::Esc, _) => {
                self.state = AppState::Quitting;
                true
            }
            _ => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn selected_param(&self) -> Option<&'static str> {
        self.params.get(self.param_pos).copied()
    }

    fn move_selection(&mut self, forward: bool) -> bool {
        let (pos, len) = match self.focus {
            Focus::Params => (&mut self.param_pos, self.params.len()),
            Focus::Ranges => (&mut self.range_pos, self.card.ranges().len()),
        };
        let new = if forward {
            (*pos + 1).min(len.saturating_sub(1))
        } else {
            pos.saturating_sub(1)
        };
        let moved = new != *pos;
        *pos = new;
        moved
    }

    fn nudge(&mut self, forward: bool) -> bool {
        let Some(name) = self.selected_param() else {
            return false;
        };
        match self.card.nudge_param(name, forward) {
            Ok(SetOutcome::Ignored) => false,
            Ok(_) => {
                self.report_param(name);
                true
            }
            Err(e) => {
                self.status = e.to_string();
                false
            }
        }
    }

    fn report_param(&mut self, name: &str) {
        if let Some(value) = self.card.params().get(name) {
            self.status = format!("{name} = {value}");
        }
    }

    fn open_prompt(&mut self) {
        let state = match self.focus {
            Focus::Params => {
                let Some(name) = self.selected_param() else {
                    return;
                };
                let hint = match self.card.params().def(name).map(|d| d.kind) {
                    Some(ParamKind::Length) => "number, optional px suffix",
                    Some(ParamKind::Scalar) => "number",
                    Some(ParamKind::Color) => "#rgb, #rrggbb, or #rrggbbaa",
                    Some(ParamKind::Choice(_)) | None => "one of the listed choices",
                };
                let initial = self
                    .card
                    .params()
                    .get(name)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                PromptState::new(PromptTarget::Param(name), hint, initial)
            }
            Focus::Ranges => {
                let initial = self
                    .card
                    .ranges()
                    .get(self.range_pos)
                    .map(|r| format!("{} {} {}", r.start, r.end, r.color))
                    .unwrap_or_default();
                PromptState::new(
                    PromptTarget::Range(self.range_pos),
                    "START END [#COLOR]",
                    initial,
                )
            }
        };
        self.state = AppState::Prompting(state);
    }

    fn submit(&mut self, target: PromptTarget, input: &str) -> bool {
        match target {
            PromptTarget::Param(name) => match self.card.set_param(name, input) {
                Ok(SetOutcome::Stored) => {
                    self.report_param(name);
                    true
                }
                Ok(SetOutcome::Clamped) => {
                    if let Some(value) = self.card.params().get(name) {
                        self.status = format!("{name} clamped to {value}");
                    }
                    true
                }
                Ok(SetOutcome::Ignored) => {
                    self.status = format!("could not interpret {input:?} for {name}");
                    false
                }
                Err(e) => {
                    self.status = e.to_string();
                    false
                }
            },
            PromptTarget::Range(pos) => {
                let Some((start, end, color)) = parse_range_input(input) else {
                    self.status = format!("could not interpret {input:?}; expected START END [#COLOR]");
                    return false;
                };
                self.card.set_range_days(pos, start, end);
                if let Some(color) = color {
                    self.card.set_range_color(pos, color);
                }
                self.status = format!("range {} set to {start}..{end}", pos + 1);
                true
            }
        }
    }

    fn add_range(&mut self) -> bool {
        match self.card.add_range() {
            Ok(pos) => {
                self.range_pos = pos;
                self.status = format!("added range {}", pos + 1);
                true
            }
            Err(e) => {
                self.status = e.to_string();
                false
            }
        }
    }

    fn remove_range(&mut self) -> bool {
        if self.card.remove_range(self.range_pos) {
            self.status = format!("removed range {}", self.range_pos + 1);
            self.range_pos = self.range_pos.min(self.card.ranges().len() - 1);
            true
        } else {
            self.status = String::from("the last range cannot be removed");
            false
        }
    }

    fn toggle_range(&mut self) -> bool {
        self.card.toggle_range(self.range_pos)
    }

    fn change_month(&mut self, forward: bool) -> bool {
        let r = if forward {
            self.card.next_month()
        } else {
            self.card.prev_month()
        };
        match r {
            Ok(()) => {
                self.status = format!("showing {}", self.card.grid().title());
                true
            }
            Err(e) => {
                self.status = e.to_string();
                false
            }
        }
    }

    fn export(&mut self) -> bool {
        let _guard = match self.gate.begin() {
            Ok(guard) => guard,
            Err(e) => {
                self.status = e.to_string();
                return false;
            }
        };
        let fonts = match self.fonts.take() {
            Some(fonts) => fonts,
            None => match FontSet::load(&self.font_paths) {
                Ok(fonts) => fonts,
                Err(e) => {
                    warn!(error = %e, "could not load fonts for export");
                    self.status = format!("export failed: {e}");
                    return false;
                }
            },
        };
        let path = self.out_dir.join(file_name(self.card.year(), self.card.month()));
        let r = export_png(&self.card, &fonts, &path, PIXEL_RATIO);
        self.fonts = Some(fonts);
        match r {
            Ok(()) => {
                self.status = format!("exported {}", path.display());
                true
            }
            Err(e) => {
                let msg = format!("{:#}", anyhow::Error::new(e));
                warn!(error = %msg, "export failed");
                self.status = format!("export failed: {msg}");
                false
            }
        }
    }

    fn copy_snapshot(&mut self) -> bool {
        let snapshot = self.card.params().snapshot();
        let count = snapshot.entries().len();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(snapshot.to_text())) {
            Ok(()) => {
                info!(count, "copied parameter snapshot");
                self.status = format!("copied {count} parameters to the clipboard");
                true
            }
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                self.status = format!("clipboard unavailable: {e}");
                false
            }
        }
    }

    fn render_params(&self, area: Rect, buf: &mut Buffer) {
        let params = self.card.params();
        let items = self.params.iter().map(|&name| {
            let mut spans = vec![Span::raw(format!("{name:<NAME_WIDTH$}"))];
            match (params.get(name), params.effective(name)) {
                (Some(ParamValue::Color(c)), _) => {
                    spans.push(swatch(c));
                    spans.push(Span::raw(format!(" {c}")));
                }
                (Some(v @ ParamValue::Number(_)), Some(e @ Effective::Length(_))) => {
                    spans.push(Span::raw(format!("{v} ({e})")));
                }
                (Some(value), _) => spans.push(Span::raw(value.to_string())),
                (None, _) => (),
            }
            let style = if params.is_active(name) {
                BASE_STYLE
            } else {
                INACTIVE_STYLE
            };
            ListItem::new(Line::from(spans)).style(style)
        });
        let focused = self.focus == Focus::Params;
        let list = List::new(items)
            .block(panel(" Parameters ", focused))
            .highlight_style(if focused { SELECTED_STYLE } else { Style::new() });
        let mut state = ListState::default().with_selected(Some(self.param_pos));
        StatefulWidget::render(list, area, buf, &mut state);
    }

    fn render_ranges(&self, area: Rect, buf: &mut Buffer) {
        let items = self.card.ranges().iter().enumerate().map(|(i, r)| {
            let check = if r.enabled { 'x' } else { ' ' };
            let style = if r.enabled { BASE_STYLE } else { INACTIVE_STYLE };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}. [{check}] {:>3} .. {:<3} ", i + 1, r.start, r.end)),
                swatch(r.color),
                Span::raw(format!(" {}", r.color)),
            ]))
            .style(style)
        });
        let focused = self.focus == Focus::Ranges;
        let list = List::new(items)
            .block(panel(" Ranges ", focused))
            .highlight_style(if focused { SELECTED_STYLE } else { Style::new() });
        let mut state = ListState::default().with_selected(Some(self.range_pos));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [main, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [preview, side] =
            Layout::horizontal([Constraint::Length(PREVIEW_WIDTH), Constraint::Min(0)]).areas(main);
        let [params, ranges] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(RANGES_HEIGHT)]).areas(side);
        Preview::new(&self.card).render(preview, buf);
        self.render_params(params, buf);
        self.render_ranges(ranges, buf);
        Line::styled(self.status.as_str(), STATUS_STYLE).render(status, buf);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::Prompting(ref mut state) => Prompt.render(area, buf, state),
            AppState::Editing | AppState::Quitting => (),
        }
    }
}

fn panel(title: &'static str, focused: bool) -> Block<'static> {
    Block::bordered()
        .title(title)
        .border_style(if focused { FOCUSED_BORDER_STYLE } else { BASE_STYLE })
}

fn swatch(c: Color) -> Span<'static> {
    Span::styled("  ", Style::new().bg(ratatui::style::Color::Rgb(c.r, c.g, c.b)))
}

/// Parses `START END [#COLOR]`, with the days separated by whitespace, a
/// comma, or a dash following a digit.  Days may be negative.
fn parse_range_input(s: &str) -> Option<(i32, i32, Option<Color>)> {
    let mut words = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>();
    if let Some(&first) = words.first() {
        // "12-4" or "3--4"
        let dash = first
            .match_indices('-')
            .map(|(i, _)| i)
            .find(|&i| first[..i].ends_with(|c: char| c.is_ascii_digit()));
        if let Some(i) = dash {
            let (start, end) = (&first[..i], &first[i + 1..]);
            words.remove(0);
            if !end.is_empty() {
                words.insert(0, end);
            }
            words.insert(0, start);
        }
    }
    let mut words = words.into_iter();
    let start = words.next()?.parse().ok()?;
    let end = words.next()?.parse().ok()?;
    let color = match words.next() {
        Some(w) => Some(w.parse().ok()?),
        None => None,
    };
    if words.next().is_some() {
        return None;
    }
    Some((start, end, color))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Focus {
    Params,
    Ranges,
}

impl Focus {
    fn other(self) -> Focus {
        match self {
            Focus::Params => Focus::Ranges,
            Focus::Ranges => Focus::Params,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Editing,
    Helping,
    Prompting(PromptState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcard::highlight::RangeList;
    use calcard::params::catalog::{CARD_W, SHADOW_A, TITLE_DISPLAY};
    use calcard::params::ParamStore;

    fn app(out_dir: PathBuf) -> App {
        let card = Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap();
        App::new(card, FontPaths::default(), out_dir)
    }

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_nudge_selected_parameter() {
        let mut app = app(PathBuf::from("."));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.card.params().number(CARD_W), Some(321.0));
        assert_eq!(app.status, "card-w = 321");
        assert!(app.handle_key(KeyCode::Char('-')));
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.card.params().number(CARD_W), Some(319.0));
        assert!(!app.handle_key(KeyCode::Up), "already at the top");
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.selected_param(), Some("card-h"));
        // card-bg is a color and has no steps
        assert!(app.handle_key(KeyCode::Down));
        assert!(!app.handle_key(KeyCode::Char('l')));
    }

    #[test]
    fn test_prompt_sets_parameter() {
        let mut app = app(PathBuf::from("."));
        assert!(app.handle_key(KeyCode::Enter));
        for _ in 0..3 {
            assert!(app.handle_key(KeyCode::Backspace));
        }
        press(&mut app, "480px");
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Editing);
        assert_eq!(app.card.params().number(CARD_W), Some(480.0));
        assert_eq!(app.status, "card-w = 480");
    }

    #[test]
    fn test_prompt_rejects_garbage_and_reports_clamps() {
        let mut app = app(PathBuf::from("."));
        app.handle_key(KeyCode::Enter);
        press(&mut app, "abc");
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.card.params().number(CARD_W), Some(320.0));
        assert!(app.status.starts_with("could not interpret"));

        app.handle_key(KeyCode::Enter);
        for _ in 0..3 {
            app.handle_key(KeyCode::Backspace);
        }
        press(&mut app, "5000");
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.status, "card-w clamped to 1200");
    }

    #[test]
    fn test_prompt_escape_cancels() {
        let mut app = app(PathBuf::from("."));
        app.handle_key(KeyCode::Enter);
        press(&mut app, "9");
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Editing);
        assert_eq!(app.card.params().number(CARD_W), Some(320.0));
    }

    #[test]
    fn test_range_editing() {
        let mut app = app(PathBuf::from("."));
        assert!(!app.handle_key(KeyCode::Char('a')), "params panel has focus");
        assert!(app.handle_key(KeyCode::Tab));
        assert!(app.handle_key(KeyCode::Char('a')));
        assert_eq!(app.card.ranges().len(), 2);
        assert_eq!(app.range_pos, 1);

        assert!(app.handle_key(KeyCode::Enter));
        let AppState::Prompting(ref state) = app.state else {
            panic!("expected prompt, got {:?}", app.state);
        };
        assert_eq!(state.input(), "1 1 #caffbf");
        for _ in 0.."1 1 #caffbf".len() {
            app.handle_key(KeyCode::Backspace);
        }
        press(&mut app, "10 3 #000000");
        assert!(app.handle_key(KeyCode::Enter));
        let range = app.card.ranges().get(1).unwrap();
        assert_eq!((range.start, range.end, range.color), (10, 3, Color::BLACK));
        assert_eq!(app.card.highlights().get(5).map(|d| d.color), Some(Color::BLACK));

        assert!(app.handle_key(KeyCode::Char(' ')));
        assert!(app.card.highlights().get(5).is_none());

        assert!(app.handle_key(KeyCode::Char('d')));
        assert_eq!(app.card.ranges().len(), 1);
        assert_eq!(app.range_pos, 0);
        assert!(!app.handle_key(KeyCode::Char('d')));
        assert_eq!(app.status, "the last range cannot be removed");
    }

    #[test]
    fn test_range_limit_reported() {
        let mut app = app(PathBuf::from("."));
        app.handle_key(KeyCode::Tab);
        press(&mut app, "aaaa");
        assert_eq!(app.card.ranges().len(), MAX_RANGES);
        assert!(!app.handle_key(KeyCode::Char('a')));
        assert_eq!(app.status, "at most 5 ranges may exist at once");
    }

    #[test]
    fn test_month_navigation() {
        let mut app = app(PathBuf::from("."));
        assert!(app.handle_key(KeyCode::Char('n')));
        assert!(app.handle_key(KeyCode::PageDown));
        assert_eq!((app.card.year(), app.card.month()), (2025, 12));
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.status, "showing 2026-01");
        assert!(app.handle_key(KeyCode::PageUp));
        assert_eq!((app.card.year(), app.card.month()), (2025, 12));
    }

    #[test]
    fn test_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_owned()).fonts(FontSet::none());
        assert!(app.handle_key(KeyCode::Char('x')));
        let path = dir.path().join("calendar-2025-10.png");
        assert!(path.exists());
        assert_eq!(app.status, format!("exported {}", path.display()));
        assert!(!app.gate.is_busy());
    }

    #[test]
    fn test_export_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().join("missing")).fonts(FontSet::none());
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.status.starts_with("export failed: failed to write"));
        assert!(!app.gate.is_busy(), "gate reopens after a failure");
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app(PathBuf::from("."));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(screen(&mut app).contains(" Commands "));
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Editing);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_render_panels() {
        let mut app = app(PathBuf::from("."));
        app.card.set_param(TITLE_DISPLAY, "hidden").unwrap();
        app.card.set_param(SHADOW_A, "0.5").unwrap();
        let screen = screen(&mut app);
        assert!(screen.contains(" Preview "));
        assert!(screen.contains(" Parameters "));
        assert!(screen.contains(" Ranges "));
        assert!(screen.contains("card-pad          18 (18px)"));
        assert!(screen.contains("shadow-a          0.5"));
        assert!(screen.contains("1. [x]   1 .. 1"));
        assert!(screen.contains("Press ? for help"));
        assert!(!screen.contains("2025-10"), "title is hidden");
    }

    #[test]
    fn test_parse_range_input() {
        assert_eq!(parse_range_input("3 9"), Some((3, 9, None)));
        assert_eq!(parse_range_input(" 12-4 "), Some((12, 4, None)));
        assert_eq!(
            parse_range_input("1, 31 #ffffff"),
            Some((1, 31, Some(Color::WHITE)))
        );
        assert_eq!(parse_range_input("3"), None);
        assert_eq!(parse_range_input("3 x"), None);
        assert_eq!(parse_range_input("3 4 blue"), None);
        assert_eq!(parse_range_input("3 4 #fff extra"), None);
    }

    #[test]
    fn test_parse_range_input_negative_days() {
        assert_eq!(parse_range_input("-3 5"), Some((-3, 5, None)));
        assert_eq!(parse_range_input("3--4"), Some((3, -4, None)));
        assert_eq!(parse_range_input("-3--4"), Some((-3, -4, None)));
        assert_eq!(parse_range_input("7- 9"), Some((7, 9, None)));
        assert_eq!(parse_range_input("-2,40 #000"), Some((-2, 40, Some(Color::BLACK))));
        assert_eq!(parse_range_input("--3 4"), None);
    }

    #[test]
    fn test_negative_range_start_is_clamped() {
        let mut app = app(PathBuf::from("."));
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);
        while app.handle_key(KeyCode::Backspace) {}
        press(&mut app, "-3 5");
        assert!(app.handle_key(KeyCode::Enter));
        let range = app.card.ranges().get(0).unwrap();
        assert_eq!((range.start, range.end), (-3, 5));
        let days = (1..=31)
            .filter(|&d| app.card.highlights().get(d).is_some())
            .collect::<Vec<u8>>();
        assert_eq!(days, [1, 2, 3, 4, 5]);
    }
}
