use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use phasefolio_core::engine::Frame;
use phasefolio_core::model::{Panel, ScrollGeometry};
use phasefolio_core::views;
use phasefolio_core::Controller;
use phasefolio_protocol::Viewport;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::renderer::{self, CELL_H, CELL_W};

const FRAME_BUDGET: Duration = Duration::from_millis(33);
/// Virtual pixels one arrow press scrolls.
const LINE_STEP: f64 = 3.0 * CELL_H;

/// Scroll position in the virtual document.
struct Scroller {
    scroll_y: f64,
}

impl Scroller {
    fn geometry(&self, controller: &Controller, viewport: &Viewport) -> ScrollGeometry {
        let height = controller.config().tuning.document_height(viewport.height);
        ScrollGeometry::new(self.scroll_y, height, viewport.height)
    }

    fn scroll_by(&mut self, delta: f64, controller: &Controller, viewport: &Viewport) {
        let max = self.geometry(controller, viewport).scrollable().max(0.0);
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, max);
    }
}

pub fn run(mut controller: Controller) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    controller: &mut Controller,
) -> Result<()> {
    let mut scroller = Scroller { scroll_y: 0.0 };
    let mut last_size = None;
    let mut last_tick = Instant::now();

    loop {
        let size = terminal.size()?;
        let viewport = Viewport::new(f64::from(size.width) * CELL_W, f64::from(size.height) * CELL_H);
        if last_size != Some(size) {
            controller.resize(&viewport);
            last_size = Some(size);
        }

        let now = Instant::now();
        controller.tick(now.duration_since(last_tick).as_secs_f64());
        last_tick = now;

        let commands = views::render_scene(controller, &viewport);
        let frame_state = controller.frame();
        let panel = controller.open_panel().cloned();
        let accent = controller.accent();

        terminal.draw(|frame| {
            let area = frame.area();
            renderer::render_commands(frame.buffer_mut(), area, &commands, accent);
            if let Some(panel) = &panel {
                let width = (area.width * 3 / 5).max(30).min(area.width);
                let rect = Rect::new(area.width - width, 0, width, area.height);
                frame.render_widget(Clear, rect);
                frame.render_widget(panel_widget(panel, &frame_state, accent), rect);
            }
        })?;

        if !event::poll(FRAME_BUDGET)? {
            continue;
        }
        let entered = controller.boot().is_entered();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Enter if !entered => {
                    controller.enter();
                }
                KeyCode::Enter => {
                    controller.interact();
                }
                KeyCode::Esc => {
                    controller.close();
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let position = c as usize - '0' as usize;
                    controller.select_nth(position);
                }
                code if entered => {
                    let delta = match code {
                        KeyCode::Down | KeyCode::Char('j') => LINE_STEP,
                        KeyCode::Up | KeyCode::Char('k') => -LINE_STEP,
                        KeyCode::PageDown | KeyCode::Char(' ') => viewport.height,
                        KeyCode::PageUp => -viewport.height,
                        KeyCode::Home => f64::NEG_INFINITY,
                        KeyCode::End => f64::INFINITY,
                        _ => 0.0,
                    };
                    if delta != 0.0 {
                        scroller.scroll_by(delta, controller, &viewport);
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) if entered => match mouse.kind {
                MouseEventKind::ScrollDown => scroller.scroll_by(LINE_STEP, controller, &viewport),
                MouseEventKind::ScrollUp => scroller.scroll_by(-LINE_STEP, controller, &viewport),
                _ => {}
            },
            _ => {}
        }
        controller.on_scroll(&scroller.geometry(controller, &viewport));
    }
    Ok(())
}

fn panel_widget<'a>(panel: &'a Panel, frame: &Frame, accent: phasefolio_protocol::Color) -> Paragraph<'a> {
    let [r, g, b, _] = accent.to_rgba8();
    let accent = Color::Rgb(r, g, b);
    let revealed = |label: &str| frame.reveal(label).is_some();
    let selected = frame.expansion.selected();

    let mut lines = Vec::new();
    if revealed("heading") {
        lines.push(Line::from(Span::styled(
            panel.heading.as_str(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )));
    }
    if revealed("subheading") && !panel.subheading.is_empty() {
        lines.push(Line::from(Span::styled(panel.subheading.as_str(), Style::default().fg(Color::Gray))));
    }
    lines.push(Line::default());

    for (i, item) in panel.items.iter().enumerate().filter(|(_, item)| revealed(&item.id)) {
        let is_selected = selected == Some(item.id.as_str());
        let marker = if is_selected { "▸" } else { " " };
        let mut spans = vec![
            Span::styled(format!("{marker}{} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(item.title.as_str(), Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        ];
        if let Some(tag) = &item.tag {
            spans.push(Span::styled(format!("  {tag}"), Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
        if is_selected || item.tag.is_none() {
            lines.push(Line::from(item.body.as_str()));
        }
        lines.push(Line::default());
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(accent))
                .title(" DETAIL VIEW · Esc close · 1-9 select "),
        )
}
