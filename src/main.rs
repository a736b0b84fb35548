use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph};

use pressure_terminal::colors::PHASE_DEFAULT_PAIR;
use pressure_terminal::fake_feed;
use pressure_terminal::filters::{CountrySlot, Phase, TeamCategory};
use pressure_terminal::provider;
use pressure_terminal::request::build_request;
use pressure_terminal::state::{
    apply_delta, AppState, Delta, FilterFocus, ProviderCommand, RunState,
};
use pressure_terminal::transform::{AnalysisView, OverSeries, PhaseSeries, SeriesRole};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.state.focus_next(),
            KeyCode::BackTab => self.state.focus_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('a') => {
                let all = !self.state.selection.all_matches_selected;
                self.state.selection.set_all_matches(all);
            }
            KeyCode::Char('r') => self.request_analysis(),
            KeyCode::Char('g') => self.request_reference(),
            KeyCode::Char('i') => {
                self.state.impact_category = self.state.impact_category.cycle_next();
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn activate(&mut self) {
        let cursor = self.state.focused_cursor();
        match self.state.focus {
            FilterFocus::Category => {
                if let Some(category) = TeamCategory::ALL.get(cursor).copied() {
                    if category != self.state.selection.team_category {
                        let seq = self.state.change_category(category);
                        self.send(ProviderCommand::FetchReference { seq, category });
                    }
                }
            }
            FilterFocus::CountryOne | FilterFocus::CountryTwo => {
                let slot = if self.state.focus == FilterFocus::CountryOne {
                    CountrySlot::First
                } else {
                    CountrySlot::Second
                };
                let name = self.state.reference.countries.get(cursor).cloned();
                if name.is_some() {
                    self.state.selection.set_country(slot, name);
                }
            }
            FilterFocus::Tournaments => {
                if let Some(name) = self.state.reference.tournaments.get(cursor).cloned() {
                    self.state.selection.toggle_tournament(&name);
                }
            }
            FilterFocus::Phases => {
                if let Some(phase) = Phase::ALL.get(cursor).copied() {
                    self.state.selection.toggle_phase(phase);
                }
            }
            FilterFocus::Matches => {
                if let Some(id) = self
                    .state
                    .reference
                    .matches
                    .get(cursor)
                    .map(|m| m.match_id.clone())
                {
                    if self.state.selection.all_matches_selected {
                        self.state.selection.set_all_matches(false);
                    }
                    self.state.selection.toggle_match(&id);
                }
            }
        }
    }

    fn request_reference(&mut self) {
        let category = self.state.selection.team_category;
        let seq = self.state.change_category(category);
        self.send(ProviderCommand::FetchReference { seq, category });
    }

    fn request_analysis(&mut self) {
        if self.state.run_state == RunState::Pending {
            self.state.notice = Some("Analysis already running".to_string());
            return;
        }
        match build_request(&self.state.selection, &self.state.reference) {
            Ok(request) => {
                let seq = self.state.begin_analysis();
                self.state.push_log(format!(
                    "[INFO] Analysis #{seq}: {} vs {}",
                    request.country1, request.country2
                ));
                self.send(ProviderCommand::RunAnalysis { seq, request });
            }
            Err(err) => {
                self.state.notice = Some(err.to_string());
            }
        }
    }

    fn send(&mut self, cmd: ProviderCommand) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[WARN] Provider unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Provider channel closed");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let feed = std::env::var("PRESSURE_FEED")
        .unwrap_or_else(|_| "live".to_string())
        .to_lowercase();
    if feed == "fake" {
        fake_feed::spawn_fake_provider(tx, cmd_rx);
    } else {
        provider::spawn_provider(tx, cmd_rx);
    }

    let mut app = App::new(Some(cmd_tx));
    app.request_reference();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(40)])
        .split(chunks[1]);

    render_filters(frame, body[0], &app.state);
    render_charts(frame, body[1], &app.state);

    render_console(frame, chunks[2], &app.state);

    let footer = Paragraph::new(
        "Tab Panel | j/k Move | Enter/Space Toggle | a All matches | r Run | g Reload | i Impact | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let run = match state.run_state {
        RunState::Idle => "IDLE",
        RunState::Pending => "RUNNING",
        RunState::Succeeded => "OK",
        RunState::Failed => "FAILED",
    };
    let reference = if state.reference_loading {
        " | loading reference data..."
    } else {
        ""
    };
    format!(
        "PRESSURE TERMINAL | {} | Analysis: {}{}",
        state.selection.team_category.query_value(),
        run,
        reference
    )
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_filters(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(5),
        ])
        .split(area);

    render_category(frame, chunks[0], state);
    render_countries(frame, chunks[1], state);
    render_tournaments(frame, chunks[2], state);
    render_phases(frame, chunks[3], state);
    render_matches(frame, chunks[4], state);
}

fn render_category(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FilterFocus::Category;
    let mut line = String::new();
    for (idx, category) in TeamCategory::ALL.iter().enumerate() {
        let cursor = if focused && idx == state.category_cursor {
            ">"
        } else {
            " "
        };
        let mark = if *category == state.selection.team_category {
            "*"
        } else {
            " "
        };
        line.push_str(&format!("{cursor}{mark}{} ", category.query_value()));
    }
    let text = format!("{line}\n(Enter switches and reloads reference data)");
    let widget = Paragraph::new(text).block(focus_block("Category", focused));
    frame.render_widget(widget, area);
}

fn render_countries(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = matches!(
        state.focus,
        FilterFocus::CountryOne | FilterFocus::CountryTwo
    );
    let slot_label = match state.focus {
        FilterFocus::CountryTwo => "Country 2",
        _ => "Country 1",
    };
    let title = format!(
        "Countries [{} <- Enter] 1: {} 2: {}",
        slot_label,
        state.selection.country1.as_deref().unwrap_or("-"),
        state.selection.country2.as_deref().unwrap_or("-"),
    );

    let lines = scrolled_lines(
        &state.reference.countries,
        state.country_cursor,
        area.height.saturating_sub(2) as usize,
        |idx, name| {
            let cursor = if focused && idx == state.country_cursor {
                "> "
            } else {
                "  "
            };
            let mark = if state.selection.country1.as_deref() == Some(name) {
                "[1]"
            } else if state.selection.country2.as_deref() == Some(name) {
                "[2]"
            } else {
                "   "
            };
            format!("{cursor}{mark} {name}")
        },
    );
    let widget = Paragraph::new(lines.join("\n")).block(focus_block(&title, focused));
    frame.render_widget(widget, area);
}

fn render_tournaments(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FilterFocus::Tournaments;
    let lines = scrolled_lines(
        &state.reference.tournaments,
        state.tournament_cursor,
        area.height.saturating_sub(2) as usize,
        |idx, name| {
            let cursor = if focused && idx == state.tournament_cursor {
                "> "
            } else {
                "  "
            };
            let mark = if state.selection.tournaments.contains(name) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{cursor}{mark} {name}")
        },
    );
    let widget = Paragraph::new(lines.join("\n")).block(focus_block("Tournaments", focused));
    frame.render_widget(widget, area);
}

fn render_phases(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FilterFocus::Phases;
    let mut lines = Vec::new();
    for (idx, phase) in Phase::ALL.iter().enumerate() {
        let cursor = if focused && idx == state.phase_cursor {
            "> "
        } else {
            "  "
        };
        let mark = if state.selection.phases.contains(phase) {
            "[x]"
        } else {
            "[ ]"
        };
        lines.push(format!("{cursor}{mark} {}", phase.label()));
    }
    let widget = Paragraph::new(lines.join("\n")).block(focus_block("Phases", focused));
    frame.render_widget(widget, area);
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FilterFocus::Matches;
    let all = state.selection.all_matches_selected;
    let title = if all {
        "Matches [all selected]".to_string()
    } else {
        format!("Matches [{} selected]", state.selection.selected_matches.len())
    };

    let rows: Vec<String> = state
        .reference
        .matches
        .iter()
        .map(|m| {
            let date = format_match_date(&m.match_date);
            format!("{} {} v {} ({})", date, m.team_a, m.team_b, m.tournament)
        })
        .collect();
    let lines = scrolled_lines(
        &rows,
        state.match_cursor,
        area.height.saturating_sub(2) as usize,
        |idx, row| {
            let cursor = if focused && idx == state.match_cursor {
                "> "
            } else {
                "  "
            };
            let id = &state.reference.matches[idx].match_id;
            let mark = if all || state.selection.selected_matches.contains(id) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{cursor}{mark} {row}")
        },
    );
    let widget = Paragraph::new(lines.join("\n")).block(focus_block(&title, focused));
    frame.render_widget(widget, area);
}

fn scrolled_lines<T: AsRef<str>>(
    items: &[T],
    cursor: usize,
    visible: usize,
    mut fmt: impl FnMut(usize, &str) -> String,
) -> Vec<String> {
    if items.is_empty() {
        return vec!["(none)".to_string()];
    }
    let visible = visible.max(1);
    let mut start = cursor.saturating_sub(visible / 2);
    if start + visible > items.len() {
        start = items.len().saturating_sub(visible);
    }
    (start..(start + visible).min(items.len()))
        .map(|idx| fmt(idx, items[idx].as_ref()))
        .collect()
}

fn format_match_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %y").to_string(),
        Err(_) if raw.trim().is_empty() => "--".to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

fn render_charts(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ])
        .split(area);

    match &state.view {
        Some(view) => {
            render_over_chart(frame, chunks[0], view);
            render_phase_charts(frame, chunks[1], view);
            render_impact_boards(frame, chunks[2], state, view);
        }
        None => {
            let hint = if state.notice.is_some() {
                "No analysis yet"
            } else {
                "Pick two countries and at least one tournament, then press r"
            };
            let widget = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Pressure Analysis").borders(Borders::ALL));
            frame.render_widget(widget, chunks[0]);
        }
    }

    if let Some(notice) = &state.notice {
        let line = Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Red));
        let notice_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(line, notice_area);
    }
}

fn render_over_chart(frame: &mut Frame, area: Rect, view: &AnalysisView) {
    let points: Vec<Vec<(f64, f64)>> = view
        .over_series
        .iter()
        .map(|series| {
            series
                .values
                .iter()
                .enumerate()
                .filter_map(|(over, value)| value.map(|v| ((over + 1) as f64, v)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = view
        .over_series
        .iter()
        .zip(points.iter())
        .map(|(series, data)| over_dataset(series, data))
        .collect();

    let y_max = view
        .over_series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold(10.0_f64, |acc, v| acc.max(*v))
        .ceil();

    let chart = Chart::new(datasets)
        .block(Block::default().title("Pressure by Over").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Over")
                .bounds([1.0, 20.0])
                .labels(vec!["1".into(), "5".into(), "10".into(), "15".into(), "20".into()]),
        )
        .y_axis(
            Axis::default()
                .title("Pressure")
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".into(),
                    format!("{:.0}", y_max / 2.0).into(),
                    format!("{y_max:.0}").into(),
                ]),
        );
    frame.render_widget(chart, area);
}

fn over_dataset<'a>(series: &'a OverSeries, data: &'a [(f64, f64)]) -> Dataset<'a> {
    // Dot marker is the terminal stand-in for a dashed bowling stroke.
    let marker = match series.role {
        SeriesRole::Batting => symbols::Marker::Braille,
        SeriesRole::Bowling => symbols::Marker::Dot,
    };
    Dataset::default()
        .name(series.label.as_str())
        .marker(marker)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(series.color))
        .data(data)
}

fn render_phase_charts(frame: &mut Frame, area: Rect, view: &AnalysisView) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_phase_chart(frame, halves[0], "Phase Pressure (Batting)", &view.phase_batting);
    render_phase_chart(frame, halves[1], "Phase Pressure (Bowling)", &view.phase_bowling);
}

fn render_phase_chart(frame: &mut Frame, area: Rect, title: &str, pair: &[PhaseSeries; 2]) {
    let legend = format!("{title} | {} vs {}", pair[0].team, pair[1].team);
    let mut chart = BarChart::default()
        .block(Block::default().title(legend).borders(Borders::ALL))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3);

    for (idx, phase) in Phase::ALL.iter().enumerate() {
        let bars: Vec<Bar> = pair
            .iter()
            .map(|series| {
                let value = series.values[idx];
                Bar::default()
                    .value((value * 10.0).round().max(0.0) as u64)
                    .text_value(format!("{value:.1}"))
                    .style(Style::default().fg(series.color))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(phase.short_label().into()).bars(&bars));
    }
    frame.render_widget(chart, area);
}

fn render_impact_boards(frame: &mut Frame, area: Rect, state: &AppState, view: &AnalysisView) {
    let board = view.impact(state.impact_category);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = format!("Top Impact ({})", state.impact_category.label());
    let top = impact_lines(&board.top);
    let widget = Paragraph::new(top)
        .style(Style::default().fg(PHASE_DEFAULT_PAIR[0]))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, halves[0]);

    let title = format!("Bottom Impact ({})", state.impact_category.label());
    let bottom = impact_lines(&board.bottom);
    let widget = Paragraph::new(bottom)
        .style(Style::default().fg(PHASE_DEFAULT_PAIR[1]))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, halves[1]);
}

fn impact_lines(players: &[pressure_terminal::analysis_fetch::PlayerImpact]) -> String {
    if players.is_empty() {
        return "No players".to_string();
    }
    players
        .iter()
        .map(|p| format!("{:+.2}  {} ({})", p.net_impact, p.player_name, p.country))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = if state.logs.is_empty() {
        "No activity yet".to_string()
    } else {
        state
            .logs
            .iter()
            .rev()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n")
    };
    let widget = Paragraph::new(text)
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(widget, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Pressure Terminal - Help",
        "",
        "Tab / Shift-Tab   Cycle filter panel",
        "j/k or arrows     Move cursor",
        "Enter / Space     Select country, toggle tournament/phase/match",
        "a                 Toggle all-matches",
        "r                 Run pressure analysis",
        "g                 Reload reference data",
        "i                 Cycle impact board (bat/bowl/field/total)",
        "?                 Toggle help",
        "q                 Quit",
        "",
        "Country panel: Tab once more to fill slot 2.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
