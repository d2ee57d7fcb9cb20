//! TUI rendering logic for the movie browser.

use moviedb_api::tmdb::MovieSummary;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};

use super::app::{App, InputMode};
use crate::pages::{LoadState, Screen};
use crate::route::Route;
use crate::view::list::{NOT_AVAILABLE, format_rating, pagination_bar};
use crate::view::render_page;

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

/// Draws the search box and the current location.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search_text = match (app.input_mode, app.route()) {
        (InputMode::Search, _) => app.search_input.clone(),
        (InputMode::Normal, Route::Search { query }) => query.clone(),
        (InputMode::Normal, _) => String::new(),
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let location = Paragraph::new(Line::from(app.route().location()))
        .block(Block::default().borders(Borders::ALL).title(" MovieDB "));
    frame.render_widget(location, header_chunks[1]);
}

/// Draws the view for the current route.
fn draw_main(frame: &mut Frame, area: Rect, app: &App) {
    match app.screen() {
        Screen::Home(c) => {
            if let LoadState::Loaded(data) = c.state() {
                draw_home_sections(
                    frame,
                    area,
                    data.trending_preview(),
                    data.popular_preview(),
                    app.selected(),
                );
                return;
            }
        }
        Screen::Listing(c) => {
            if let LoadState::Loaded(movies) = c.state()
                && !movies.is_empty()
            {
                let title = format!(
                    " {} | {} ",
                    app.route().title(),
                    pagination_bar(&c.pagination())
                );
                draw_movie_table(frame, area, &title, movies, Some(app.selected()));
                return;
            }
        }
        Screen::Search(c) => {
            if !c.is_blank()
                && let LoadState::Loaded(movies) = c.state()
                && !movies.is_empty()
            {
                let title = format!(
                    " {} | {} ",
                    app.route().title(),
                    pagination_bar(&c.pagination())
                );
                draw_movie_table(frame, area, &title, movies, Some(app.selected()));
                return;
            }
        }
        Screen::Details(_) => {}
    }
    draw_text_page(frame, area, app);
}

/// Draws the two home sections with a selection spanning both.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn draw_home_sections(
    frame: &mut Frame,
    area: Rect,
    trending: &[MovieSummary],
    popular: &[MovieSummary],
    selected: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (trending_selected, popular_selected) = if selected < trending.len() {
        (Some(selected), None)
    } else {
        (None, Some(selected - trending.len()))
    };
    draw_movie_table(frame, chunks[0], " Trending Today ", trending, trending_selected);
    draw_movie_table(frame, chunks[1], " Popular Movies ", popular, popular_selected);
}

/// Draws a movie table in upstream order.
fn draw_movie_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    movies: &[MovieSummary],
    selected: Option<usize>,
) {
    let header = Row::new(vec!["ID", "Title", "Rating", "Year"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = movies
        .iter()
        .map(|m| {
            Row::new(vec![
                m.id.to_string(),
                m.title.clone(),
                format!("⭐ {}", format_rating(m.vote_average)),
                String::from(m.release_year().unwrap_or(NOT_AVAILABLE)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
    ];

    let border_style = if selected.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(String::from(title))
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

/// Draws loading, empty, error and detail pages as wrapped text.
fn draw_text_page(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = render_page(app.route(), app.screen());
    let heading = if lines.is_empty() {
        String::new()
    } else {
        lines.remove(0)
    };

    let errored = match app.screen() {
        Screen::Home(c) => c.state().error().is_some(),
        Screen::Listing(c) => c.state().error().is_some(),
        Screen::Search(c) => c.state().error().is_some(),
        Screen::Details(c) => c.state().error().is_some() || c.movie_id().is_none(),
    };
    let style = if errored {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let page = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {heading} ")),
        );
    frame.render_widget(page, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match (app.input_mode, app.screen()) {
        (InputMode::Search, _) => Line::from("Type a title | Esc: cancel | Enter: search"),
        (InputMode::Normal, Screen::Details(_)) => Line::from(
            "o: trailer  Backspace/Esc: back  g: home  p: popular  t: top rated  /: search  q: quit",
        ),
        (InputMode::Normal, _) => Line::from(
            "\u{2191}\u{2193}: move  Enter: open  \u{2190}\u{2192}: page  o: tmdb  Backspace: back  g/h: home  p: popular  t: top rated  /: search  r: reload  q: quit",
        ),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
