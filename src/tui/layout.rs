//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::runtime::App;
use super::style;
use crate::range::Readable;
use crate::viewport::Gesture;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(4), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: preset name, zoom and gesture state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (icon, gesture) = match app.gesture() {
        Gesture::Idle => ("■", "idle".to_string()),
        Gesture::Zooming { factor } => ("⤢", format!("zooming ×{factor:.2}")),
        Gesture::Panning { pixels } => ("↔", format!("dragging {pixels:+.0}px")),
    };
    let state = app.state();

    let header = Line::from(vec![
        Span::styled(
            " FITCHART ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ zoom {:.2} │ pan {:.1} │ ",
            state.zoom(),
            state.pan()
        )),
        Span::styled(
            format!("{icon} {gesture}"),
            Style::default().fg(if app.gesture() == Gesture::Idle {
                style::FOOTER_FG
            } else {
                style::GESTURE_ACTIVE
            }),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Visible window of the series with the frame's tick labels.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let data = app.visible_points();
    let (x_bounds, y_bounds) = app.bounds();
    let chart = app.chart();

    let x_axis = chart.x_axis();
    let y_axis = chart.y_axis();
    let x_labels = style::axis_labels(&app.frame.x_labels, x_axis.start() > x_axis.end());
    let y_labels = style::axis_labels(&app.frame.y_labels, y_axis.start() > y_axis.end());

    let datasets = vec![
        Dataset::default()
            .name(app.preset_name.as_str())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::SERIES_COLOR))
            .data(&data),
    ];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(
                    " {} points of {} ",
                    app.frame.visible_index_range.len(),
                    chart.series().len()
                ))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title(x_axis.label_factor_label().unwrap_or_default())
                .style(Style::default().fg(style::AXIS_COLOR))
                .bounds([x_bounds.lower, x_bounds.upper])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(y_axis.label_factor_label().unwrap_or_default())
                .style(Style::default().fg(style::AXIS_COLOR))
                .bounds([y_bounds.lower, y_bounds.upper])
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
}

/// Status panel with the committed visible ranges.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let f = &app.frame;
    let preview = app.preview();
    let lines = vec![
        Line::from(format!(
            "  x {}  y {}  indices {}..{}",
            f.visible_x_range,
            f.visible_y_range,
            f.visible_index_range.start,
            f.visible_index_range.end,
        )),
        Line::from(format!(
            "  on settle: zoom {:.2}  pan {:.1}",
            preview.zoom(),
            preview.pan()
        )),
    ];

    let block = Block::default().title(" Viewport ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  +/-:Zoom  ←/→:Pan  h/l:Drag  Enter:Settle  Esc:Cancel  r:Reset  1-4:Preset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
