use crate::app::AppState;
use crate::clock::{DisplayList, Point, Rgb, Shape};
use crate::ui::styles::{border_style, rgb, title_style};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, Borders,
    },
    Frame,
};
use std::f64::consts::TAU;

/// Side of the clock's logical drawing square
const LOGICAL_SIZE: f64 = 100.0;

/// Braille dots per terminal cell
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;

/// Logical size of one Braille dot and one cell for a given area
#[derive(Debug, Clone, Copy)]
struct Resolution {
    dot_w: f64,
    dot_h: f64,
    cell_w: f64,
}

impl Resolution {
    fn for_area(area: Rect) -> Self {
        let width = f64::from(area.width.max(1));
        let height = f64::from(area.height.max(1));
        Self {
            dot_w: LOGICAL_SIZE / (width * DOTS_X),
            dot_h: LOGICAL_SIZE / (height * DOTS_Y),
            cell_w: LOGICAL_SIZE / width,
        }
    }
}

/// Largest area that looks square, assuming cells twice as tall as wide
pub fn square_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render the analog clock with the running task overlays
pub fn render_clock_pane(f: &mut Frame, app: &AppState, area: Rect, now: DateTime<Local>) {
    let title = format!(" {} {} ", app.t("clock.title"), now.format("%H:%M"));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let square = square_area(inner);
    if square.width == 0 || square.height == 0 {
        return;
    }

    let mut list = DisplayList::new(LOGICAL_SIZE, LOGICAL_SIZE);
    app.clock.render(&mut list, now);

    let resolution = Resolution::for_area(square);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, LOGICAL_SIZE])
        .y_bounds([0.0, LOGICAL_SIZE])
        .paint(|ctx| paint(ctx, &list, resolution));

    f.render_widget(canvas, square);
}

/// Canvas y grows upward; surface y grows downward
fn flip(y: f64) -> f64 {
    LOGICAL_SIZE - y
}

fn paint(ctx: &mut Context, list: &DisplayList, res: Resolution) {
    for shape in list.shapes() {
        match shape {
            Shape::FillCircle { center, radius, color } => {
                let coords = fill_points(res, *center, *radius, None);
                ctx.draw(&Points { coords: &coords, color: rgb(*color) });
            }
            Shape::StrokeCircle { center, radius, color, .. } => {
                ctx.draw(&Circle {
                    x: center.x,
                    y: flip(center.y),
                    radius: *radius,
                    color: rgb(*color),
                });
            }
            Shape::Line { from, to, color, .. } => {
                ctx.draw(&CanvasLine {
                    x1: from.x,
                    y1: flip(from.y),
                    x2: to.x,
                    y2: flip(to.y),
                    color: rgb(*color),
                });
            }
            Shape::FillWedge { center, radius, start, end, color } => {
                let coords = fill_points(res, *center, *radius, Some((*start, *end)));
                ctx.draw(&Points { coords: &coords, color: rgb(*color) });
            }
            Shape::StrokeWedge { center, radius, start, end, color, .. } => {
                stroke_wedge(ctx, res, *center, *radius, (*start, *end), *color);
            }
            Shape::Text { at, text, color, background } => {
                let mut style = Style::default().fg(rgb(*color));
                if let Some(bg) = background {
                    style = style.bg(rgb(*bg));
                }
                let half_width = text.chars().count() as f64 * res.cell_w / 2.0;
                ctx.print(at.x - half_width, flip(at.y), Line::from(Span::styled(text.clone(), style)));
            }
        }
        // Each primitive paints over the ones before it
        ctx.layer();
    }
}

/// Whether `angle` lies on the clockwise sweep from `start` to `end`
fn within_sweep(angle: f64, start: f64, end: f64) -> bool {
    let sweep = end - start;
    if sweep >= TAU {
        return true;
    }
    (angle - start).rem_euclid(TAU) <= sweep
}

/// Dot centres inside a disc, or inside a wedge of it, in canvas coordinates
fn fill_points(res: Resolution, center: Point, radius: f64, wedge: Option<(f64, f64)>) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    let r2 = radius * radius;

    let mut y = center.y - radius + res.dot_h / 2.0;
    while y <= center.y + radius {
        let mut x = center.x - radius + res.dot_w / 2.0;
        while x <= center.x + radius {
            let (dx, dy) = (x - center.x, y - center.y);
            let inside = dx * dx + dy * dy <= r2
                && wedge.map_or(true, |(start, end)| within_sweep(dy.atan2(dx), start, end));
            if inside {
                coords.push((x, flip(y)));
            }
            x += res.dot_w;
        }
        y += res.dot_h;
    }
    coords
}

fn stroke_wedge(ctx: &mut Context, res: Resolution, center: Point, radius: f64, (start, end): (f64, f64), color: Rgb) {
    let color = rgb(color);
    for angle in [start, end] {
        let edge = center.polar(radius, angle);
        ctx.draw(&CanvasLine {
            x1: center.x,
            y1: flip(center.y),
            x2: edge.x,
            y2: flip(edge.y),
            color,
        });
    }

    let step = (res.dot_w.min(res.dot_h) / radius.max(f64::EPSILON)).max(0.001);
    let mut arc = Vec::new();
    let mut angle = start;
    while angle <= end {
        let p = center.polar(radius, angle);
        arc.push((p.x, flip(p.y)));
        angle += step;
    }
    ctx.draw(&Points { coords: &arc, color });
}
