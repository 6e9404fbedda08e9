use ratatui::layout::{Alignment, Rect as Area};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::gaming::Point;
use crate::table::Table;
use crate::ui::component::Rect;
use crate::ui::widgets::{chip_label, format_cents, Widget};

const FELT: Color = Color::Rgb(14, 92, 48);
const DIE_FACES: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];

pub fn draw(frame: &mut Frame, table: &Table) {
    let screen = frame.area();
    let felt = Area::new(screen.x, screen.y, screen.width, screen.height.saturating_sub(1));
    let status = Area::new(screen.x, screen.bottom().saturating_sub(1), screen.width, 1);

    frame.render_widget(Block::default().style(Style::default().bg(FELT)), felt);

    for region in table.layout().regions() {
        if let Some(area) = clip(region.rect, felt) {
            let label = Paragraph::new(region.bet.name())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White).bg(FELT))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow)));
            frame.render_widget(label, area);
        }
    }

    for (rect, widget) in table.widgets() {
        if let Some(area) = clip(rect, felt) {
            draw_widget(frame, area, &widget);
        }
    }

    draw_status(frame, status, table);
}

fn draw_widget(frame: &mut Frame, area: Area, widget: &Widget) {
    match widget {
        Widget::Felt | Widget::ChipStack { .. } => {}
        Widget::Chip { denomination, selected } => {
            let mut style = chip_style(*denomination);
            if *selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            let chip = Paragraph::new(chip_label(*denomination))
                .alignment(Alignment::Center)
                .style(style);
            frame.render_widget(chip, area);
        }
        Widget::ChipTray { .. } => {
            let tray = Block::default()
                .title("Chips")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White).bg(Color::Black));
            frame.render_widget(tray, area);
        }
        Widget::Puck { point } => {
            let (text, style) = match point {
                Point::Off => ("OFF", Style::default().fg(Color::White).bg(Color::Black)),
                Point::On(_) => ("ON", Style::default().fg(Color::Black).bg(Color::White)),
            };
            let puck = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(style.add_modifier(Modifier::BOLD));
            frame.render_widget(puck, area);
        }
        Widget::DiceSet => {
            let dice = Block::default()
                .title("Roll")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White).bg(Color::Black));
            frame.render_widget(dice, area);
        }
        Widget::Die { face } => {
            let glyph = DIE_FACES
                .get((*face as usize).wrapping_sub(1))
                .copied()
                .unwrap_or('?');
            let die = Paragraph::new(format!("{} {}", glyph, face))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White).bg(Color::Rgb(238, 124, 121)));
            frame.render_widget(die, area);
        }
        Widget::Tooltip { lines } => {
            let text: Vec<Line> = lines.iter().map(|line| Line::from(line.as_str())).collect();
            let tooltip = Paragraph::new(text)
                .style(Style::default().fg(Color::Black).bg(Color::White))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(Clear, area);
            frame.render_widget(tooltip, area);
        }
    }
}

fn draw_status(frame: &mut Frame, area: Area, table: &Table) {
    let bank = table.bank();
    let line = Line::from(vec![
        Span::styled(format!(" Point: {} ", table.point()), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(format!("Bank: {}", format_cents(bank.bank)), Style::default().fg(Color::Green)),
        Span::raw(" | "),
        Span::styled(format!("Betting: {}", format_cents(bank.on_table as i64)), Style::default().fg(Color::Cyan)),
        Span::raw(" | click a bet to place the selected chip, r roll, c clear, q quit"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn chip_style(denomination: u64) -> Style {
    let (fg, bg) = match denomination {
        d if d < 500 => (Color::Black, Color::White),
        d if d < 2500 => (Color::White, Color::Rgb(241, 148, 141)),
        d if d < 10_000 => (Color::Black, Color::Rgb(122, 195, 150)),
        _ => (Color::White, Color::Rgb(131, 131, 131)),
    };
    Style::default().fg(fg).bg(bg)
}

/// Table rect clipped to the drawable area
fn clip(rect: Rect, bounds: Area) -> Option<Area> {
    let left = rect.x.max(bounds.x as i32);
    let top = rect.y.max(bounds.y as i32);
    let right = rect.right().min(bounds.right() as i32);
    let bottom = rect.bottom().min(bounds.bottom() as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Area::new(left as u16, top as u16, (right - left) as u16, (bottom - top) as u16))
}
