use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct Regions {
    pub header: Rect,
    pub input: Rect,
    pub result: Rect,
    pub history: Rect,
    pub footer: Rect,
}

/// Header, input and result side by side, history below, footer at the bottom.
pub fn regions(area: Rect) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    Regions {
        header: rows[0],
        input: top[0],
        result: top[1],
        history: rows[2],
        footer: rows[3],
    }
}

/// Fixed-size popup centred in `area`, shrunk to fit small terminals.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
