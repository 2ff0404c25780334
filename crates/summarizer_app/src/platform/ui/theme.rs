use ratatui::style::Color;
use summarizer_core::Theme;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focus_border: Color,
    pub accent: Color,
    pub error: Color,
    pub ok: Color,
    pub highlight: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(0x11, 0x18, 0x27),
    text: Color::Rgb(0xe5, 0xe7, 0xeb),
    muted: Color::Rgb(0x6b, 0x72, 0x80),
    border: Color::Rgb(0x40, 0x40, 0x40),
    focus_border: Color::Rgb(0x93, 0xc5, 0xfd),
    accent: Color::Rgb(0x60, 0xa5, 0xfa),
    error: Color::Rgb(0xef, 0x44, 0x44),
    ok: Color::Rgb(0x22, 0xc5, 0x5e),
    highlight: Color::Rgb(0x26, 0x26, 0x26),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(0xf9, 0xfa, 0xfb),
    text: Color::Rgb(0x11, 0x18, 0x27),
    muted: Color::Rgb(0x6b, 0x72, 0x80),
    border: Color::Rgb(0xd1, 0xd5, 0xdb),
    focus_border: Color::Rgb(0x25, 0x63, 0xeb),
    accent: Color::Rgb(0x25, 0x63, 0xeb),
    error: Color::Rgb(0xdc, 0x26, 0x26),
    ok: Color::Rgb(0x16, 0xa3, 0x4a),
    highlight: Color::Rgb(0xe5, 0xe7, 0xeb),
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => DARK,
        Theme::Light => LIGHT,
    }
}
