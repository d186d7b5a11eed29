use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const MUSIC_WIDTH: u16 = 28;
    const SNAKE_WIDTH: u16 = 32;
    const BODY_SEGMENTS: usize = 5;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::MUSIC_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const MUSIC: [&'static str; Self::TEXT_HEIGHT as usize] = [
        r" __  __ _   _ ____ ___ ____ ",
        r"|  \/  | | | / ___|_ _/ ___|",
        r"| |\/| | | | \___ \| | |    ",
        r"| |  | | |_| |___) | | |___ ",
        r"|_|  |_|\___/|____/___\____|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
        r" ____  _   _    _    _  _______ ",
        r"/ ___|| \ | |  / \  | |/ / ____|",
        r"\___ \|  \| | / _ \ | ' /|  _|  ",
        r" ___) | |\  |/ ___ \| . \| |___ ",
        r"|____/|_| \_/_/   \_\_|\_\_____|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [music_area, snake_area] = Layout::horizontal([Self::MUSIC_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::MUSIC)
            .style(consts::LOGO_MUSIC_STYLE)
            .render(music_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::LOGO_SNAKE_STYLE)
            .render(snake_area, buf);
        // A snake about to eat
        Line::from_iter([
            Span::styled(
                consts::SEGMENT_SYMBOL.repeat(Self::BODY_SEGMENTS),
                Style::new().fg(consts::FALLBACK_BODY_COLOR),
            ),
            Span::styled(
                consts::HEAD_SYMBOL,
                consts::HEAD_STYLE.fg(consts::FALLBACK_HEAD_COLOR),
            ),
            Span::raw("  "),
            Span::styled(
                consts::FOOD_SYMBOL_LARGE,
                Style::new().fg(consts::FALLBACK_FOOD_COLOR),
            ),
        ])
        .centered()
        .render(diagram_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys = |prefix: &'static str, names: [&'static str; 4]| {
            let mut spans = vec![Span::raw(prefix)];
            for (i, k) in names.into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(k, consts::KEY_STYLE));
            }
            Line::from(spans)
        };
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys("       ", ["←", "↓", "↑", "→"]),
            keys("   or: ", ["h", "j", "k", "l"]),
            keys("   or: ", ["a", "s", "w", "d"]),
            Line::from("   or: the mouse"),
            Line::from("Eat the tracks, but"),
            Line::from("don't hit yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod logo {
        use super::*;

        #[test]
        fn test_render() {
            let mut buffer = Buffer::empty(Rect::new(0, 0, 64, 8));
            Logo.render(Rect::new(2, 0, Logo::WIDTH, Logo::HEIGHT), &mut buffer);
            #[rustfmt::skip]
            let mut expected = Buffer::with_lines([
                r"   __  __ _   _ ____ ___ ____  ____  _   _    _    _  _______   ",
                r"  |  \/  | | | / ___|_ _/ ___|/ ___|| \ | |  / \  | |/ / ____|  ",
                r"  | |\/| | | | \___ \| | |    \___ \|  \| | / _ \ | ' /|  _|    ",
                r"  | |  | | |_| |___) | | |___  ___) | |\  |/ ___ \| . \| |___   ",
                r"  |_|  |_|\___/|____/___\____||____/|_| \_/_/   \_\_|\_\_____|  ",
                 "                                                                ",
                 "                        ██████████▐▌  ◖◗                        ",
                 "                                                                ",
            ]);
            expected.set_style(Rect::new(2, 0, 28, 5), consts::LOGO_MUSIC_STYLE);
            expected.set_style(Rect::new(30, 0, 32, 5), consts::LOGO_SNAKE_STYLE);
            expected.set_style(
                Rect::new(24, 6, 10, 1),
                Style::new().fg(consts::FALLBACK_BODY_COLOR),
            );
            expected.set_style(
                Rect::new(34, 6, 2, 1),
                consts::HEAD_STYLE.fg(consts::FALLBACK_HEAD_COLOR),
            );
            expected.set_style(
                Rect::new(38, 6, 2, 1),
                Style::new().fg(consts::FALLBACK_FOOD_COLOR),
            );
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn music_width() {
            assert!(Logo::MUSIC
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::MUSIC_WIDTH)));
        }

        #[test]
        fn snake_width() {
            assert!(Logo::SNAKE
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::SNAKE_WIDTH)));
        }
    }

    #[test]
    fn render_instructions() {
        let area = Rect::new(0, 0, Instructions::WIDTH, Instructions::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Instructions.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "Move the snake with:",
            "       ← ↓ ↑ →      ",
            "   or: h j k l      ",
            "   or: a s w d      ",
            "   or: the mouse    ",
            "Eat the tracks, but ",
            "don't hit yourself! ",
        ]);
        for y in 1..4 {
            for x in [7, 9, 11, 13] {
                expected.set_style(Rect::new(x, y, 1, 1), consts::KEY_STYLE);
            }
        }
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
