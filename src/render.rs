use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, IsTerminal, Stdout, Write};

use crate::session::Phase;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    /// One `label<TAB>MM:SS` line per tick.
    Lines,
    /// A single line rewritten in place.
    Inline,
}

pub struct Renderer<W: Write> {
    out: W,
    style: Style,
}

impl Renderer<Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let style = if out.is_terminal() { Style::Inline } else { Style::Lines };
        Renderer::new(out, style)
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, style: Style) -> Self {
        Renderer { out, style }
    }

    pub fn tick(&mut self, phase: Phase, remaining_secs: u64) -> io::Result<()> {
        let time = format_time(remaining_secs);
        match self.style {
            Style::Lines => writeln!(self.out, "{}\t{time}", phase.label())?,
            Style::Inline => {
                queue!(
                    self.out,
                    cursor::MoveToColumn(0),
                    terminal::Clear(ClearType::CurrentLine),
                    SetForegroundColor(phase_color(phase)),
                    SetAttribute(Attribute::Bold),
                    Print(phase.label()),
                    SetAttribute(Attribute::Reset),
                    ResetColor,
                    Print(format!("\t{time}")),
                )?;
            }
        }
        self.out.flush()
    }

    /// Ends the current countdown's output.
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Red,
        Phase::Rest => Color::Green,
        Phase::LongRest => Color::Cyan,
    }
}

pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn format_pads_both_fields() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(25 * 60), "25:00");
    }

    #[test]
    fn format_keeps_long_minutes() {
        assert_eq!(format_time(120 * 60 + 7), "120:07");
    }

    #[test]
    fn lines_style_prints_label_and_time() {
        let mut renderer = Renderer::new(Vec::new(), Style::Lines);
        renderer.tick(Phase::Work, 1500).unwrap();
        renderer.tick(Phase::LongRest, 59).unwrap();
        renderer.finish().unwrap();
        assert_eq!(output(renderer), "work\t25:00\nlongRest\t00:59\n\n");
    }

    #[test]
    fn inline_style_rewrites_one_line() {
        let mut renderer = Renderer::new(Vec::new(), Style::Inline);
        renderer.tick(Phase::Rest, 300).unwrap();
        renderer.tick(Phase::Rest, 299).unwrap();
        renderer.finish().unwrap();
        let text = output(renderer);
        assert_eq!(text.matches('\n').count(), 1);
        assert!(text.ends_with("\t04:59\n"));
        assert!(text.contains("rest"));
    }
}
