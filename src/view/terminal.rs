use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::models::event::ThreatLevel;
use crate::view::badge::ThreatBadge;
use crate::view::document::DocumentSnapshot;
use crate::view::{NoticeKind, StatSlot, TableBody, TABLE_COLUMNS, TABLE_HEADERS};

const COLUMN_GAP: &str = "  ";

/// Paints the dashboard as coloured text
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    color: ColorChoice,
}

impl TerminalRenderer {
    pub fn new(color: ColorChoice) -> Self {
        Self { color }
    }

    /// Clear the screen (optionally) and paint to stdout
    pub fn repaint_stdout(
        &self,
        snapshot: &DocumentSnapshot,
        clear_screen: bool,
    ) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color);
        if clear_screen {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.paint(&mut stdout, snapshot)?;
        stdout.flush()
    }

    /// Paint stat cards, count label and the event table
    pub fn paint<W: WriteColor>(&self, out: &mut W, snapshot: &DocumentSnapshot) -> io::Result<()> {
        self.paint_stats(out, snapshot)?;
        writeln!(out)?;

        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "Security Events")?;
        out.reset()?;
        writeln!(out, " ({})", snapshot.event_count)?;

        self.paint_table(out, &snapshot.table)
    }

    fn paint_stats<W: WriteColor>(
        &self,
        out: &mut W,
        snapshot: &DocumentSnapshot,
    ) -> io::Result<()> {
        for slot in StatSlot::ALL {
            let color = match slot {
                StatSlot::HighThreat => Some(Color::Red),
                StatSlot::MediumThreat => Some(Color::Yellow),
                StatSlot::LowThreat => Some(Color::Green),
                _ => None,
            };
            write!(out, "{}: ", slot.title())?;
            out.set_color(ColorSpec::new().set_fg(color).set_bold(true))?;
            write!(out, "{}", snapshot.stat(slot))?;
            out.reset()?;
            write!(out, "{}", COLUMN_GAP)?;
        }
        writeln!(out)
    }

    fn paint_table<W: WriteColor>(&self, out: &mut W, table: &TableBody) -> io::Result<()> {
        let rows = match table {
            TableBody::Notice(notice) => {
                if notice.kind == NoticeKind::Error {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                }
                writeln!(out, "{}", notice.text)?;
                return out.reset();
            }
            TableBody::Rows(rows) => rows,
        };

        let mut widths = TABLE_HEADERS.map(display_width);
        for row in rows {
            for (column, width) in widths.iter_mut().enumerate() {
                *width = (*width).max(display_width(&row.cell(column)));
            }
        }

        out.set_color(ColorSpec::new().set_bold(true).set_underline(true))?;
        for (column, header) in TABLE_HEADERS.iter().enumerate() {
            write!(out, "{}", pad(header, widths[column], column))?;
        }
        out.reset()?;
        writeln!(out)?;

        for row in rows {
            for (column, cell) in row.cells.iter().enumerate() {
                write!(out, "{}", pad(cell, widths[column], column))?;
            }
            out.set_color(&badge_color(&row.badge))?;
            write!(out, "{}", row.badge.text())?;
            out.reset()?;
            writeln!(out)?;
        }

        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

/// Colour for a badge; keyed case-insensitively, like the style class
fn badge_color(badge: &ThreatBadge) -> ColorSpec {
    let mut spec = ColorSpec::new();
    let color = match ThreatLevel::parse(Some(&badge.label)) {
        ThreatLevel::High => Color::Red,
        ThreatLevel::Medium => Color::Yellow,
        ThreatLevel::Low => Color::Green,
        ThreatLevel::Unknown => Color::White,
    };
    spec.set_fg(Some(color));
    spec
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize, column: usize) -> String {
    if column + 1 == TABLE_COLUMNS {
        return text.to_string();
    }
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}{}", text, " ".repeat(fill), COLUMN_GAP)
}
