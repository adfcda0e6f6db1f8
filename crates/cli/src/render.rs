//! Text rendering of snapshots.

use std::fmt::Write as _;

use pipeviz_core::sim::{RowView, Snapshot};

/// Width of a full histogram bar, in characters.
const HISTOGRAM_WIDTH: usize = 20;

/// Clears the terminal and homes the cursor.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Frame layout options.
#[derive(Debug, Clone, Copy)]
pub struct TextFrame {
    /// Rows shown around the focus row; 0 shows everything.
    pub window: usize,
    /// Append frames instead of redrawing in place.
    pub plain: bool,
}

impl TextFrame {
    pub fn print(&self, snapshot: &Snapshot) {
        let text = self.draw(snapshot);
        if self.plain {
            println!("{text}");
        } else {
            print!("{CLEAR}{text}");
        }
    }

    fn draw(&self, snapshot: &Snapshot) -> String {
        let mut out = String::new();

        let title = snapshot.title.as_deref().unwrap_or("(no program loaded)");
        let _ = writeln!(out, "{title}");
        let state = if snapshot.loading {
            "loading"
        } else if snapshot.running {
            "playing"
        } else {
            "paused"
        };
        let _ = writeln!(
            out,
            "Cycle: {} / {}  [{state}]  {} cycles/s",
            snapshot.current_cycle,
            snapshot.total_cycles.saturating_sub(1),
            snapshot.rate_hz
        );
        out.push('\n');

        let (start, end) = self.visible_rows(snapshot);
        for row in &snapshot.rows[start..end] {
            let _ = writeln!(out, "{}", draw_row(row));
        }
        out
    }

    fn visible_rows(&self, snapshot: &Snapshot) -> (usize, usize) {
        let len = snapshot.rows.len();
        if self.window == 0 {
            return (0, len);
        }
        let focus = snapshot.focus_row.unwrap_or(0);
        let start = focus.saturating_sub(self.window / 2).min(len.saturating_sub(self.window));
        (start, (start + self.window).min(len))
    }
}

fn draw_row(row: &RowView) -> String {
    let filled = (row.bar_fraction * HISTOGRAM_WIDTH as f64).round() as usize;
    let bar = "#".repeat(filled.min(HISTOGRAM_WIDTH));
    let marker = if row.touched { ' ' } else { '.' };
    let stage = row.stage.map(|s| s.to_string()).unwrap_or_default();
    let mux = row.mux.map(|v| format!("Value: {v}")).unwrap_or_default();
    format!(
        "{:>4} {marker}{:>6}: {:<32} {bar:<HISTOGRAM_WIDTH$} {stage:<8} {mux:<14} Hits: {}",
        row.line, row.pc, row.text, row.hits
    )
}
