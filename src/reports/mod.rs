use crate::cmd::replay::ReplayOutcome;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gestureforge::classifier::GestureLabel;
use gestureforge::confirm::Timestamp;

pub struct FrameRow {
    pub t: Timestamp,
    pub hand: bool,
    pub score: f32,
    pub candidate: Option<GestureLabel>,
    pub confidence: f32,
    pub hand_open: bool,
    pub index: String,
}

fn label_cell(label: Option<GestureLabel>) -> Cell {
    match label {
        Some(l) => Cell::new(l).fg(Color::Green),
        None => Cell::new("-"),
    }
}

pub fn print_event_report(outcomes: &[ReplayOutcome]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Recording").add_attribute(Attribute::Bold),
        Cell::new("Frames"),
        Cell::new("#"),
        Cell::new("Gesture").fg(Color::Cyan),
        Cell::new("Conf"),
        Cell::new("Fired At (ms)"),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let mut total = 0;
    for outcome in outcomes {
        if outcome.events.is_empty() {
            table.add_row(vec![
                Cell::new(&outcome.file),
                Cell::new(outcome.frames),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        }
        for (n, event) in outcome.events.iter().enumerate() {
            let (file, frames) = if n == 0 {
                (outcome.file.clone(), outcome.frames.to_string())
            } else {
                (String::new(), String::new())
            };
            table.add_row(vec![
                Cell::new(file),
                Cell::new(frames),
                Cell::new(n + 1),
                label_cell(Some(event.label)),
                Cell::new(format!("{:.2}", event.confidence)),
                Cell::new(event.fired_at),
            ]);
        }
        total += outcome.events.len();
    }

    println!("\n🖐️  === CONFIRMED GESTURES === 🖐️");
    println!("{}", table);
    println!("Confirmed gestures: {}", total);
}

pub fn print_frame_table(rows: &[FrameRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("t (ms)").add_attribute(Attribute::Bold),
        Cell::new("Hand"),
        Cell::new("Score"),
        Cell::new("Open"),
        Cell::new("Index"),
        Cell::new("Candidate").fg(Color::Cyan),
    ]);

    for row in rows {
        if !row.hand {
            table.add_row(vec![
                Cell::new(row.t),
                Cell::new("no").fg(Color::DarkGrey),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        }
        table.add_row(vec![
            Cell::new(row.t),
            Cell::new("yes"),
            Cell::new(format!("{:.2}", row.score)),
            Cell::new(if row.hand_open { "yes" } else { "no" }),
            Cell::new(&row.index),
            label_cell(row.candidate),
        ]);
    }

    if let Some(col) = table.column_mut(0) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{}", table);
}

pub fn print_label_summary(file: &str, counts: &[(String, usize)], total: usize) {
    println!("\n📊 === FRAME CLASSIFICATION: {} === 📊", file);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Frames"),
        Cell::new("Share"),
    ]);

    for (label, count) in counts {
        let share = if total > 0 {
            *count as f32 / total as f32 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", share)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
    println!("Frames: {}", total);
}
