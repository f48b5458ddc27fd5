use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use scamsmart_core::scoring::{RoundBreakdown, SessionTally};
use scamsmart_core::tags::Vocabulary;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn verdict(correct: bool) -> Cell {
    if correct {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}

/// Every term of a single round.
pub fn round(b: &RoundBreakdown) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Term").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Classification correct"), verdict(b.classification_correct)]);
    table.add_row(vec![
        Cell::new("Classification bonus"),
        Cell::new(b.classification_bonus),
    ]);
    table.add_row(vec![Cell::new("Correct tags"), Cell::new(b.correct).fg(Color::Green)]);
    table.add_row(vec![Cell::new("Incorrect tags"), Cell::new(b.incorrect).fg(Color::Red)]);
    table.add_row(vec![Cell::new("Missed tags"), Cell::new(b.missed).fg(Color::Yellow)]);
    table.add_row(vec![Cell::new("Tag score (raw)"), Cell::new(b.raw_tag_score)]);
    table.add_row(vec![Cell::new("Tag score"), Cell::new(b.tag_score)]);
    table.add_row(vec![
        Cell::new("Round score").add_attribute(Attribute::Bold),
        Cell::new(b.total).fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 1, 1);
    table
}

/// One row per round of a session.
pub fn breakdowns(rows: &[(String, RoundBreakdown)]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Scenario").add_attribute(Attribute::Bold),
        Cell::new("Call"),
        Cell::new("Bonus"),
        Cell::new("Right").fg(Color::Green),
        Cell::new("Wrong").fg(Color::Red),
        Cell::new("Missed").fg(Color::Yellow),
        Cell::new("Tags"),
        Cell::new("Total").fg(Color::Cyan),
    ]);
    for (title, b) in rows {
        table.add_row(vec![
            Cell::new(title).add_attribute(Attribute::Bold),
            verdict(b.classification_correct),
            Cell::new(b.classification_bonus),
            Cell::new(b.correct),
            Cell::new(b.incorrect),
            Cell::new(b.missed),
            Cell::new(b.tag_score),
            Cell::new(b.total).fg(Color::Cyan),
        ]);
    }
    right_align(&mut table, 2, 7);
    table
}

pub fn tally(t: &SessionTally, accuracy: u32, time_taken: Option<u32>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Rounds"),
        Cell::new("Right calls"),
        Cell::new("Right tags"),
        Cell::new("Wrong tags"),
        Cell::new("Missed tags"),
        Cell::new("Accuracy"),
        Cell::new("Time"),
        Cell::new("Total").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new(t.rounds),
        Cell::new(t.correct_classifications),
        Cell::new(t.correct_tags).fg(Color::Green),
        Cell::new(t.incorrect_tags).fg(Color::Red),
        Cell::new(t.missed_tags).fg(Color::Yellow),
        Cell::new(format!("{}%", accuracy)),
        Cell::new(time_taken.map_or("-".to_string(), |s| format!("{}s", s))),
        Cell::new(t.total).fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 0, 7);
    table
}

pub struct DeckRow {
    pub id: u32,
    pub title: String,
    pub is_scam: bool,
    pub tags: usize,
    pub problem: Option<String>,
}

pub fn deck(rows: &[DeckRow]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Kind"),
        Cell::new("Tags"),
        Cell::new("Status"),
    ]);
    for r in rows {
        let status = match &r.problem {
            None => Cell::new("OK").fg(Color::Green),
            Some(p) => Cell::new(p).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(&r.title),
            Cell::new(if r.is_scam { "scam" } else { "legit" }),
            Cell::new(r.tags),
            status,
        ]);
    }
    right_align(&mut table, 3, 3);
    table
}

/// Numbered indicator board for one vocabulary.
pub fn indicator_board(vocab: Vocabulary) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Id"),
        Cell::new("Indicator").add_attribute(Attribute::Bold),
        Cell::new("Hint"),
    ]);
    for (i, (id, label, desc)) in vocab.catalogue().into_iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(id),
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(desc),
        ]);
    }
    table
}
