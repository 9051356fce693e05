use mtg_common::Zone;

use crate::deck::{CardLabels, Deck};
use crate::error::Result;
use crate::matchup::{MatchupRow, RowChange};
use crate::matrix::Matrix;
use crate::render::styled_rows;

const MATCHUP_HEADER: &str = "Matchup";

/// Plain-text rendering of the matrix, one line per matchup
pub fn format_matrix_table(matrix: &Matrix, labels: &CardLabels) -> Result<String> {
    if matrix.is_empty() {
        return Ok("No matchups added yet.\n".to_string());
    }

    let headers = matrix.column_labels(labels);
    let styled = styled_rows(matrix)?;

    // Calculate column widths for alignment
    let name_width = matrix
        .rows()
        .iter()
        .map(|row| row.matchup.chars().count())
        .chain(std::iter::once(MATCHUP_HEADER.len()))
        .max()
        .unwrap_or(MATCHUP_HEADER.len());
    let cell_texts: Vec<Vec<String>> = styled
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| format!("{}{}", cell.tone.marker(), cell.text))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cell_texts
                .iter()
                .filter_map(|texts| texts.get(col))
                .map(|text| text.chars().count())
                .chain([header.chars().count(), 3])
                .max()
                .unwrap_or(3)
        })
        .collect();

    let mut output = String::new();

    output.push_str(&format!("{MATCHUP_HEADER:<name_width$}"));
    for (header, width) in headers.iter().zip(&widths) {
        output.push_str(&format!(" | {header:^width$}"));
    }
    output.push('\n');

    output.push_str(&"-".repeat(name_width));
    for width in &widths {
        output.push_str(&format!("-+-{}", "-".repeat(*width)));
    }
    output.push('\n');

    for (row, texts) in matrix.rows().iter().zip(&cell_texts) {
        output.push_str(&format!("{:<name_width$}", row.matchup));
        for (text, width) in texts.iter().zip(&widths) {
            output.push_str(&format!(" | {text:^width$}"));
        }
        output.push('\n');
    }

    Ok(output)
}

/// Locked-deck summary: both zones as decklist text with card totals
pub fn format_deck_summary(deck: &Deck, labels: &CardLabels) -> String {
    let mut output = String::new();
    for zone in Zone::all() {
        let title = match zone {
            Zone::Mainboard => "Mainboard",
            Zone::Sideboard => "Sideboard",
        };
        output.push_str(&format!("{} ({} cards)\n", title, deck.card_count(*zone)));
        let text = deck.decklist_text(*zone, labels);
        if !text.is_empty() {
            output.push_str(&text);
            output.push('\n');
        }
        output.push('\n');
    }
    output
}

/// Numbered matchup list in insertion order, as used by `edit --index`
pub fn format_matchup_list(matchups: &[MatchupRow]) -> String {
    let mut output = String::new();
    for (i, row) in matchups.iter().enumerate() {
        let totals = row.totals();
        output.push_str(&format!(
            "{:>3}. {} (-{} / +{})\n",
            i + 1,
            row.name(),
            totals.out_total,
            totals.in_total
        ));
    }
    output
}

/// Changelog shown before an edit is confirmed
pub fn format_changes(changes: &[RowChange], labels: &CardLabels) -> String {
    if changes.is_empty() {
        return "No changes.\n".to_string();
    }
    let mut output = String::from("Changes to apply:\n");
    for change in changes {
        output.push_str(&format!("  - {}\n", change.describe(labels)));
    }
    output
}
