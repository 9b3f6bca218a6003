//! Turns guesses into text for the terminal.

use crate::{Attribute, Guess, Verdict};

fn width(attribute: Attribute) -> usize {
    match attribute {
        Attribute::Name => 20,
        Attribute::Rarity => 12,
        Attribute::Hull => 4,
        Attribute::Nation => 15,
        Attribute::Class => 15,
        Attribute::Timer => 11,
        Attribute::Event => 25,
        Attribute::VoiceActor => 20,
    }
}

const SEPARATOR: &str = " | ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub color: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Renders the header and one (possibly multi-line) row per guess.
#[must_use]
pub fn render_table(history: &[Guess<'_>], options: TableOptions) -> String {
    let header: Vec<(String, Option<Verdict>)> = Attribute::ALL
        .iter()
        .map(|a| (a.label().to_string(), None))
        .collect();

    let total = Attribute::ALL.iter().copied().map(width).sum::<usize>()
        + SEPARATOR.len() * (Attribute::ALL.len() - 1);

    let mut lines = vec![format_row(&header, options), "-".repeat(total)];
    for guess in history {
        let row: Vec<_> = Attribute::ALL
            .iter()
            .map(|&a| {
                let verdict = guess.verdicts.get(a);
                let mut text = a.value(guess.ship);
                if let Some(arrow) = verdict.arrow() {
                    text.push(' ');
                    text.push_str(arrow);
                }
                (text, Some(verdict))
            })
            .collect();
        lines.push(format_row(&row, options));
    }
    lines.join("\n")
}

/// One line per guess, without the table.
#[must_use]
pub fn render_compact(guess: &Guess<'_>) -> String {
    let v = &guess.verdicts;
    format!(
        "Rarity: {} | Hull Type: {} | Nation: {} | Class: {} | Timer: {} | Event: {} | VA: {}",
        v.rarity, v.hull, v.nation, v.class, v.timer, v.event, v.voice_actor
    )
}

fn format_row(cells: &[(String, Option<Verdict>)], options: TableOptions) -> String {
    let columns: Vec<Vec<String>> = Attribute::ALL
        .iter()
        .zip(cells)
        .map(|(&attribute, (text, verdict))| {
            let width = width(attribute);
            wrap(text, width)
                .into_iter()
                .map(|line| {
                    let line = format!("{:^width$}", line, width = width);
                    match verdict {
                        Some(verdict) if options.color => paint(&line, *verdict),
                        _ => line,
                    }
                })
                .collect()
        })
        .collect();

    let height = columns.iter().map(Vec::len).max().unwrap_or(1);
    (0..height)
        .map(|i| {
            Attribute::ALL
                .iter()
                .zip(&columns)
                .map(|(&attribute, column)| match column.get(i) {
                    Some(line) => line.clone(),
                    None => " ".repeat(width(attribute)),
                })
                .collect::<Vec<_>>()
                .join(SEPARATOR)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paint(text: &str, verdict: Verdict) -> String {
    let code = match verdict {
        Verdict::Match => "30;42",
        Verdict::NoMatch | Verdict::Higher | Verdict::Lower => "97;41",
    };
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

/// Greedy word wrap. Words longer than `width` are split. Always returns at least one line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }
        let line_len = line.chars().count();
        if line_len > 0 && line_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{render_compact, render_table, wrap, TableOptions};
    use crate::{Catalog, EventTables, Guess, TimerCategory};
    use chrono::NaiveDate;

    #[test]
    fn wrapping() {
        assert_eq!(wrap("", 5), [""]);
        assert_eq!(wrap("Spring Gala", 25), ["Spring Gala"]);
        assert_eq!(wrap("Spring Gala", 8), ["Spring", "Gala"]);
        assert_eq!(wrap("Abcdefghij", 4), ["Abcd", "efgh", "ij"]);
        assert_eq!(wrap("a bb ccc", 4), ["a bb", "ccc"]);
    }

    fn catalog() -> Catalog {
        let mut tables = EventTables::default();
        tables.insert(
            TimerCategory::General,
            "Spring Gala",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        Catalog::new(
            [
                ship!(1, "Alpha", timer: "1:00:00", event: "Spring Gala"),
                ship!(2, "Beta", timer: "2:00:00", event: "Spring Gala"),
            ],
            tables,
        )
        .unwrap()
    }

    #[test]
    fn table() {
        let catalog = catalog();
        let alpha = catalog.find_by_id(1).unwrap();
        let beta = catalog.find_by_id(2).unwrap();
        let history = [Guess {
            ship: beta,
            verdicts: catalog.compare(alpha, beta),
        }];

        let plain = render_table(&history, TableOptions { color: false });
        let lines: Vec<_> = plain.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Voice Actor"));
        assert_eq!(lines[1].len(), 122 + 3 * 7);
        assert!(lines[2].contains("02:00:00 ↓"));
        assert!(lines[2].contains("Beta"));
        assert!(!plain.contains('\u{1b}'));

        let colored = render_table(&history, TableOptions::default());
        assert!(colored.contains("\u{1b}[30;42m"));
        assert!(colored.contains("\u{1b}[97;41m"));
    }

    #[test]
    fn compact() {
        let catalog = catalog();
        let alpha = catalog.find_by_id(1).unwrap();
        let beta = catalog.find_by_id(2).unwrap();
        let line = render_compact(&Guess {
            ship: beta,
            verdicts: catalog.compare(alpha, beta),
        });
        assert_eq!(
            line,
            "Rarity: Yes | Hull Type: Yes | Nation: Yes | Class: Yes | Timer: ↓ | Event: Yes | VA: Yes"
        );
    }
}
