//! Commands typed at the main prompt, and the text shown for their results.

use crate::core::store::Note;

/// A committed prompt line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Clear,
    List,
    Create,
    /// `find`/`search`; `None` asks for the term on a follow-up prompt.
    Search(Option<String>),
    Delete(u32),
    View(u32),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "exit" => return Command::Exit,
            "clear" => return Command::Clear,
            "list" => return Command::List,
            "new" | "create" => return Command::Create,
            "find" | "search" => return Command::Search(None),
            _ => {}
        }

        for prefix in ["find ", "search "] {
            if let Some(term) = line.strip_prefix(prefix) {
                let term = term.trim();
                return if term.is_empty() {
                    Command::Search(None)
                } else {
                    Command::Search(Some(term.to_string()))
                };
            }
        }

        if let Some(arg) = line.strip_prefix("delete ") {
            return match arg.trim().parse() {
                Ok(id) => Command::Delete(id),
                Err(_) => Command::Unknown(line.to_string()),
            };
        }

        match line.parse() {
            Ok(id) => Command::View(id),
            Err(_) => Command::Unknown(line.to_string()),
        }
    }
}

pub fn format_note(note: &Note) -> String {
    format!("ID:    {}\nTitle: {}\n{}", note.id, note.title, note.body)
}

/// One `(id) title` line per note, each cut to `width` cells.
pub fn format_listing(notes: &[&Note], width: usize) -> String {
    notes
        .iter()
        .map(|note| {
            let mut line = truncate(&format!("({}) {}", note.id, note.title), width);
            line.push('\n');
            line
        })
        .collect()
}

/// Cut `text` to at most `width` code points, marking the cut with `...`.
///
/// Only the first line of `text` is kept.
pub fn truncate(text: &str, width: usize) -> String {
    let text = text.lines().next().unwrap_or("");
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u32, title: &str, body: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: 0,
        }
    }

    // -- parsing ---

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("list"), Command::List);
        assert_eq!(Command::parse("new"), Command::Create);
        assert_eq!(Command::parse("create"), Command::Create);
        assert_eq!(Command::parse("find"), Command::Search(None));
        assert_eq!(Command::parse("search"), Command::Search(None));
    }

    #[test]
    fn test_parse_inline_search_term() {
        assert_eq!(
            Command::parse("find milk eggs"),
            Command::Search(Some("milk eggs".to_string()))
        );
        assert_eq!(
            Command::parse("search  cats "),
            Command::Search(Some("cats".to_string()))
        );
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(Command::parse("delete 4"), Command::Delete(4));
        assert_eq!(Command::parse("12"), Command::View(12));
        assert_eq!(
            Command::parse("delete four"),
            Command::Unknown("delete four".to_string())
        );
        assert_eq!(Command::parse("-1"), Command::Unknown("-1".to_string()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("hello"), Command::Unknown("hello".to_string()));
        // keywords are exact
        assert_eq!(Command::parse("lists"), Command::Unknown("lists".to_string()));
    }

    // -- formatting ---

    #[test]
    fn test_format_note() {
        let text = format_note(&note(3, "Groceries", "milk\neggs"));
        assert_eq!(text, "ID:    3\nTitle: Groceries\nmilk\neggs");
    }

    #[test]
    fn test_format_listing_truncates_to_width() {
        let a = note(1, "short", "");
        let b = note(2, "a considerably longer title", "");
        let listing = format_listing(&[&a, &b], 16);
        assert_eq!(listing, "(1) short\n(2) a conside...\n");
    }

    #[test]
    fn test_truncate_edges() {
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abcd", 3), "abc");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("first\nsecond", 20), "first");
    }
}
