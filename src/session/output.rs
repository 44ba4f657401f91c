use crate::engine::{Match, Ranking};

const NAME_WIDTH: usize = 20;
const NO_MATCH: &str = "[no match]";

/// Fits a document id into a fixed-width column: a three letter extension
/// is dropped, short names are padded and long ones shortened around
/// `[...]`.
pub fn display_name(id: &str) -> String {
    let mut chars: Vec<char> = id.chars().collect();
    if chars.len() >= 4 && chars[chars.len() - 4] == '.' {
        chars.truncate(chars.len() - 4);
    }

    if chars.len() > NAME_WIDTH {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 7..].iter().collect();
        format!("{head}[...]{tail}")
    } else {
        let name: String = chars.into_iter().collect();
        format!("{name:<NAME_WIDTH$}")
    }
}

pub fn format_matches(matches: &[Match]) -> String {
    let mut out = String::from("FILE\t\t\t% MATCH\n");
    for m in matches {
        out.push_str(&format!("{}\t{:.4}\n", display_name(&m.document), m.score * 100.0));
    }
    out
}

pub fn format_result(ranking: &Ranking) -> String {
    let name = ranking.best.as_ref().map_or(NO_MATCH, |m| m.document.as_str());
    format!("Result: {name}")
}
