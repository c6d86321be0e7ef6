use crate::reader::ParseFailure;

/// The header line followed by the data lines, joined with `\n`.
#[derive(Debug, PartialEq, Eq)]
pub struct Body {
    pub text: String,
    /// 1-based input line number of each line of `text`.
    pub source_lines: Vec<u64>,
}

impl Body {
    /// Maps a 1-based line of `text` back to its line in the input.
    pub fn source_line(&self, line: u64) -> Option<u64> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.source_lines.get(index).copied()
    }
}

/// Drops blank lines and the leading title line.
pub fn run(text: &str) -> Result<Body, ParseFailure> {
    let lines = text
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect::<Vec<(usize, &str)>>();

    if lines.len() < 2 {
        return Err(ParseFailure::InsufficientLines { found: lines.len() });
    }

    let kept = &lines[1..];
    Ok(Body {
        text: kept
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<&str>>()
            .join("\n"),
        source_lines: kept.iter().map(|(index, _)| *index as u64 + 1).collect(),
    })
}
