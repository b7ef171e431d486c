//! CoNLL-U reader.
//!
//! Reads the ten-column Universal Dependencies exchange format into a
//! [`ParsedDocument`]. Multi-word token ranges and empty nodes carry no
//! syntactic head of their own and are skipped.

use super::{ParseError, ParsedDocument, Sentence, Token};

const COLUMNS: usize = 10;

/// Parse a CoNLL-U document.
pub fn parse(input: &str) -> Result<ParsedDocument, ParseError> {
    let mut sentences = Vec::new();
    let mut rows: Vec<(usize, Row<'_>)> = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;

        if line.trim().is_empty() {
            if !rows.is_empty() {
                sentences.push(build_sentence(&rows)?);
                rows.clear();
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != COLUMNS {
            return Err(malformed(
                line_no,
                format!("expected {COLUMNS} columns, found {}", fields.len()),
            ));
        }

        // 1-2 (multi-word range) and 1.1 (empty node)
        if fields[0].contains('-') || fields[0].contains('.') {
            continue;
        }

        let id = fields[0]
            .parse::<usize>()
            .map_err(|e| malformed(line_no, format!("invalid id {:?}: {e}", fields[0])))?;
        let head = fields[6]
            .parse::<usize>()
            .map_err(|e| malformed(line_no, format!("invalid head {:?}: {e}", fields[6])))?;

        rows.push((
            line_no,
            Row {
                id,
                form: fields[1],
                upos: fields[3],
                head,
                deprel: fields[7],
            },
        ));
    }

    if !rows.is_empty() {
        sentences.push(build_sentence(&rows)?);
    }

    Ok(ParsedDocument::new(sentences))
}

struct Row<'a> {
    id: usize,
    form: &'a str,
    upos: &'a str,
    head: usize,
    deprel: &'a str,
}

fn build_sentence(rows: &[(usize, Row<'_>)]) -> Result<Sentence, ParseError> {
    let mut tokens = Vec::with_capacity(rows.len());

    for (position, (line_no, row)) in rows.iter().enumerate() {
        if row.id != position + 1 {
            return Err(malformed(
                *line_no,
                format!("expected word id {}, found {}", position + 1, row.id),
            ));
        }

        let head = match row.head {
            0 => None,
            h if h <= rows.len() => Some(h - 1),
            h => {
                return Err(malformed(
                    *line_no,
                    format!("head {h} outside sentence of {} words", rows.len()),
                ));
            }
        };

        tokens.push(Token::new(row.form, row.deprel, row.upos, head));
    }

    Ok(Sentence::new(tokens))
}

fn malformed(line: usize, reason: String) -> ParseError {
    ParseError::Malformed { line, reason }
}
