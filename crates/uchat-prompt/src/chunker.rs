use serde::Serialize;

const CHARS_PER_TOKEN: usize = 4;

/// Slice of a longer text sized for the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub sequence_index: usize,
    pub text: String,
    pub estimated_token_count: usize,
}

/// Approximate token count: one token per four characters, rounded down
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Split text into line-aligned chunks of at most `max_tokens` estimated tokens
///
/// Lines are accumulated greedily. A line that alone exceeds the budget
/// becomes its own oversized chunk instead of being cut. Joining the chunk
/// texts with `\n` gives back the input. Empty input yields no chunks.
pub fn split_into_chunks(text: &str, max_tokens: usize) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }

    let budget = max_tokens.saturating_mul(CHARS_PER_TOKEN);
    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if current.is_empty() {
            current.push(line);
            current_len = line_len;
            continue;
        }

        // +1 for the newline that joins the line onto the chunk
        let extended = current_len + 1 + line_len;
        if extended > budget {
            groups.push(std::mem::take(&mut current));
            current.push(line);
            current_len = line_len;
        } else {
            current.push(line);
            current_len = extended;
        }
    }
    groups.push(current);

    groups
        .into_iter()
        .enumerate()
        .map(|(sequence_index, lines)| {
            let text = lines.join("\n");
            Chunk {
                sequence_index,
                estimated_token_count: estimate_tokens(&text),
                text,
            }
        })
        .collect()
}
