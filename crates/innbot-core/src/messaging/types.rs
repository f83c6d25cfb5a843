/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

/// Split `text` into pieces of at most `limit` bytes.
///
/// Breaks after a newline when one fits, otherwise hard-splits on a char
/// boundary. Concatenating the pieces yields `text` again.
pub fn split_text_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(4);
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut rest = text;
    while rest.len() > limit {
        let head = floor_char_boundary(rest, limit);
        let cut = match rest[..head].rfind('\n') {
            Some(nl) if nl > 0 => nl + 1,
            _ => head,
        };
        out.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        out.push(rest.to_string());
    }
    out
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
