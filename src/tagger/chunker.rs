//! IOB phrase chunking over part-of-speech tags.
//!
//! Patterns, tried in order at each position:
//! - NP: (DT|PRP$)? (JJ|CD)* (NN|NNS|NNP|NNPS)+, or a lone PRP
//! - VP: (MD)? (RB)? (VB*)+ with "to" + base verb folded in
//! - PP: IN | TO
//! - ADJP: JJ+
//! - ADVP: RB+

/// Position of a token within its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Iob {
    Begin,
    Inside,
    Outside,
}

/// Chunk tag of one token, e.g. `B-NP`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkTag {
    pub iob: Iob,
    /// Phrase kind; `None` for tokens outside any chunk
    pub name: Option<String>,
}

impl ChunkTag {
    pub fn outside() -> Self {
        ChunkTag {
            iob: Iob::Outside,
            name: None,
        }
    }

    pub fn begin(name: &str) -> Self {
        ChunkTag {
            iob: Iob::Begin,
            name: Some(name.to_string()),
        }
    }

    pub fn inside(name: &str) -> Self {
        ChunkTag {
            iob: Iob::Inside,
            name: Some(name.to_string()),
        }
    }

    /// Parse the `B-NP` / `I-NP` / `O` notation.
    pub fn parse(label: &str) -> Option<Self> {
        if label == "O" {
            return Some(Self::outside());
        }
        let (prefix, name) = label.split_once('-')?;
        if name.is_empty() {
            return None;
        }
        match prefix {
            "B" => Some(Self::begin(name)),
            "I" => Some(Self::inside(name)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.iob, &self.name) {
            (Iob::Begin, Some(name)) => write!(f, "B-{}", name),
            (Iob::Inside, Some(name)) => write!(f, "I-{}", name),
            _ => f.write_str("O"),
        }
    }
}

fn is_noun(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "NNP" | "NNPS")
}

fn is_verb(tag: &str) -> bool {
    tag.starts_with("VB")
}

#[derive(Debug, Clone)]
pub(crate) struct Chunker {
    include_determiners: bool,
}

impl Chunker {
    pub(crate) fn new(include_determiners: bool) -> Self {
        Chunker {
            include_determiners,
        }
    }

    /// Chunk the tags of one sentence.
    pub(crate) fn chunk(&self, tags: &[String]) -> Vec<ChunkTag> {
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        let mut chunks = vec![ChunkTag::outside(); tags.len()];

        let mut i = 0;
        while i < tags.len() {
            match self.match_at(&tags, i) {
                Some((kind, end)) => {
                    chunks[i] = ChunkTag::begin(kind);
                    for chunk in chunks.iter_mut().take(end).skip(i + 1) {
                        *chunk = ChunkTag::inside(kind);
                    }
                    i = end;
                }
                None => i += 1,
            }
        }

        chunks
    }

    /// Returns the phrase kind and exclusive end of the chunk starting at `start`.
    fn match_at(&self, tags: &[&str], start: usize) -> Option<(&'static str, usize)> {
        self.match_noun_phrase(tags, start)
            .map(|end| ("NP", end))
            .or_else(|| match_verb_phrase(tags, start).map(|end| ("VP", end)))
            .or_else(|| match tags[start] {
                "IN" | "TO" => Some(("PP", start + 1)),
                _ => None,
            })
            .or_else(|| match_run(tags, start, |t| t == "JJ").map(|end| ("ADJP", end)))
            .or_else(|| match_run(tags, start, |t| t == "RB").map(|end| ("ADVP", end)))
    }

    fn match_noun_phrase(&self, tags: &[&str], start: usize) -> Option<usize> {
        if tags[start] == "PRP" {
            return Some(start + 1);
        }

        let mut end = start;
        if matches!(tags[end], "DT" | "PRP$") {
            if !self.include_determiners {
                return None;
            }
            end += 1;
        }
        while end < tags.len() && matches!(tags[end], "JJ" | "CD") {
            end += 1;
        }
        let nouns_start = end;
        while end < tags.len() && is_noun(tags[end]) {
            end += 1;
        }

        if end > nouns_start {
            Some(end)
        } else {
            None
        }
    }
}

fn match_verb_phrase(tags: &[&str], start: usize) -> Option<usize> {
    if tags[start] != "MD" && !is_verb(tags[start]) {
        return None;
    }
    let mut end = start;
    while end < tags.len() {
        let next_is_verb = tags.get(end + 1).map_or(false, |t| is_verb(t));
        let continues = tags[end] == "MD"
            || is_verb(tags[end])
            || (tags[end] == "RB" && next_is_verb)
            || (tags[end] == "TO" && tags.get(end + 1) == Some(&"VB"));
        if !continues {
            break;
        }
        end += 1;
    }
    Some(end)
}

fn match_run(tags: &[&str], start: usize, accept: impl Fn(&str) -> bool) -> Option<usize> {
    let mut end = start;
    while end < tags.len() && accept(tags[end]) {
        end += 1;
    }
    if end > start {
        Some(end)
    } else {
        None
    }
}
