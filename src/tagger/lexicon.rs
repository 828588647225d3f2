//! Part-of-speech tagging from a closed-class lexicon, suffix rules and a
//! little left context. Tags follow the Penn Treebank set.

use std::collections::HashMap;

use regex::Regex;

const NUMBER_PATTERN: &str = r"^[+-]?\d+(?:[.,]\d+)*(?:st|nd|rd|th|%)?$";

const CLOSED_CLASS: &[(&str, &[&str])] = &[
    (
        "DT",
        &[
            "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any",
            "no", "all", "both", "either", "neither", "another",
        ],
    ),
    (
        "PRP",
        &[
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "itself",
            "himself", "herself", "themselves", "myself", "ourselves",
        ],
    ),
    ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
    (
        "IN",
        &[
            "in", "on", "at", "of", "for", "with", "from", "by", "about", "into", "over",
            "under", "between", "through", "after", "before", "during", "without", "within",
            "via", "against", "among", "upon", "across", "behind", "since", "until", "if",
            "because", "while", "although", "as", "than",
        ],
    ),
    ("TO", &["to"]),
    ("CC", &["and", "or", "but", "nor", "&"]),
    (
        "MD",
        &["can", "could", "will", "would", "shall", "should", "may", "might", "must", "cannot"],
    ),
    ("WDT", &["which", "whichever"]),
    ("WP", &["who", "whom", "what"]),
    ("WP$", &["whose"]),
    ("EX", &["there"]),
    (
        "RB",
        &[
            "not", "n't", "very", "also", "too", "then", "now", "here", "only", "just", "never",
            "always", "often", "still", "already", "even", "again", "however",
        ],
    ),
    ("VB", &["be", "have", "do", "get", "make", "go", "see", "know", "take", "give", "use"]),
    (
        "VBZ",
        &["is", "has", "does", "gets", "makes", "goes", "sees", "knows", "takes", "gives", "uses"],
    ),
    ("VBP", &["are", "am"]),
    (
        "VBD",
        &["was", "were", "had", "did", "got", "made", "went", "saw", "knew", "took", "gave", "said"],
    ),
    ("VBN", &["been", "done", "gone", "seen", "known", "taken", "given"]),
    ("VBG", &["being", "having", "doing"]),
    (
        "JJ",
        &[
            "new", "old", "good", "bad", "other", "same", "different", "large", "small", "many",
            "few", "several", "main", "high", "low", "own",
        ],
    ),
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "ive", "less", "ical"];

/// Closed-class lexicon plus compiled patterns.
#[derive(Debug)]
pub(crate) struct PosLexicon {
    closed_class: HashMap<&'static str, &'static str>,
    number: Regex,
}

impl PosLexicon {
    pub(crate) fn load() -> Result<Self, regex::Error> {
        let mut closed_class = HashMap::new();
        for (tag, words) in CLOSED_CLASS {
            for word in words.iter() {
                closed_class.insert(*word, *tag);
            }
        }
        Ok(PosLexicon {
            closed_class,
            number: Regex::new(NUMBER_PATTERN)?,
        })
    }

    pub(crate) fn lookup(&self, lowercase: &str) -> Option<&'static str> {
        self.closed_class.get(lowercase).copied()
    }

    /// Tag the tokens of one sentence.
    pub(crate) fn tag_sentence(&self, tokens: &[&str]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());
        for (idx, text) in tokens.iter().enumerate() {
            let prev = idx.checked_sub(1).map(|p| tags[p].as_str());
            let next = tokens.get(idx + 1).copied();
            let tag = self.tag_token(text, idx == 0, prev, next);
            tags.push(tag.to_string());
        }
        tags
    }

    fn tag_token(
        &self,
        text: &str,
        sentence_initial: bool,
        prev: Option<&str>,
        next: Option<&str>,
    ) -> &'static str {
        if is_punctuation(text) {
            return punctuation_tag(text);
        }
        if self.number.is_match(text) {
            return "CD";
        }

        let lower = text.to_lowercase();
        if let Some(tag) = self.lookup(&lower) {
            return tag;
        }

        if text.chars().count() > 1 && text.chars().all(|c| c.is_uppercase()) {
            return "NNP";
        }
        if starts_with_uppercase(text) {
            if !sentence_initial {
                return "NNP";
            }
            if next.map_or(false, starts_with_uppercase) {
                return "NNP";
            }
        }

        if matches!(prev, Some("MD") | Some("TO")) {
            return "VB";
        }

        suffix_tag(&lower, prev, next)
    }
}

fn suffix_tag(lower: &str, prev: Option<&str>, next: Option<&str>) -> &'static str {
    let len = lower.chars().count();
    if len > 3 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && lower.ends_with("ed") {
        return "VBD";
    }
    if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return "JJ";
    }
    let plural_form = len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is");
    if plural_form {
        // "it stores", "the server stores data"
        let verb_context = match prev {
            Some("PRP") => true,
            Some("NN") | Some("NNP") => next.map_or(false, |n| !is_punctuation(n)),
            _ => false,
        };
        return if verb_context { "VBZ" } else { "NNS" };
    }
    "NN"
}

pub(crate) fn is_punctuation(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !c.is_alphanumeric())
}

fn punctuation_tag(text: &str) -> &'static str {
    match text {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "—" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "'" | "“" | "”" | "‘" | "’" | "`" => "''",
        "&" => "CC",
        _ => "SYM",
    }
}

pub(crate) fn starts_with_uppercase(text: &str) -> bool {
    text.chars().next().map_or(false, |c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(sentence: &[&str]) -> Vec<String> {
        PosLexicon::load().unwrap().tag_sentence(sentence)
    }

    #[test]
    fn test_closed_class_and_suffixes() {
        assert_eq!(
            tag(&["The", "server", "stores", "data", "."]),
            ["DT", "NN", "VBZ", "NN", "."]
        );
    }

    #[test]
    fn test_plural_before_punctuation() {
        assert_eq!(tag(&["The", "user", "requirements", "."]), ["DT", "NN", "NNS", "."]);
    }

    #[test]
    fn test_proper_nouns() {
        assert_eq!(
            tag(&["Alice", "Smith", "visited", "Berlin", "."]),
            ["NNP", "NNP", "VBD", "NNP", "."]
        );
        assert_eq!(tag(&["the", "REST", "API"]), ["DT", "NNP", "NNP"]);
    }

    #[test]
    fn test_modal_context() {
        assert_eq!(
            tag(&["It", "must", "validate", "requests"]),
            ["PRP", "MD", "VB", "NNS"]
        );
    }

    #[test]
    fn test_numbers_and_adjectives() {
        assert_eq!(
            tag(&["3", "reliable", "quickly", "running", "1,000.50"]),
            ["CD", "JJ", "RB", "VBG", "CD"]
        );
    }

    #[test]
    fn test_punctuation_tags() {
        assert_eq!(tag(&[",", ";", "(", "\"", "#"]), [",", ":", "(", "''", "SYM"]);
    }
}
