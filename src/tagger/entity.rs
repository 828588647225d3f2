//! Named-entity typing over runs of proper nouns.

use super::NER_OUTSIDE as OUTSIDE;

const ORGANIZATION_SUFFIXES: &[&str] = &[
    "inc", "corp", "ltd", "llc", "gmbh", "ag", "co", "company", "corporation", "foundation",
    "university",
];
const PERSON_TITLES: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "sir"];
const LOCATION_CUES: &[&str] = &["in", "at", "from", "near", "into", "to"];

fn is_proper_noun(tag: &str) -> bool {
    matches!(tag, "NNP" | "NNPS")
}

fn is_in(list: &[&str], text: &str) -> bool {
    let lower = text.to_lowercase();
    list.iter().any(|entry| *entry == lower)
}

/// Entity label for every token of one sentence; "O" outside entities.
///
/// A leading title ("Dr", "Mrs") marks the rest of the run as PERSON and
/// stays outside the entity itself.
pub(crate) fn tag_entities(tokens: &[&str], tags: &[String]) -> Vec<String> {
    let mut labels = vec![OUTSIDE.to_string(); tokens.len()];

    let mut i = 0;
    while i < tokens.len() {
        if !is_proper_noun(&tags[i]) {
            i += 1;
            continue;
        }
        let mut end = i;
        while end < tokens.len() && is_proper_noun(&tags[end]) {
            end += 1;
        }

        let mut start = i;
        let mut label = "MISC";
        if is_in(PERSON_TITLES, tokens[start]) {
            start += 1;
            // skip the abbreviation period in "Dr. Smith"
            if start < end && tokens[start] == "." {
                start += 1;
            }
            label = "PERSON";
        } else if is_in(ORGANIZATION_SUFFIXES, tokens[end - 1]) {
            label = "ORGANIZATION";
        } else if let Some(cue) = previous_word(tokens, i) {
            if is_in(PERSON_TITLES, cue) {
                label = "PERSON";
            } else if is_in(LOCATION_CUES, cue) {
                label = "LOCATION";
            }
        }

        for slot in labels.iter_mut().take(end).skip(start) {
            *slot = label.to_string();
        }
        i = end;
    }

    labels
}

/// The nearest earlier token that is not a lone period.
fn previous_word<'t>(tokens: &[&'t str], idx: usize) -> Option<&'t str> {
    tokens[..idx].iter().rev().find(|t| **t != ".").copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(tokens: &[&str], tags: &[&str]) -> Vec<String> {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        tag_entities(tokens, &tags)
    }

    #[test]
    fn test_organization_suffix() {
        assert_eq!(
            tag(&["Acme", "Corp", "ships"], &["NNP", "NNP", "VBZ"]),
            ["ORGANIZATION", "ORGANIZATION", "O"]
        );
    }

    #[test]
    fn test_person_after_title() {
        assert_eq!(
            tag(&["Dr", ".", "Smith", "arrived"], &["NN", ".", "NNP", "VBD"]),
            ["O", "O", "PERSON", "O"]
        );
        assert_eq!(
            tag(&["Mrs", "Jones", "left"], &["NNP", "NNP", "VBD"]),
            ["O", "PERSON", "O"]
        );
    }

    #[test]
    fn test_location_cue() {
        assert_eq!(
            tag(&["offices", "in", "Berlin"], &["NNS", "IN", "NNP"]),
            ["O", "O", "LOCATION"]
        );
    }

    #[test]
    fn test_misc_default() {
        assert_eq!(
            tag(&["the", "REST", "API"], &["DT", "NNP", "NNP"]),
            ["O", "MISC", "MISC"]
        );
    }
}
