use layered_parse::{attr, node_type, AttrValue, Coreference, NodeId, ParseGraph, PhraseMember};

use crate::{Annotation, ParseDocument, TextElement};

fn token(graph: &mut ParseGraph, fields: (&str, usize, &str, &str, &str, usize)) -> NodeId {
    let (text, position, pos, chunk, ner, sentence) = fields;
    graph.add_node_with(
        node_type::TOKEN,
        vec![
            (attr::VALUE, AttrValue::from(text)),
            (attr::POSITION, AttrValue::from(position)),
            (attr::POS, AttrValue::from(pos)),
            (attr::CHUNK_IOB, AttrValue::from(chunk)),
            (attr::NER, AttrValue::from(ner)),
            (attr::SENTENCE, AttrValue::from(sentence)),
        ],
    )
}

fn phrase(graph: &mut ParseGraph, kind: &str, position: usize, member: NodeId) -> NodeId {
    let id = graph.add_node_with(
        node_type::PHRASE,
        vec![
            (attr::KIND, AttrValue::from(kind)),
            (attr::POSITION, AttrValue::from(position)),
        ],
    );
    graph.add_arc(id, member, PhraseMember).unwrap();
    id
}

/// "Alice smiles. She waves" with "She" linked back to "Alice".
fn fixture() -> ParseDocument {
    let mut graph = ParseGraph::new();
    let alice = token(&mut graph, ("Alice", 0, "NNP", "B-NP", "PERSON", 0));
    let smiles = token(&mut graph, ("smiles", 1, "VBZ", "B-VP", "O", 0));
    token(&mut graph, (".", 2, ".", "O", "O", 0));
    let she = token(&mut graph, ("She", 3, "PRP", "B-NP", "O", 1));
    let waves = token(&mut graph, ("waves", 4, "VBZ", "B-VP", "O", 1));

    let alice_np = phrase(&mut graph, "NP", 0, alice);
    phrase(&mut graph, "VP", 1, smiles);
    phrase(&mut graph, "NP", 2, she);
    phrase(&mut graph, "VP", 3, waves);
    graph.add_arc(she, alice_np, Coreference).unwrap();

    ParseDocument::new(graph, "fixture")
}

#[test]
fn test_debug_summary() {
    let doc = fixture();
    insta::assert_snapshot!(doc.debug_summary(), @r###"
    Document "fixture"
      words: 5
      named-entity words: 1
      sentences: 2
      phrases: 4 (2 noun phrases)
      coreference chains: 1
      annotations: 0
    "###);
}

#[test]
fn test_extensive_debug_summary() {
    let mut doc = fixture();
    let alice = doc.words()[0].clone();
    alice
        .annotate(&mut doc, Annotation::with_value("role", "actor"))
        .unwrap();

    insta::assert_snapshot!(doc.extensive_debug_summary(), @r###"
    Document "fixture"
      words: 5
      named-entity words: 1
      sentences: 2
      phrases: 4 (2 noun phrases)
      coreference chains: 1
      annotations: 1

    Sentence 0
    Alice  smiles  .
    ╰───╯NNP
           ╰────╯VBZ
                   ╰.
    ╰───╯B-NP
           ╰────╯B-VP
                   ╰O
    ╰───╯PERSON
           ╰────╯O
                   ╰O
    ╰───╯NP
           ╰────╯VP

    Sentence 1
    She  waves
    ╰─╯PRP
         ╰───╯VBZ
    ╰─╯B-NP
         ╰───╯B-VP
    ╰─╯O
         ╰───╯O
    ╰─╯NP
         ╰───╯VP

    Coreferences
      0: Alice -> She

    Annotations
      Word[Alice]: role=actor
    "###);
}

#[test]
fn test_summaries_are_deterministic() {
    assert_eq!(fixture().extensive_debug_summary(), fixture().extensive_debug_summary());
}

#[test]
fn test_summary_display() {
    let doc = fixture();
    assert_eq!(format!("{}", doc.summary()), doc.debug_summary());
    assert_eq!(
        format!("{}", doc.extensive_summary()),
        doc.extensive_debug_summary()
    );
    assert!(doc
        .extensive_debug_summary()
        .starts_with(&doc.debug_summary()));
}
