//! Third pipeline stage: tagged hypothesis to [`ParseGraph`].

use crate::error::{PipelineError, Stage};
use crate::graph::{attr, node_type, AttrValue, Next, NodeId, ParseGraph, PhraseMember, Relation};
use crate::hypothesis::HypothesisToken;
use crate::pre_pipeline::PrePipelineData;
use crate::tagger::Iob;

/// A heavyweight engine that turns the tagged main hypothesis into the
/// intermediate graph.
pub trait GraphBuilder {
    fn name(&self) -> &'static str;

    fn init(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }

    fn exec(&self, data: &mut PrePipelineData) -> Result<(), PipelineError>;
}

/// Builds one token node per hypothesis token, chained by [`Next`] arcs, and
/// one phrase node per chunk, linked to its tokens by [`PhraseMember`] arcs.
///
/// Token node attributes: `value`, `position`, `start`, `end`, `pos`,
/// `chunkIOB`, `chunkName` (inside chunks only), `ner`, `sentence`.
/// Phrase node attributes: `kind`, `position` (phrase index).
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGraphBuilder;

struct OpenPhrase {
    kind: String,
    members: Vec<NodeId>,
}

impl GraphBuilder for TokenGraphBuilder {
    fn name(&self) -> &'static str {
        "token-graph-builder"
    }

    fn exec(&self, data: &mut PrePipelineData) -> Result<(), PipelineError> {
        let hypothesis = data.main_hypothesis(Stage::GraphBuilding)?;
        if hypothesis.is_empty() {
            return Err(PipelineError::missing(Stage::GraphBuilding, "hypothesis tokens"));
        }

        let mut graph = ParseGraph::new();
        let mut token_ids = Vec::with_capacity(hypothesis.len());
        let mut phrases: Vec<OpenPhrase> = Vec::new();
        let mut open: Option<OpenPhrase> = None;

        for token in hypothesis.tokens() {
            let id = graph.add_node_with(node_type::TOKEN, token_attributes(token)?);
            token_ids.push(id);

            let chunk = token
                .chunk
                .as_ref()
                .ok_or(PipelineError::missing(Stage::GraphBuilding, "chunk tags"))?;
            match (chunk.iob, chunk.name.as_deref()) {
                (Iob::Inside, Some(kind)) if open.as_ref().map_or(false, |p| p.kind == kind) => {
                    if let Some(phrase) = open.as_mut() {
                        phrase.members.push(id);
                    }
                }
                (Iob::Begin, Some(kind)) | (Iob::Inside, Some(kind)) => {
                    phrases.extend(open.take());
                    open = Some(OpenPhrase {
                        kind: kind.to_string(),
                        members: vec![id],
                    });
                }
                _ => phrases.extend(open.take()),
            }
        }
        phrases.extend(open.take());

        for pair in token_ids.windows(2) {
            link(&mut graph, pair[0], pair[1], Next)?;
        }

        for (index, phrase) in phrases.iter().enumerate() {
            let phrase_id = graph.add_node_with(
                node_type::PHRASE,
                vec![
                    (attr::KIND, AttrValue::from(phrase.kind.as_str())),
                    (attr::POSITION, AttrValue::from(index)),
                ],
            );
            for member in &phrase.members {
                link(&mut graph, phrase_id, *member, PhraseMember)?;
            }
        }

        log::debug!(
            "{} built {} token nodes and {} phrase nodes",
            self.name(),
            token_ids.len(),
            phrases.len()
        );
        data.set_graph(graph);
        Ok(())
    }
}

fn token_attributes(
    token: &HypothesisToken,
) -> Result<Vec<(&'static str, AttrValue)>, PipelineError> {
    let missing = |what| PipelineError::missing(Stage::GraphBuilding, what);

    let pos = token.pos.as_deref().ok_or_else(|| missing("part-of-speech tags"))?;
    let chunk = token.chunk.as_ref().ok_or_else(|| missing("chunk tags"))?;
    let ner = token.ner.as_deref().ok_or_else(|| missing("named-entity tags"))?;
    let sentence = token.sentence.ok_or_else(|| missing("sentence indices"))?;

    let mut attributes = vec![
        (attr::VALUE, AttrValue::from(token.text.as_str())),
        (attr::POSITION, AttrValue::from(token.position)),
        (attr::START, AttrValue::from(token.start)),
        (attr::END, AttrValue::from(token.end)),
        (attr::POS, AttrValue::from(pos)),
        (attr::CHUNK_IOB, AttrValue::from(chunk.to_string())),
        (attr::NER, AttrValue::from(ner)),
        (attr::SENTENCE, AttrValue::from(sentence)),
    ];
    if let Some(name) = &chunk.name {
        attributes.push((attr::CHUNK_NAME, AttrValue::from(name.as_str())));
    }
    Ok(attributes)
}

fn link<R: Relation>(
    graph: &mut ParseGraph,
    source: NodeId,
    target: NodeId,
    relation: R,
) -> Result<(), PipelineError> {
    graph
        .add_arc(source, target, relation)
        .map(|_| ())
        .ok_or_else(|| PipelineError::stage(Stage::GraphBuilding, "arc endpoint is not in the graph"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothesis::{string_to_main_hypothesis, Hypothesis};
    use crate::tagger::{ChunkTag, RuleTagger, Tagger};

    fn built(text: &str) -> ParseGraph {
        let mut tagger = RuleTagger::default();
        tagger.init().unwrap();
        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(string_to_main_hypothesis(text, true).unwrap());
        tagger.exec(&mut data).unwrap();
        TokenGraphBuilder.exec(&mut data).unwrap();
        data.into_graph().unwrap()
    }

    fn phrase_texts(graph: &ParseGraph) -> Vec<(String, String)> {
        graph
            .nodes_of_type(node_type::PHRASE)
            .map(|phrase| {
                let words: Vec<&str> = graph
                    .targets_of::<PhraseMember>(phrase.id())
                    .into_iter()
                    .filter_map(|id| graph.node(id).and_then(|n| n.text(attr::VALUE)))
                    .collect();
                (phrase.text(attr::KIND).unwrap().to_string(), words.join(" "))
            })
            .collect()
    }

    #[test]
    fn test_token_nodes_and_next_arcs() {
        let graph = built("The server stores data.");
        let tokens = graph.token_nodes();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].text(attr::VALUE), Some("server"));
        assert_eq!(tokens[1].text(attr::POS), Some("NN"));
        assert_eq!(tokens[1].text(attr::CHUNK_IOB), Some("I-NP"));
        assert_eq!(tokens[1].text(attr::CHUNK_NAME), Some("NP"));
        assert_eq!(tokens[4].text(attr::CHUNK_NAME), None);
        assert_eq!(tokens[1].int(attr::START), Some(4));
        assert_eq!(graph.arcs_of::<Next>().count(), 4);
    }

    #[test]
    fn test_phrase_nodes() {
        let graph = built("The server stores data.");
        assert_eq!(
            phrase_texts(&graph),
            vec![
                ("NP".to_string(), "The server".to_string()),
                ("VP".to_string(), "stores".to_string()),
                ("NP".to_string(), "data".to_string()),
            ]
        );
    }

    #[test]
    fn test_untagged_hypothesis_is_missing_data() {
        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(string_to_main_hypothesis("hello world", true).unwrap());
        let err = TokenGraphBuilder.exec(&mut data).unwrap_err();
        assert_eq!(
            err,
            PipelineError::missing(Stage::GraphBuilding, "part-of-speech tags")
        );
        assert!(data.graph(Stage::GraphBuilding).is_err());
    }

    #[test]
    fn test_stray_inside_tag_opens_phrase() {
        let mut hypothesis = string_to_main_hypothesis("big red dog", true).unwrap();
        let chunks = [ChunkTag::inside("ADJP"), ChunkTag::inside("ADJP"), ChunkTag::begin("NP")];
        for (token, chunk) in hypothesis.tokens_mut().iter_mut().zip(chunks.iter()) {
            token.pos = Some("JJ".to_string());
            token.chunk = Some(chunk.clone());
            token.ner = Some("O".to_string());
            token.sentence = Some(0);
        }

        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(hypothesis);
        TokenGraphBuilder.exec(&mut data).unwrap();
        let graph = data.into_graph().unwrap();

        assert_eq!(
            phrase_texts(&graph),
            vec![
                ("ADJP".to_string(), "big red".to_string()),
                ("NP".to_string(), "dog".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_hypothesis_is_missing_data() {
        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(Hypothesis::default());
        assert!(TokenGraphBuilder.exec(&mut data).unwrap_err().is_missing_data());
    }
}
