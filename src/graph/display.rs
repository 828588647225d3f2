use super::{attr, node_type, NodeId, ParseGraph, PhraseMember, Relation};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Token index range within the displayed tokens, both ends inclusive.
type DRange = (usize, usize);

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ..., AZ, BA, ...
/// Similar to Excel column naming.
fn index_to_base26_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

struct DisplayArc {
    label: &'static str,
    glyph: Option<&'static str>,
    target: DRange,
}

/// Internal representation of an included attribute for display.
struct IncludedAttr {
    range: DRange,
    debug_value: String,
    arcs: Vec<DisplayArc>,
    show_arcs: bool,
}

/// Renders the token nodes of a [`ParseGraph`] on one line with selected
/// attributes, phrases and relations drawn underneath.
///
/// ```text
/// The  system  stores  data  .
/// ╰─╯DT
///      ╰────╯NN
/// ╰─────────╯NP
/// ```
pub struct ParseGraphDisplay<'a> {
    graph: &'a ParseGraph,
    tokens: Vec<&'a super::Node>,
    display_index: HashMap<NodeId, usize>,
    include_attrs: Vec<IncludedAttr>,
}

impl<'a> std::fmt::Display for ParseGraphDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();

        let mut opening_line = String::new();
        {
            // for skipping padding at beginning
            let mut is_first = true;
            for token in self.tokens.iter() {
                if is_first {
                    is_first = false;
                } else {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }

                token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                match token.text(attr::VALUE) {
                    Some(text) => opening_line.push_str(text),
                    None => opening_line.push_str("<>"),
                }
                token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
        }

        f.write_str(&opening_line)?;

        let span_labels = self.build_span_labels();

        for attr in self.include_attrs.iter() {
            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[attr.range.0];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[attr.range.1];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            if let Some(label) = span_labels.get(&attr.range) {
                write!(f, "{} ", label)?;
            }

            f.write_str(&attr.debug_value)?;

            if attr.show_arcs {
                for arc in &attr.arcs {
                    f.write_char('\n')?;

                    let arrow_indent = start_char_idx + 2;
                    for _ in 0..arrow_indent {
                        f.write_char(' ')?;
                    }

                    let target_str = match span_labels.get(&arc.target) {
                        Some(target_label) => target_label.clone(),
                        None => format!("[{}..{}]", arc.target.0, arc.target.1),
                    };

                    write!(
                        f,
                        "└─{}{}─>{}",
                        arc.glyph.unwrap_or(""),
                        arc.label,
                        target_str
                    )?;
                }
            }
        }

        Ok(())
    }
}

impl<'a> ParseGraphDisplay<'a> {
    /// Display every token of the graph.
    pub fn new(graph: &'a ParseGraph) -> Self {
        Self::from_tokens(graph, graph.token_nodes())
    }

    /// Display only tokens whose position lies in `first..=last`.
    pub fn for_positions(graph: &'a ParseGraph, first: usize, last: usize) -> Self {
        let tokens = graph
            .token_nodes()
            .into_iter()
            .filter(|node| {
                node.position()
                    .map_or(false, |position| position >= first && position <= last)
            })
            .collect();
        Self::from_tokens(graph, tokens)
    }

    fn from_tokens(graph: &'a ParseGraph, tokens: Vec<&'a super::Node>) -> Self {
        let display_index = tokens
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id(), idx))
            .collect();
        ParseGraphDisplay {
            graph,
            tokens,
            display_index,
            include_attrs: Vec::new(),
        }
    }

    /// Display range covered by a node: the token itself, or the span of a
    /// phrase's displayed members.
    fn node_range(&self, id: NodeId) -> Option<DRange> {
        if let Some(&idx) = self.display_index.get(&id) {
            return Some((idx, idx));
        }
        let node = self.graph.node(id)?;
        if !node.is_type(node_type::PHRASE) {
            return None;
        }
        let members: Vec<usize> = self
            .graph
            .targets_of::<PhraseMember>(id)
            .into_iter()
            .filter_map(|member| self.display_index.get(&member).copied())
            .collect();
        Some((*members.iter().min()?, *members.iter().max()?))
    }

    /// Build a map from included ranges to labels like "[A]", "[B]", etc.
    /// Only ranges that are targets of displayed arcs get labels.
    fn build_span_labels(&self) -> HashMap<DRange, String> {
        let mut target_ranges: Vec<DRange> = self
            .include_attrs
            .iter()
            .filter(|attr| attr.show_arcs)
            .flat_map(|attr| &attr.arcs)
            .map(|arc| arc.target)
            .collect();

        let included_ranges: HashSet<DRange> =
            self.include_attrs.iter().map(|attr| attr.range).collect();
        target_ranges.retain(|range| included_ranges.contains(range));

        target_ranges.sort();
        target_ranges.dedup();

        target_ranges
            .into_iter()
            .enumerate()
            .map(|(i, range)| (range, format!("[{}]", index_to_base26_label(i))))
            .collect()
    }

    /// Include one attribute of every displayed token that carries it.
    pub fn include_attr(&mut self, key: &str) {
        for (idx, token) in self.tokens.iter().enumerate() {
            if let Some(value) = token.attr(key) {
                self.include_attrs.push(IncludedAttr {
                    range: (idx, idx),
                    debug_value: value.to_string(),
                    arcs: Vec::new(),
                    show_arcs: false,
                });
            }
        }
    }

    /// Include every phrase node with at least one displayed member,
    /// labelled with its kind.
    pub fn include_phrases(&mut self) {
        for phrase in self.graph.nodes_of_type(node_type::PHRASE) {
            if let Some(range) = self.node_range(phrase.id()) {
                self.include_attrs.push(IncludedAttr {
                    range,
                    debug_value: phrase.text(attr::KIND).unwrap_or("phrase").to_string(),
                    arcs: Vec::new(),
                    show_arcs: false,
                });
            }
        }
    }

    /// Include every `R` arc whose source is displayed, rendering an arrow
    /// to its target.
    pub fn include_relation<R: Relation>(&mut self) {
        let mut by_source: Vec<(DRange, Vec<DisplayArc>)> = Vec::new();
        for arc in self.graph.arcs_of::<R>() {
            let (source, target) = match (self.node_range(arc.source), self.node_range(arc.target)) {
                (Some(source), Some(target)) => (source, target),
                _ => continue,
            };
            let display_arc = DisplayArc {
                label: arc.label(),
                glyph: arc.glyph(),
                target,
            };
            match by_source.iter_mut().find(|(range, _)| *range == source) {
                Some((_, arcs)) => arcs.push(display_arc),
                None => by_source.push((source, vec![display_arc])),
            }
        }

        for (range, arcs) in by_source {
            let debug_value = arcs[0].label.to_string();
            self.include_attrs.push(IncludedAttr {
                range,
                debug_value,
                arcs,
                show_arcs: true,
            });
        }
    }

    /// Takes self
    pub fn with_attr(mut self, key: &str) -> Self {
        self.include_attr(key);
        self
    }

    /// Takes self
    pub fn with_phrases(mut self) -> Self {
        self.include_phrases();
        self
    }

    /// Takes self, renders arcs
    pub fn with_relation<R: Relation>(mut self) -> Self {
        self.include_relation::<R>();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AttrValue, Coreference};

    fn sample_graph() -> ParseGraph {
        let mut graph = ParseGraph::new();
        for (position, (text, pos)) in [("Alice", "NNP"), ("owns", "VBZ"), ("it", "PRP")]
            .iter()
            .enumerate()
        {
            graph.add_node_with(
                node_type::TOKEN,
                vec![
                    (attr::VALUE, AttrValue::from(*text)),
                    (attr::POSITION, AttrValue::from(position)),
                    (attr::POS, AttrValue::from(*pos)),
                ],
            );
        }
        graph
    }

    #[test]
    fn test_index_to_base26_label() {
        assert_eq!(index_to_base26_label(0), "A");
        assert_eq!(index_to_base26_label(25), "Z");
        assert_eq!(index_to_base26_label(26), "AA");
        assert_eq!(index_to_base26_label(51), "AZ");
        assert_eq!(index_to_base26_label(52), "BA");
        assert_eq!(index_to_base26_label(701), "ZZ");
        assert_eq!(index_to_base26_label(702), "AAA");
    }

    #[test]
    fn test_attr_display() {
        let graph = sample_graph();
        let display = ParseGraphDisplay::new(&graph).with_attr(attr::POS);

        insta::assert_snapshot!(display, @r###"
        Alice  owns  it
        ╰───╯NNP
               ╰──╯VBZ
                     ╰╯PRP
        "###);
    }

    #[test]
    fn test_relation_display() {
        let mut graph = sample_graph();
        graph.add_arc(NodeId(2), NodeId(0), Coreference).unwrap();

        let display = ParseGraphDisplay::new(&graph)
            .with_attr(attr::POS)
            .with_relation::<Coreference>();

        insta::assert_snapshot!(display, @r###"
        Alice  owns  it
        ╰───╯[A] NNP
               ╰──╯VBZ
                     ╰╯PRP
                     ╰╯coref
                       └─@coref─>[A]
        "###);
    }

    #[test]
    fn test_phrase_display() {
        let mut graph = sample_graph();
        let phrase = graph.add_node_with(node_type::PHRASE, vec![(attr::KIND, AttrValue::from("VP"))]);
        graph.add_arc(phrase, NodeId(1), PhraseMember).unwrap();
        graph.add_arc(phrase, NodeId(2), PhraseMember).unwrap();

        let display = ParseGraphDisplay::new(&graph).with_phrases();

        insta::assert_snapshot!(display, @r###"
        Alice  owns  it
               ╰──────╯VP
        "###);
    }

    #[test]
    fn test_for_positions_limits_tokens() {
        let graph = sample_graph();
        let display = ParseGraphDisplay::for_positions(&graph, 1, 2).with_attr(attr::POS);

        insta::assert_snapshot!(display, @r###"
        owns  it
        ╰──╯VBZ
              ╰╯PRP
        "###);
    }
}
