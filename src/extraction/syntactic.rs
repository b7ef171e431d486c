//! Dependency-parse extraction.
//!
//! Every root verb becomes a predicate; its subject and object children,
//! expanded with their modifiers, are paired into triples.

use super::Triple;
use crate::parser::{DepLabel, ParsedDocument, Sentence};

/// Confidence attached to every triple read off a parse tree.
pub const SYNTACTIC_CONFIDENCE: f32 = 0.85;

/// Walk every sentence of `doc` and collect subject-verb-object triples in
/// discovery order.
pub fn extract(doc: &ParsedDocument) -> Vec<Triple> {
    let mut triples = Vec::new();

    for sentence in &doc.sentences {
        for (idx, token) in sentence.tokens.iter().enumerate() {
            if !(token.dep == DepLabel::Root && token.is_verb()) {
                continue;
            }

            let mut subjects = Vec::new();
            let mut objects = Vec::new();
            for (child_idx, child) in sentence.tokens.iter().enumerate() {
                if child.head != Some(idx) {
                    continue;
                }
                if child.dep.is_subject() {
                    subjects.push(expand_phrase(sentence, child_idx));
                } else if child.dep.is_object() {
                    objects.push(expand_phrase(sentence, child_idx));
                }
            }

            for subject in &subjects {
                for object in &objects {
                    if subject.is_empty() || object.is_empty() {
                        continue;
                    }
                    triples.push(Triple::new(
                        subject.clone(),
                        token.text.clone(),
                        object.clone(),
                        SYNTACTIC_CONFIDENCE,
                    ));
                }
            }
        }
    }

    triples
}

/// Fold compound, adjectival, numeric and unspecified modifiers into the
/// head word.
///
/// Each qualifying child is *prepended* in linear order with no separator,
/// so `[annual, 2024] plan` reads `2024annualplan`.
pub fn expand_phrase(sentence: &Sentence, head: usize) -> String {
    let mut phrase = sentence.tokens[head].text.clone();
    for child in sentence.children(head) {
        if child.dep.is_phrase_modifier() {
            phrase.insert_str(0, &child.text);
        }
    }
    phrase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Token, conllu};

    fn doc(conllu: &str) -> ParsedDocument {
        conllu::parse(conllu).unwrap()
    }

    #[test]
    fn test_subject_verb_object_with_compounds() {
        let doc = doc("\
1\tThe\tthe\tDET\tDT\t_\t3\tdet\t_\t_
2\tquality\tquality\tNOUN\tNN\t_\t3\tcompound\t_\t_
3\tdepartment\tdepartment\tNOUN\tNN\t_\t4\tnsubj\t_\t_
4\tmanages\tmanage\tVERB\tVBZ\t_\t0\troot\t_\t_
5\tthe\tthe\tDET\tDT\t_\t7\tdet\t_\t_
6\taudit\taudit\tNOUN\tNN\t_\t7\tcompound\t_\t_
7\tprocess\tprocess\tNOUN\tNN\t_\t4\tobj\t_\t_
");
        let triples = extract(&doc);
        assert_eq!(
            triples,
            vec![Triple::new(
                "qualitydepartment",
                "manages",
                "auditprocess",
                SYNTACTIC_CONFIDENCE
            )]
        );
    }

    #[test]
    fn test_modifiers_prepend_in_encounter_order() {
        let sentence = Sentence::new(vec![
            Token::new("annual", "amod", "ADJ", Some(2)),
            Token::new("2024", "nummod", "NUM", Some(2)),
            Token::new("plan", "obj", "NOUN", None),
            Token::new("draft", "dep", "NOUN", Some(2)),
            Token::new("the", "det", "DET", Some(2)),
        ]);
        assert_eq!(expand_phrase(&sentence, 2), "draft2024annualplan");
    }

    #[test]
    fn test_cross_product_subject_major() {
        let doc = doc("\
1\tA\tA\tPROPN\t_\t_\t3\tnsubj\t_\t_
2\tB\tB\tPROPN\t_\t_\t3\tnsubj:pass\t_\t_
3\tuses\tuse\tVERB\t_\t_\t0\troot\t_\t_
4\tC\tC\tPROPN\t_\t_\t3\tobj\t_\t_
5\tD\tD\tPROPN\t_\t_\t3\tpobj\t_\t_
");
        let pairs: Vec<(String, String)> = extract(&doc)
            .into_iter()
            .map(|t| (t.subject, t.object))
            .collect();
        let expected: Vec<(String, String)> = [("A", "C"), ("A", "D"), ("B", "C"), ("B", "D")]
            .into_iter()
            .map(|(s, o)| (s.to_string(), o.to_string()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_non_verb_root_contributes_nothing() {
        let doc = doc("\
1\tReports\treport\tNOUN\t_\t_\t0\troot\t_\t_
2\tquarterly\tquarterly\tADV\t_\t_\t1\tadvmod\t_\t_
");
        assert!(extract(&doc).is_empty());
    }

    #[test]
    fn test_verb_without_object_contributes_nothing() {
        let doc = doc("\
1\tIt\tit\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tworks\twork\tVERB\t_\t_\t0\troot\t_\t_
");
        assert!(extract(&doc).is_empty());
    }

    #[test]
    fn test_empty_phrase_is_skipped() {
        let doc = ParsedDocument::new(vec![Sentence::new(vec![
            Token::new("", "nsubj", "PRON", Some(1)),
            Token::new("signs", "ROOT", "VERB", None),
            Token::new("contract", "dobj", "NOUN", Some(1)),
        ])]);
        assert!(extract(&doc).is_empty());
    }

    #[test]
    fn test_triples_collected_across_sentences() {
        let doc = doc("\
1\tWe\twe\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tship\tship\tVERB\t_\t_\t0\troot\t_\t_
3\tparts\tpart\tNOUN\t_\t_\t2\tobj\t_\t_

1\tThey\tthey\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tcheck\tcheck\tVERB\t_\t_\t0\troot\t_\t_
3\tinvoices\tinvoice\tNOUN\t_\t_\t2\tobj\t_\t_
");
        let predicates: Vec<String> = extract(&doc).into_iter().map(|t| t.predicate).collect();
        assert_eq!(predicates, vec!["ship", "check"]);
    }
}
