//! Integration tests for the grapheme fallback transcriber.

use phonoscribe::PhonoscribeError;
use phonoscribe::g2p::{GraphemeTranscriber, RuleSet, UnitTable, build_unit_table};
use std::sync::Arc;
use std::thread;

struct TranscriptionCase {
    input: &'static str,
    expected: &'static str,
    description: &'static str,
}

fn transcriber() -> GraphemeTranscriber {
    GraphemeTranscriber::with_defaults().expect("built-in table must be valid")
}

#[test]
fn test_transcription_cases() {
    let cases = vec![
        TranscriptionCase {
            input: "",
            expected: "",
            description: "empty input gives empty output",
        },
        TranscriptionCase {
            input: "tion",
            expected: "ʃən",
            description: "four-letter unit beats t + i + o + n",
        },
        TranscriptionCase {
            input: "ash",
            expected: "ɑʃ",
            description: "greedy scan: 'as' is not a unit, so 'a' then 'sh'",
        },
        TranscriptionCase {
            input: "go!",
            expected: "ɡoʊ!",
            description: "punctuation passes through",
        },
        TranscriptionCase {
            input: "school",
            expected: "ʃuːl",
            description: "three-letter unit followed by a vowel digraph",
        },
        TranscriptionCase {
            input: "hello",
            expected: "hɛlloʊ",
            description: "no doubled-consonant reduction",
        },
        TranscriptionCase {
            input: "Thank you",
            expected: "θɑnk jaʊ",
            description: "uppercase folded, space preserved",
        },
        TranscriptionCase {
            input: "jump",
            expected: "dʒʊmp",
            description: "tie bar folded by normalization",
        },
        TranscriptionCase {
            input: "naïve 42",
            expected: "nɑïvɛ 42",
            description: "accented letter and digits pass through",
        },
    ];

    let transcriber = transcriber();
    for case in cases {
        assert_eq!(
            transcriber.transcribe(case.input),
            case.expected,
            "{}",
            case.description
        );
    }
}

#[test]
fn test_deterministic() {
    let transcriber = transcriber();
    let text = "the phonetic transcription of speech";
    let first = transcriber.transcribe(text);
    for _ in 0..10 {
        assert_eq!(transcriber.transcribe(text), first);
    }
}

#[test]
fn test_case_invariant() {
    let transcriber = transcriber();
    for text in [
        "quick brown fox",
        "Nation",
        "sh!p 7",
        "MiXeD CaSe",
        "Straße",
        "ﬁsh",
        "ǆungla",
        "ΟΔΟΣ οδός",
        "İstanbul ılık",
    ] {
        assert_eq!(
            transcriber.transcribe(text),
            transcriber.transcribe(&text.to_uppercase()),
            "case changed the output for {:?}",
            text
        );
    }
}

#[test]
fn test_total_over_arbitrary_input() {
    let transcriber = transcriber();
    let inputs = ["\u{0}\t\n", "🙂 🙂", "àéîõü", "тест", "a\u{301}", "?!...,;"];
    for input in inputs {
        let output = transcriber.transcribe(input);
        for ch in input.chars().filter(|c| !c.is_ascii_alphabetic()) {
            assert!(
                output.contains(ch),
                "{:?} lost {:?}, got {:?}",
                input,
                ch,
                output
            );
        }
    }

    let long = "x".repeat(1000);
    assert_eq!(transcriber.transcribe(&long), "ks".repeat(1000));
}

#[test]
fn test_duplicate_key_with_different_value_is_rejected() {
    let err = UnitTable::from_entries([("sh", "ʃ"), ("a", "ɑ"), ("sh", "s")]).unwrap_err();
    match err {
        PhonoscribeError::DuplicateUnitKeyConflict {
            unit,
            existing,
            conflicting,
        } => {
            assert_eq!(unit, "sh");
            assert_eq!(existing, "ʃ");
            assert_eq!(conflicting, "s");
        }
        other => panic!("expected DuplicateUnitKeyConflict, got {:?}", other),
    }
}

#[test]
fn test_duplicate_key_with_same_value_is_accepted() {
    let table = UnitTable::from_entries([("sh", "ʃ"), ("sh", "ʃ"), ("a", "ɑ")]).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("sh"), Some("ʃ"));
}

#[test]
fn test_built_in_table_has_no_conflicts() {
    let table = build_unit_table().unwrap();
    assert_eq!(table.lookup("tion"), Some("ʃən"));
    assert_eq!(table.lookup("ch"), Some("tʃ"));
    assert_eq!(table.max_unit_length(), 4);
}

#[test]
fn test_normalization_is_single_pass() {
    let table = UnitTable::from_entries([("a", "x")]).unwrap();
    let rules = RuleSet::from_pairs([("x", "y"), ("y", "z")]).unwrap();
    let transcriber = GraphemeTranscriber::new(table, rules);
    assert_eq!(transcriber.transcribe("aa"), "yy");
}

#[test]
fn test_shared_across_threads() {
    let transcriber = Arc::new(transcriber());
    let expected = transcriber.transcribe("the nation ships fish");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let transcriber = Arc::clone(&transcriber);
            thread::spawn(move || {
                (0..100)
                    .map(|_| transcriber.transcribe("the nation ships fish"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for output in handle.join().unwrap() {
            assert_eq!(output, expected);
        }
    }
}
