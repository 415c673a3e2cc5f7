// Integration tests for the scan engine

use mulscan::interpreter::{scan, tokenize};
use mulscan::parser::ast::{ScanEventKind, SourceLocation};
use mulscan::parser::lexer::TokenKind;
use mulscan::snapshot::ScanHistory;
use mulscan::{conditional_sum, extract_instructions, unconditional_sum, Instruction, ScanMode};
use std::fs;
use std::path::Path;

const SAMPLE_ONE: &str =
    "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))";
const SAMPLE_TWO: &str =
    "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";

#[test]
fn test_single_instruction_sums() {
    let cases = [
        ("mul(2,4)", 8),
        ("mul(20,4)", 80),
        ("mul(2,40)", 80),
        ("mul(20,40)", 800),
        ("mul(200,40)", 8000),
        ("mul(200,400)", 80000),
    ];

    for (source, expected) in cases {
        assert_eq!(unconditional_sum(source), expected, "source: {}", source);
    }
}

#[test]
fn test_sample_one_unconditional() {
    assert_eq!(unconditional_sum(SAMPLE_ONE), 161);
}

#[test]
fn test_sample_two_conditional() {
    assert_eq!(conditional_sum(SAMPLE_TWO), 48);
}

#[test]
fn test_calls_are_idempotent() {
    for source in [SAMPLE_ONE, SAMPLE_TWO, "", "mul(1,"] {
        assert_eq!(unconditional_sum(source), unconditional_sum(source));
        assert_eq!(conditional_sum(source), conditional_sum(source));
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(unconditional_sum(""), 0);
    assert_eq!(conditional_sum(""), 0);
    assert!(tokenize("").is_empty());
}

#[test]
fn test_truncated_inputs_do_not_panic() {
    for source in ["d", "do", "don", "don'", "m", "mu", "mul", "mul(", "mul(1", "mul(1,", "mul(1,2"] {
        assert_eq!(unconditional_sum(source), 0, "source: {:?}", source);
        assert_eq!(conditional_sum(source), 0, "source: {:?}", source);
    }
}

#[test]
fn test_multibyte_noise() {
    assert_eq!(unconditional_sum("ümul(3,3)→mul(2,2)日本"), 13);
}

#[test]
fn test_one_token_per_character_without_keywords() {
    let source = "x%&[3,7]!@^_+(11,8)?";
    let tokens = tokenize(source);

    assert_eq!(tokens.len(), source.chars().count());
    assert!(tokens.iter().all(|t| !matches!(
        t.kind(),
        TokenKind::Mul | TokenKind::Do | TokenKind::Dont
    )));
}

#[test]
fn test_instructions_in_source_order() {
    let found = extract_instructions(SAMPLE_ONE, ScanMode::Unconditional);
    assert_eq!(
        found,
        vec![
            Instruction::new(2, 4),
            Instruction::new(5, 5),
            Instruction::new(11, 8),
            Instruction::new(8, 5),
        ]
    );
    assert!(found.iter().all(|ins| ins.left <= 999 && ins.right <= 999));
}

#[test]
fn test_corrupted_file() {
    let path = Path::new("tests/data/corrupted.txt");
    let source = fs::read_to_string(path).expect("Failed to read sample file");

    assert_eq!(unconditional_sum(&source), 56430);
    assert_eq!(conditional_sum(&source), 56217);
}

#[test]
fn test_keyword_breaking_a_candidate_is_rescanned() {
    assert_eq!(unconditional_sum("mul(mul(2,3)x"), 6);
    assert_eq!(unconditional_sum("mul(123mul(2,3)x"), 6);
    assert_eq!(unconditional_sum("mul(1234,5)mul(2,2)"), 4);
    assert_eq!(unconditional_sum("mul(123mul(2,2)"), 4);
}

#[test]
fn test_directive_breaking_a_candidate_is_honored() {
    assert_eq!(unconditional_sum("mul(1,2don't()mul(4,4)x"), 16);
    assert_eq!(conditional_sum("mul(1,2don't()mul(4,4)x"), 0);
    assert_eq!(conditional_sum("don't()mul(do()mul(3,3)"), 9);
}

#[test]
fn test_scan_events_carry_locations_across_lines() {
    let report = scan("noise\n  mul(3,4)", ScanMode::Unconditional);

    assert_eq!(report.events.len(), 1);
    let event = report.events[0];
    assert_eq!(event.kind, ScanEventKind::Accepted(Instruction::new(3, 4)));
    assert_eq!(event.start, SourceLocation::new(2, 3));
    assert_eq!(event.end, SourceLocation::new(2, 11));
}

#[test]
fn test_history_replays_conditional_scan() {
    let report = scan(SAMPLE_TWO, ScanMode::Conditional);
    let mut history = ScanHistory::from_report(&report);

    history.jump_to_end();
    let last = history.current().expect("history should not be empty");
    assert_eq!(last.running_total, report.sum());
    assert_eq!(history.len(), report.events.len());
}
