use super::*;

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut
labore et dolore magna aliqua. Id porta nibh venenatis cras sed felis eget velit. Viverra tellus
in hac habitasse. Sed risus pretium quam vulputate dignissim suspendisse in est. In eu mi
bibendum neque egestas congue quisque egestas. Mi proin sed libero enim sed faucibus turpis in.
Aliquam vestibulum morbi blandit cursus. Tellus in hac habitasse platea dictumst vestibulum.
Massa ultricies mi quis hendrerit. Molestie a iaculis at erat pellentesque adipiscing commodo.
Vulputate eu scelerisque felis imperdiet proin fermentum. Vitae congue eu consequat ac felis. Nec
ultrices dui sapien eget mi proin sed. Nunc mattis enim ut tellus elementum sagittis vitae et.
Mauris ultrices eros in cursus turpis massa tincidunt dui ut. Nisi porta lorem mollis aliquam ut
porttitor leo a diam. Diam phasellus vestibulum lorem sed risus ultricies. Arcu vitae elementum
curabitur vitae nunc sed velit dignissim. Ut eu sem integer vitae justo eget magna fermentum
iaculis.In eu mi bibendum neque.";

fn regex(source: &str) -> Regex {
    match Regex::new(source) {
        Ok(regex) => regex,
        Err(e) => panic!("{source:?} failed to compile: {e}"),
    }
}

#[track_caller]
fn assert_match(source: &str, input: &str) {
    let regex = regex(source);
    // The export must cope with every graph the compiler produces.
    let _ = regex.to_dot("test");
    assert!(
        regex.is_match(input),
        "{source:?} did not match {input:?}"
    );
}

#[track_caller]
fn assert_match_len(source: &str, input: &str, len: usize) {
    assert_eq!(
        regex(source).match_len(input),
        Some(len),
        "{source:?} against {input:?}"
    );
}

#[track_caller]
fn assert_no_match(source: &str, input: &str) {
    let found = regex(source).match_len(input);
    assert_eq!(found, None, "{source:?} matched {input:?}");
}

#[track_caller]
fn assert_error(source: &str) {
    assert!(
        Regex::new(source).is_err(),
        "{source:?} compiled but should not"
    );
}

#[test]
fn unknown_bytes_are_rejected() {
    assert_error("N");
    assert_error(")");
    assert_error("\"");
}

#[test]
fn text() {
    assert_match_len("'abc'", "abc", 3);
    assert_match_len("'abc'", "abcccccccccc", 3);
    assert_match_len("'hello' ' ' 'world'", "hello world", 11);
    assert_match("'hello\nworld'", "hello\nworld");
    assert_match_len(&format!("'{LOREM_IPSUM}'"), LOREM_IPSUM, LOREM_IPSUM.len());

    assert_match_len("`abc`", "abc", 3);
    assert_match_len("`abc`", "abcccccccccc", 3);
    assert_match("`hello` ` ` `world`", "hello world");
    assert_match("`hello\nworld`", "hello\nworld");
    assert_match_len(r"`tab\tstop`", "tab\tstop", 8);

    assert_error("`hello'");
    assert_error("'hello`");
    assert_error("'hello");
    assert_error("hello'");
    assert_error("hello`");
    assert_error("`hello");
    assert_error("hello");

    assert_no_match("'cba'", "abc");
    assert_no_match("'cbaa'", "abcc");
    assert_no_match(&format!("`{LOREM_IPSUM}`"), &LOREM_IPSUM[1..]);
    assert_no_match(
        &format!("`{LOREM_IPSUM}`"),
        &LOREM_IPSUM[2..LOREM_IPSUM.len() - 2],
    );
}

#[test]
fn range() {
    assert_match_len("[0-9]+", "0123456789yeet", 10);
    assert_match_len("[a-f]+", "abcdefghij", 6);
    assert_match_len("[a-f]+", "abcdefghijklmnopqrstuvwxyz", 6);
    assert_match_len("[a-a]+", "aaaaaaah", 7);
    assert_match_len("[[-]]+", r"[\]", 3);
    assert_match_len("[---]+", "--", 2);

    assert_no_match("[a-z]", "`");
    assert_no_match("[a-z]", "{");

    assert_error("[");
    assert_error("[0");
    assert_error("[0-");
    assert_error("[0-9");
    assert_error("]");
    assert_error("9]");
    assert_error("-9]");
    assert_error("0-9]");
    assert_error("[9-0]");
}

#[test]
fn set() {
    assert_match("_", "\n");
    assert_match("_", "\r");
    assert_match("a", "a");
    assert_match("o", "+");
    assert_match("n", "7");
    assert_match("Q", "\"");
    assert_match("q", "'");

    assert_no_match("_", "b");
    assert_no_match("a", "4");
    assert_no_match("o", "\t");
    assert_no_match("n", "|");
    assert_no_match("Q", "^");
    assert_no_match("q", "&");
}

#[test]
fn sequence_and_groups() {
    assert_match_len("{'abc'}", "abc", 3);
    assert_match_len("{'ab'} {'c'}", "abc", 3);
    assert_match_len("{{{{{{'ab'} {'c'}}}}}}", "abc", 3);

    assert_error("{'abc'");
    assert_error("{");
    assert_error("}");
    assert_error("{{{'abc'");
    assert_error("'abc'}}}");
}

#[test]
fn plus() {
    assert_match_len("{'abc'}+", "abcabcabc", 9);
    assert_match_len("{'ab'n}+", "ab1ab2ab3", 9);
    assert_match_len("n+n+", "12", 2);
    assert_no_match("{'abc'}+", "xyz");

    assert_error("+");
    assert_error("++");
    assert_error("+a");
    assert_error("{}+");
}

#[test]
fn star() {
    assert_match_len("{'abc'}*", "abc", 3);
    assert_match_len("{'abc'}*", "", 0);
    assert_match_len("{'abc'}*", "abcabcabc", 9);
    assert_match_len("{'ab'n}*", "ab1ab2ab3", 9);
    assert_match_len("{{{'hello'}}}*", "", 0);
    assert_match_len("{{{'hello'}}}*", "hellohellohello", 15);

    assert_error("*");
    assert_error("***");
    assert_error("*a");
    assert_error("{}*");
}

#[test]
fn optional() {
    assert_match_len("{'abc'}?", "abc", 3);
    assert_match_len("{'abc'}?", "", 0);
    assert_match_len("{'ab'n}?", "ab1", 3);
    assert_match_len("{{{'hello'}}}?", "", 0);
    assert_match_len("{{{'hello'}}}?", "hello", 5);

    assert_error("?");
    assert_error("???");
    assert_error("?a");
    assert_error("{}?");
}

#[test]
fn alternation() {
    assert_match_len("{'a'|'b'}", "a", 1);
    assert_match_len("{'a'|'b'}", "b", 1);
    assert_match_len("{'a' | 'b'}", "a", 1);
    assert_match_len("{'a' | 'b'}", "b", 1);
    assert_match_len("a{a|'_'|n}*", "snake_case_variable123", 22);
    assert_no_match("{'a'|'b'}", "c");

    assert_error("|");
    assert_error("||");
    assert_error("|||");
    assert_error("'a'|{}");
    assert_error("{}|'b'");
    assert_error("'a'|");
    assert_error("|'b'");
}

#[test]
fn alternation_is_ordered_choice() {
    assert_match_len("{'a'|'ab'}", "ab", 1);
    assert_match_len("{'ab'|'a'}", "ab", 2);
}

#[test]
fn scan() {
    assert_match_len("^~'c'", "abc", 3);
    assert_match_len("a~'z'", "ahjklz", 6);
    assert_match_len(
        "'//' {a|' '} ~ '//'",
        "// The program starts here // int main() {",
        29,
    );
    assert_match_len(
        "'//' {^|' '} ~ '//'",
        "// The program starts here // int main() {",
        29,
    );
    assert_match_len("'//' {^|' '} ~ '//'", "//a//b//", 5);
    assert_match_len("n ~ {'z'|'9'}", "0123456789", 10);
    assert_match_len("n ~ {'z'|'9'}", "012345678z", 10);
    assert_match_len(
        "{' '} ~ 'sus'",
        "                           sus               ",
        30,
    );
    assert_no_match(
        "{' '} ~ 'sus'",
        "            |             sus               ",
    );

    assert_error("~");
    assert_error("a~");
    assert_error("~{}");
    assert_error("{}~");
}

#[test]
fn scan_stops_at_first_delimiter() {
    assert_match_len("^ ~ ';'", "a;b;c;", 2);
    assert_match_len("'/*' ^ ~ '*/'", "/* one */ two */", 9);
}

#[test]
fn lookahead_and_negation() {
    assert_match_len("'if' /!a", "if (x)", 2);
    assert_no_match("'if' /!a", "iffy");
    assert_match_len("{!'\n'}+", "line\nnext", 4);
    assert_match_len("'x' /n", "x1", 1);
    assert_no_match("'x' /n", "xy");
}

#[test]
fn malformed_sources_fail_without_panicking() {
    for source in ["[", "[0-", "]", "{", "}", "9]", "{'a'", "'", "`", "[a", "!", "/"] {
        assert_error(source);
    }
}

#[test]
fn errors_name_their_cause() {
    let cases = [
        ("x", PatternError::UnrecognizedByte(b'x')),
        ("|'b'", PatternError::MissingPreOperand(b'|')),
        ("'a'~", PatternError::MissingPostOperand(b'~')),
        ("{'a'", PatternError::UnterminatedGroup),
        ("}", PatternError::UnmatchedGroupClose),
        ("]", PatternError::UnmatchedRangeClose),
        ("[a", PatternError::UnterminatedRange),
        ("[f-a]", PatternError::EmptyRange { lo: b'f', hi: b'a' }),
        ("'abc", PatternError::UnterminatedLiteral(b'\'')),
    ];
    for (source, expected) in cases {
        assert_eq!(Regex::new(source).unwrap_err(), expected, "{source:?}");
    }
}

#[test]
fn deeply_nested_groups_compile_and_render() {
    let depth = 100_000;
    let source = format!("{}'a'{}", "{".repeat(depth), "}".repeat(depth));
    let regex = regex(&source);
    assert_eq!(regex.match_len("abc"), Some(1));
    assert!(regex.to_dot("deep").contains("'a'"));

    let unclosed = format!("{}'a'", "{".repeat(depth));
    assert_eq!(
        Regex::new(&unclosed).unwrap_err(),
        PatternError::UnterminatedGroup
    );
}

#[test]
fn long_prefix_chains_compile_match_and_render() {
    let depth = 100_000;
    // An even number of negations: one byte where `'a'` matches.
    let negations = regex(&format!("{}'a'", "!".repeat(depth)));
    assert_eq!(negations.match_len("a"), Some(1));
    assert_eq!(negations.match_len("b"), None);
    let dot = negations.to_dot("negations");
    assert_eq!(dot.matches("subgraph cluster_").count(), depth);

    let lookaheads = regex(&format!("{}'a'", "/".repeat(depth)));
    assert_eq!(lookaheads.match_len("a"), Some(0));
    assert_eq!(lookaheads.match_len("b"), None);
}

#[test]
fn literal_truncated_at_end_of_input() {
    // A literal longer than the rest of the input matches what is left.
    assert_match_len("'->'", "-", 1);
    assert_match_len("'abc'", "ab", 2);
    assert_no_match("'abc'", "abx");
}

#[test]
fn matching_is_idempotent() {
    let regex = regex("'//' {a|' '} ~ '//'");
    let input = "// The program starts here // int main() {";
    let first = regex.match_len(input);
    assert_eq!(regex.match_len(input), first);
    assert_eq!(regex.match_len(input), first);
}

#[test]
fn graph_is_shared_across_threads() {
    let regex = regex("{a|'_'} {a|'_'|n}*");
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| regex.match_len("snake_case42 = 1")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().ok().flatten(), Some(12));
        }
    });
}

#[test]
fn regex_keeps_its_source() {
    let regex: Regex = "[0-9]+".parse().unwrap();
    assert_eq!(regex.source(), "[0-9]+");
    assert!(!regex.graph().is_empty());
    assert!(regex.to_dot("int").starts_with("strict digraph {"));
}

#[test]
fn step_limit_through_the_facade() {
    let regex = regex("{^|'a'}*");
    let input = "a".repeat(64);
    let limited = regex.matcher().with_step_limit(10).run(input.as_bytes());
    assert_eq!(limited, Err(MatchError::StepLimitExceeded { limit: 10 }));
    assert_eq!(regex.match_len(&input), Some(64));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn literal_matches_itself(text in "[^'`]{1,48}") {
            let regex = Regex::new(&format!("'{text}'")).unwrap();
            prop_assert_eq!(regex.match_len(&text), Some(text.len()));
        }

        #[test]
        fn literal_is_a_prefix_match(text in "[^'`]{1,48}", suffix in ".{0,32}") {
            let regex = Regex::new(&format!("'{text}'")).unwrap();
            let input = format!("{text}{suffix}");
            prop_assert_eq!(regex.match_len(&input), Some(text.len()));
        }

        #[test]
        fn digit_run_matches_leading_digits(input in "[0-9a-z ]{0,64}") {
            let expected = input.bytes().take_while(u8::is_ascii_digit).count();
            let found = Regex::new("[0-9]+").unwrap().match_len(&input);
            prop_assert_eq!(found, (expected > 0).then_some(expected));
        }

        #[test]
        fn same_input_same_result(input in "[a-z /]{0,64}") {
            let regex = Regex::new("'//' {a|' '} ~ '//'").unwrap();
            prop_assert_eq!(regex.match_len(&input), regex.match_len(&input));
        }

        #[test]
        fn compiling_arbitrary_source_never_panics(
            source in "[_aonQq!/^'`{}|?*+~\\[\\]a-z0-9 -]{0,24}"
        ) {
            let _ = Regex::new(&source);
        }
    }
}
