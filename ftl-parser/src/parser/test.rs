use itertools::Itertools;

use crate::ast::*;
use crate::{parse, Parser};

fn parse_one(source: &str) -> Entry {
    parse(source).body.into_iter().exactly_one().unwrap()
}

fn junk_code(source: &str) -> &'static str {
    let junk = parse_one(source).into_junk().unwrap();
    junk.annotations.into_iter().exactly_one().unwrap().code
}

#[test]
fn test_simple_message() {
    let message = parse_one("foo = Bar\n").into_message().unwrap();
    assert_eq!(message.id, Identifier::new("foo"));
    assert_eq!(
        message.value,
        Some(Pattern::new(vec![PatternElement::TextElement(
            TextElement::new("Bar"),
        )]))
    );
    assert!(message.attributes.is_empty());
    assert!(message.comment.is_none());
}

#[test]
fn test_message_without_trailing_newline() {
    let message = parse_one("foo = Bar").into_message().unwrap();
    assert_eq!(
        message.value,
        Some(Pattern::new(vec![PatternElement::TextElement(
            TextElement::new("Bar"),
        )]))
    );
}

#[test]
fn test_message_with_attributes_only() {
    let message = parse_one("login =\n    .placeholder = Your name\n")
        .into_message()
        .unwrap();
    assert!(message.value.is_none());
    let attribute = message.attributes.into_iter().exactly_one().unwrap();
    assert_eq!(attribute.id, Identifier::new("placeholder"));
    assert_eq!(
        attribute.value,
        Pattern::new(vec![PatternElement::TextElement(TextElement::new(
            "Your name",
        ))])
    );
}

#[test]
fn test_term_with_attribute() {
    let term = parse_one("-brand = Firefox\n    .gender = masculine\n")
        .into_term()
        .unwrap();
    assert_eq!(term.id, Identifier::new("brand"));
    assert_eq!(
        term.value,
        Pattern::new(vec![PatternElement::TextElement(TextElement::new(
            "Firefox",
        ))])
    );
    let attribute = term.attributes.into_iter().exactly_one().unwrap();
    assert_eq!(attribute.id, Identifier::new("gender"));
}

#[test]
fn test_identifier_characters() {
    let message = parse_one("key-01_x = v\n").into_message().unwrap();
    assert_eq!(message.id, Identifier::new("key-01_x"));
}

#[test]
fn test_block_pattern_dedent() {
    let message = parse_one("foo =\n    multi\n    line\n").into_message().unwrap();
    assert_eq!(
        message.value,
        Some(Pattern::new(vec![PatternElement::TextElement(
            TextElement::new("multi\nline"),
        )]))
    );
}

#[test]
fn test_uneven_indent_keeps_the_excess() {
    let message = parse_one("k =\n    aaa\n  bbb\n").into_message().unwrap();
    assert_eq!(
        message.value,
        Some(Pattern::new(vec![PatternElement::TextElement(
            TextElement::new("  aaa\nbbb"),
        )]))
    );
}

#[test]
fn test_blank_lines_inside_pattern() {
    let message = parse_one("k =\n    first\n\n    second\n")
        .into_message()
        .unwrap();
    assert_eq!(
        message.value,
        Some(Pattern::new(vec![PatternElement::TextElement(
            TextElement::new("first\n\nsecond"),
        )]))
    );
}

#[test]
fn test_placeable_and_trailing_trim() {
    let message = parse_one("k = a { $x } b  \n").into_message().unwrap();
    let pattern = message.value.unwrap();
    assert_eq!(pattern.elements.len(), 3);
    assert_eq!(
        pattern.elements[0].as_text_element().unwrap().value,
        "a ".to_string()
    );
    let placeable = pattern.elements[1].as_placeable().unwrap();
    let variable = placeable
        .expression
        .as_inline()
        .unwrap()
        .as_variable_reference()
        .unwrap();
    assert_eq!(variable.id, Identifier::new("x"));
    // Trailing whitespace is trimmed off the final element.
    assert_eq!(
        pattern.elements[2].as_text_element().unwrap().value,
        " b".to_string()
    );
}

#[test]
fn test_select_expression() {
    let source = "msg = { $n ->\n   *[one] One\n    [other] Other\n  }\n";
    let message = parse_one(source).into_message().unwrap();
    let pattern = message.value.unwrap();
    let placeable = pattern.elements.iter().exactly_one().unwrap();
    let select = placeable
        .as_placeable()
        .unwrap()
        .expression
        .as_select()
        .unwrap();
    assert_eq!(
        select.selector,
        InlineExpression::VariableReference(VariableReference {
            id: Identifier::new("n"),
            span: None,
        })
    );
    let (one, other) = select.variants.iter().collect_tuple().unwrap();
    assert!(one.default);
    assert_eq!(one.key, VariantKey::Identifier(Identifier::new("one")));
    assert_eq!(
        one.value,
        Pattern::new(vec![PatternElement::TextElement(TextElement::new("One"))])
    );
    assert!(!other.default);
    assert_eq!(other.key, VariantKey::Identifier(Identifier::new("other")));
}

#[test]
fn test_variant_number_key() {
    let source = "k = { $n ->\n *[0] Zero\n }\n";
    let message = parse_one(source).into_message().unwrap();
    let pattern = message.value.unwrap();
    let select = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_select()
        .unwrap();
    let variant = select.variants.iter().exactly_one().unwrap();
    assert_eq!(
        variant.key,
        VariantKey::NumberLiteral(NumberLiteral::new("0"))
    );
}

#[test]
fn test_term_attribute_is_a_valid_selector() {
    let source = "k = { -brand.gender ->\n *[masculine] his\n }\n";
    let message = parse_one(source).into_message().unwrap();
    let pattern = message.value.unwrap();
    let select = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_select()
        .unwrap();
    let term = select.selector.as_term_reference().unwrap();
    assert_eq!(term.id, Identifier::new("brand"));
    assert_eq!(term.attribute, Some(Identifier::new("gender")));
}

#[test]
fn test_function_call_arguments() {
    let source = "k = { NUMBER($n, minimumFractionDigits: 2) }\n";
    let message = parse_one(source).into_message().unwrap();
    let pattern = message.value.unwrap();
    let function = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_inline()
        .unwrap()
        .as_function_reference()
        .unwrap();
    assert_eq!(function.id, Identifier::new("NUMBER"));
    let positional = function.arguments.positional.iter().exactly_one().unwrap();
    assert_eq!(
        positional.as_variable_reference().unwrap().id,
        Identifier::new("n")
    );
    let named = function.arguments.named.iter().exactly_one().unwrap();
    assert_eq!(named.name, Identifier::new("minimumFractionDigits"));
    assert_eq!(named.value, Literal::Number(NumberLiteral::new("2")));
}

#[test]
fn test_term_call_arguments() {
    let source = "k = { -term(case: \"upper\") }\n";
    let message = parse_one(source).into_message().unwrap();
    let pattern = message.value.unwrap();
    let term = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_inline()
        .unwrap()
        .as_term_reference()
        .unwrap();
    assert_eq!(term.id, Identifier::new("term"));
    let arguments = term.arguments.as_ref().unwrap();
    assert!(arguments.positional.is_empty());
    let named = arguments.named.iter().exactly_one().unwrap();
    assert_eq!(named.name, Identifier::new("case"));
    assert_eq!(named.value, Literal::String(StringLiteral::new("upper")));
}

#[test]
fn test_message_reference_attribute() {
    let message = parse_one("k = { msg.attr }\n").into_message().unwrap();
    let pattern = message.value.unwrap();
    let reference = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_inline()
        .unwrap()
        .as_message_reference()
        .unwrap();
    assert_eq!(reference.id, Identifier::new("msg"));
    assert_eq!(reference.attribute, Some(Identifier::new("attr")));
}

#[test]
fn test_nested_placeable() {
    let message = parse_one("k = {{ \"str\" }}\n").into_message().unwrap();
    let pattern = message.value.unwrap();
    let outer = pattern.elements[0].as_placeable().unwrap();
    let inner = outer
        .expression
        .as_inline()
        .unwrap()
        .as_placeable()
        .unwrap();
    let literal = inner
        .expression
        .as_inline()
        .unwrap()
        .as_string_literal()
        .unwrap();
    assert_eq!(literal.value, "str");
}

#[test]
fn test_number_literals_are_verbatim() {
    let message = parse_one("k = { 3.14 }\n").into_message().unwrap();
    let pattern = message.value.unwrap();
    let number = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_inline()
        .unwrap()
        .as_number_literal()
        .unwrap();
    assert_eq!(number.value, "3.14");

    let message = parse_one("k = { -7 }\n").into_message().unwrap();
    let pattern = message.value.unwrap();
    let number = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_inline()
        .unwrap()
        .as_number_literal()
        .unwrap();
    assert_eq!(number.value, "-7");
}

#[test]
fn test_string_literal_keeps_escapes_raw() {
    let message = parse_one(r#"k = { "a\"b \\ \u0041" }"#).into_message().unwrap();
    let pattern = message.value.unwrap();
    let literal = pattern.elements[0]
        .as_placeable()
        .unwrap()
        .expression
        .as_inline()
        .unwrap()
        .as_string_literal()
        .unwrap();
    assert_eq!(literal.value, r#"a\"b \\ \u0041"#);
    assert_eq!(crate::unicode::unescape_unicode(&literal.value), "a\"b \\ A");
}

#[test]
fn test_comment_levels() {
    let entry = parse_one("# simple\n");
    assert_eq!(entry, Entry::Comment(Comment::new("simple")));

    let entry = parse_one("## Group\n## comment\n");
    assert_eq!(entry, Entry::GroupComment(Comment::new("Group\ncomment")));

    let entry = parse_one("### Resource comment\n");
    assert_eq!(entry, Entry::ResourceComment(Comment::new("Resource comment")));

    // A sigil line with no content.
    let entry = parse_one("#\n");
    assert_eq!(entry, Entry::Comment(Comment::new("")));
}

#[test]
fn test_attached_comment() {
    let message = parse_one("# attached\nfoo = bar\n").into_message().unwrap();
    assert_eq!(message.comment, Some(Comment::new("attached")));
}

#[test]
fn test_blank_line_prevents_attachment() {
    let resource = parse("# standalone\n\nfoo = bar\n");
    assert_eq!(resource.body.len(), 2);
    assert_eq!(resource.body[0], Entry::Comment(Comment::new("standalone")));
    assert!(resource.body[1].as_message().unwrap().comment.is_none());
}

#[test]
fn test_group_comments_never_attach() {
    let resource = parse("## group\nfoo = bar\n");
    assert_eq!(resource.body.len(), 2);
    assert_eq!(resource.body[0], Entry::GroupComment(Comment::new("group")));
    assert!(resource.body[1].as_message().unwrap().comment.is_none());
}

#[test]
fn test_comment_followed_by_junk_stays_standalone() {
    let resource = parse("# note\n?bad\n");
    assert_eq!(resource.body.len(), 2);
    assert_eq!(resource.body[0], Entry::Comment(Comment::new("note")));
    assert!(resource.body[1].is_junk());
}

#[test]
fn test_comment_at_eof_stays_standalone() {
    let entry = parse_one("# trailing");
    assert_eq!(entry, Entry::Comment(Comment::new("trailing")));
}

#[test]
fn test_junk_recovery_resumes_at_next_entry() {
    let resource = parse("err = {\nok = Fine\n");
    assert_eq!(resource.body.len(), 2);
    let junk = resource.body[0].as_junk().unwrap();
    assert_eq!(junk.content, "err = {\n");
    assert_eq!(junk.annotations[0].code, "E0003");
    let message = resource.body[1].as_message().unwrap();
    assert_eq!(message.id, Identifier::new("ok"));
}

#[test]
fn test_unterminated_placeable_at_eof() {
    let junk = parse_one("foo = {").into_junk().unwrap();
    assert_eq!(junk.content, "foo = {");
    assert_eq!(junk.annotations[0].code, "E0028");
}

#[test]
fn test_error_codes() {
    let cases = [
        ("?bad\n", "E0002"),
        ("foo? = x\n", "E0003"),
        ("foo =\n", "E0005"),
        ("-term =\n", "E0006"),
        ("k = { no_caps() }\n", "E0008"),
        ("k = { FUN(x.y: 1) }\n", "E0009"),
        ("k = { $n ->\n  [one] One\n }\n", "E0010"),
        ("k = { $n ->\n }\n", "E0011"),
        ("k = { $n ->\n  *[one]\n }\n", "E0012"),
        ("k = { $n ->\n *[", "E0013"),
        ("k = { FUN(arg: $x) }\n", "E0014"),
        ("k = { $n ->\n *[one] A\n *[two] B\n }\n", "E0015"),
        ("k = { msg ->\n *[a] A\n }\n", "E0016"),
        ("k = { -term ->\n *[a] A\n }\n", "E0017"),
        ("k = { msg.attr ->\n *[a] A\n }\n", "E0018"),
        ("k = { -term.attr }\n", "E0019"),
        ("k = { \"unterminated\n}\n", "E0020"),
        ("k = { FUN(a: 1, $x) }\n", "E0021"),
        ("k = { FUN(a: 1, a: 2) }\n", "E0022"),
        ("k = { \"\\x\" }\n", "E0025"),
        (r#"k = { "\u0G" }"#, "E0026"),
        ("k = }\n", "E0027"),
        ("k = {}\n", "E0028"),
        ("k = { {$n} ->\n *[a] A\n }\n", "E0029"),
    ];
    for (source, code) in cases {
        assert_eq!(junk_code(source), code, "source: {source:?}");
    }
}

#[test]
fn test_error_arguments() {
    let junk = parse_one("foo =\n").into_junk().unwrap();
    let annotation = &junk.annotations[0];
    assert_eq!(annotation.code, "E0005");
    assert_eq!(annotation.arguments, vec!["foo".to_string()]);

    let junk = parse_one("k = { FUN(a: 1, a: 2) }\n").into_junk().unwrap();
    let annotation = &junk.annotations[0];
    assert_eq!(annotation.code, "E0022");
    assert_eq!(annotation.arguments, vec!["a".to_string()]);
}

#[test]
fn test_spans_on_a_simple_message() {
    let resource = Parser::new().with_spans(true).parse("foo = Bar\n");
    assert_eq!(resource.span, Some(Span::new(0, 10)));
    let message = resource
        .body
        .into_iter()
        .exactly_one()
        .unwrap()
        .into_message()
        .unwrap();
    assert_eq!(message.span, Some(Span::new(0, 9)));
    assert_eq!(message.id.span, Some(Span::new(0, 3)));
    let pattern = message.value.unwrap();
    assert_eq!(pattern.span, Some(Span::new(6, 9)));
    assert_eq!(
        pattern.elements[0].as_text_element().unwrap().span,
        Some(Span::new(6, 9))
    );
}

#[test]
fn test_spans_are_absent_by_default() {
    let resource = parse("foo = Bar\n");
    assert_eq!(resource.span, None);
    let message = resource
        .body
        .into_iter()
        .exactly_one()
        .unwrap()
        .into_message()
        .unwrap();
    assert_eq!(message.span, None);
    assert_eq!(message.id.span, None);
}

#[test]
fn test_trailing_trim_keeps_span_anchored_to_source() {
    // The merged final element's value is shorter than its source range
    // once the common indent is stripped, so the trim must move the span
    // end back by the trimmed bytes, not recompute it from the start.
    let resource = Parser::new().with_spans(true).parse("k =\n    a\n    b  \n");
    let message = resource
        .body
        .into_iter()
        .exactly_one()
        .unwrap()
        .into_message()
        .unwrap();
    let pattern = message.value.unwrap();
    let text = pattern
        .elements
        .iter()
        .exactly_one()
        .unwrap()
        .as_text_element()
        .unwrap();
    assert_eq!(text.value, "a\nb");
    assert_eq!(text.span, Some(Span::new(8, 15)));
}

#[test]
fn test_attached_comment_extends_the_entry_span() {
    let resource = Parser::new().with_spans(true).parse("# note\nfoo = bar\n");
    let message = resource
        .body
        .into_iter()
        .exactly_one()
        .unwrap()
        .into_message()
        .unwrap();
    let comment = message.comment.unwrap();
    assert_eq!(comment.span, Some(Span::new(0, 6)));
    assert_eq!(message.span, Some(Span::new(0, 16)));
}

#[test]
fn test_junk_span_and_annotation_position() {
    let resource = Parser::new().with_spans(true).parse("!bad\nok = v\n");
    let junk = resource.body[0].as_junk().unwrap();
    assert_eq!(junk.span, Some(Span::new(0, 5)));
    assert_eq!(junk.content, "!bad\n");
    let annotation = &junk.annotations[0];
    assert_eq!(annotation.code, "E0002");
    assert_eq!(annotation.span, Span::point(0));
}

#[test]
fn test_crlf_parses_like_lf() {
    assert_eq!(
        parse("foo = Bar\nbaz = Qux\n"),
        parse("foo = Bar\r\nbaz = Qux\r\n")
    );

    // Byte spans still index the original source.
    let resource = Parser::new()
        .with_spans(true)
        .parse("foo = Bar\r\nbaz = Qux\r\n");
    let second = resource.body[1].as_message().unwrap();
    assert_eq!(second.span, Some(Span::new(11, 20)));
}

#[test]
fn test_crlf_block_pattern() {
    let message = parse_one("foo =\r\n    multi\r\n    line\r\n")
        .into_message()
        .unwrap();
    assert_eq!(
        message.value,
        Some(Pattern::new(vec![PatternElement::TextElement(
            TextElement::new("multi\nline"),
        )]))
    );
}
