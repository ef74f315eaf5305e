//! FAQ prefix parser.
//!
//! Input is a series of sections separated by blank lines. Within a
//! section, `Q:` starts the question and `A:` starts the answer
//! (case-insensitive); unprefixed lines continue whichever part is
//! currently being built. A section contributes a pair only when both
//! question and answer are non-empty.

use crate::error::{ParseError, ParseResult};
use crate::types::record::{FaqPage, QaPair};

/// Parse `Q:`/`A:` formatted text into an FAQ page.
pub fn parse_faq(input: &str) -> ParseResult<FaqPage> {
    let input = input.replace("\r\n", "\n");
    let mut items = Vec::new();

    for section in input.trim().split("\n\n") {
        let mut question = String::new();
        let mut answer = String::new();

        for line in section.trim().lines() {
            let trimmed = line.trim();
            let upper = trimmed.to_uppercase();

            if upper.starts_with("Q:") {
                question = trimmed[2..].trim().to_string();
            } else if upper.starts_with("A:") {
                answer = trimmed[2..].trim().to_string();
            } else if !question.is_empty() && answer.is_empty() {
                question.push(' ');
                question.push_str(trimmed);
            } else if !answer.is_empty() {
                answer.push(' ');
                answer.push_str(trimmed);
            }
        }

        if !question.is_empty() && !answer.is_empty() {
            items.push(QaPair { question, answer });
        }
    }

    if items.is_empty() {
        return Err(ParseError::NoPairs);
    }

    Ok(FaqPage { items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_pairs() {
        let input = "Q: What is Schema.org?\nA: A structured data vocabulary.\n\n\
                     Q: Why use it?\nA: Better search appearance.";
        let faq = parse_faq(input).unwrap();
        assert_eq!(faq.items.len(), 2);
        assert_eq!(faq.items[0].question, "What is Schema.org?");
        assert_eq!(faq.items[0].answer, "A structured data vocabulary.");
        assert_eq!(faq.items[1].question, "Why use it?");
    }

    #[test]
    fn test_order_preserved() {
        let input = "Q: First?\nA: One.\n\nQ: Second?\nA: Two.\n\nQ: Third?\nA: Three.";
        let faq = parse_faq(input).unwrap();
        let questions: Vec<_> = faq.items.iter().map(|p| p.question.as_str()).collect();
        assert_eq!(questions, vec!["First?", "Second?", "Third?"]);
    }

    #[test]
    fn test_continuation_lines() {
        let input = "Q: What is the return\npolicy here?\nA: Thirty days\nwith a receipt.";
        let faq = parse_faq(input).unwrap();
        assert_eq!(faq.items[0].question, "What is the return policy here?");
        assert_eq!(faq.items[0].answer, "Thirty days with a receipt.");
    }

    #[test]
    fn test_case_insensitive_prefixes() {
        let input = "q: Lowercase?\na: Works fine.";
        let faq = parse_faq(input).unwrap();
        assert_eq!(faq.items[0].question, "Lowercase?");
        assert_eq!(faq.items[0].answer, "Works fine.");
    }

    #[test]
    fn test_crlf_input() {
        let input = "Q: One?\r\nA: Yes.\r\n\r\nQ: Two?\r\nA: Also yes.";
        let faq = parse_faq(input).unwrap();
        assert_eq!(faq.items.len(), 2);
    }

    #[test]
    fn test_incomplete_section_skipped() {
        let input = "Q: Question without answer\n\nQ: Complete?\nA: Yes.";
        let faq = parse_faq(input).unwrap();
        assert_eq!(faq.items.len(), 1);
        assert_eq!(faq.items[0].question, "Complete?");
    }

    #[test]
    fn test_no_pairs_is_error() {
        assert!(matches!(
            parse_faq("just some free-form text"),
            Err(ParseError::NoPairs)
        ));
        assert!(matches!(parse_faq(""), Err(ParseError::NoPairs)));
    }

    #[test]
    fn test_later_prefix_overwrites() {
        // A second Q: in the same section replaces the first.
        let input = "Q: First?\nQ: Second?\nA: Answer.";
        let faq = parse_faq(input).unwrap();
        assert_eq!(faq.items.len(), 1);
        assert_eq!(faq.items[0].question, "Second?");
    }
}
