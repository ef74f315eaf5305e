//! HowTo prefix parser.
//!
//! Lines before the first step marker provide the name (first non-empty
//! line) and description (remaining pre-step lines, space-joined). Step
//! lines start with `1.`, `1)`, `Step 1:`, or a `-`/`*` bullet;
//! unmarked lines after a step continue that step's text.

use regex::Regex;

use crate::error::{ParseError, ParseResult};
use crate::types::record::{HowTo, HowToStep};

/// Split a line into (is_step_marker, remainder-after-marker).
fn strip_step_marker(line: &str) -> Option<String> {
    let marker = Regex::new(r"(?i)^(?:\d+\s*[.)]\s*|step\s+\d+\s*[:.]\s*|[-*]\s+)(.*)$").unwrap();
    marker
        .captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parse step-formatted text into a how-to guide.
pub fn parse_howto(input: &str) -> ParseResult<HowTo> {
    let input = input.replace("\r\n", "\n");

    let mut name: Option<String> = None;
    let mut description_lines: Vec<String> = Vec::new();
    let mut steps: Vec<HowToStep> = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(text) = strip_step_marker(trimmed) {
            if !text.is_empty() {
                steps.push(HowToStep::new(text));
            }
        } else if let Some(last) = steps.last_mut() {
            // Continuation of the previous step
            last.text.push(' ');
            last.text.push_str(trimmed);
        } else if name.is_none() {
            name = Some(trimmed.to_string());
        } else {
            description_lines.push(trimmed.to_string());
        }
    }

    if steps.is_empty() {
        return Err(ParseError::NoSteps);
    }

    let name = name.ok_or(ParseError::MissingField("name"))?;
    let description = if description_lines.is_empty() {
        None
    } else {
        Some(description_lines.join(" "))
    };

    Ok(HowTo {
        name,
        description,
        total_time: None,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_steps() {
        let input = "How to make tea\nA short guide.\n\n1. Boil water.\n2. Steep the leaves.\n3. Pour and enjoy.";
        let howto = parse_howto(input).unwrap();
        assert_eq!(howto.name, "How to make tea");
        assert_eq!(howto.description.as_deref(), Some("A short guide."));
        assert_eq!(howto.steps.len(), 3);
        assert_eq!(howto.steps[0].text, "Boil water.");
        assert_eq!(howto.steps[2].text, "Pour and enjoy.");
        assert!(howto.total_time.is_none());
    }

    #[test]
    fn test_step_marker_variants() {
        for marker in ["1. ", "1) ", "Step 1: ", "step 2: ", "- ", "* "] {
            let input = format!("Title\n{}Do the thing.", marker);
            let howto = parse_howto(&input).unwrap();
            assert_eq!(howto.steps[0].text, "Do the thing.", "marker {:?}", marker);
        }
    }

    #[test]
    fn test_continuation_lines() {
        let input = "Title\n1. Boil water\nuntil it bubbles.\n2. Done.";
        let howto = parse_howto(input).unwrap();
        assert_eq!(howto.steps[0].text, "Boil water until it bubbles.");
        assert_eq!(howto.steps.len(), 2);
    }

    #[test]
    fn test_multi_line_description() {
        let input = "Title\nFirst description line.\nSecond line.\n1. Step.";
        let howto = parse_howto(input).unwrap();
        assert_eq!(
            howto.description.as_deref(),
            Some("First description line. Second line.")
        );
    }

    #[test]
    fn test_no_steps_is_error() {
        assert!(matches!(
            parse_howto("Just a title\nand a description"),
            Err(ParseError::NoSteps)
        ));
    }

    #[test]
    fn test_missing_name_is_error() {
        assert!(matches!(
            parse_howto("1. A step with no title before it."),
            Err(ParseError::MissingField("name"))
        ));
    }

    #[test]
    fn test_steps_keep_order() {
        let input = "T\n1. a\n2. b\n3. c\n4. d";
        let howto = parse_howto(input).unwrap();
        let texts: Vec<_> = howto.steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }
}
