//! Mermaid flowchart generation.
//!
//! The chart is a linear overview: one node per question in definition
//! order, from a start node to an end node. Conditions are not drawn.

use std::fmt::Write as _;

use interview::{Definition, InterviewState, QuestionType};

const MAX_LABEL_CHARS: usize = 30;

/// Generate Mermaid `flowchart` source for `definition`.
///
/// With a `state`, the node at the current index gets the `current` class and
/// nodes whose variable holds a truthy answer get the `answered` class.
pub fn flowchart(definition: &Definition, state: Option<&InterviewState>) -> String {
    let mut out = String::from("flowchart TD\n");
    out.push_str("    Start([Start Interview]);\n");

    for (index, question) in definition.questions().iter().enumerate() {
        let (open, close) = node_shape(question.kind);
        let label = truncate_label(&question.prompt, MAX_LABEL_CHARS);
        let _ = writeln!(out, "    Q{index}{open}{label}{close};");

        if let Some(state) = state {
            if index == state.current_question_index {
                let _ = writeln!(out, "    class Q{index} current;");
            }
            if state
                .answers
                .get(&question.variable)
                .is_some_and(|value| value.is_truthy())
            {
                let _ = writeln!(out, "    class Q{index} answered;");
            }
        }
    }

    out.push_str("    End([Complete Interview]);\n\n");

    let count = definition.len();
    if count > 0 {
        out.push_str("    Start --> Q0;\n");
        for index in 0..count {
            if index + 1 < count {
                let _ = writeln!(out, "    Q{index} --> Q{};", index + 1);
            } else {
                let _ = writeln!(out, "    Q{index} --> End;");
            }
        }
    }

    out.push_str("\n    classDef current fill:#4CAF50,stroke:#333,stroke-width:4px,color:#fff;\n");
    out.push_str("    classDef answered fill:#2196F3,stroke:#333,stroke-width:2px,color:#fff;\n");
    out
}

/// Node delimiters: decisions are diamonds, choices rectangles, inputs rounded.
fn node_shape(kind: QuestionType) -> (char, char) {
    match kind {
        QuestionType::YesNo => ('{', '}'),
        QuestionType::Dropdown | QuestionType::Radio => ('[', ']'),
        _ => ('(', ')'),
    }
}

/// Strip characters Mermaid treats as syntax, collapse whitespace and shorten.
fn truncate_label(text: &str, max_chars: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '<' | '>' | '&' | '[' | ']' | '{' | '}' | '(' | ')' | '?'))
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut short: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
