use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::scoring::{Language, Question, SurveyForm};

/// Prompt with a message and return the trimmed input.
/// End of input counts as an empty answer.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Ask every scored question once and collect the raw answers.
///
/// Empty input is kept as-is; scoring treats it like 0. Nothing is
/// validated here, matching what a web form would send.
pub fn run_questionnaire<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    language: Language,
) -> Result<SurveyForm> {
    writeln!(output, "Lung cancer risk survey").context("Failed to write header")?;
    writeln!(output, "Enter the score for each item (empty = 0).").context("Failed to write header")?;
    writeln!(output).context("Failed to write header")?;

    let mut form = SurveyForm::new();
    form.set("lang", language.code());

    for (i, question) in Question::ALL.into_iter().enumerate() {
        let answer = prompt(
            input,
            output,
            &format!("{}. {} [0]: ", i + 1, question.label()),
        )?;
        form.set(question.field_name(), answer);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_questionnaire_collects_answers() {
        let mut input = Cursor::new("1\n2\n\n0\nabc\n1\n0\n0\n3\n");
        let mut output = Vec::new();

        let form = run_questionnaire(&mut input, &mut output, Language::En).unwrap();

        assert_eq!(form.language_code(), Some("en"));
        assert_eq!(form.get("smoking"), Some("1"));
        assert_eq!(form.get("secondhand_smoke"), Some(""));
        assert_eq!(form.answers().total(), 7);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("1. Smoking [0]: "));
        assert!(shown.contains("9. Family history of cancer [0]: "));
    }

    #[test]
    fn test_questionnaire_short_input_counts_as_zero() {
        let mut input = Cursor::new("5\n");
        let mut output = Vec::new();

        let form = run_questionnaire(&mut input, &mut output, Language::Th).unwrap();

        assert_eq!(form.answers().total(), 5);
        assert_eq!(form.language_code(), Some("th"));
    }
}
