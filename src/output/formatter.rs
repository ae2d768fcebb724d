use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::RiskTier;
use crate::service::{ClaimOutcome, SubmissionResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Paint `text` in the tier's color: green, yellow or red
fn paint_tier(text: &str, tier: RiskTier) -> String {
    match tier {
        RiskTier::Low => text.green().bold().to_string(),
        RiskTier::Medium => text.yellow().bold().to_string(),
        RiskTier::High => text.red().bold().to_string(),
    }
}

/// Format a submission result as a short multi-line report
pub fn format_submission(result: &SubmissionResult, use_colors: bool) -> String {
    let level = if use_colors {
        paint_tier(&result.risk_level, result.risk_tier)
    } else {
        result.risk_level.clone()
    };
    let token = if use_colors {
        result.token.dimmed().to_string()
    } else {
        result.token.clone()
    };

    format!(
        "{}\n  Score: {}\n  Recommendation: {}\n  Token: {}",
        level, result.total_score, result.recommendation, token
    )
}

/// Format a claim outcome as one line
pub fn format_claim(outcome: &ClaimOutcome, use_colors: bool) -> String {
    match outcome {
        ClaimOutcome::Claimed { name } => {
            let name = if use_colors {
                name.bold().to_string()
            } else {
                name.clone()
            };
            format!("Contact details saved for {}", name)
        }
        other => {
            let message = other.error_message().unwrap_or_default();
            if use_colors {
                format!("{} {}", "Error:".red(), message)
            } else {
                format!("Error: {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Language;

    fn sample_result() -> SubmissionResult {
        SubmissionResult {
            token: "2026-01-01T10:00:00.000".to_string(),
            language: Language::En,
            total_score: 12,
            risk_tier: RiskTier::High,
            risk_level: "High Risk".to_string(),
            recommendation: "See a specialist.".to_string(),
        }
    }

    #[test]
    fn test_format_submission_plain() {
        let out = format_submission(&sample_result(), false);
        assert_eq!(
            out,
            "High Risk\n  Score: 12\n  Recommendation: See a specialist.\n  Token: 2026-01-01T10:00:00.000"
        );
    }

    #[test]
    fn test_format_submission_colored_keeps_text() {
        let out = format_submission(&sample_result(), true);
        assert!(out.contains("High Risk"));
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn test_format_claim_plain() {
        let claimed = ClaimOutcome::Claimed {
            name: "Alice".to_string(),
        };
        assert_eq!(format_claim(&claimed, false), "Contact details saved for Alice");
        assert_eq!(
            format_claim(&ClaimOutcome::NotFound, false),
            "Error: Record not found"
        );
    }
}
