//! Prompt construction for opportunity analysis

/// The fixed system contract sent with every analysis request.
///
/// This string is the single source of truth for the JSON shape the model
/// must return. `core::parser` accepts exactly this shape; the two must
/// change together.
pub const SYSTEM_CONTRACT: &str = r#"You are an expert government contracting advisor analyzing opportunities for small businesses.

Your task is to generate a concise 30-second executive summary that helps business owners make quick Go/No-Go decisions.

Respond in the following JSON format:
{
    "executive_summary": "2-3 sentence summary focusing on what they want, key requirements, and opportunity value",
    "relevance_score": 85,
    "confidence_score": 90,
    "key_requirements": ["requirement 1", "requirement 2", "requirement 3"],
    "decision_factors": {
        "pros": "Why this could be a good opportunity",
        "cons": "Potential challenges or red flags",
        "competition": "Likely competition level and barriers"
    },
    "recommendation": {
        "action": "go" | "no-go" | "investigate",
        "reasoning": "Brief explanation of recommendation",
        "next_steps": "What to do next if pursuing"
    }
}

Score relevance 0-100 based on company capabilities, contract size, requirements complexity, and competition level.
Confidence score 0-100 based on how complete the opportunity information is."#;

/// Build the per-record instruction around an assembled context block.
pub fn analysis_instruction(context_text: &str, has_profile: bool) -> String {
    let mut prompt = format!(
        r#"Analyze this government contracting opportunity and provide an executive summary:

{context_text}

Focus on:
1. What the government actually wants (clear, specific)
2. Key technical and business requirements
3. Estimated competition level and barriers to entry
4. Whether this matches the company's capabilities
5. Quick Go/No-Go recommendation with reasoning

Keep the executive summary under 100 words - executives need to read this in 30 seconds."#
    );

    if has_profile {
        prompt.push_str(
            "\n\nTailor your analysis specifically for this company's profile and capabilities.",
        );
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_names_every_field() {
        for field in [
            "executive_summary",
            "relevance_score",
            "confidence_score",
            "key_requirements",
            "decision_factors",
            "recommendation",
            "next_steps",
        ] {
            assert!(SYSTEM_CONTRACT.contains(field), "contract missing {field}");
        }
    }

    #[test]
    fn test_contract_enumerates_actions_and_range() {
        assert!(SYSTEM_CONTRACT.contains(r#""go" | "no-go" | "investigate""#));
        assert!(SYSTEM_CONTRACT.contains("0-100"));
    }

    #[test]
    fn test_instruction_embeds_context() {
        let instruction = analysis_instruction("OPPORTUNITY: Test record", false);
        assert!(instruction.contains("OPPORTUNITY: Test record"));
        assert!(instruction.contains("under 100 words"));
        assert!(!instruction.contains("Tailor your analysis"));
    }

    #[test]
    fn test_instruction_tailors_when_profile_present() {
        let instruction = analysis_instruction("ctx", true);
        assert!(instruction.contains("Tailor your analysis"));
    }
}
