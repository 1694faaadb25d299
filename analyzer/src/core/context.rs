//! Deterministic context assembly for model prompts

use shared::{OpportunityContext, RequesterProfile};

/// Cap on the description excerpt, in characters. Descriptions on large
/// solicitations run to tens of thousands of characters and the summary
/// prompt only needs the opening.
const DESCRIPTION_LIMIT: usize = 1000;

/// Assemble the text block the model is asked to judge.
///
/// Pure and deterministic: the same record and profile always produce the
/// same text. Missing optional fields are rendered with a documented
/// placeholder or omitted; nothing here can fail.
pub fn build_context(ctx: &OpportunityContext, profile: Option<&RequesterProfile>) -> String {
    let deadline = match &ctx.response_deadline {
        Some(deadline) => deadline.to_rfc3339(),
        None => "Not specified".to_string(),
    };

    let mut lines = vec![
        format!("OPPORTUNITY: {}", ctx.title),
        format!("AGENCY: {}", ctx.agency),
        format!(
            "DESCRIPTION: {}",
            truncate_chars(&ctx.description, DESCRIPTION_LIMIT)
        ),
        format!("NAICS: {} - {}", ctx.naics_code, ctx.naics_description),
        format!("PSC CODE: {}", ctx.psc_code),
        format!(
            "SET ASIDE: {}",
            ctx.set_aside.as_deref().unwrap_or("Full and Open")
        ),
        format!("RESPONSE DEADLINE: {deadline}"),
        format!("PLACE OF PERFORMANCE: {}", ctx.place_of_performance),
    ];

    if let Some(profile) = profile {
        lines.push(String::new());
        lines.push("COMPANY PROFILE:".to_string());
        lines.push(format!("Company: {}", profile.company_name));
        lines.push(format!("Capabilities: {}", profile.capabilities.join(", ")));
        lines.push(format!(
            "Certifications: {}",
            profile.certifications.join(", ")
        ));
        lines.push(format!(
            "Past Performance: {}",
            profile.past_performance_summary.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!(
            "Preferred Contract Size: {}",
            profile.preferred_contract_range.as_deref().unwrap_or("N/A")
        ));
    }

    lines.join("\n")
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
