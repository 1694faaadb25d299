//! Deterministic heuristic scoring for when the model path fails
//!
//! This scorer is the availability guarantee of the pipeline: it is pure,
//! total, and has no external dependency, so an analysis request always
//! produces a valid result even with the model endpoint down.

use chrono::{DateTime, Utc};

use shared::{
    AnalysisResult, AnalysisSource, DecisionFactors, OpportunityContext, Recommendation,
    RecommendedAction, RequesterProfile,
};

const BASE_SCORE: f64 = 50.0;
const CODE_MATCH_BONUS: f64 = 8.0;
const SET_ASIDE_MATCH_BONUS: f64 = 5.0;
const TIGHT_DEADLINE_PENALTY: f64 = 8.0;
const AMPLE_DEADLINE_BONUS: f64 = 12.0;
const TIGHT_DEADLINE_DAYS: i64 = 10;
const AMPLE_DEADLINE_DAYS: i64 = 30;
/// Confidence ceiling for degraded-mode results.
const FALLBACK_CONFIDENCE: f64 = 50.0;
const TITLE_EXCERPT_LIMIT: usize = 100;

/// Score an opportunity without the model.
///
/// The reference time is injected rather than read from the clock, so
/// identical inputs always yield the identical result. A deadline already
/// in the past counts as fewer than ten days away.
pub fn fallback_analysis(
    ctx: &OpportunityContext,
    profile: Option<&RequesterProfile>,
    now: DateTime<Utc>,
) -> AnalysisResult {
    let mut relevance = BASE_SCORE;

    if let Some(profile) = profile {
        let code_match = profile
            .naics_codes
            .iter()
            .any(|code| code == &ctx.naics_code || code == &ctx.psc_code);
        if code_match {
            relevance += CODE_MATCH_BONUS;
        }

        if let Some(set_aside) = &ctx.set_aside {
            if profile.certifications.iter().any(|cert| cert == set_aside) {
                relevance += SET_ASIDE_MATCH_BONUS;
            }
        }
    }

    if let Some(deadline) = ctx.response_deadline {
        let days_left = (deadline - now).num_days();
        if days_left < TIGHT_DEADLINE_DAYS {
            relevance -= TIGHT_DEADLINE_PENALTY;
        } else if days_left > AMPLE_DEADLINE_DAYS {
            relevance += AMPLE_DEADLINE_BONUS;
        }
    }

    let title_excerpt: String = ctx.title.chars().take(TITLE_EXCERPT_LIMIT).collect();

    AnalysisResult {
        executive_summary: format!(
            "Automated analysis unavailable for \"{title_excerpt}\". Review the full solicitation manually before deciding."
        ),
        relevance_score: relevance.clamp(0.0, 100.0),
        confidence_score: FALLBACK_CONFIDENCE,
        key_requirements: vec!["Manual analysis required".to_string()],
        decision_factors: DecisionFactors::default(),
        recommendation: Recommendation {
            action: RecommendedAction::Investigate,
            reasoning: "Automated analysis unavailable".to_string(),
            next_steps: "Manual review needed".to_string(),
        },
        source: AnalysisSource::Fallback,
        processing_time: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(deadline_days_from_now: Option<i64>, now: DateTime<Utc>) -> OpportunityContext {
        OpportunityContext {
            notice_id: "W912DY-25-R-0041".to_string(),
            title: "Facility HVAC sustainment".to_string(),
            description: "Sustainment services".to_string(),
            agency: "USACE".to_string(),
            naics_code: "238220".to_string(),
            naics_description: "Plumbing and HVAC contractors".to_string(),
            psc_code: "Z2AA".to_string(),
            set_aside: Some("8(a)".to_string()),
            response_deadline: deadline_days_from_now.map(|days| now + Duration::days(days)),
            place_of_performance: "Huntsville, AL".to_string(),
        }
    }

    fn matching_profile() -> RequesterProfile {
        RequesterProfile {
            company_name: "Gulf Mechanical".to_string(),
            naics_codes: vec!["238220".to_string()],
            certifications: vec!["8(a)".to_string()],
            capabilities: vec!["HVAC".to_string()],
            past_performance_summary: None,
            preferred_contract_range: None,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_full_match_with_ample_deadline_scores_75() {
        // base 50 + code match 8 + set-aside match 5 + ample deadline 12
        let now = fixed_now();
        let result = fallback_analysis(&record(Some(45), now), Some(&matching_profile()), now);
        assert_eq!(result.relevance_score, 75.0);
        assert_eq!(result.confidence_score, 50.0);
        assert_eq!(result.source, AnalysisSource::Fallback);
    }

    #[test]
    fn test_tight_deadline_without_profile_scores_42() {
        let now = fixed_now();
        let result = fallback_analysis(&record(Some(5), now), None, now);
        assert_eq!(result.relevance_score, 42.0);
        assert_eq!(result.confidence_score, 50.0);
        assert_eq!(result.source, AnalysisSource::Fallback);
    }

    #[test]
    fn test_no_deadline_no_profile_is_base_score() {
        let now = fixed_now();
        let result = fallback_analysis(&record(None, now), None, now);
        assert_eq!(result.relevance_score, 50.0);
    }

    #[test]
    fn test_mid_window_deadline_has_no_adjustment() {
        let now = fixed_now();
        let result = fallback_analysis(&record(Some(20), now), None, now);
        assert_eq!(result.relevance_score, 50.0);
    }

    #[test]
    fn test_past_deadline_counts_as_tight() {
        let now = fixed_now();
        let result = fallback_analysis(&record(Some(-3), now), None, now);
        assert_eq!(result.relevance_score, 42.0);
    }

    #[test]
    fn test_psc_code_also_matches_profile_interests() {
        let now = fixed_now();
        let mut profile = matching_profile();
        profile.naics_codes = vec!["Z2AA".to_string()];
        profile.certifications.clear();
        let result = fallback_analysis(&record(None, now), Some(&profile), now);
        assert_eq!(result.relevance_score, 58.0);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let now = fixed_now();
        let ctx = record(Some(45), now);
        let profile = matching_profile();
        let first = fallback_analysis(&ctx, Some(&profile), now);
        let second = fallback_analysis(&ctx, Some(&profile), now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_canned_fields() {
        let now = fixed_now();
        let result = fallback_analysis(&record(None, now), None, now);
        assert!(result.executive_summary.contains("Facility HVAC sustainment"));
        assert!(result.executive_summary.contains("manually"));
        assert_eq!(result.recommendation.action, RecommendedAction::Investigate);
        assert_eq!(result.recommendation.reasoning, "Automated analysis unavailable");
        assert_eq!(result.recommendation.next_steps, "Manual review needed");
        assert_eq!(result.key_requirements, vec!["Manual analysis required"]);
    }

    #[test]
    fn test_score_stays_in_range() {
        let now = fixed_now();
        // All bonuses stacked still stays well inside the band; check the
        // clamp anyway with the extremes the heuristic can produce.
        let best = fallback_analysis(&record(Some(60), now), Some(&matching_profile()), now);
        assert!(best.relevance_score <= 100.0);
        let worst = fallback_analysis(&record(Some(1), now), None, now);
        assert!(worst.relevance_score >= 0.0);
    }
}
