//! Post-session coaching tips
//!
//! Advice is a side channel: nothing here touches session state, and every
//! failure is recovered into a fallback string for the results view.

use crate::error::CoachError;
use crate::sim::SessionSummary;

/// Shown when a provider answers with nothing useful
pub const EMPTY_ADVICE: &str = "Keep practicing to generate more data for analysis!";

/// Shown when a provider fails or is not configured
pub const OFFLINE_ADVICE: &str =
    "The coach is currently offline or not configured. Please try again later.";

/// Accuracy (%) below which the player is told to slow down
const LOW_ACCURACY: f64 = 70.0;
/// Average reaction (ms) above which the player is told to speed up
const SLOW_REACTION_MS: f64 = 500.0;
/// Share of targets allowed to expire before it becomes the focus
const EXPIRED_SHARE: f64 = 0.25;

/// Produces coaching text for a finished session
pub trait Coach {
    fn coaching_tips(&self, summary: &SessionSummary) -> Result<String, CoachError>;
}

/// Request text for a remote text-generation provider. The native demo
/// prints it with `--prompt` so it can be piped to one.
pub fn build_prompt(summary: &SessionSummary) -> String {
    format!(
        "You are a world-class esports aim coach. Analyze the following player \
         statistics from a reflex aim training session:\n\
         \n\
         Score: {}\n\
         Accuracy: {:.1}%\n\
         Targets Hit: {}\n\
         Targets Missed (Background Clicks): {}\n\
         Targets Expired (Too Slow): {}\n\
         Average Reaction Time: {}ms\n\
         \n\
         Provide 3 short, punchy, and actionable tips to help them improve. \
         Focus on the specific weaknesses shown in the stats. \
         Keep the tone encouraging but professional. Format as a bulleted list.",
        summary.score,
        summary.accuracy,
        summary.clicked_targets,
        summary.missed_clicks,
        summary.targets_expired,
        summary.avg_reaction_time.round() as i64,
    )
}

/// Ask `coach` for tips, mapping every failure to displayable text
pub fn tips_or_fallback(coach: &dyn Coach, summary: &SessionSummary) -> String {
    match coach.coaching_tips(summary) {
        Ok(text) if text.trim().is_empty() => EMPTY_ADVICE.to_string(),
        Ok(text) => text,
        Err(CoachError::EmptyResponse) => EMPTY_ADVICE.to_string(),
        Err(e) => {
            log::error!("Error generating coaching tips: {}", e);
            OFFLINE_ADVICE.to_string()
        }
    }
}

/// Rule-based tips computed locally from the summary
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCoach;

impl Coach for OfflineCoach {
    fn coaching_tips(&self, summary: &SessionSummary) -> Result<String, CoachError> {
        if summary.clicks() == 0 && summary.total_targets == 0 {
            return Err(CoachError::EmptyResponse);
        }

        let mut tips: Vec<&str> = Vec::with_capacity(3);

        if summary.clicks() > 0 && summary.accuracy < LOW_ACCURACY {
            tips.push(
                "Accuracy first: you are clicking before you are on target. \
                 Slow down slightly and confirm the crosshair is inside the circle.",
            );
        }
        if summary.clicked_targets > 0 && summary.avg_reaction_time > SLOW_REACTION_MS {
            tips.push(
                "Work on first movement: start moving the moment a target appears \
                 instead of waiting for it to finish growing.",
            );
        }
        if summary.total_targets > 0
            && summary.targets_expired as f64 > summary.total_targets as f64 * EXPIRED_SHARE
        {
            tips.push(
                "Too many targets slipped away. Scan the whole screen and \
                 prioritise the ones that are already fading.",
            );
        }

        let fillers = [
            "Keep your wrist relaxed; tension makes flicks overshoot.",
            "Return your aim toward the centre between targets to shorten every flick.",
            "Play short sessions often rather than one long grind.",
        ];
        for filler in fillers {
            if tips.len() == 3 {
                break;
            }
            tips.push(filler);
        }

        Ok(tips
            .iter()
            .map(|tip| format!("- {}", tip))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(hits: u32, misses: u32, expired: u32, avg: f64) -> SessionSummary {
        let clicks = hits + misses;
        SessionSummary {
            score: 1234,
            total_targets: hits + expired,
            clicked_targets: hits,
            missed_clicks: misses,
            targets_expired: expired,
            accuracy: if clicks > 0 { hits as f64 / clicks as f64 * 100.0 } else { 0.0 },
            avg_reaction_time: avg,
            reaction_time_history: Vec::new(),
        }
    }

    struct Fixed(Result<String, CoachError>);

    impl Coach for Fixed {
        fn coaching_tips(&self, _summary: &SessionSummary) -> Result<String, CoachError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_prompt_contains_stats() {
        let prompt = build_prompt(&summary(3, 1, 2, 412.6));
        assert!(prompt.contains("Score: 1234"));
        assert!(prompt.contains("Accuracy: 75.0%"));
        assert!(prompt.contains("Targets Hit: 3"));
        assert!(prompt.contains("Background Clicks): 1"));
        assert!(prompt.contains("Too Slow): 2"));
        assert!(prompt.contains("Average Reaction Time: 413ms"));
    }

    #[test]
    fn test_fallbacks() {
        let s = summary(1, 0, 0, 300.0);
        assert_eq!(tips_or_fallback(&Fixed(Ok("  ".into())), &s), EMPTY_ADVICE);
        assert_eq!(
            tips_or_fallback(&Fixed(Err(CoachError::Request("timeout".into()))), &s),
            OFFLINE_ADVICE
        );
        assert_eq!(
            tips_or_fallback(&Fixed(Err(CoachError::NotConfigured)), &s),
            OFFLINE_ADVICE
        );
        assert_eq!(tips_or_fallback(&Fixed(Ok("- aim".into())), &s), "- aim");
    }

    #[test]
    fn test_boxed_provider_is_swappable() {
        let s = summary(5, 5, 0, 300.0);
        let mut coach: Box<dyn Coach> = Box::new(OfflineCoach);
        assert!(tips_or_fallback(coach.as_ref(), &s).starts_with("- Accuracy first"));
        coach = Box::new(Fixed(Err(CoachError::NotConfigured)));
        assert_eq!(tips_or_fallback(coach.as_ref(), &s), OFFLINE_ADVICE);
    }

    #[test]
    fn test_offline_coach_targets_weaknesses() {
        let tips = OfflineCoach
            .coaching_tips(&summary(2, 8, 10, 700.0))
            .unwrap();
        let lines: Vec<&str> = tips.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("- Accuracy first"));
        assert!(lines[1].starts_with("- Work on first movement"));
        assert!(lines[2].starts_with("- Too many targets"));
    }

    #[test]
    fn test_offline_coach_pads_to_three_tips() {
        let tips = OfflineCoach
            .coaching_tips(&summary(20, 1, 0, 250.0))
            .unwrap();
        assert_eq!(tips.lines().count(), 3);
        assert!(tips.lines().all(|l| l.starts_with("- ")));
    }

    #[test]
    fn test_offline_coach_empty_session() {
        let s = summary(0, 0, 0, 0.0);
        assert_eq!(OfflineCoach.coaching_tips(&s), Err(CoachError::EmptyResponse));
        assert_eq!(tips_or_fallback(&OfflineCoach, &s), EMPTY_ADVICE);
    }
}
