use crate::models::trip::{Activity, ActivityKind, DayPlan};

pub const FALLBACK_DESTINATION: &str = "Kyoto, Japan";

/// Built-in two-day Kyoto plan served whenever generation fails. Day ids are
/// placeholders; the generator replaces them on every use.
pub fn fallback_days() -> Vec<DayPlan> {
    vec![
        DayPlan {
            id: "day-1".to_string(),
            date: "Day 1".to_string(),
            vibe_label: "Zen Awakening".to_string(),
            summary: "Ease into Kyoto with temple mornings, a slow lunch and lantern-lit streets."
                .to_string(),
            main_activities: vec![
                Activity::new(
                    "d1-a1",
                    "Fushimi Inari at Dawn",
                    "Walk the vermilion torii gates before the crowds arrive.",
                    "07:00",
                    ActivityKind::Main,
                    "Fushimi Inari Taisha",
                ),
                Activity::new(
                    "d1-a2",
                    "Nishiki Market Tasting",
                    "Graze on pickles, tamagoyaki and matcha sweets.",
                    "12:00",
                    ActivityKind::Food,
                    "Nishiki Market",
                ),
                Activity::new(
                    "d1-a3",
                    "Gion Evening Stroll",
                    "Wander lantern-lit lanes and spot maiko heading to appointments.",
                    "18:30",
                    ActivityKind::Social,
                    "Gion District",
                ),
            ],
            alternatives: vec![Activity::new(
                "d1-alt1",
                "Tea Ceremony",
                "A quiet hour learning the ritual of matcha.",
                "15:00",
                ActivityKind::Rest,
                "Camellia Garden Tea House",
            )],
        },
        DayPlan {
            id: "day-2".to_string(),
            date: "Day 2".to_string(),
            vibe_label: "Bamboo & Slow Hours".to_string(),
            summary: "Head west to Arashiyama for bamboo groves, river views and an onsen finish."
                .to_string(),
            main_activities: vec![
                Activity::new(
                    "d2-a1",
                    "Arashiyama Bamboo Grove",
                    "Stand inside towering green stalks as the wind moves through.",
                    "08:00",
                    ActivityKind::Main,
                    "Arashiyama",
                ),
                Activity::new(
                    "d2-a2",
                    "Riverside Tofu Lunch",
                    "Yudofu simmered tableside near the Katsura river.",
                    "12:30",
                    ActivityKind::Food,
                    "Saga-Arashiyama",
                ),
            ],
            alternatives: vec![Activity::new(
                "d2-alt1",
                "Monkey Park Iwatayama",
                "Short hike up to city views and snow monkeys.",
                "14:00",
                ActivityKind::Main,
                "Iwatayama",
            )],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_two_complete_days() {
        let days = fallback_days();

        assert_eq!(days.len(), 2);
        for day in &days {
            assert!(!day.main_activities.is_empty());
            assert_eq!(day.alternatives.len(), 1);
            assert!(day
                .main_activities
                .iter()
                .chain(day.alternatives.iter())
                .all(|a| a.kind().is_some()));
        }
    }
}
