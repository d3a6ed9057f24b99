use crate::models::MoodFeedback;
use crate::reference::ReferenceData;
use rand::Rng;

pub const NO_TIP: &str = "No tip available";

/// Builds the message shown after a mood is picked: the first tip for that
/// mood plus one quote chosen at random.
pub fn compose_feedback<R: Rng + ?Sized>(
    mood: &str,
    reference: &ReferenceData,
    rng: &mut R,
) -> MoodFeedback {
    let mood = mood.trim().to_string();
    let tip = reference
        .wellness_tips
        .get(&mood.to_lowercase())
        .and_then(|tips| tips.first())
        .cloned()
        .unwrap_or_else(|| NO_TIP.to_string());

    let quote = if reference.quotes.is_empty() {
        String::new()
    } else {
        reference.quotes[rng.gen_range(0..reference.quotes.len())].clone()
    };

    let message = format!("Mood: {mood}\nTip: {tip}\nQuote: \"{quote}\" 🌿");
    MoodFeedback {
        mood,
        tip,
        quote,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn known_mood_uses_first_tip_and_a_listed_quote() {
        let reference = ReferenceData::default();
        let mut rng = StdRng::seed_from_u64(7);
        let feedback = compose_feedback(" Happy ", &reference, &mut rng);

        assert_eq!(feedback.mood, "Happy");
        assert_eq!(feedback.tip, reference.wellness_tips["happy"][0]);
        assert!(reference.quotes.contains(&feedback.quote));
        assert_eq!(
            feedback.message,
            format!(
                "Mood: Happy\nTip: {}\nQuote: \"{}\" 🌿",
                feedback.tip, feedback.quote
            )
        );
    }

    #[test]
    fn unknown_mood_falls_back_to_placeholder_tip() {
        let reference = ReferenceData::default();
        let mut rng = StdRng::seed_from_u64(1);
        let feedback = compose_feedback("confused", &reference, &mut rng);
        assert_eq!(feedback.tip, NO_TIP);
    }

    #[test]
    fn empty_quote_list_gives_empty_quote() {
        let reference = ReferenceData {
            quotes: Vec::new(),
            ..ReferenceData::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let feedback = compose_feedback("sad", &reference, &mut rng);
        assert_eq!(feedback.quote, "");
        assert!(feedback.message.ends_with("Quote: \"\" 🌿"));
    }

    #[test]
    fn every_quote_is_reachable() {
        let reference = ReferenceData::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            seen.insert(compose_feedback("calm", &reference, &mut rng).quote);
        }
        assert_eq!(seen.len(), reference.quotes.len());
    }
}
