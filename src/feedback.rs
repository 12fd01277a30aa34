use rand::seq::SliceRandom;

pub const DAILY_TIPS: [&str; 5] = [
    "🚲 Yesterday you rode a motorbike for 8 km. Cycling the short stretches saves about 0.8 kg CO₂!",
    "⚡ Switching off your room's lights for 30 minutes while you're out saves about 0.07 kg CO₂ a day.",
    "🥗 Swapping one meat meal for vegetables cuts 1.6 kg CO₂, as much as a day of cycling!",
    "💧 Showers under 7 minutes save a lot of water and heating energy.",
    "🛍️ Taking a cloth bag to school instead of a plastic one saves 0.082 kg CO₂ every day.",
];

pub const FALLBACK_TIP: &str =
    "🚲 Try cycling or walking a short trip today to save some CO₂!";

/// Rule-based reaction to a freshly logged day.
pub fn feedback_message(score: u8) -> &'static str {
    if score >= 80 {
        "🌟 Excellent! You lived very green today. Keep it up!"
    } else if score >= 60 {
        "👍 Good! You're improving. Try cutting one more small habit tomorrow."
    } else if score >= 40 {
        "🌱 Not bad! Every small step counts. Try walking or skipping plastic tomorrow."
    } else {
        "💡 No worries! Knowing is the first step. Try one small change tomorrow."
    }
}

/// Stands in for the model's personalised feedback when it is unavailable.
pub fn fallback_feedback(score: u8) -> &'static str {
    if score >= 80 {
        "🌟 Excellent! You lived very green today. Keep these good habits going!"
    } else {
        "🌱 You're improving every day. Try cutting one more high-emission activity!"
    }
}

pub fn modal_title(score: u8) -> &'static str {
    if score >= 80 {
        "You lived very green today! 🌟"
    } else if score >= 60 {
        "You're on the way up 👍"
    } else {
        "Every small step counts 🌱"
    }
}

pub fn random_tip() -> &'static str {
    DAILY_TIPS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_TIP)
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning ☀️"
    } else if hour < 18 {
        "Good afternoon 🌤️"
    } else {
        "Good evening 🌙"
    }
}

/// First `max_chars` characters of `text` followed by an ellipsis.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let short: String = text.chars().take(max_chars).collect();
    format!("🌍 {short}...")
}
