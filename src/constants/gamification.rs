//! Cosmetic tables shared by prompt building and the results view.

use rand::seq::SliceRandom;

pub const ENCOURAGEMENTS: [&str; 6] = [
    "You're leveling up your brain! 🧠✨",
    "Every question makes you smarter! 💪",
    "Knowledge is your superpower! ⚡",
    "You've got this! 🚀",
    "Learning looks good on you! 😎",
    "Future genius in the making! 🌟",
];

/// Decorative tags rotated through the question headings of the prompt
/// template. Purely cosmetic.
pub const QUESTION_EMOJIS: [&str; 15] = [
    "🔢", "🧮", "🎯", "🌟", "🏆", "📚", "💡", "🔬", "🌍", "🎨", "🚀", "⭐", "🎓", "🧠", "✨",
];

pub fn random_encouragement() -> &'static str {
    ENCOURAGEMENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ENCOURAGEMENTS[0])
}
