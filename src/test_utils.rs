#[cfg(test)]
pub mod fixtures {
    /// Subject of each fixture question, in document order. Question N covers
    /// `QUESTION_TOPICS[N - 1]`.
    pub const QUESTION_TOPICS: [&str; 10] = [
        "gravity",
        "volcanoes",
        "photosynthesis",
        "fractions",
        "planets",
        "magnets",
        "oceans",
        "dinosaurs",
        "electricity",
        "rainbows",
    ];

    const FIXTURE_EMOJIS: [&str; 5] = ["🔢", "🧮", "🎯", "🌟", "🏆"];

    /// A well-formed quiz document in the exact template the generator is
    /// prompted to follow: every block has four dash-prefixed options, a
    /// `Correct Answer: B` marker and an explanation.
    pub fn sample_quiz_markdown(question_count: usize) -> String {
        let mut text = String::from("## 📝 Your Medium Quiz on Science!\n");

        for i in 1..=question_count {
            let topic = QUESTION_TOPICS[(i - 1) % QUESTION_TOPICS.len()];
            let emoji = FIXTURE_EMOJIS[(i - 1) % FIXTURE_EMOJIS.len()];
            text.push_str(&format!(
                "\n### Question {i} {emoji}\n\
                 **What should every curious student know about {topic}?**\n\n\
                 - A) A plausible distractor about {topic}\n\
                 - B) The correct answer about {topic}\n\
                 - C) Another distractor about {topic}\n\
                 - D) A final distractor about {topic}\n\n\
                 ✅ **Correct Answer: B**\n\n\
                 > 💡 **Explanation:** Because {topic} works exactly this way.\n\n\
                 ---\n"
            ));
        }

        text.push_str(
            "\n## 🎊 Quiz Complete!\n\n\
             **Great job working through this quiz!** Keep learning and growing! 🌟\n",
        );
        text
    }

    /// A document whose blocks parse but whose answer markers are missing,
    /// which must fail validation.
    pub fn quiz_markdown_without_answers(question_count: usize) -> String {
        let full = sample_quiz_markdown(question_count);
        crate::services::quiz_parser::strip_answers(&full)
    }
}
