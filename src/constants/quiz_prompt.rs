//! Prompt templates for the quiz generator. The markdown template embedded
//! here is the contract the parser's marker patterns rely on: `### Question N`
//! headings, dash-prefixed lettered options, a `✅ **Correct Answer: X**`
//! marker and a `> 💡 **Explanation:**` block per question.

use crate::constants::gamification::QUESTION_EMOJIS;

/// Reading-level descriptor for the requested grade, used to pitch the
/// questions at the right age.
pub fn age_description(grade_level: Option<&str>) -> &'static str {
    let Some(grade) = grade_level else {
        return "a 14-year-old student";
    };
    if grade == "None (Skip)" {
        return "a 14-year-old student";
    }
    if grade == "Pre-K" {
        return "a Pre-K student (ages 3-5)";
    }
    if grade == "Kindergarten" {
        return "a Kindergarten student (ages 5-6)";
    }
    if grade.contains("1st") {
        return "a 1st grade student (ages 6-7)";
    }
    if grade.contains("2nd") {
        return "a 2nd grade student (ages 7-8)";
    }
    if grade.contains("3rd") {
        return "a 3rd grade student (ages 8-9)";
    }
    if grade.contains("4th") {
        return "a 4th grade student (ages 9-10)";
    }
    if grade.contains("5th") {
        return "a 5th grade student (ages 10-11)";
    }
    if grade.contains("6th") {
        return "a 6th grade student (ages 11-12)";
    }
    if grade.contains("7th") {
        return "a 7th grade student (ages 12-13)";
    }
    if grade.contains("8th") {
        return "an 8th grade student (ages 13-14)";
    }
    if grade.contains("9th") {
        return "a 9th grade student (ages 14-15)";
    }
    if grade.contains("10th") {
        return "a 10th grade student (ages 15-16)";
    }
    if grade.contains("11th") {
        return "an 11th grade student (ages 16-17)";
    }
    if grade.contains("12th") {
        return "a 12th grade student (ages 17-18)";
    }
    "a 14-year-old student"
}

/// Difficulty selectors may carry a decorating emoji ("Easy 🌱"); only the
/// first word goes into the prompt.
pub fn clean_difficulty(difficulty: &str) -> &str {
    difficulty.split_whitespace().next().unwrap_or("Medium")
}

fn grade_section(grade_level: Option<&str>) -> String {
    match grade_level {
        Some(grade) if grade != "None (Skip)" => format!("\nGrade Level: {}", grade),
        _ => String::new(),
    }
}

fn adaptive_section(topic: &str, weak_topics: &[String]) -> String {
    if weak_topics.is_empty() {
        return String::new();
    }
    let weak_topics_str = weak_topics.join(", ");
    format!(
        "\nADAPTIVE LEARNING NOTE:\n\
         The student has struggled with these topics recently: {weak_topics_str}\n\
         If any of these topics relate to {topic}, please include 1-2 gentle review questions \
         to help reinforce their understanding. Make these questions encouraging and supportive!\n"
    )
}

fn questions_template(num_questions: usize) -> String {
    let mut template = String::new();
    for i in 1..=num_questions {
        let emoji = QUESTION_EMOJIS[(i - 1) % QUESTION_EMOJIS.len()];
        template.push_str(&format!(
            "\n### Question {i} {emoji}\n\
             **[Question text here]**\n\n\
             - A) [Option A]\n\
             - B) [Option B]\n\
             - C) [Option C]\n\
             - D) [Option D]\n\n\
             ✅ **Correct Answer: [Single Letter A, B, C, or D]**\n\n\
             > 💡 **Explanation:** [Short, friendly explanation]\n\n\
             ---\n"
        ));
    }
    template
}

/// The full natural-language prompt for a topic quiz, including the adaptive
/// weak-topic section and the exact markdown template to fill in.
pub fn build_topic_quiz_prompt(
    topic: &str,
    difficulty: &str,
    grade_level: Option<&str>,
    weak_topics: &[String],
    num_questions: usize,
) -> String {
    let age = age_description(grade_level);
    let difficulty = clean_difficulty(difficulty);
    let grade = grade_section(grade_level);
    let adaptive = adaptive_section(topic, weak_topics);
    let template = questions_template(num_questions);

    format!(
        "You are a fun and encouraging teacher creating a quiz for {age}.\n\n\
         Create a {num_questions}-question multiple-choice quiz about: {topic}\n\
         Difficulty level: {difficulty}{grade}\n\
         {adaptive}\n\
         Guidelines:\n\
         - Make questions appropriate for {age}\n\
         - For Easy: Basic concepts, straightforward questions\n\
         - For Medium: Requires some thinking, applies concepts\n\
         - For Hard: Challenging questions that require deeper understanding\n\
         - Use friendly, encouraging language with emojis\n\
         - Make it fun and engaging!\n\n\
         CRITICAL QUESTION FORMAT RULES:\n\
         - Each question MUST be a real question that ends with a question mark (?)\n\
         - Questions should start with words like: What, Which, Who, When, Where, Why, How, Is, Are, Do, Does, Can, etc.\n\
         - DO NOT write definitions, statements, or descriptions as questions\n\
         - BAD example: \"The Libertarian Party believes in limited government\" (this is a statement, NOT a question)\n\
         - GOOD example: \"What is a core belief of the Libertarian Party?\" (this IS a proper question)\n\n\
         IMPORTANT: You MUST follow this EXACT format for each question. Do not deviate!\n\n\
         ## 📝 Your {difficulty} Quiz on {topic}!\n\
         {template}\
         ## 🎊 Quiz Complete!\n\n\
         **Great job working through this quiz!** Keep learning and growing! 🌟\n"
    )
}

/// The image-quiz variant: same template, plus the leading detected-topic
/// marker line the parser looks for.
pub fn build_image_quiz_prompt(
    difficulty: &str,
    grade_level: Option<&str>,
    num_questions: usize,
) -> String {
    let age = age_description(grade_level);
    let difficulty = clean_difficulty(difficulty);
    let grade = grade_section(grade_level);
    let template = questions_template(num_questions);

    format!(
        "You are analyzing an educational image to create a quiz for {age}.\n\n\
         First, describe what you see in this image briefly (1-2 sentences).\n\
         Then create a {num_questions}-question multiple-choice quiz based on what's shown in the image.\n\
         Difficulty level: {difficulty}{grade}\n\n\
         Guidelines:\n\
         - Make questions directly related to what's visible in the image\n\
         - Questions should test understanding of the image content\n\
         - Make questions appropriate for {age}\n\
         - Use friendly, encouraging language with emojis\n\
         - Make it fun and engaging!\n\n\
         CRITICAL: Each question MUST end with a question mark (?) and be a real question.\n\n\
         Start your response with:\n\
         **📸 Image Topic: [Brief description of what the image shows]**\n\n\
         Then format the quiz EXACTLY like this:\n\n\
         ## 📝 Your {difficulty} Quiz!\n\
         {template}\
         ## 🎊 Quiz Complete!\n\n\
         **Great job working through this quiz!** Keep learning and growing! 🌟\n"
    )
}
