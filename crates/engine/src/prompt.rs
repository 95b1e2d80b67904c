//! Prompt construction
//!
//! Both prompts state the rubric verbatim. The analysis prompt additionally
//! embeds the full serialized history plus the latest input, and spells out
//! the behavioral contract: one question per turn, conversational tone,
//! early polite termination on a clear miss, completion only on sufficient
//! signal, and a single JSON object as output.

use qualify_core::{ChatMessage, QualificationCriteria};

fn rubric_section(criteria: &QualificationCriteria) -> String {
    format!(
        "Target Persona: {persona}\n\
         Minimum Budget: ${budget}\n\
         Timeline: {timeline} months\n\
         Key Problems to Identify: {problems}",
        persona = criteria.ideal_persona,
        budget = criteria.min_budget,
        timeline = criteria.max_timeline_months,
        problems = criteria.key_problems.join(", "),
    )
}

/// Prompt for the seed question generator
pub fn build_generator_prompt(criteria: &QualificationCriteria) -> String {
    format!(
        "You are an expert sales qualifier. Generate 3-5 qualifying questions \
         based on the following criteria:\n\n\
         {rubric}\n\n\
         The questions should be natural, conversational, and designed to \
         uncover if the lead meets these criteria without being interrogative.\n\
         Return ONLY a JSON array of strings. Example: [\"Question 1\", \"Question 2\"]",
        rubric = rubric_section(criteria),
    )
}

/// Prompt for one turn of conversation analysis
pub fn build_analysis_prompt(
    history: &[ChatMessage],
    latest_input: &str,
    criteria: &QualificationCriteria,
) -> String {
    // History may be empty on the very first turn; serialization failure is
    // impossible for these types but degrade to an empty list regardless.
    let history_json =
        serde_json::to_string(history).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are an expert sales qualifier for a business with the following criteria:\n\n\
         {rubric}\n\n\
         Analyze the conversation history and the latest user response.\n\n\
         History: {history}\n\
         Latest User Input: \"{latest}\"\n\n\
         Your goal is to politely and professionally qualify the lead based on these criteria.\n\
         - Ask ONE question at a time.\n\
         - Be conversational, not robotic.\n\
         - If the user's answers clearly indicate they do NOT fit the criteria \
         (e.g. way too low budget), politely end the qualification.\n\
         - If the user seems like a good fit, continue until you are confident.\n\n\
         If you have enough information to make a decision OR if the conversation \
         has reached a natural conclusion: mark \"is_complete\": true.\n\n\
         Return a single JSON object with the following structure:\n\
         {{\n\
           \"next_question\": \"The next response or question to the user\",\n\
           \"is_complete\": boolean,\n\
           \"score\": number (0-100, only if complete; 90+ for perfect fit, below 50 for bad fit),\n\
           \"status\": \"HOT\" | \"WARM\" | \"COLD\" (only if complete),\n\
           \"summary\": \"Brief summary of the lead's key data points (Budget, Timeline, Problems)\" (only if complete)\n\
         }}",
        rubric = rubric_section(criteria),
        history = history_json,
        latest = latest_input,
    )
}
