//! Static scenario content: persona profiles and their training scripts.
//! Plain data behind a lookup, no logic.

use avatar_session_types::scenario::{
    Accent, ScenarioId, ScenarioProfile, ScenarioScript, ScriptSection,
};

const ALEX_EMBED_URL: &str = "https://labs.heygen.com/guest/streaming-embed?share=eyJxdWFsaXR5IjoiaGlnaCIsImF2YXRhck5hbWUiOiJEZXh0ZXJfRG9jdG9yX1N0YW5kaW5nMl9w%0D%0AdWJsaWMiLCJwcmV2aWV3SW1nIjoiaHR0cHM6Ly9maWxlczIuaGV5Z2VuLmFpL2F2YXRhci92My84%0D%0AOGQ0MjFmOTM5MDQ0YmIwOGQ4OTJlODMzOTMxOTQ4Yl80NTU5MC9wcmV2aWV3X3RhbGtfMS53ZWJw%0D%0AIiwibmVlZFJlbW92ZUJhY2tncm91bmQiOmZhbHNlLCJrbm93bGVkZ2VCYXNlSWQiOiIyZmZkZGQ1%0D%0AMjhiYWE0MTFkOWNkY2Q5NzJiMzhkNTM1MCIsInVzZXJuYW1lIjoiNGE2MjIwYWQyNjUwNDFkNWI4%0D%0ANTk2NjZjMDNiY2FmZjcifQ%3D%3D&inIFrame=1";

const ENA_EMBED_URL: &str = "https://labs.heygen.com/guest/streaming-embed?share=eyJxdWFsaXR5IjoiaGlnaCIsImF2YXRhck5hbWUiOiJKdWR5X0RvY3Rvcl9TaXR0aW5nMl9wdWJs%0D%0AaWMiLCJwcmV2aWV3SW1nIjoiaHR0cHM6Ly9maWxlczIuaGV5Z2VuLmFpL2F2YXRhci92My8wMjJj%0D%0AZGIxZjA3OTE0ZTc1ODg3YzY5M2YwYzVmOTdkZF80NTY1MC9wcmV2aWV3X3RhbGtfMS53ZWJwIiwi%0D%0AbmVlZFJlbW92ZUJhY2tncm91bmQiOmZhbHNlLCJrbm93bGVkZ2VCYXNlSWQiOiIxNDNlYThhMDYw%0D%0AOTk0Y2U3YTU1ODc0NjViMzAxOGIzYiIsInVzZXJuYW1lIjoiNGE2MjIwYWQyNjUwNDFkNWI4NTk2%0D%0ANjZjMDNiY2FmZjcifQ%3D%3D&inIFrame=1";

const DAT_EMBED_URL: &str = "https://labs.heygen.com/guest/streaming-embed?share=eyJxdWFsaXR5IjoiaGlnaCIsImF2YXRhck5hbWUiOiJCcnlhbl9JVF9TaXR0aW5nX3B1YmxpYyIs%0D%0AInByZXZpZXdJbWciOiJodHRwczovL2ZpbGVzMi5oZXlnZW4uYWkvYXZhdGFyL3YzLzMzYzlhYzRh%0D%0AZWFkNDRkZmM4YmMwMDgyYTM1MDYyYTcwXzQ1NTgwL3ByZXZpZXdfdGFsa18zLndlYnAiLCJuZWVk%0D%0AUmVtb3ZlQmFja2dyb3VuZCI6ZmFsc2UsImtub3dsZWRnZUJhc2VJZCI6Ijk0Nzc5YWRhMjkwOTRk%0D%0AZTA4ZjZjYzY4ZDAzNjU4MzRjIiwidXNlcm5hbWUiOiI0YTYyMjBhZDI2NTA0MWQ1Yjg1OTY2NmMw%0D%0AM2JjYWZmNyJ9&inIFrame=1";

/// The persona the selected scenario is rehearsed against.
pub fn scenario_profile(id: ScenarioId) -> ScenarioProfile {
    match id {
        ScenarioId::Alex => ScenarioProfile {
            id,
            doctor_name: "Dr. Alex".to_string(),
            specialty: "Cardiologist".to_string(),
            description: "Busy extremely sharp KOL Cardiologist".to_string(),
            embed_url: ALEX_EMBED_URL.to_string(),
        },
        ScenarioId::Ena => ScenarioProfile {
            id,
            doctor_name: "Dr. Ena".to_string(),
            specialty: "General Medicine".to_string(),
            description: "Warm HCP meeting for the first time".to_string(),
            embed_url: ENA_EMBED_URL.to_string(),
        },
        ScenarioId::Dat => ScenarioProfile {
            id,
            doctor_name: "Dr. Dat".to_string(),
            specialty: "Clinical Research".to_string(),
            description: "Clinical Trial PI with enrollment challenges".to_string(),
            embed_url: DAT_EMBED_URL.to_string(),
        },
    }
}

fn section(title: &str, accent: Accent, content: &str) -> ScriptSection {
    ScriptSection {
        title: title.to_string(),
        accent,
        content: content.to_string(),
    }
}

/// The scripted conversation for the selected scenario.
pub fn training_script(id: ScenarioId) -> ScenarioScript {
    match id {
        ScenarioId::Alex => ScenarioScript {
            title: "Field Medical In-Person Script - Tafamidis Dose Comparison (Dr. Alex, Cardiologist)".to_string(),
            sections: vec![
                section(
                    "Field Medical Opening (Warm & Focused):",
                    Accent::Blue,
                    "\"Hi Dr. Alex, I appreciate you making time today. I wanted to briefly walk you through the data comparing the 80 mg and 20 mg doses of tafamidis in patients with ATTR-CM, especially now that we have long-term outcomes from the ATTR-ACT study and its extension.\"",
                ),
                section(
                    "1. Study Snapshot (Set Context):",
                    Accent::Green,
                    "\"As you may recall, ATTR-ACT enrolled both wild-type and hereditary ATTR-CM patients and randomized them 2:1:2 to tafamidis 80 mg, 20 mg, or placebo. The original trial wasn't powered to compare doses directly, but longer-term follow-up now gives us valuable insights.\"",
                ),
                section(
                    "2. Mortality & Hospitalization Outcomes:",
                    Accent::Red,
                    "\"Over a median follow-up of 51 months, tafamidis 80 mg was associated with a 30% relative reduction in all-cause mortality compared to 20 mg. That survival benefit held even after adjusting for age, NT-proBNP, and functional status. Both doses reduced CV-related hospitalizations, but the impact was numerically stronger and emerged earlier with 80 mg.\"",
                ),
                section(
                    "3. Functional and QoL Impact:",
                    Accent::Orange,
                    "\"Patients on tafamidis 80 mg maintained about 75 meters more on the 6-minute walk test at Month 30 versus placebo, similar to 20 mg, but the effect was seen as early as Month 6 with 80 mg, whereas it took longer to emerge with 20 mg. Same trend with quality of life: the decline in KCCQ-OS score was significantly less with both doses, but earlier and more sustained with 80 mg.\"",
                ),
                section(
                    "4. Biomarker Differences:",
                    Accent::Purple,
                    "\"We also saw greater transthyretin stabilization at Month 1 with 80 mg, nearly 88% of patients vs. 83% with 20 mg. And NT-proBNP levels increased significantly less with 80 mg over time. Troponin I trended lower as well, though not statistically significant when comparing the two doses directly.\"",
                ),
                section(
                    "5. Safety Overview:",
                    Accent::Teal,
                    "\"Both doses were well tolerated, and there were no dose-related safety concerns even with longer-term use. Rates of adverse events, discontinuation, and serious TEAEs were similar across groups.\"",
                ),
                section(
                    "6. When Dr. Alex Asks: \"How does this impact my patients?\"",
                    Accent::Indigo,
                    "\"Great question. For your patients with ATTR-CM, especially those with NYHA Class II or III symptoms, elevated NT-proBNP, or declining function, the data support that tafamidis 80 mg can offer earlier, stronger, and more sustained protection compared to 20 mg. Even though the 80 mg group in the study included older patients with more advanced disease, they still had better survival outcomes. So the 80 mg dose may be especially important when time and trajectory matter.\"",
                ),
                section(
                    "Field Medical Closing (Warm & Professional):",
                    Accent::Gray,
                    "\"Dr. Alex, I hope this overview helps inform your clinical decision-making. The data really underscore the importance of optimal dosing from the start. I'd be happy to discuss any specific patient scenarios or provide additional data as needed. Thank you for your time and expertise in caring for these patients.\"",
                ),
            ],
        },
        ScenarioId::Ena => ScenarioScript {
            title: "Field Medical Introduction Script - First Meeting (Dr. Ena, General Medicine)".to_string(),
            sections: vec![
                section(
                    "Start of Meeting:",
                    Accent::Blue,
                    "\"Hi Dr. Ena, thank you for taking the time to meet with me today. I really appreciate it. I'm [Name], part of the [Company] Medical Affairs team, covering [Region]. I have a background in [PhD/PharmD/Nursing] with a focus in oncology and have recently transitioned into the Field Medical role here.\"",
                ),
                section(
                    "Clarifying the Purpose:",
                    Accent::Green,
                    "\"The reason I reached out is just to introduce myself and better understand what you're focused on clinically and academically. My role is entirely non-promotional; I'm here to support scientific exchange and act as a resource, especially as new data or trials become available.\"",
                ),
                section(
                    "Engaging the HCP:",
                    Accent::Purple,
                    "\"Would it be alright if I asked a few questions to learn more about your work and what's top of mind for you right now?\" (Wait for approval, then ask questions like: \"Are there specific tumor types you're most focused on?\" \"Are you currently involved in any clinical trials or collaborative research?\" \"What are some of the biggest challenges you're seeing in treating your patient population?\")",
                ),
                section(
                    "Tailored Sharing:",
                    Accent::Orange,
                    "\"Based on what you shared, you might be interested in a [brief mention of a study/trial]. I'd be happy to send more detailed information your way or walk through it at a future time if it's of interest.\"",
                ),
                section(
                    "Closing the Meeting:",
                    Accent::Teal,
                    "\"Thanks again for taking the time today. It's great to meet you and learn more about your work. Would it be alright if I followed up occasionally with updates that align with your interests, like new congress abstracts or trial information? And if you ever have questions or need materials for discussions or education, feel free to reach out. I'll make sure to get you what you need.\"",
                ),
            ],
        },
        ScenarioId::Dat => ScenarioScript {
            title: "Field Medical Investigative Script - Clinical Trial Enrollment (Dr. Dat, Clinical Research)".to_string(),
            sections: vec![
                section(
                    "Opening the Conversation:",
                    Accent::Blue,
                    "\"Dr. Dat, thank you for making the time. I appreciate it. My goal today is to understand the specific challenges you're facing so I can accurately report them and we can find a solution together. To start, could you tell me a bit more about how enrollment has been trending from your perspective?\"",
                ),
                section(
                    "Investigating Consent Hurdles:",
                    Accent::Red,
                    "\"That's a crucial insight, thank you. When you mention 'hurdles with consent,' what specific feedback are you hearing from patients or their families during the consent discussion? What are their primary reservations?\"",
                ),
                section(
                    "Investigating Trial Design & Arms:",
                    Accent::Orange,
                    "\"I see. A demanding visit schedule is a significant practical barrier. I'll be sure to highlight that. Moving from the logistics to the science of the trial, are you getting any feedback on the study design itself? For example, any thoughts on the treatment arms?\"",
                ),
                section(
                    "Investigating Screening Process:",
                    Accent::Purple,
                    "\"Thank you, that's another critical point. Patient perception of the comparator arm is key. So far, we've discussed the challenges once a patient is identified. Taking a step back, how has the screening process been? Are you finding that the eligibility criteria are impacting the number of potential candidates you can even approach for the trial?\"",
                ),
                section(
                    "Summarizing and Closing:",
                    Accent::Green,
                    "\"Dr. Dat, this has been incredibly helpful. To ensure I've captured this correctly, the primary barriers are: the significant patient burden from the intensive visit and biopsy schedule, patient hesitation due to concerns about the comparator arm, and the narrow biomarker criteria leading to a high number of screen failures. I will take these precise points back to our clinical development and operations teams this week. This is exactly the kind of field insight we need to improve our trials. I appreciate your frankness.\"",
                ),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_has_a_profile_and_a_script() {
        for id in [ScenarioId::Alex, ScenarioId::Ena, ScenarioId::Dat] {
            let profile = scenario_profile(id);
            assert_eq!(profile.id, id);
            assert!(profile.embed_url.starts_with("https://labs.heygen.com/"));

            let script = training_script(id);
            assert!(!script.title.is_empty());
            assert!(!script.sections.is_empty());
            assert!(script.sections.iter().all(|s| !s.content.is_empty()));
        }
    }

    #[test]
    fn alex_script_covers_the_full_call_structure() {
        let script = training_script(ScenarioId::Alex);
        assert_eq!(script.sections.len(), 8);
        assert!(script.sections[0].title.contains("Opening"));
        assert!(script.sections.last().unwrap().title.contains("Closing"));
    }
}
