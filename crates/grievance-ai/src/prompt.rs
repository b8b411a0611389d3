//! Classification prompt and the generative-language request/response shapes.

use grievance_core::{Department, Priority};
use serde_json::{Value, json};

fn joined<T>(items: &[T], label: impl Fn(&T) -> &'static str) -> String {
    items.iter().map(label).collect::<Vec<_>>().join(", ")
}

/// Build the single-turn prompt asking the model to classify a grievance.
pub fn build_prompt(title: &str, description: &str) -> String {
    let priorities = joined(&Priority::ALL, |p| p.as_str());
    let departments = joined(&Department::ALL, |d| d.as_str());

    format!(
        "You are an assistant for a public grievance portal.\n\
         Analyse the grievance below and decide:\n\
         1. aiPriority: one of {priorities}.\n\
         2. category: the department that should handle it. It MUST be exactly one of: \
         {departments}. If the issue does not clearly fit, use \"Other\".\n\
         3. summary: a 20-30 word summary of the issue and its urgency.\n\
         \n\
         Grievance Title: \"{title}\"\n\
         Grievance Description: \"{description}\"\n\
         \n\
         Respond ONLY with a JSON object, no markdown fences:\n\
         {{\"aiPriority\": \"...\", \"category\": \"...\", \"summary\": \"...\"}}"
    )
}

/// Request body for a `generateContent` call carrying `prompt` as one user turn.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    })
}

/// Text of the first candidate in a `generateContent` response, trimmed.
pub fn extract_candidate_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")?
        .as_str()
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_every_department() {
        let prompt = build_prompt("Pothole", "Deep pothole on MG Road");
        for dept in Department::ALL {
            assert!(prompt.contains(dept.as_str()), "missing {dept}");
        }
        assert!(prompt.contains("Critical, High, Medium, Low"));
        assert!(prompt.contains("Grievance Title: \"Pothole\""));
        assert!(prompt.contains("Deep pothole on MG Road"));
        assert!(prompt.contains(r#"{"aiPriority": "...""#));
    }

    #[test]
    fn request_body_shape() {
        let body = request_body("hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn extracts_first_candidate() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "  {\"aiPriority\": \"High\"}\n"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        });
        assert_eq!(extract_candidate_text(&body), Some("{\"aiPriority\": \"High\"}"));
    }

    #[test]
    fn missing_candidate_is_none() {
        assert_eq!(extract_candidate_text(&json!({})), None);
        assert_eq!(extract_candidate_text(&json!({"candidates": []})), None);
        assert_eq!(
            extract_candidate_text(&json!({"candidates": [{"content": {"parts": [{"text": 5}]}}]})),
            None
        );
    }
}
