//! Pattern-matching auto-responder for the AI assistant contact

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex_lite::Regex;

struct ResponsePattern {
    pattern: Regex,
    responses: &'static [&'static str],
}

static PATTERNS: Lazy<Vec<ResponsePattern>> = Lazy::new(|| {
    let entry = |pattern: &str, responses: &'static [&'static str]| ResponsePattern {
        pattern: Regex::new(pattern).expect("valid response pattern"),
        responses,
    };

    vec![
        entry(
            r"(?i)^hi|hello|hey",
            &[
                "Hello! How can I assist you today?",
                "Hi there! What can I help you with?",
                "Hey! Nice to hear from you. How can I be of service?",
                "Greetings! How may I help you today?",
            ],
        ),
        entry(
            r"(?i)how are you|how's it going",
            &[
                "I'm functioning perfectly, thank you for asking! How about you?",
                "I'm doing well, thanks! How can I assist you today?",
                "All systems operational! How are you doing?",
                "I'm great! Ready to help with whatever you need.",
            ],
        ),
        entry(
            r"(?i)thank|thanks",
            &[
                "You're welcome! Feel free to ask if you need anything else.",
                "Happy to help! Is there anything else you'd like to know?",
                "Anytime! Don't hesitate to reach out if you have more questions.",
                "My pleasure! I'm here if you need further assistance.",
            ],
        ),
        entry(
            r"(?i)bye|goodbye|see you",
            &[
                "Goodbye! Have a great day!",
                "See you later! Feel free to message anytime.",
                "Until next time! Take care.",
                "Bye for now! I'll be here when you need me.",
            ],
        ),
        entry(
            r"(?i)weather|forecast",
            &[
                "I don't have access to real-time weather data, but I'd be happy to chat about other topics!",
                "While I can't check the weather for you, I can help with many other questions you might have.",
                "I'm unable to access current weather information. Is there something else I can assist with?",
                "Weather forecasts are beyond my capabilities, but I'm here for other types of questions!",
            ],
        ),
        entry(
            r"(?i)who are you|what are you",
            &[
                "I'm an AI assistant designed to help answer questions and provide information.",
                "I'm a virtual assistant here to chat and assist you with various topics.",
                "Think of me as your friendly neighborhood AI, ready to help with information and conversation!",
                "I'm a conversational AI created to assist users like you with information and friendly chat.",
            ],
        ),
        entry(
            r"(?i)help|assist",
            &[
                "I'd be happy to help! What do you need assistance with?",
                "I'm here to assist! What questions do you have?",
                "How can I help you today? I'm ready to assist with information or just chat!",
                "Ready to help! What would you like assistance with today?",
            ],
        ),
        entry(
            r"(?i)joke|funny",
            &[
                "Why don't scientists trust atoms? Because they make up everything!",
                "Why did the scarecrow win an award? Because he was outstanding in his field!",
                "What's the best thing about Switzerland? I don't know, but the flag is a big plus!",
                "I'm reading a book on anti-gravity. It's impossible to put down!",
            ],
        ),
        entry(
            r"(?i)time|what time",
            &[
                "I don't have access to the current time, but your device should show it!",
                "I can't check the time for you, but your computer or phone clock should be accurate.",
                "Time queries are beyond my current capabilities, but your device likely shows the current time.",
                "While I can't tell you the exact time, your device's clock should be able to help!",
            ],
        ),
        entry(
            r"(?i)name|your name",
            &[
                "I'm MessageSphere's AI Assistant, ready to help!",
                "You can call me AI Assistant. How can I help you today?",
                "I'm the AI Assistant for MessageSphere. What can I do for you?",
                "I go by AI Assistant here on MessageSphere. How may I assist you?",
            ],
        ),
    ]
});

/// Fallback responses for when no pattern matches
static FALLBACK_RESPONSES: &[&str] = &[
    "That's interesting! Can you tell me more?",
    "I'm not quite sure how to respond to that. Could you elaborate?",
    "I'm still learning, but I'd be happy to chat about something else!",
    "Interesting point! What else would you like to discuss?",
    "I don't have specific information about that, but I'm happy to help with other topics.",
    "Thanks for sharing. Is there anything specific you'd like to know?",
    "I appreciate your message. How else can I assist you today?",
    "I'm afraid I don't have a specific response for that. Would you like to talk about something else?",
];

/// Pick a canned reply for the given message: first matching pattern bucket,
/// random response within it, fallback bucket otherwise.
pub fn ai_reply(message: &str) -> String {
    let mut rng = rand::thread_rng();
    for entry in PATTERNS.iter() {
        if entry.pattern.is_match(message) {
            if let Some(response) = entry.responses.choose(&mut rng) {
                return (*response).to_string();
            }
        }
    }

    FALLBACK_RESPONSES
        .choose(&mut rng)
        .map(|response| (*response).to_string())
        .unwrap_or_default()
}
