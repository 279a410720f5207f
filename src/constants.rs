// UI Constants
pub const APP_TITLE: &str = "RWANDA TOUR AI";
pub const GUIDE_NAME: &str = "Tura";
pub const PAGE_SCROLL_STEP: u16 = 5;

// API Constants
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IDEA_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const IMAGE_ASPECT_RATIO: &str = "16:9";
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

pub const SYSTEM_INSTRUCTION: &str = r#"You are "Tura", an intelligent and friendly AI Tour Guide designed to assist tourists visiting Rwanda and East Africa.

Your mission:
- Provide accurate, up-to-date, and engaging information about tourism destinations, national parks, hotels, transport, and local culture.
- Respond like a real human tour guide: helpful, polite, and enthusiastic.
- Always include practical travel tips such as prices (if known), best times to visit, weather, or local traditions.
- Support English, French, and Kinyarwanda responses automatically depending on the user's message.
- When you mention places, include nearby attractions or hidden gems.
- If users request directions, summarize key routes, public transport, or driving tips.
- When users ask about culture or history, answer in an inspiring and educational tone.
- Avoid political or sensitive topics and stay tourism-focused.
- Provide clear structured answers using short paragraphs or bullet points for readability.

You are part of RWANDA TOUR AI, an advanced tour assistant platform.
Every answer must sound professional, local, and trustworthy."#;

pub const INSPIRATION_PROMPT: &str = "Generate a unique and exciting travel destination idea.
Provide a name, a short, enticing description (2-3 sentences),
and a visually descriptive prompt for an image generation model to create a stunning,
photorealistic picture of the location. The image prompt should be detailed and evocative.";

// User-facing text
pub const GREETING: &str = "Muraho! I'm Tura, your personal guide from RWANDA TOUR AI. I'm here to help you explore the beauty of Rwanda and East Africa. Ask me anything about your trip, or press Ctrl+G for a unique travel idea!";
pub const CHAT_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const INSPIRATION_ERROR_MESSAGE: &str =
    "Sorry, I had trouble finding inspiration. Please try again later.";
pub const INSPIRATION_REQUEST_TEXT: &str = "Spark some inspiration for me!";
pub const INSPIRATION_PLACEHOLDER_TEXT: &str = "Let me think of a wonderful place for you...";
pub const SESSION_MISSING_MESSAGE: &str =
    "Chat session not initialized. Please restart the application.";
pub const NO_IMAGE_MESSAGE: &str = "No inspiration image to open yet. Press Ctrl+G for one!";
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "GEMINI_API_KEY (or API_KEY) environment variable not set.";
