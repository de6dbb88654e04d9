pub const COUNTRY_SYSTEM_PROMPT: &str = "Your task is to prepare a summary of informations about given country from economic perspective. \
Omit informations about culture and history of the given country. \
The summary is intended to be purely informative. \
Do not use suggestions, commands or prohibitions. \
The summary must fit within 260 characters.";

pub const ARTICLE_SYSTEM_PROMPT: &str = "Your task is to prepare a summary of the given article from economic perspective. \
The summary is intended to be purely informative. \
Do not use suggestions, commands or prohibitions. \
The summary must fit within 280 characters.";

pub const RISK_SYSTEM_PROMPT: &str = "Your task is to rate how dangerous the economic situation described in the given summary is. \
Answer with a single integer from 1 to 10, where 1 means stable and 10 means critical. \
Do not add any other text.";

pub const SUMMARY_INSTRUCTION: &str = "Provide me a summary of the following text: ";

const COUNTRY_QUESTION_PREFIX: &str = "Provide me information about economic situation of ";

pub fn country_question(country: &str) -> String {
    format!("{}{}", COUNTRY_QUESTION_PREFIX, country)
}

pub fn summary_request(content: &str) -> String {
    format!("{}{}", SUMMARY_INSTRUCTION, content)
}
