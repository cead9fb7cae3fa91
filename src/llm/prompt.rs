// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

/// Builds the instruction asking the model for an i18n bundle.
///
/// `languages` is free text as typed by the user (e.g. `en,vi` or
/// `English, German`), `sentences` is one source sentence per line.
pub fn build_translation_prompt(languages: &str, sentences: &str) -> String {
    let languages = languages.trim();
    let sentences = sentences.trim_end();
    format!(r#"Generate a JSON object with i18n keys for the given sentences, translating them into the following languages: {languages}.
The expected JSON format:

{{
  "eng": {{
    "meaningful_key": "English translation",
    ...
  }},
  "vie": {{
    "meaningful_key": "Vietnamese translation",
    ...
  }},
  ...
}}

Requirements:
- Map every requested language name (e.g. "English", "Vietnamese", "German") to its language code (e.g. "eng", "vie", "de") and use the code as the top-level key.
- Translate every sentence into every requested language accurately, keeping the original meaning. Do not add, drop or invent content.
- Give each sentence one concise, meaningful key written in English, and use the same key for that sentence in every language.
- Return only the JSON object, wrapped in a ```json fenced code block, with no explanation or any other text around it.

Sentences to translate, one per line:
```
{sentences}
```
"#)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn tst_prompt_embeds_languages_and_sentences() {
        let prompt = build_translation_prompt(" English, Vietnamese ", "Hello world\nSign in\n");
        assert!(prompt.contains("following languages: English, Vietnamese."));
        assert!(prompt.contains("```\nHello world\nSign in\n```"));
        assert!(prompt.contains("```json fenced code block"));
        assert!(prompt.contains("\"meaningful_key\": \"English translation\""));
    }
}
