//! Prompt construction.
//!
//! The prompt language follows the mood: any CJK ideograph selects the
//! Chinese templates, everything else gets English.

use moodcomic_core::{PANEL_COUNT, Style};

/// Prompt language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLanguage {
    /// English templates
    English,
    /// Traditional Chinese templates
    Chinese,
}

impl PromptLanguage {
    /// Detect the language of `mood`.
    pub fn detect(mood: &str) -> Self {
        if mood.chars().any(is_cjk_ideograph) {
            PromptLanguage::Chinese
        } else {
            PromptLanguage::English
        }
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// System prompt for story generation.
pub fn system_prompt(language: PromptLanguage) -> &'static str {
    match language {
        PromptLanguage::English => {
            "You are an inventive comic writer. Every story you write is new: never reuse a \
             template, a previous plot, or stock characters. Every panel must stay on the \
             user's theme. Each panel needs a striking visual moment. Reply with JSON only."
        }
        PromptLanguage::Chinese => {
            "你是一位富有創意的漫畫編劇。每個故事都必須是全新的：不可套用模板、舊情節或固定角色。\
             每一格都必須緊扣用戶的主題，並帶有令人印象深刻的畫面。只回覆 JSON。"
        }
    }
}

/// Tonal directive for a style tag.
///
/// Unknown or absent tags get a generic directive.
pub fn style_directive(style: Option<&str>, language: PromptLanguage) -> &'static str {
    let Some(style) = style.and_then(Style::from_tag) else {
        return match language {
            PromptLanguage::English => {
                "Match the selected style with fitting elements and atmosphere."
            }
            PromptLanguage::Chinese => "配合所選風格，營造相應的元素與氛圍。",
        };
    };

    match language {
        PromptLanguage::English => english_directive(style),
        PromptLanguage::Chinese => chinese_directive(style),
    }
}

fn english_directive(style: Style) -> &'static str {
    match style {
        Style::Healing => "Lean into comfort and recovery: the story should leave the reader soothed and hopeful.",
        Style::Funny => "Make it funny: comic timing, wit and a light touch in every panel.",
        Style::Passion => "Charge it with passion: strong desire, open conflict and high emotional stakes.",
        Style::Mystery => "Build a mystery: hidden clues, unexplained events and a reveal at the end.",
        Style::Cute => "Keep it cute: gentle characters, small kindnesses and a warm glow.",
        Style::Dramatic => "Play it dramatic: rising tension, a clear climax and strong emotional beats.",
        Style::Whimsical => "Be whimsical: playful magic, odd delights and a sense of wonder.",
        Style::Elegant => "Keep it elegant: refined settings, graceful gestures and quiet beauty.",
        Style::Raw => "Keep it raw: honest, unfiltered feeling and real human vulnerability.",
        Style::Dreamy => "Make it dreamy: soft light, floating imagery and an otherworldly mood.",
        Style::Positive => "Stay uplifting: growth, small triumphs and a hopeful turn.",
        Style::Negative => "Go dark: struggle, unease and emotional weight without easy answers.",
        Style::Traditional => "Tell it classically: familiar structure, a moral thread and timeless images.",
        Style::AvantGarde => "Break the rules: impossible scenes, abstract logic and surreal leaps.",
        Style::Neutral => "Keep a balance: blend lightness and depth without tipping to either extreme.",
        Style::Romantic => "Make it romantic: closeness, longing and tender moments.",
        Style::Mysterious => "Wrap it in enigma: veiled figures, strange signs and an atmosphere of secrets.",
        Style::Adventurous => "Make it an adventure: a journey, real danger and a bold choice.",
        Style::Philosophical => "Make it reflective: each panel should raise a question about life or self.",
        Style::Surreal => "Follow dream logic: bent physics, shifting places and quiet impossibilities.",
    }
}

fn chinese_directive(style: Style) -> &'static str {
    match style {
        Style::Healing => "以治癒為核心：故事要讓讀者感到安慰與希望。",
        Style::Funny => "要好笑：每一格都有笑點、機智與輕鬆感。",
        Style::Passion => "充滿激情：強烈的渴望、正面的衝突與高漲的情緒。",
        Style::Mystery => "營造謎團：隱藏的線索、無法解釋的事件，結尾揭曉真相。",
        Style::Cute => "保持可愛：溫柔的角色、小小的善意與溫暖的氛圍。",
        Style::Dramatic => "戲劇化：張力逐步升高，有明確的高潮與情感衝擊。",
        Style::Whimsical => "奇趣幻想：俏皮的魔法、意外的驚喜與好奇心。",
        Style::Elegant => "優雅精緻：講究的場景、從容的姿態與安靜的美感。",
        Style::Raw => "真實直白：誠實未修飾的情感與人性的脆弱。",
        Style::Dreamy => "夢幻空靈：柔和的光線、漂浮的意象與超凡的氛圍。",
        Style::Positive => "積極向上：成長、小小的勝利與充滿希望的轉折。",
        Style::Negative => "黑暗深沉：掙扎、不安與沒有簡單答案的情感重量。",
        Style::Traditional => "經典敘事：熟悉的結構、道德的主線與永恆的畫面。",
        Style::AvantGarde => "打破常規：不可能的場景、抽象的邏輯與超現實的跳躍。",
        Style::Neutral => "平衡和諧：輕盈與深度兼具，不偏向任何極端。",
        Style::Romantic => "浪漫動人：親近、思念與溫柔的時刻。",
        Style::Mysterious => "神秘莫測：蒙面的身影、奇異的徵兆與秘密的氣息。",
        Style::Adventurous => "冒險刺激：一段旅程、真實的危險與勇敢的抉擇。",
        Style::Philosophical => "哲思反省：每一格都提出一個關於人生或自我的問題。",
        Style::Surreal => "超現實夢境：扭曲的物理、變換的場景與安靜的不可能。",
    }
}

/// Per-request uniqueness token: millisecond timestamp plus a random value.
pub fn nonce() -> String {
    format!(
        "{}-{:08x}",
        chrono::Utc::now().timestamp_millis(),
        rand::random::<u32>()
    )
}

/// User prompt embedding the mood, style directive and nonce.
pub fn user_prompt(mood: &str, style: Option<&str>, nonce: &str) -> String {
    let language = PromptLanguage::detect(mood);
    let directive = style_directive(style, language);

    match language {
        PromptLanguage::English => format!(
            "Theme: {mood}\n\
             Style: {style}\n\
             Request id: {nonce}\n\n\
             Write a brand-new {PANEL_COUNT}-panel comic about \"{mood}\". Do not reuse any \
             earlier story or template.\n\
             {directive}\n\n\
             Structure, with every panel tied to \"{mood}\":\n\
             - Panel 1: the opening situation\n\
             - Panel 2: a twist that changes everything\n\
             - Panel 3: the story bends past the expected\n\
             - Panel 4: an ending nobody saw coming\n\n\
             Narration: at most two sentences per panel. Duration: 5 to 7 seconds per panel.\n\
             Respond with a JSON object {{\"panels\": [...]}} holding exactly {PANEL_COUNT} \
             objects with the keys index, title, narration, dialogue, visual_prompt, \
             duration_sec and optionally sfx.",
            style = style.unwrap_or("healing"),
        ),
        PromptLanguage::Chinese => format!(
            "主題：{mood}\n\
             風格：{style}\n\
             請求編號：{nonce}\n\n\
             請以「{mood}」為主題創作一個全新的{PANEL_COUNT}格漫畫，不可重複任何舊故事或模板。\n\
             {directive}\n\n\
             結構（每一格都必須與「{mood}」直接相關）：\n\
             - 第1格：開場情境\n\
             - 第2格：改變一切的轉折\n\
             - 第3格：超出預期的發展\n\
             - 第4格：出人意料的結局\n\n\
             每格敘述最多兩句，時長5到7秒。\n\
             以 JSON 物件 {{\"panels\": [...]}} 回覆，內含剛好{PANEL_COUNT}個物件，鍵為 index、title、\
             narration、dialogue、visual_prompt、duration_sec，可選 sfx。",
            style = style.unwrap_or("治癒"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_cjk_mood() {
        assert_eq!(PromptLanguage::detect("地鐵奇遇"), PromptLanguage::Chinese);
        assert_eq!(PromptLanguage::detect("rainy 週末"), PromptLanguage::Chinese);
        assert_eq!(PromptLanguage::detect("rainy weekend"), PromptLanguage::English);
    }

    #[test]
    fn test_unknown_style_gets_generic_directive() {
        let generic = style_directive(None, PromptLanguage::English);
        assert_eq!(style_directive(Some("noir"), PromptLanguage::English), generic);
        assert_ne!(style_directive(Some("healing"), PromptLanguage::English), generic);
    }

    #[test]
    fn test_user_prompt_embeds_mood_directive_and_nonce() {
        let prompt = user_prompt("lost umbrella", Some("funny"), "123-abc");
        assert!(prompt.contains("lost umbrella"));
        assert!(prompt.contains("123-abc"));
        assert!(prompt.contains(style_directive(Some("funny"), PromptLanguage::English)));
    }

    #[test]
    fn test_chinese_prompt_for_chinese_mood() {
        let prompt = user_prompt("地鐵奇遇", Some("healing"), "n");
        assert!(prompt.contains("主題：地鐵奇遇"));
        assert!(prompt.contains(style_directive(Some("healing"), PromptLanguage::Chinese)));
    }

    #[test]
    fn test_nonces_differ() {
        assert_ne!(nonce(), nonce());
    }
}
