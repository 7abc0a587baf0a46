//! End-to-end scenarios for the bot engine: text in, reply messages out.

use super::*;
use crate::bot::data::{parse_skills, parse_tempered, parse_weakness};
use std::collections::HashMap;

const WEAKNESS_IMAGE: &str = "https://example.com/weakness.jpg";
const TEMPERED_IMAGE: &str = "https://example.com/tempered.jpg";

fn fixture_dataset() -> Dataset {
    Dataset {
        skills: parse_skills(
            r#"[
                {"スキル名": "攻撃", "効果": "攻撃力UP", "最大レベル": 7,
                 "レベル別効果": [{"レベル": 2, "効果": "攻撃力+6"}, {"レベル": 1, "効果": "攻撃力+3"}],
                 "装飾品": [{"装飾品名": "攻撃珠", "装飾品Lv": 1}],
                 "装備": [
                    {"防具名": "チャタヘルム", "スキルレベル": 2, "スロット": [3]},
                    {"防具名": "ドシャグマメイル", "スキルレベル": 3, "スロット": [1, 1]}
                 ]},
                {"スキル名": "見切り", "効果": "会心率UP", "最大レベル": 5,
                 "装飾品": [{"装飾品名": "達人珠", "装飾品Lv": 2}]},
                {"スキル名": "ガード性能", "効果": "ガード時の仰け反り軽減", "最大レベル": 5,
                 "装備": [{"防具名": "バーラハーラアーム", "スキルレベル": 1, "スロット": []}]}
            ]"#,
        )
        .unwrap(),
        weakness: parse_weakness(
            r#"{"モンスター情報": [
                {"モンスター名": "チャタカブラ", "弱点": {"水属性": "×", "火属性": "◎"}},
                {"モンスター名": "ドシャグマ", "弱点": {"火属性": "○", "氷属性": "△"}},
                {"モンスター名": "バーラハーラ", "弱点": {"火属性": "◎", "雷属性": "○"}},
                {"モンスター名": "ゴア・マガラ", "弱点": {"火属性": "○", "龍属性": "◎"}},
                {"モンスター名": "ゲリョス亜種", "弱点": {"水属性": "○"}}
            ], "弱点レベル": {"◎": 3, "○": 2, "△": 1, "×": 0, "-": -1}}"#,
        )
        .unwrap(),
        tempered: parse_tempered(
            r#"{"モンスター一覧": [
                {"モンスター名": "チャタカブラ", "歴戦危険度": 1},
                {"モンスター名": "ケマトリス", "歴戦危険度": 1},
                {"モンスター名": "ゴア・マガラ", "歴戦危険度": 3}
            ], "歴戦危険度説明": {"3": "非常に危険な個体"}}"#,
        )
        .unwrap(),
    }
}

fn engine_with(curated: HashMap<String, String>) -> BotEngine {
    let catalog = Catalog::new(fixture_dataset(), &curated);
    BotEngine::new(
        catalog,
        BotConfig {
            weakness_image_url: Some(WEAKNESS_IMAGE.to_string()),
            tempered_image_url: Some(TEMPERED_IMAGE.to_string()),
        },
    )
}

fn engine() -> BotEngine {
    engine_with(HashMap::new())
}

fn reply_text(engine: &BotEngine, user: Option<&str>, text: &str) -> String {
    engine.handle_text(user, text)[0]
        .as_text()
        .expect("first message is text")
        .to_string()
}

fn has_image(messages: &[OutboundMessage], url: &str) -> bool {
    messages
        .iter()
        .any(|m| matches!(m, OutboundMessage::Image { original_content_url, .. } if original_content_url == url))
}

// =============================================================================
// SKILL SEARCH
// =============================================================================

mod skill_search {
    use super::*;

    #[test]
    fn test_attack_scenario() {
        let text = reply_text(&engine(), None, "攻撃");
        assert!(text.starts_with("【スキル名での検索結果】"));
        assert!(text.contains("スキル名: 攻撃"));
        assert!(text.contains("▼効果\n攻撃力UP"));
        assert!(text.contains("▼最大レベル: 7"));
        assert!(text.contains("攻撃珠 (Lv1)"));
    }

    #[test]
    fn test_level_table_ascending() {
        let text = reply_text(&engine(), None, "攻撃");
        assert!(text.find("Lv1: 攻撃力+3").unwrap() < text.find("Lv2: 攻撃力+6").unwrap());
    }

    #[test]
    fn test_armor_higher_level_first() {
        let text = reply_text(&engine(), None, "攻撃");
        let b = text.find("・ドシャグマメイル (Lv3/1/1)").unwrap();
        let a = text.find("・チャタヘルム (Lv2/3)").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_search_by_decoration() {
        let text = reply_text(&engine(), None, "達人");
        assert!(text.starts_with("【装飾品「達人珠」での検索結果】"));
        assert!(text.contains("スキル名: 見切り"));
    }

    #[test]
    fn test_search_by_armor() {
        let text = reply_text(&engine(), None, "アーム");
        assert!(text.starts_with("【装備「バーラハーラアーム」での検索結果】"));
        assert!(text.contains("・バーラハーラアーム (Lv1)"));
    }

    #[test]
    fn test_search_is_idempotent() {
        let engine = engine();
        assert_eq!(engine.handle_text(None, "見切り"), engine.handle_text(None, "見切り"));
    }

    #[test]
    fn test_not_found_echoes_query() {
        let text = reply_text(&engine(), None, "砲術マスター");
        assert_eq!(
            text,
            "申し訳ありません、「砲術マスター」に関する情報は見つかりませんでした。\n\
             スキル名、装飾品名、防具名、モンスター名、または「ヘルプ」と入力してください。"
        );
    }

    #[test]
    fn test_blank_query_prompts() {
        assert_eq!(reply_text(&engine(), None, "　 "), format::EMPTY_QUERY);
    }

    #[test]
    fn test_unknown_monster_shape_searches_skills() {
        // Katakana that is not a monster must not become a monster query.
        let text = reply_text(&engine(), None, "ガード");
        assert!(text.contains("スキル名: ガード性能"));
    }
}

// =============================================================================
// MONSTER WEAKNESS
// =============================================================================

mod monster_weakness {
    use super::*;

    #[test]
    fn test_chatacabra_scenario() {
        let messages = engine().handle_text(Some("U1"), "チャタカブラ");
        let text = messages[0].as_text().unwrap();
        assert!(text.starts_with("【チャタカブラの弱点情報】"));
        assert!(text.find("火属性").unwrap() < text.find("水属性").unwrap());
        assert!(text.contains("火属性: ◎ (特効)"));
        assert!(text.contains("水属性: × (耐性)"));
        assert!(text.contains("▼歴戦の個体危険度: 1★"));
        assert_eq!(text.matches('★').count(), 1);
        assert!(has_image(&messages, WEAKNESS_IMAGE));
    }

    #[test]
    fn test_hint_lists_effective_elements() {
        let text = reply_text(&engine(), None, "ゴア・マガラ");
        assert!(text.contains("このモンスターには 龍属性、火属性 が効果的です。"));
        assert!(text.contains("★★★"));
    }

    #[test]
    fn test_alias_without_separator() {
        let text = reply_text(&engine(), None, "ゴアマガラ");
        assert!(text.starts_with("【ゴア・マガラの弱点情報】"));
    }

    #[test]
    fn test_alias_without_variant_suffix() {
        let text = reply_text(&engine(), None, "ゲリョス");
        assert!(text.starts_with("【ゲリョス亜種の弱点情報】"));
    }

    #[test]
    fn test_curated_alias() {
        let curated = HashMap::from([("チャタ".to_string(), "チャタカブラ".to_string())]);
        let text = reply_text(&engine_with(curated), None, "チャタ");
        assert!(text.starts_with("【チャタカブラの弱点情報】"));
    }

    #[test]
    fn test_weakness_suffix_form() {
        let text = reply_text(&engine(), None, "ドシャグマ 弱点");
        assert!(text.starts_with("【ドシャグマの弱点情報】"));
    }

    #[test]
    fn test_prefix_command_not_found() {
        let messages = engine().handle_text(Some("U1"), "弱点:ラージャン");
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].as_text().unwrap(),
            "申し訳ありません、「ラージャン」の弱点情報は見つかりませんでした。"
        );
    }

    #[test]
    fn test_tempered_only_monster_has_no_weakness_entry() {
        let text = reply_text(&engine(), None, "ケマトリス");
        assert!(text.contains("「ケマトリス」の弱点情報は見つかりませんでした"));
    }
}

// =============================================================================
// ELEMENT WEAKNESS
// =============================================================================

mod element_weakness {
    use super::*;

    #[test]
    fn test_fire_scenario() {
        let messages = engine().handle_text(None, "火属性");
        let text = messages[0].as_text().unwrap();
        assert_eq!(
            text,
            "【火属性に弱いモンスター】\n\n\
             ▼特効(◎)\n・チャタカブラ\n・バーラハーラ\n\n\
             ▼弱点(○)\n・ゴア・マガラ\n・ドシャグマ"
        );
        assert!(has_image(&messages, WEAKNESS_IMAGE));
    }

    #[test]
    fn test_no_matches() {
        let messages = engine().handle_text(None, "弱点 氷");
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].as_text().unwrap(),
            "氷属性に弱いモンスターは見つかりませんでした。"
        );
    }
}

// =============================================================================
// TEMPERED
// =============================================================================

mod tempered {
    use super::*;

    #[test]
    fn test_by_level() {
        let messages = engine().handle_text(None, "歴戦 1");
        let text = messages[0].as_text().unwrap();
        assert_eq!(text, "【歴戦の個体 危険度1★】\n\n・ケマトリス\n・チャタカブラ");
        assert!(has_image(&messages, TEMPERED_IMAGE));
    }

    #[test]
    fn test_by_level_with_description() {
        let text = reply_text(&engine(), None, "歴戦レベル3");
        assert!(text.starts_with("【歴戦の個体 危険度3★★★】\n非常に危険な個体\n"));
    }

    #[test]
    fn test_by_level_empty() {
        let messages = engine().handle_text(None, "歴戦危険度2");
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].as_text().unwrap(),
            "歴戦の個体 危険度2のモンスターは見つかりませんでした。"
        );
    }

    #[test]
    fn test_by_monster() {
        let text = reply_text(&engine(), None, "歴戦 チャタカブラ");
        assert!(text.starts_with("【チャタカブラの歴戦データ】"));
        assert!(text.contains("▼歴戦の個体危険度: 1★"));
        assert!(text.contains("▼同じ危険度1のモンスター\n・ケマトリス"));
    }

    #[test]
    fn test_by_monster_not_tempered() {
        let text = reply_text(&engine(), None, "歴戦：ドシャグマ");
        assert_eq!(text, "「ドシャグマ」の歴戦情報は見つかりませんでした。");
    }
}

// =============================================================================
// HELP & SETTINGS
// =============================================================================

mod help_and_settings {
    use super::*;

    #[test]
    fn test_help() {
        for text in ["ヘルプ", "help", "HELP", "使い方"] {
            assert_eq!(reply_text(&engine(), None, text), format::HELP_TEXT);
        }
    }

    #[test]
    fn test_image_menu_has_quick_replies() {
        let messages = engine().handle_text(Some("U1"), "画像オフ");
        match &messages[0] {
            OutboundMessage::Text { quick_reply: Some(qr), .. } => {
                let texts: Vec<&str> = qr.items.iter().map(|i| i.action.text.as_str()).collect();
                assert_eq!(texts, vec!["画像表示オフ", "弱点画像オフ", "歴戦画像オフ"]);
            }
            other => panic!("expected quick reply, got {other:?}"),
        }
    }

    #[test]
    fn test_weakness_image_toggle() {
        let engine = engine();
        let text = reply_text(&engine, Some("U1"), "弱点画像オフ");
        assert_eq!(text, "画像表示設定を変更しました:\n・弱点画像: オン → オフ");

        let messages = engine.handle_text(Some("U1"), "チャタカブラ");
        assert!(!has_image(&messages, WEAKNESS_IMAGE));

        // Tempered image is still on.
        let messages = engine.handle_text(Some("U1"), "歴戦 1");
        assert!(has_image(&messages, TEMPERED_IMAGE));

        // Other users are unaffected.
        let messages = engine.handle_text(Some("U2"), "チャタカブラ");
        assert!(has_image(&messages, WEAKNESS_IMAGE));
    }

    #[test]
    fn test_toggle_all_and_show_settings() {
        let engine = engine();
        let text = reply_text(&engine, Some("U1"), "画像表示オフ");
        assert!(text.contains("・弱点画像: オン → オフ"));
        assert!(text.contains("・歴戦画像: オン → オフ"));

        let text = reply_text(&engine, Some("U1"), "設定確認");
        assert_eq!(text, "【現在の設定】\n弱点画像表示: オフ\n歴戦画像表示: オフ");

        let text = reply_text(&engine, Some("U1"), "歴戦画像オフ");
        assert_eq!(text, "歴戦画像表示はオフになってるニャ。");
    }

    #[test]
    fn test_settings_need_user_id() {
        let engine = engine();
        assert_eq!(reply_text(&engine, None, "画像表示オフ"), format::SETTINGS_NEED_USER);
        assert_eq!(engine.settings().len(), 0);
    }

    #[test]
    fn test_no_image_when_url_unset() {
        let engine = BotEngine::new(Catalog::new(fixture_dataset(), &HashMap::new()), BotConfig::default());
        let messages = engine.handle_text(Some("U1"), "チャタカブラ");
        assert_eq!(messages.len(), 1);
    }
}

// =============================================================================
// DEGRADED DATA
// =============================================================================

mod degraded {
    use super::*;

    #[test]
    fn test_empty_dataset_always_misses() {
        let engine = BotEngine::new(Catalog::new(Dataset::default(), &HashMap::new()), BotConfig::default());
        for text in ["攻撃", "チャタカブラ", "歴戦 1", "火属性", "歴戦 チャタカブラ"] {
            let messages = engine.handle_text(Some("U1"), text);
            assert_eq!(messages.len(), 1, "{text}");
            assert!(messages[0].as_text().unwrap().contains("見つかりませんでした"), "{text}");
        }
    }
}
