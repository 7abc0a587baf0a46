//! Reply text rendering.

use crate::bot::monsters::{ElementReport, LevelReport, TemperedReport, WeaknessReport};
use crate::bot::settings::{DisplaySettings, ImageTarget, SettingChange};
use crate::bot::skills::SkillHit;

pub const HELP_TEXT: &str = "【モンハンワイルズ情報検索ボット】

■ 使い方
・スキル/装飾品/防具検索: スキル名や装飾品名、防具名を入力
 例: 攻撃、見切り、匠珠

・モンスター弱点検索: モンスター名を入力
 例: チャタカブラ、リオレウス、弱点:ゴア

・属性弱点検索: 「弱点 属性」と入力
 例: 弱点 火、雷属性弱点

・歴戦モンスター検索: 「歴戦 レベル」または「歴戦 モンスター名」と入力
 例: 歴戦 1、歴戦レベル3、歴戦 チャタカブラ

■ 設定コマンド
・「画像オン」: 画像表示設定を選択
・「画像オフ」: 画像非表示設定を選択
・「設定確認」: 現在の設定を確認

※「ヘルプ」と入力するといつでもこの使い方が表示されます。";

/// "★" repeated `level` times.
pub fn stars(level: u8) -> String {
    "★".repeat(usize::from(level))
}

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("・{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "オン" } else { "オフ" }
}

// =============================================================================
// SKILLS
// =============================================================================

pub fn skill(hit: &SkillHit<'_>) -> String {
    let skill = hit.skill;
    let mut out = format!("【{}での検索結果】\n", hit.matched.label());
    out.push_str(&format!("スキル名: {}\n\n", skill.name));
    out.push_str(&format!("▼効果\n{}\n\n", skill.effect));
    out.push_str(&format!("▼最大レベル: {}\n\n", skill.max_level));

    if !skill.level_effects.is_empty() {
        let mut effects: Vec<_> = skill.level_effects.iter().collect();
        effects.sort_by_key(|e| e.level);
        out.push_str("▼レベル別効果\n");
        for effect in effects {
            out.push_str(&format!("Lv{}: {}\n", effect.level, effect.effect));
        }
        out.push('\n');
    }

    if !skill.decorations.is_empty() {
        out.push_str("▼装飾品\n");
        for deco in &skill.decorations {
            out.push_str(&format!("・{} (Lv{})\n", deco.name, deco.level));
        }
        out.push('\n');
    }

    if !skill.armor.is_empty() {
        let mut armor: Vec<_> = skill.armor.iter().collect();
        armor.sort_by(|a, b| {
            (b.skill_level, b.slots.len()).cmp(&(a.skill_level, a.slots.len()))
        });
        out.push_str("▼入手装備(レベル/スロット数)\n");
        for piece in armor {
            if piece.slots.is_empty() {
                out.push_str(&format!("・{} (Lv{})\n", piece.name, piece.skill_level));
            } else {
                let slots: Vec<String> = piece.slots.iter().map(u32::to_string).collect();
                out.push_str(&format!(
                    "・{} (Lv{}/{})\n",
                    piece.name,
                    piece.skill_level,
                    slots.join("/")
                ));
            }
        }
    }

    out.trim_end().to_string()
}

pub fn skill_not_found(text: &str) -> String {
    format!(
        "申し訳ありません、「{text}」に関する情報は見つかりませんでした。\n\
         スキル名、装飾品名、防具名、モンスター名、または「ヘルプ」と入力してください。"
    )
}

pub const EMPTY_QUERY: &str = "検索するスキル名、装飾品名、または防具名を入力してください。";

// =============================================================================
// MONSTERS
// =============================================================================

pub fn monster_weakness(report: &WeaknessReport<'_>) -> String {
    let mut out = format!("【{}の弱点情報】\n\n", report.monster.name);

    if !report.elements.is_empty() {
        out.push_str("▼弱点属性\n");
        for e in &report.elements {
            let icon = e.icon.map(|i| format!("{i} ")).unwrap_or_default();
            out.push_str(&format!(
                "{icon}{}: {} ({})\n",
                e.element,
                e.symbol,
                e.symbol.label()
            ));
        }
        out.push('\n');

        out.push_str("【攻略ヒント】\n");
        let effective: Vec<String> = report
            .effective_elements()
            .map(|e| format!("{}{}", e.icon.unwrap_or(""), e.element))
            .collect();
        if effective.is_empty() {
            out.push_str(
                "このモンスターには特に弱点となる属性がありません。物理攻撃を中心に戦いましょう。",
            );
        } else {
            out.push_str(&format!(
                "このモンスターには {} が効果的です。",
                effective.join("、")
            ));
        }
        out.push_str("\n\n");
    }

    if let Some(level) = report.tempered_level {
        out.push_str(&format!("▼歴戦の個体危険度: {level}{}\n", stars(level)));
    }

    out.trim_end().to_string()
}

pub fn monster_not_found(name: &str) -> String {
    format!("申し訳ありません、「{name}」の弱点情報は見つかりませんでした。")
}

pub fn element_weakness(report: &ElementReport<'_>) -> String {
    if report.is_empty() {
        return format!("{}に弱いモンスターは見つかりませんでした。", report.element);
    }

    let mut sections = Vec::new();
    if !report.very_weak.is_empty() {
        sections.push(format!("▼特効(◎)\n{}", bullet_list(&report.very_weak)));
    }
    if !report.weak.is_empty() {
        sections.push(format!("▼弱点(○)\n{}", bullet_list(&report.weak)));
    }
    format!("【{}に弱いモンスター】\n\n{}", report.element, sections.join("\n\n"))
}

pub fn tempered_level(report: &LevelReport<'_>) -> String {
    let level = report.level;
    if report.monsters.is_empty() {
        return format!("歴戦の個体 危険度{level}のモンスターは見つかりませんでした。");
    }

    let mut out = format!("【歴戦の個体 危険度{level}{}】\n", stars(level));
    if let Some(desc) = report.description {
        out.push_str(&format!("{desc}\n"));
    }
    out.push('\n');
    out.push_str(&bullet_list(&report.monsters));
    out
}

pub fn tempered_monster(report: &TemperedReport<'_>) -> String {
    let monster = report.monster;
    let mut out = format!("【{}の歴戦データ】\n\n", monster.name);
    out.push_str(&format!(
        "▼歴戦の個体危険度: {}{}\n",
        monster.level,
        stars(monster.level)
    ));
    if let Some(desc) = report.description {
        out.push_str(&format!("{desc}\n"));
    }

    if !report.same_level.is_empty() {
        out.push_str(&format!(
            "\n▼同じ危険度{}のモンスター\n{}",
            monster.level,
            bullet_list(&report.same_level)
        ));
    }

    out.trim_end().to_string()
}

pub fn tempered_not_found(name: &str) -> String {
    format!("「{name}」の歴戦情報は見つかりませんでした。")
}

// =============================================================================
// SETTINGS
// =============================================================================

pub fn image_menu_prompt(enable: bool) -> String {
    format!("どの画像表示を{}にするニャ？", on_off(enable))
}

/// Quick-reply (label, command) pairs for the image menu.
pub fn image_menu_buttons(enable: bool) -> [(&'static str, &'static str); 3] {
    if enable {
        [
            ("全ての画像をオン", "画像表示オン"),
            ("弱点画像のみオン", "弱点画像オン"),
            ("歴戦画像のみオン", "歴戦画像オン"),
        ]
    } else {
        [
            ("全ての画像をオフ", "画像表示オフ"),
            ("弱点画像のみオフ", "弱点画像オフ"),
            ("歴戦画像のみオフ", "歴戦画像オフ"),
        ]
    }
}

pub fn setting_change(change: &SettingChange) -> String {
    let SettingChange { target, before, after } = *change;
    if change.is_noop() {
        let enabled = match target {
            ImageTarget::Weakness => after.show_weakness_image,
            _ => after.show_tempered_image,
        };
        return match target {
            ImageTarget::All => format!("画像表示はすべて{}になってるニャ。", on_off(enabled)),
            ImageTarget::Weakness => format!("弱点画像表示は{}になってるニャ。", on_off(enabled)),
            ImageTarget::Tempered => format!("歴戦画像表示は{}になってるニャ。", on_off(enabled)),
        };
    }

    let mut lines = vec!["画像表示設定を変更しました:".to_string()];
    if before.show_weakness_image != after.show_weakness_image {
        lines.push(format!(
            "・弱点画像: {} → {}",
            on_off(before.show_weakness_image),
            on_off(after.show_weakness_image)
        ));
    }
    if before.show_tempered_image != after.show_tempered_image {
        lines.push(format!(
            "・歴戦画像: {} → {}",
            on_off(before.show_tempered_image),
            on_off(after.show_tempered_image)
        ));
    }
    lines.join("\n")
}

pub fn current_settings(settings: &DisplaySettings) -> String {
    format!(
        "【現在の設定】\n弱点画像表示: {}\n歴戦画像表示: {}",
        on_off(settings.show_weakness_image),
        on_off(settings.show_tempered_image)
    )
}

pub const SETTINGS_NEED_USER: &str = "ユーザーを特定できないため、設定を変更できないニャ。";
