//! Static team roster and the alias table used to canonicalise team tokens.
//!
//! Every spelling the scrapers have been seen to emit (official code, full
//! localized name, legacy franchise name) is a key of [`ALIASES`], folded with
//! [`fold_token`]. Keys are unique, so each token maps to exactly one team.
//! Nicknames shared across leagues ("giants", "tigers", "lions") are left out
//! on purpose.

use std::collections::HashMap;

use phf::phf_map;

use crate::error::ConfigError;
use crate::types::{Conference, League, TeamCode};

/// Static metadata for one franchise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub code: TeamCode,
    pub name: &'static str,
    pub conference: Conference,
}

impl Team {
    /// Every built-in alias that resolves to this team, in table order.
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        ALIASES
            .entries()
            .filter(move |(_, code)| **code == self.code)
            .map(|(alias, _)| *alias)
    }
}

// Same order as the `TeamCode` declaration; `team()` indexes by discriminant.
static TEAMS: [Team; 22] = [
    Team { code: TeamCode::Hanwha, name: "Hanwha Eagles", conference: Conference::Kbo },
    Team { code: TeamCode::Lg, name: "LG Twins", conference: Conference::Kbo },
    Team { code: TeamCode::Lotte, name: "Lotte Giants", conference: Conference::Kbo },
    Team { code: TeamCode::Ssg, name: "SSG Landers", conference: Conference::Kbo },
    Team { code: TeamCode::Kt, name: "KT Wiz", conference: Conference::Kbo },
    Team { code: TeamCode::Kia, name: "KIA Tigers", conference: Conference::Kbo },
    Team { code: TeamCode::Samsung, name: "Samsung Lions", conference: Conference::Kbo },
    Team { code: TeamCode::Nc, name: "NC Dinos", conference: Conference::Kbo },
    Team { code: TeamCode::Doosan, name: "Doosan Bears", conference: Conference::Kbo },
    Team { code: TeamCode::Kiwoom, name: "Kiwoom Heroes", conference: Conference::Kbo },
    Team { code: TeamCode::Yomiuri, name: "Yomiuri Giants", conference: Conference::Central },
    Team { code: TeamCode::Hanshin, name: "Hanshin Tigers", conference: Conference::Central },
    Team { code: TeamCode::Dena, name: "Yokohama DeNA BayStars", conference: Conference::Central },
    Team { code: TeamCode::Hiroshima, name: "Hiroshima Toyo Carp", conference: Conference::Central },
    Team { code: TeamCode::Chunichi, name: "Chunichi Dragons", conference: Conference::Central },
    Team { code: TeamCode::Yakult, name: "Tokyo Yakult Swallows", conference: Conference::Central },
    Team { code: TeamCode::Softbank, name: "Fukuoka SoftBank Hawks", conference: Conference::Pacific },
    Team { code: TeamCode::ChibaLotte, name: "Chiba Lotte Marines", conference: Conference::Pacific },
    Team { code: TeamCode::Rakuten, name: "Tohoku Rakuten Golden Eagles", conference: Conference::Pacific },
    Team { code: TeamCode::Orix, name: "Orix Buffaloes", conference: Conference::Pacific },
    Team { code: TeamCode::Seibu, name: "Saitama Seibu Lions", conference: Conference::Pacific },
    Team { code: TeamCode::NipponHam, name: "Hokkaido Nippon-Ham Fighters", conference: Conference::Pacific },
];

pub fn team(code: TeamCode) -> &'static Team {
    // TEAMS is laid out in TeamCode discriminant order.
    &TEAMS[code as usize]
}

pub fn teams() -> &'static [Team] {
    &TEAMS
}

/// Built-in teams of one league, in canonical code order.
pub fn teams_in(league: League) -> Vec<TeamCode> {
    let mut codes: Vec<TeamCode> = TEAMS
        .iter()
        .filter(|t| t.conference.league() == league)
        .map(|t| t.code)
        .collect();
    codes.sort();
    codes
}

/// Keys are folded with [`fold_token`]: no whitespace, no `-`/`.`/`·`/`_`,
/// ASCII lowercase, fullwidth ASCII narrowed.
pub static ALIASES: phf::Map<&'static str, TeamCode> = phf_map! {
    // KBO
    "hh" => TeamCode::Hanwha,
    "한화" => TeamCode::Hanwha,
    "한화이글스" => TeamCode::Hanwha,
    "hanwha" => TeamCode::Hanwha,
    "hanwhaeagles" => TeamCode::Hanwha,
    "빙그레" => TeamCode::Hanwha,
    "빙그레이글스" => TeamCode::Hanwha,
    "binggrae" => TeamCode::Hanwha,
    "lg" => TeamCode::Lg,
    "lg트윈스" => TeamCode::Lg,
    "lgtwins" => TeamCode::Lg,
    "엘지" => TeamCode::Lg,
    "mbc" => TeamCode::Lg,
    "mbc청룡" => TeamCode::Lg,
    "lt" => TeamCode::Lotte,
    "롯데" => TeamCode::Lotte,
    "롯데자이언츠" => TeamCode::Lotte,
    "lotte" => TeamCode::Lotte,
    "lottegiants" => TeamCode::Lotte,
    "ssg" => TeamCode::Ssg,
    "ssg랜더스" => TeamCode::Ssg,
    "ssglanders" => TeamCode::Ssg,
    "sk" => TeamCode::Ssg,
    "sk와이번스" => TeamCode::Ssg,
    "skwyverns" => TeamCode::Ssg,
    "kt" => TeamCode::Kt,
    "kt위즈" => TeamCode::Kt,
    "ktwiz" => TeamCode::Kt,
    "kia" => TeamCode::Kia,
    "kia타이거즈" => TeamCode::Kia,
    "kiatigers" => TeamCode::Kia,
    "기아" => TeamCode::Kia,
    "기아타이거즈" => TeamCode::Kia,
    "해태" => TeamCode::Kia,
    "해태타이거즈" => TeamCode::Kia,
    "haitai" => TeamCode::Kia,
    "ht" => TeamCode::Kia,
    "ss" => TeamCode::Samsung,
    "삼성" => TeamCode::Samsung,
    "삼성라이온즈" => TeamCode::Samsung,
    "samsung" => TeamCode::Samsung,
    "samsunglions" => TeamCode::Samsung,
    "nc" => TeamCode::Nc,
    "nc다이노스" => TeamCode::Nc,
    "ncdinos" => TeamCode::Nc,
    "ob" => TeamCode::Doosan,
    "두산" => TeamCode::Doosan,
    "두산베어스" => TeamCode::Doosan,
    "doosan" => TeamCode::Doosan,
    "doosanbears" => TeamCode::Doosan,
    "ob베어스" => TeamCode::Doosan,
    "obbears" => TeamCode::Doosan,
    "wo" => TeamCode::Kiwoom,
    "키움" => TeamCode::Kiwoom,
    "키움히어로즈" => TeamCode::Kiwoom,
    "kiwoom" => TeamCode::Kiwoom,
    "kiwoomheroes" => TeamCode::Kiwoom,
    "넥센" => TeamCode::Kiwoom,
    "넥센히어로즈" => TeamCode::Kiwoom,
    "nexen" => TeamCode::Kiwoom,
    "nexenheroes" => TeamCode::Kiwoom,
    // NPB Central
    "yog" => TeamCode::Yomiuri,
    "巨人" => TeamCode::Yomiuri,
    "読売" => TeamCode::Yomiuri,
    "読売ジャイアンツ" => TeamCode::Yomiuri,
    "読売巨人軍" => TeamCode::Yomiuri,
    "요미우리" => TeamCode::Yomiuri,
    "요미우리자이언츠" => TeamCode::Yomiuri,
    "yomiuri" => TeamCode::Yomiuri,
    "yomiurigiants" => TeamCode::Yomiuri,
    "han" => TeamCode::Hanshin,
    "阪神" => TeamCode::Hanshin,
    "阪神タイガース" => TeamCode::Hanshin,
    "한신" => TeamCode::Hanshin,
    "한신타이거스" => TeamCode::Hanshin,
    "hanshin" => TeamCode::Hanshin,
    "hanshintigers" => TeamCode::Hanshin,
    "ydb" => TeamCode::Dena,
    "dena" => TeamCode::Dena,
    "横浜dena" => TeamCode::Dena,
    "横浜denaベイスターズ" => TeamCode::Dena,
    "横浜ベイスターズ" => TeamCode::Dena,
    "横浜" => TeamCode::Dena,
    "요코하마" => TeamCode::Dena,
    "요코하마dena베이스타즈" => TeamCode::Dena,
    "yokohama" => TeamCode::Dena,
    "yokohamadenabaystars" => TeamCode::Dena,
    "yokohamabaystars" => TeamCode::Dena,
    "baystars" => TeamCode::Dena,
    "hir" => TeamCode::Hiroshima,
    "広島" => TeamCode::Hiroshima,
    "広島東洋カープ" => TeamCode::Hiroshima,
    "広島カープ" => TeamCode::Hiroshima,
    "히로시마" => TeamCode::Hiroshima,
    "히로시마토요카프" => TeamCode::Hiroshima,
    "hiroshima" => TeamCode::Hiroshima,
    "hiroshimatoyocarp" => TeamCode::Hiroshima,
    "carp" => TeamCode::Hiroshima,
    "chu" => TeamCode::Chunichi,
    "中日" => TeamCode::Chunichi,
    "中日ドラゴンズ" => TeamCode::Chunichi,
    "중일" => TeamCode::Chunichi,
    "중일드래곤즈" => TeamCode::Chunichi,
    "주니치" => TeamCode::Chunichi,
    "주니치드래곤즈" => TeamCode::Chunichi,
    "chunichi" => TeamCode::Chunichi,
    "chunichidragons" => TeamCode::Chunichi,
    "dragons" => TeamCode::Chunichi,
    "yak" => TeamCode::Yakult,
    "ヤクルト" => TeamCode::Yakult,
    "ヤクルトスワローズ" => TeamCode::Yakult,
    "東京ヤクルトスワローズ" => TeamCode::Yakult,
    "야쿠르트" => TeamCode::Yakult,
    "야쿠르트스왈로즈" => TeamCode::Yakult,
    "yakult" => TeamCode::Yakult,
    "yakultswallows" => TeamCode::Yakult,
    "tokyoyakultswallows" => TeamCode::Yakult,
    "swallows" => TeamCode::Yakult,
    // NPB Pacific
    "sof" => TeamCode::Softbank,
    "ソフトバンク" => TeamCode::Softbank,
    "ソフトバンクホークス" => TeamCode::Softbank,
    "福岡ソフトバンクホークス" => TeamCode::Softbank,
    "소프트뱅크" => TeamCode::Softbank,
    "소프트뱅크호크스" => TeamCode::Softbank,
    "softbank" => TeamCode::Softbank,
    "softbankhawks" => TeamCode::Softbank,
    "fukuokasoftbankhawks" => TeamCode::Softbank,
    "hawks" => TeamCode::Softbank,
    "ダイエー" => TeamCode::Softbank,
    "daiei" => TeamCode::Softbank,
    "lot" => TeamCode::ChibaLotte,
    "ロッテ" => TeamCode::ChibaLotte,
    "ロッテマリーンズ" => TeamCode::ChibaLotte,
    "千葉ロッテマリーンズ" => TeamCode::ChibaLotte,
    "로데" => TeamCode::ChibaLotte,
    "지바롯데" => TeamCode::ChibaLotte,
    "지바로데마린즈" => TeamCode::ChibaLotte,
    "chibalotte" => TeamCode::ChibaLotte,
    "chibalottemarines" => TeamCode::ChibaLotte,
    "lottemarines" => TeamCode::ChibaLotte,
    "marines" => TeamCode::ChibaLotte,
    "rak" => TeamCode::Rakuten,
    "楽天" => TeamCode::Rakuten,
    "楽天イーグルス" => TeamCode::Rakuten,
    "東北楽天ゴールデンイーグルス" => TeamCode::Rakuten,
    "라쿠텐" => TeamCode::Rakuten,
    "토호쿠라쿠텐골든이글스" => TeamCode::Rakuten,
    "rakuten" => TeamCode::Rakuten,
    "rakuteneagles" => TeamCode::Rakuten,
    "tohokurakutengoldeneagles" => TeamCode::Rakuten,
    "goldeneagles" => TeamCode::Rakuten,
    "ori" => TeamCode::Orix,
    "オリックス" => TeamCode::Orix,
    "オリックスバファローズ" => TeamCode::Orix,
    "오릭스" => TeamCode::Orix,
    "오릭스버팔로즈" => TeamCode::Orix,
    "orix" => TeamCode::Orix,
    "orixbuffaloes" => TeamCode::Orix,
    "buffaloes" => TeamCode::Orix,
    "sei" => TeamCode::Seibu,
    "西武" => TeamCode::Seibu,
    "西武ライオンズ" => TeamCode::Seibu,
    "埼玉西武ライオンズ" => TeamCode::Seibu,
    "세이부" => TeamCode::Seibu,
    "사이타마세이부라이온즈" => TeamCode::Seibu,
    "seibu" => TeamCode::Seibu,
    "seibulions" => TeamCode::Seibu,
    "saitamaseibulions" => TeamCode::Seibu,
    "nip" => TeamCode::NipponHam,
    "日本ハム" => TeamCode::NipponHam,
    "日ハム" => TeamCode::NipponHam,
    "日本ハムファイターズ" => TeamCode::NipponHam,
    "北海道日本ハムファイターズ" => TeamCode::NipponHam,
    "닛폰햄" => TeamCode::NipponHam,
    "홋카이도닛폰햄파이터즈" => TeamCode::NipponHam,
    "nipponham" => TeamCode::NipponHam,
    "nipponhamfighters" => TeamCode::NipponHam,
    "hokkaidonipponhamfighters" => TeamCode::NipponHam,
    "fighters" => TeamCode::NipponHam,
};

/// Fold a raw team token into alias-table key form.
pub fn fold_token(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        let ch = match ch {
            // Fullwidth ASCII block (Ｄｅ Ｎ Ａ) → ASCII.
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
            _ => ch,
        };
        if ch.is_whitespace() || matches!(ch, '-' | '.' | '·' | '_') {
            continue;
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

/// Token → team lookup: the built-in [`ALIASES`] plus configured extras.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    extra: HashMap<String, TeamCode>,
}

impl AliasTable {
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Layer configured aliases on top of the built-ins. An alias that already
    /// names a different team is rejected rather than shadowed.
    pub fn with_extra<'a, I>(aliases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, TeamCode)>,
    {
        let mut table = Self::default();
        for (alias, code) in aliases {
            let key = fold_token(alias);
            let existing = ALIASES.get(key.as_str()).copied().or_else(|| table.extra.get(&key).copied());
            match existing {
                Some(existing) if existing != code => {
                    return Err(ConfigError::AliasConflict {
                        alias: alias.to_string(),
                        existing,
                        requested: code,
                    })
                }
                Some(_) => {}
                None => {
                    table.extra.insert(key, code);
                }
            }
        }
        Ok(table)
    }

    pub fn resolve(&self, token: &str) -> Option<TeamCode> {
        let key = fold_token(token);
        if key.is_empty() {
            return None;
        }
        ALIASES
            .get(key.as_str())
            .copied()
            .or_else(|| self.extra.get(&key).copied())
    }

    /// Number of configured aliases on top of the built-ins.
    pub fn extra_len(&self) -> usize {
        self.extra.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn team_table_matches_code_order() {
        for (i, code) in TeamCode::ALL.iter().enumerate() {
            assert_eq!(TEAMS[i].code, *code);
            assert_eq!(team(*code).code, *code);
        }
    }

    #[test]
    fn every_code_resolves_to_itself() {
        let table = AliasTable::builtin();
        for code in TeamCode::ALL {
            assert_eq!(table.resolve(code.code()), Some(code), "code {code}");
        }
    }

    #[rstest]
    #[case::korean_short("한화", TeamCode::Hanwha)]
    #[case::korean_full("LG 트윈스", TeamCode::Lg)]
    #[case::legacy_kbo("넥센", TeamCode::Kiwoom)]
    #[case::legacy_sk("SK 와이번스", TeamCode::Ssg)]
    #[case::english_full("Doosan Bears", TeamCode::Doosan)]
    #[case::fullwidth("ＤｅＮＡ", TeamCode::Dena)]
    #[case::japanese("日本ハム", TeamCode::NipponHam)]
    #[case::hyphenated("Nippon-Ham", TeamCode::NipponHam)]
    #[case::korean_npb("로데", TeamCode::ChibaLotte)]
    #[case::padded("  阪神タイガース ", TeamCode::Hanshin)]
    fn aliases_resolve(#[case] token: &str, #[case] expected: TeamCode) {
        assert_eq!(AliasTable::builtin().resolve(token), Some(expected));
    }

    #[test]
    fn lotte_without_qualifier_is_the_kbo_team() {
        let table = AliasTable::builtin();
        assert_eq!(table.resolve("Lotte"), Some(TeamCode::Lotte));
        assert_eq!(table.resolve("Chiba Lotte"), Some(TeamCode::ChibaLotte));
    }

    #[test]
    fn unknown_tokens_do_not_resolve() {
        let table = AliasTable::builtin();
        assert_eq!(table.resolve("잠실"), None);
        assert_eq!(table.resolve("Giants"), None);
        assert_eq!(table.resolve(""), None);
        assert_eq!(table.resolve("--"), None);
    }

    #[test]
    fn extra_alias_is_layered() {
        let table = AliasTable::with_extra([("엘쥐", TeamCode::Lg)]).unwrap();
        assert_eq!(table.resolve("엘쥐"), Some(TeamCode::Lg));
        assert_eq!(table.extra_len(), 1);
    }

    #[test]
    fn extra_alias_cannot_steal_a_builtin() {
        let err = AliasTable::with_extra([("LG", TeamCode::Kt)]).unwrap_err();
        assert!(matches!(err, ConfigError::AliasConflict { existing: TeamCode::Lg, .. }));
    }

    #[test]
    fn teams_in_league_are_sorted() {
        let kbo = teams_in(League::Kbo);
        assert_eq!(kbo.len(), 10);
        assert!(kbo.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(teams_in(League::Npb).len(), 12);
    }

    #[test]
    fn team_lists_its_aliases() {
        let aliases: Vec<_> = team(TeamCode::Kiwoom).aliases().collect();
        assert!(aliases.contains(&"넥센"));
        assert!(aliases.contains(&"wo"));
    }
}
