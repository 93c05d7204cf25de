//! Localized interface strings, the relic catalog, and the profile data.
//! Every localized value exists in every supported language; tests enforce
//! it so a language switch can never hit a hole.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

/// Interface language.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub(crate) enum Language {
    #[default]
    #[serde(rename = "zh-TW")]
    #[strum(to_string = "zh-TW", serialize = "zh")]
    ZhTw,
    #[serde(rename = "en")]
    #[strum(to_string = "en")]
    En,
}

impl Language {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Self::ZhTw => Self::En,
            Self::En => Self::ZhTw,
        }
    }
}

/// A string carried in every supported language.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Localized {
    zh: &'static str,
    en: &'static str,
}

const fn loc(zh: &'static str, en: &'static str) -> Localized {
    Localized { zh, en }
}

impl Localized {
    pub(crate) fn get(&self, language: Language) -> &'static str {
        match language {
            Language::ZhTw => self.zh,
            Language::En => self.en,
        }
    }
}

/// Interface chrome strings.
pub(crate) struct Strings {
    pub(crate) relics_title: &'static str,
    pub(crate) me_title: &'static str,
    pub(crate) home_cta: &'static str,
    pub(crate) back_to_archive: &'static str,
    pub(crate) sold_out: &'static str,
    pub(crate) acquire_asset: &'static str,
    pub(crate) me_subtitle: &'static str,
    pub(crate) me_education: &'static str,
    pub(crate) me_experience: &'static str,
    pub(crate) me_leadership: &'static str,
    pub(crate) me_skills: &'static str,
}

static ZH_TW: Strings = Strings {
    relics_title: "遺物檔案",
    me_title: "關於我",
    home_cta: "觸碰以喚醒系統",
    back_to_archive: "返回檔案庫",
    sold_out: "已售罄",
    acquire_asset: "取得資產",
    me_subtitle: "履歷 / 職涯資料",
    me_education: "學歷",
    me_experience: "專業經歷",
    me_leadership: "領導力與專案管理職務",
    me_skills: "其他技能",
};

static EN: Strings = Strings {
    relics_title: "RELICS",
    me_title: "ME",
    home_cta: "CLICK TO AWAKEN",
    back_to_archive: "BACK TO ARCHIVE",
    sold_out: "SOLD OUT",
    acquire_asset: "ACQUIRE ASSET",
    me_subtitle: "Resume / Professional Data",
    me_education: "EDUCATION",
    me_experience: "PROFESSIONAL EXPERIENCE",
    me_leadership: "LEADERSHIP & PROJECT MANAGEMENT",
    me_skills: "SUPPLEMENTARY SKILLS",
};

pub(crate) fn strings(language: Language) -> &'static Strings {
    match language {
        Language::ZhTw => &ZH_TW,
        Language::En => &EN,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Price {
    Listed(&'static str),
    SoldOut,
}

impl Price {
    pub(crate) fn display(&self, language: Language) -> &'static str {
        match self {
            Self::Listed(price) => price,
            Self::SoldOut => strings(language).sold_out,
        }
    }
}

/// A recovered artifact in the archive. Plates are the detail page's
/// carousel panes.
pub(crate) struct Relic {
    pub(crate) code: &'static str,
    pub(crate) note: Localized,
    pub(crate) description: Localized,
    pub(crate) price: Price,
    pub(crate) plates: &'static [&'static str],
}

pub(crate) static RELICS: &[Relic] = &[
    Relic {
        code: "RV-001",
        note: loc("初代印記外套", "First Sigil Jacket"),
        description: loc(
            "於邊界崩塌前縫製的第一件印記外套。內襯留有未解譯的座標串，洗滌後仍持續顯影。",
            "The first sigil jacket stitched before the verge collapsed. Its lining carries an \
             undeciphered coordinate string that keeps developing after every wash.",
        ),
        price: Price::SoldOut,
        plates: &[
            "╔══════════╗\n║ ◢██◣  01 ║\n║ ◥██◤     ║\n║   ▒▒▒▒   ║\n╚══════════╝",
            "╔══════════╗\n║ <SIGIL/> ║\n║ 0x001A4F ║\n║   ◆◆     ║\n╚══════════╝",
        ],
    },
    Relic {
        code: "RV-002",
        note: loc("資料流絲巾", "Data Stream Scarf"),
        description: loc(
            "以回收的傳輸日誌織成。佩戴時文字沿著緯線緩慢捲動，據稱沒有人讀完過同一句話兩次。",
            "Woven from recovered transfer logs. The text scrolls slowly along the weft while \
             worn; no one has claimed to read the same sentence twice.",
        ),
        price: Price::Listed("NT$ 2,400"),
        plates: &[
            "┌──────────┐\n│ ~~~~~~~~ │\n│ ≈≈≈≈≈≈≈≈ │\n│ ~~~~~~~~ │\n└──────────┘",
        ],
    },
    Relic {
        code: "RV-003",
        note: loc("斷訊手環", "Signal-Lost Band"),
        description: loc(
            "在最後一次廣播結束時鑄造的手環。表面的訊號格永遠停在一格，拒絕歸零。",
            "A band cast the moment the final broadcast ended. Its signal meter is frozen at \
             one bar and refuses to fall to zero.",
        ),
        price: Price::Listed("NT$ 1,800"),
        plates: &[
            "┌──────────┐\n│  ▂ ▄ ▆ _ │\n│  NO CARR │\n│  IER     │\n└──────────┘",
            "┌──────────┐\n│ [x] LINK │\n│ [ ] SYNC │\n│ [ ] HOME │\n└──────────┘",
            "┌──────────┐\n│ 001 ▌▌▌  │\n│ 010 ▌    │\n│ 011 ▌▌   │\n└──────────┘",
        ],
    },
    Relic {
        code: "RV-004",
        note: loc("赤色協議背心", "Red Protocol Vest"),
        description: loc(
            "協議廢止當日發放的識別背心。胸口的核准章會在低溫下轉為警示紅。",
            "An identification vest issued the day the protocol was revoked. Its approval \
             stamp turns warning-red in the cold.",
        ),
        price: Price::SoldOut,
        plates: &[
            "╔══════════╗\n║ ██  ██   ║\n║   ██     ║\n║ APPROVED ║\n╚══════════╝",
        ],
    },
    Relic {
        code: "RV-005",
        note: loc("邊界粗體上衣", "Verge Bold Tee"),
        description: loc(
            "量產線上唯一一批印歪的字樣，反而成為辨識真品的依據。",
            "The only production batch with the misaligned print, which became the mark of \
             authenticity.",
        ),
        price: Price::Listed("NT$ 1,200"),
        plates: &[
            "┌──────────┐\n│  ROGUE   │\n│   VERGE  │\n│  ______  │\n└──────────┘",
            "┌──────────┐\n│ SIZE: M  │\n│ LOT: 005 │\n│ AUTH: OK │\n└──────────┘",
        ],
    },
    Relic {
        code: "RV-006",
        note: loc("覺醒斗篷原型", "Awakening Cloak Prototype"),
        description: loc(
            "尚未定版的斗篷原型。布料記得每一位試穿者的輪廓，至今仍在緩慢改變剪裁。",
            "An unfinalized cloak prototype. The fabric remembers the outline of everyone who \
             tried it on and is still, slowly, recutting itself.",
        ),
        price: Price::Listed("NT$ 9,999"),
        plates: &[
            "╔══════════╗\n║ ◣      ◢ ║\n║  ◣    ◢  ║\n║   ◣  ◢   ║\n║ PROTO-06 ║\n╚══════════╝",
        ],
    },
];

static RELIC_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    RELICS.iter().enumerate().map(|(index, relic)| (relic.code, index)).collect()
});

/// Look a relic up by its code, case-insensitively.
pub(crate) fn relic_by_code(code: &str) -> Option<&'static Relic> {
    let code = code.to_uppercase();
    RELIC_INDEX.get(code.as_str()).map(|&index| &RELICS[index])
}

pub(crate) struct Education {
    pub(crate) school: Localized,
    pub(crate) period: &'static str,
    pub(crate) summary: Localized,
}

/// One professional or organizational engagement.
pub(crate) struct Engagement {
    pub(crate) title: Localized,
    pub(crate) period: &'static str,
    pub(crate) role: Localized,
    pub(crate) details: &'static [Localized],
}

pub(crate) struct SkillGroup {
    pub(crate) label: Localized,
    pub(crate) items: &'static [Localized],
}

pub(crate) struct Profile {
    pub(crate) name: &'static str,
    pub(crate) education: Education,
    pub(crate) experiences: &'static [Engagement],
    pub(crate) leadership: &'static [Engagement],
    pub(crate) skills: &'static [SkillGroup],
}

pub(crate) static PROFILE: Profile = Profile {
    name: "Wang Te-Hsu",
    education: Education {
        school: loc(
            "國立清華大學 — 經濟學系",
            "National Tsing Hua University - Economics Department",
        ),
        period: "Sep 2022 - Present",
        summary: loc(
            "以數據驅動的行銷與市場分析為核心，透過自有品牌進行市場驗證與消費者評估，將數據洞察轉化為可量化的行銷成果。",
            "Data-driven marketing and market analysis encompass market validation and \
             consumer assessment through proprietary brands, with the objective of converting \
             data insights into measurable marketing outcomes.",
        ),
    },
    experiences: &[
        Engagement {
            title: loc(
                "系統整合與專案開發 | 綠世得科技有限公司",
                "System Integration & Project Development | Greenworld Technology Corp.",
            ),
            period: "Jul 2024 - Present",
            role: loc("創辦人", "Founder"),
            details: &[
                loc(
                    "開發可與電池管理系統 (BMS) 及太陽能儲能設備整合的消防安全通訊與控制系統。",
                    "Developed a fire safety communication and control system integrable with \
                     BMS and solar energy storage devices.",
                ),
                loc(
                    "運用 Zabbix 與 Grafana 進行系統監控、架構設計與數據視覺化。",
                    "Utilized Zabbix and Grafana for system monitoring, architecture design, \
                     and data visualization.",
                ),
                loc(
                    "負責企業補助案撰寫與計畫書規劃，協助推進公司專案與技術發展。",
                    "Authored government subsidy applications and project proposals, advancing \
                     company initiatives and technical development.",
                ),
            ],
        },
        Engagement {
            title: loc(
                "網頁效能優化與後端重構 | 世和智能",
                "Web Performance & Backend Refactoring | Shih-Ho Intelligent Corp.",
            ),
            period: "Sep 2023 - Present",
            role: loc("", ""),
            details: &[
                loc(
                    "執行網站的 SEO 規劃與整體效能優化。",
                    "Executed SEO planning and comprehensive website performance optimization.",
                ),
                loc(
                    "導入 Supabase 進行後端架構重構，提升系統穩定度與資料處理效率。",
                    "Introduced Supabase for backend restructuring, improving system stability \
                     and data processing efficiency.",
                ),
                loc(
                    "實作網站安全標頭 (Security Headers) 並處理前後端部署與基礎設施架設。",
                    "Implemented Security Headers and managed full-stack deployment and \
                     infrastructure setup.",
                ),
            ],
        },
        Engagement {
            title: loc(
                "駿達彩色沖印 / 灣興實業",
                "Junda Color Photo Finishing / Wanxing Industrial Co., Ltd.",
            ),
            period: "Jun 2024 - Jun 2025",
            role: loc("", ""),
            details: &[
                loc(
                    "協助設計與編輯平面廣告，確保內容符合目標受眾的偏好。",
                    "Assisted in the design and editing of print advertisements, ensuring \
                     content resonates with the target audience.",
                ),
                loc(
                    "支援客戶印刷專案執行與作品集優化。",
                    "Supported clients in printing projects and portfolio optimization.",
                ),
            ],
        },
    ],
    leadership: &[
        Engagement {
            title: loc(
                "科技管理學院學刊 — 經濟學系",
                "Journal of the School of Science and Technology Management - Department of \
                 Economics",
            ),
            period: "Sep 2024 - Present",
            role: loc("影片製作", "Video Production"),
            details: &[
                loc(
                    "統籌製作組的季刊影片內容，管理從訪談到刊出的編輯流程。",
                    "Oversee the production team's quarterly video content and manage the \
                     editorial process from interviews to publication.",
                ),
                loc(
                    "協助萃取關鍵訪談片段，確保準時交付。",
                    "Facilitate the extraction of essential interview excerpts to guarantee \
                     prompt delivery.",
                ),
            ],
        },
        Engagement {
            title: loc(
                "經濟學系系學會",
                "Department of Economics - Department Association Personnel",
            ),
            period: "Dec 2024 - Dec 2025",
            role: loc("學術及活動組", "Academic and Activities Division"),
            details: &[
                loc("統籌系上烤肉活動與校友聚會。", "Coordinate departmental barbecue events and alumni gatherings."),
                loc(
                    "邀請校友與業界人士舉辦講座，充實系上學術資源。",
                    "Organize lectures featuring alumni and industry professionals to equip \
                     the department with professional resources.",
                ),
                loc(
                    "安排企業參訪、法人展覽及相關活動。",
                    "Facilitate company visits, corporate exhibitions, and associated \
                     activities.",
                ),
            ],
        },
    ],
    skills: &[
        SkillGroup {
            label: loc("程式開發與維運", "DEV & DEVOPS"),
            items: &[
                loc("Python", "Python"),
                loc("Docker", "Docker"),
                loc("GitHub", "GitHub"),
                loc("Supabase", "Supabase"),
                loc("Mermaid", "Mermaid"),
            ],
        },
        SkillGroup {
            label: loc("系統架構與監控管理", "ARCHITECTURE & MONITORING"),
            items: &[
                loc("系統架構設計", "System Architecture"),
                loc("Zabbix", "Zabbix"),
                loc("Grafana", "Grafana"),
                loc("資料視覺化", "Data Visualization"),
                loc("SEO", "SEO"),
                loc("資訊安全", "Web Security"),
            ],
        },
        SkillGroup {
            label: loc("設計與後製軟體", "DESIGN & PRODUCTION"),
            items: &[
                loc("DaVinci Resolve", "DaVinci Resolve"),
                loc("CapCut", "CapCut"),
                loc("Adobe Illustrator", "Adobe Illustrator"),
                loc("Affinity", "Affinity"),
                loc("Canva", "Canva"),
            ],
        },
        SkillGroup {
            label: loc("語言與其他", "LANGUAGES & OTHERS"),
            items: &[
                loc("中文 (Native)", "Chinese (Native)"),
                loc("英文 (Fluent)", "English (Fluent)"),
                loc("方舟協會志工", "Ark Association Vol."),
                loc("跑步", "Running"),
                loc("羽毛球", "Badminton"),
                loc("時尚設計", "Fashion"),
            ],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn chrome_fields(strings: &Strings) -> [&'static str; 11] {
        [
            strings.relics_title,
            strings.me_title,
            strings.home_cta,
            strings.back_to_archive,
            strings.sold_out,
            strings.acquire_asset,
            strings.me_subtitle,
            strings.me_education,
            strings.me_experience,
            strings.me_leadership,
            strings.me_skills,
        ]
    }

    #[test]
    fn test_every_chrome_string_exists_in_both_languages() {
        for language in [Language::ZhTw, Language::En] {
            for field in chrome_fields(strings(language)) {
                assert!(!field.is_empty(), "hole in {language} strings");
            }
        }
    }

    #[test]
    fn test_default_language_is_traditional_chinese() {
        assert_eq!(Language::default(), Language::ZhTw);
    }

    #[test]
    fn test_language_round_trips_through_strings() {
        assert_eq!(Language::from_str("zh-TW").ok(), Some(Language::ZhTw));
        assert_eq!(Language::from_str("zh").ok(), Some(Language::ZhTw));
        assert_eq!(Language::from_str("EN").ok(), Some(Language::En));
        assert!(Language::from_str("fr").is_err());
        assert_eq!(Language::ZhTw.to_string(), "zh-TW");
    }

    #[test]
    fn test_toggle_is_an_involution() {
        for language in [Language::ZhTw, Language::En] {
            assert_eq!(language.toggle().toggle(), language);
        }
    }

    #[test]
    fn test_relic_codes_are_unique() {
        assert_eq!(RELIC_INDEX.len(), RELICS.len());
    }

    #[test]
    fn test_relic_lookup_ignores_case() {
        assert!(relic_by_code("rv-003").is_some());
        assert!(relic_by_code("RV-003").is_some());
        assert!(relic_by_code("RV-999").is_none());
    }

    #[test]
    fn test_every_relic_is_fully_localized_and_has_plates() {
        for relic in RELICS {
            assert!(!relic.plates.is_empty(), "{} has no plates", relic.code);
            for language in [Language::ZhTw, Language::En] {
                assert!(!relic.note.get(language).is_empty());
                assert!(!relic.description.get(language).is_empty());
            }
        }
    }

    #[test]
    fn test_sold_out_price_localizes() {
        assert_eq!(Price::SoldOut.display(Language::ZhTw), "已售罄");
        assert_eq!(Price::SoldOut.display(Language::En), "SOLD OUT");
        assert_eq!(Price::Listed("NT$ 100").display(Language::ZhTw), "NT$ 100");
    }

    #[test]
    fn test_profile_sections_are_populated() {
        assert!(!PROFILE.experiences.is_empty());
        assert!(!PROFILE.leadership.is_empty());
        assert!(!PROFILE.skills.is_empty());
        for engagement in PROFILE.experiences.iter().chain(PROFILE.leadership) {
            assert!(!engagement.details.is_empty());
            for detail in engagement.details {
                assert!(!detail.get(Language::ZhTw).is_empty());
                assert!(!detail.get(Language::En).is_empty());
            }
        }
    }
}
