//! Tone Profiler - 项目描述 → 语气画像
//!
//! 纯函数，无 I/O，永不失败。随机抽取通过注入的 `Rng` 完成，
//! 测试可以用固定种子锁定结果。

use rand::seq::SliceRandom;
use rand::Rng;

use super::value_objects::{Domain, Profile};

const HEALTHCARE_KEYWORDS: &[&str] = &[
    "medical",
    "health",
    "doctor",
    "patient",
    "clinic",
    "hospital",
    "appointment",
    "lab",
    "prescription",
];
const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "learning",
    "student",
    "teacher",
    "course",
    "school",
    "university",
    "training",
];
const BUSINESS_KEYWORDS: &[&str] = &[
    "business",
    "corporate",
    "company",
    "enterprise",
    "professional",
    "office",
    "meeting",
];
const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "software",
    "app",
    "technology",
    "digital",
    "platform",
    "system",
    "api",
    "data",
];
const CUSTOMER_SERVICE_KEYWORDS: &[&str] = &[
    "customer",
    "support",
    "help",
    "service",
    "assistance",
    "booking",
    "reservation",
];

/// 领域检测顺序，先命中者胜出
const DOMAIN_PRIORITY: &[(Domain, &[&str])] = &[
    (Domain::Healthcare, HEALTHCARE_KEYWORDS),
    (Domain::Education, EDUCATION_KEYWORDS),
    (Domain::Business, BUSINESS_KEYWORDS),
    (Domain::Technology, TECHNOLOGY_KEYWORDS),
    (Domain::CustomerService, CUSTOMER_SERVICE_KEYWORDS),
];

/// 语气变体表之外的默认候选
const DEFAULT_TONE_VARIATIONS: &[&str] = &["warm", "professional", "clear"];
const DEFAULT_STYLE_VARIATIONS: &[&str] = &["natural", "clear", "approachable"];

/// 画像请求
#[derive(Debug, Clone, Default)]
pub struct ProfileRequest {
    /// 项目描述
    pub description: String,
    /// 用户指定语气（覆盖检测结果）
    pub user_tone: Option<String>,
    /// 用户指定使用场景（覆盖风格与受众）
    pub use_case: Option<String>,
    /// 是否在结果上再做一次变体替换
    pub variation: bool,
}

impl ProfileRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.user_tone = tone;
        self
    }

    pub fn with_use_case(mut self, use_case: Option<String>) -> Self {
        self.use_case = use_case;
        self
    }

    pub fn with_variation(mut self, variation: bool) -> Self {
        self.variation = variation;
        self
    }
}

/// 检测描述所属领域
///
/// 按固定优先级 healthcare > education > business > technology >
/// customer_service 做子串匹配，全部未命中返回 `General`
pub fn detect_domain(description: &str) -> Domain {
    let lower = description.to_lowercase();
    DOMAIN_PRIORITY
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(domain, _)| *domain)
        .unwrap_or(Domain::General)
}

/// 生成语气画像
pub fn profile<R: Rng + ?Sized>(request: &ProfileRequest, rng: &mut R) -> Profile {
    let lower = request.description.to_lowercase();
    let domain = detect_domain(&lower);

    let user_tone = non_blank(request.user_tone.as_deref());
    let use_case = non_blank(request.use_case.as_deref());

    let mut tone = match user_tone {
        Some(tone) => tone.to_lowercase(),
        None => detect_tone(domain, rng).to_string(),
    };

    let (mut style, audience) = match use_case {
        Some(use_case) => (
            style_for_use_case(use_case).to_string(),
            audience_for_use_case(use_case).to_string(),
        ),
        None => (
            detect_style(&lower, domain, rng).to_string(),
            detect_audience(&lower, domain).to_string(),
        ),
    };

    if request.variation {
        tone = tone_variation(&tone, rng).to_string();
        style = style_variation(&style, rng).to_string();
    }

    Profile::from_parts(domain, tone, style, audience)
}

fn detect_tone<R: Rng + ?Sized>(domain: Domain, rng: &mut R) -> &'static str {
    let candidates: &[&str] = match domain {
        Domain::Healthcare => &["calm", "reassuring", "professional", "caring"],
        Domain::Education => &["friendly", "encouraging", "clear", "engaging"],
        Domain::Business => &["professional", "confident", "authoritative", "polished"],
        Domain::Technology => &["modern", "clear", "confident", "innovative"],
        Domain::CustomerService => &["helpful", "friendly", "patient", "welcoming"],
        Domain::General => &["warm", "professional", "friendly", "clear"],
    };
    pick(candidates, rng)
}

fn detect_style<R: Rng + ?Sized>(lower: &str, domain: Domain, rng: &mut R) -> &'static str {
    if contains_any(lower, &["formal", "official"]) {
        return "formal";
    }
    if contains_any(lower, &["casual", "relaxed"]) {
        return "conversational";
    }
    if contains_any(lower, &["energetic", "exciting"]) {
        return "energetic";
    }

    let candidates: &[&str] = match domain {
        Domain::Healthcare => &["gentle", "measured", "clear"],
        Domain::Education => &["engaging", "enthusiastic", "clear"],
        Domain::Business => &["polished", "articulate", "confident"],
        Domain::Technology | Domain::CustomerService | Domain::General => {
            &["conversational", "natural", "approachable"]
        }
    };
    pick(candidates, rng)
}

fn detect_audience(lower: &str, domain: Domain) -> &'static str {
    match domain {
        Domain::Healthcare if lower.contains("patient") => "patients and families",
        Domain::Healthcare => "healthcare professionals",
        Domain::Education if lower.contains("student") => "students and learners",
        Domain::Education => "educational community",
        Domain::Business if contains_any(lower, &["customer", "client"]) => "business clients",
        Domain::Business => "business professionals",
        Domain::Technology => "technology users",
        Domain::CustomerService => "customers and users",
        Domain::General => "general audience",
    }
}

fn style_for_use_case(use_case: &str) -> &'static str {
    let lower = use_case.to_lowercase();
    if contains_any(&lower, &["app introduction", "demo"]) {
        "engaging"
    } else if contains_any(&lower, &["customer service", "support"]) {
        "helpful"
    } else if contains_any(&lower, &["presentation", "business"]) {
        "professional"
    } else if contains_any(&lower, &["education", "tutorial"]) {
        "clear"
    } else if contains_any(&lower, &["marketing", "advertisement"]) {
        "persuasive"
    } else if contains_any(&lower, &["announcement", "news"]) {
        "authoritative"
    } else {
        "conversational"
    }
}

fn audience_for_use_case(use_case: &str) -> &'static str {
    let lower = use_case.to_lowercase();
    if lower.contains("app introduction") {
        "app users"
    } else if lower.contains("customer service") {
        "customers"
    } else if lower.contains("business presentation") {
        "business professionals"
    } else if lower.contains("education") {
        "learners"
    } else if lower.contains("marketing") {
        "potential customers"
    } else if lower.contains("healthcare") {
        "patients"
    } else {
        "general audience"
    }
}

fn tone_variation<R: Rng + ?Sized>(current: &str, rng: &mut R) -> &'static str {
    let candidates: &[&str] = match current {
        "calm" => &["reassuring", "gentle", "peaceful"],
        "professional" => &["polished", "authoritative", "confident"],
        "friendly" => &["warm", "welcoming", "approachable"],
        "confident" => &["assured", "strong", "decisive"],
        "caring" => &["compassionate", "nurturing", "supportive"],
        "clear" => &["articulate", "precise", "direct"],
        "engaging" => &["captivating", "dynamic", "compelling"],
        "helpful" => &["supportive", "accommodating", "attentive"],
        _ => DEFAULT_TONE_VARIATIONS,
    };
    pick(candidates, rng)
}

fn style_variation<R: Rng + ?Sized>(current: &str, rng: &mut R) -> &'static str {
    let candidates: &[&str] = match current {
        "conversational" => &["natural", "casual", "relaxed"],
        "formal" => &["structured", "official", "ceremonial"],
        "energetic" => &["dynamic", "vibrant", "enthusiastic"],
        "gentle" => &["soft", "tender", "mild"],
        "measured" => &["deliberate", "thoughtful", "steady"],
        "engaging" => &["interactive", "compelling", "captivating"],
        "polished" => &["refined", "sophisticated", "elegant"],
        _ => DEFAULT_STYLE_VARIATIONS,
    };
    pick(candidates, rng)
}

/// 从候选中均匀抽取一个；候选表均为非空常量
fn pick<R: Rng + ?Sized>(candidates: &[&'static str], rng: &mut R) -> &'static str {
    candidates.choose(rng).copied().unwrap_or("clear")
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
