//! Prompt Composer - 语气画像 → Meta Prompt

use super::value_objects::{Domain, MetaPrompt, Profile};

/// 组装 Meta Prompt
///
/// 格式: `"{tone}, {style} tone for {audience}"`，非 general 领域再追加一个领域子句
pub fn compose(profile: &Profile) -> MetaPrompt {
    let mut prompt = format!(
        "{}, {} tone for {}",
        profile.tone(),
        profile.style(),
        profile.audience()
    );

    if let Some(clause) = domain_clause(profile.domain()) {
        prompt.push(' ');
        prompt.push_str(clause);
    }

    MetaPrompt::new(prompt)
}

fn domain_clause(domain: Domain) -> Option<&'static str> {
    match domain {
        Domain::Healthcare => Some("with professional medical clarity"),
        Domain::Education => Some("with engaging educational warmth"),
        Domain::Business => Some("with corporate professionalism"),
        Domain::Technology => Some("with modern technical confidence"),
        Domain::CustomerService => Some("with helpful service orientation"),
        Domain::General => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{profile, ProfileRequest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_general_domain_has_no_clause() {
        let profile = Profile::new(Domain::General, "warm", "natural", "general audience").unwrap();
        assert_eq!(compose(&profile).as_str(), "warm, natural tone for general audience");
    }

    #[test]
    fn test_domain_clauses() {
        let cases = [
            (Domain::Healthcare, "with professional medical clarity"),
            (Domain::Education, "with engaging educational warmth"),
            (Domain::Business, "with corporate professionalism"),
            (Domain::Technology, "with modern technical confidence"),
            (Domain::CustomerService, "with helpful service orientation"),
        ];
        for (domain, clause) in cases {
            let profile = Profile::new(domain, "clear", "measured", "everyone").unwrap();
            assert_eq!(
                compose(&profile).as_str(),
                format!("clear, measured tone for everyone {}", clause)
            );
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let profile = Profile::new(Domain::Business, "polished", "articulate", "business clients")
            .unwrap();
        assert_eq!(compose(&profile), compose(&profile));
    }

    #[test]
    fn test_medical_scheduling_meta_prompt() {
        let request = ProfileRequest::new("A medical appointment scheduling assistant for patients");
        let profile = profile(&request, &mut StdRng::seed_from_u64(11));
        let prompt = compose(&profile);
        assert!(prompt.as_str().ends_with("with professional medical clarity"));
        assert!(prompt
            .as_str()
            .starts_with(&format!("{}, {} tone for ", profile.tone(), profile.style())));
    }
}
