use crate::platform::PlatformId;

/// One logical field and the candidate selectors that may locate it.
/// Candidate order is the match-priority order and is never reordered at
/// runtime.
#[derive(Debug, Clone, Copy)]
pub struct SelectorRule {
    pub logical_name: &'static str,
    pub selectors: &'static [&'static str],
}

const fn rule(logical_name: &'static str, selectors: &'static [&'static str]) -> SelectorRule {
    SelectorRule {
        logical_name,
        selectors,
    }
}

// Rule sets are authored independently per platform. The duplication is
// intentional: platforms diverge structurally and sharing rules couples
// them for no benefit.

const LINKEDIN_RULES: &[SelectorRule] = &[
    rule("firstName", &["input[name='firstName']", "input[placeholder*='First name']"]),
    rule("lastName", &["input[name='lastName']", "input[placeholder*='Last name']"]),
    rule("email", &["input[name='email']", "input[type='email']"]),
    rule("phone", &["input[name='phone']", "input[type='tel']"]),
    rule("address", &["input[name='address']", "textarea[name='address']"]),
    rule("city", &["input[name='city']", "input[placeholder*='City']"]),
    rule("state", &["select[name='state']", "input[name='state']"]),
    rule("zip", &["input[name='zip']", "input[name='postalCode']"]),
    rule("country", &["select[name='country']", "input[name='country']"]),
];

const GREENHOUSE_RULES: &[SelectorRule] = &[
    rule("firstName", &["input[name='first_name']", "input[id*='first_name']"]),
    rule("lastName", &["input[name='last_name']", "input[id*='last_name']"]),
    rule("email", &["input[name='email']", "input[type='email']"]),
    rule("phone", &["input[name='phone']", "input[type='tel']"]),
    rule("address", &["textarea[name='address']", "input[name='address']"]),
    rule("city", &["input[name='city']", "input[id*='city']"]),
    rule("state", &["select[name='state']", "input[name='state']"]),
    rule("zip", &["input[name='zip']", "input[name='postal_code']"]),
    rule("country", &["select[name='country']", "input[name='country']"]),
];

// Workday forms bury inputs under generated ids, so the rules lean on
// substring matches.
const WORKDAY_RULES: &[SelectorRule] = &[
    rule("firstName", &["input[id*='firstName']", "input[name*='firstName']"]),
    rule("lastName", &["input[id*='lastName']", "input[name*='lastName']"]),
    rule("email", &["input[type='email']", "input[id*='email']"]),
    rule("phone", &["input[type='tel']", "input[id*='phone']"]),
    rule("address", &["textarea[id*='address']", "input[id*='address']"]),
];

const LEVER_RULES: &[SelectorRule] = &[
    rule("firstName", &["input[name='name']", "input[placeholder*='First']"]),
    rule("lastName", &["input[name='name']", "input[placeholder*='Last']"]),
    rule("email", &["input[name='email']", "input[type='email']"]),
    rule("phone", &["input[name='phone']", "input[type='tel']"]),
    rule("address", &["textarea[name='address']", "input[name='address']"]),
];

const GENERIC_RULES: &[SelectorRule] = &[
    rule("firstName", &["input[name*='first']", "input[id*='first']", "input[placeholder*='First']"]),
    rule("lastName", &["input[name*='last']", "input[id*='last']", "input[placeholder*='Last']"]),
    rule("email", &["input[type='email']", "input[name*='email']", "input[id*='email']"]),
    rule("phone", &["input[type='tel']", "input[name*='phone']", "input[id*='phone']"]),
    rule("address", &["textarea[name*='address']", "input[name*='address']", "textarea[id*='address']"]),
    rule("city", &["input[name*='city']", "input[id*='city']"]),
    rule("state", &["select[name*='state']", "input[name*='state']"]),
    rule("zip", &["input[name*='zip']", "input[name*='postal']", "input[id*='zip']"]),
    rule("country", &["select[name*='country']", "input[name*='country']"]),
    rule("company", &["input[name*='company']", "input[id*='company']"]),
    rule("title", &["input[name*='title']", "input[id*='title']"]),
    rule("experience", &["textarea[name*='experience']", "textarea[id*='experience']"]),
    rule("skills", &["textarea[name*='skill']", "input[name*='skill']", "textarea[id*='skill']"]),
];

/// Rule set for a platform. Total: platforms without dedicated rules fall
/// back to the generic set.
pub fn rules_for(platform: PlatformId) -> &'static [SelectorRule] {
    match platform {
        PlatformId::Linkedin => LINKEDIN_RULES,
        PlatformId::Greenhouse => GREENHOUSE_RULES,
        PlatformId::Workday => WORKDAY_RULES,
        PlatformId::Lever => LEVER_RULES,
        PlatformId::Bamboohr
        | PlatformId::Icims
        | PlatformId::Generic
        | PlatformId::Unknown => GENERIC_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_for_is_total() {
        let platforms = [
            PlatformId::Linkedin,
            PlatformId::Greenhouse,
            PlatformId::Workday,
            PlatformId::Lever,
            PlatformId::Bamboohr,
            PlatformId::Icims,
            PlatformId::Generic,
            PlatformId::Unknown,
        ];
        for platform in platforms {
            assert!(!rules_for(platform).is_empty(), "{} has no rules", platform);
        }
    }

    #[test]
    fn test_unrecognized_platforms_share_generic_rules() {
        assert_eq!(
            rules_for(PlatformId::Bamboohr).as_ptr(),
            rules_for(PlatformId::Generic).as_ptr()
        );
        assert_eq!(
            rules_for(PlatformId::Unknown).as_ptr(),
            rules_for(PlatformId::Generic).as_ptr()
        );
    }

    #[test]
    fn test_logical_names_unique_within_rule_set() {
        for platform in [
            PlatformId::Linkedin,
            PlatformId::Greenhouse,
            PlatformId::Workday,
            PlatformId::Lever,
            PlatformId::Generic,
        ] {
            let rules = rules_for(platform);
            let mut seen = std::collections::HashSet::new();
            for r in rules {
                assert!(
                    seen.insert(r.logical_name),
                    "{} repeats {}",
                    platform,
                    r.logical_name
                );
            }
        }
    }

    #[test]
    fn test_every_rule_has_candidates() {
        for platform in [
            PlatformId::Linkedin,
            PlatformId::Greenhouse,
            PlatformId::Workday,
            PlatformId::Lever,
            PlatformId::Generic,
        ] {
            for r in rules_for(platform) {
                assert!(!r.selectors.is_empty(), "{} has no selectors", r.logical_name);
            }
        }
    }
}
