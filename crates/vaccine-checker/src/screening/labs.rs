use super::age::AgeBreakdown;
use serde::Serialize;

/// Age-threshold rule producing at most one recommended laboratory test.
#[derive(Debug, Clone, Copy)]
pub struct LabRule {
    pub applies: fn(u32) -> bool,
    pub test_name: &'static str,
    pub rationale: &'static str,
}

impl LabRule {
    pub fn standard() -> [Self; 3] {
        [
            Self {
                applies: |years: u32| years >= 2,
                test_name: "Quantiferon Gold TB Test",
                rationale: "Recommended for ages 2 years and older",
            },
            Self {
                applies: |years: u32| (18..=44).contains(&years),
                test_name: "RPR Syphilis Test",
                rationale: "Recommended for ages 18–44",
            },
            Self {
                applies: |years: u32| (18..=24).contains(&years),
                test_name: "NAAT Gonorrhoea Test",
                rationale: "Recommended for ages 18–24",
            },
        ]
    }

    fn recommendation(&self) -> LabRecommendation {
        LabRecommendation {
            test_name: self.test_name,
            rationale: self.rationale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabRecommendation {
    pub test_name: &'static str,
    pub rationale: &'static str,
}

pub fn recommend_labs(age: &AgeBreakdown) -> Vec<LabRecommendation> {
    recommend_labs_with(&LabRule::standard(), age)
}

/// Rules are independent: every matching rule contributes, in list order.
pub fn recommend_labs_with(rules: &[LabRule], age: &AgeBreakdown) -> Vec<LabRecommendation> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(age.years))
        .map(LabRule::recommendation)
        .collect()
}
