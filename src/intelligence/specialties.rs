/// A specialty key and the symptom keywords that point to it.
pub struct SpecialtyKeywords {
    /// Lower-case fragment matched against a doctor's specialization.
    pub key: &'static str,
    pub keywords: &'static [&'static str],
}

/// Specialty → characteristic symptom keywords.
pub const SPECIALTY_TABLE: &[SpecialtyKeywords] = &[
    SpecialtyKeywords {
        key: "cardiology",
        keywords: &["chest", "heart", "palpitation", "blood pressure"],
    },
    SpecialtyKeywords {
        key: "neurology",
        keywords: &["headache", "dizziness", "numbness", "seizure", "memory"],
    },
    SpecialtyKeywords {
        key: "pulmonology",
        keywords: &["cough", "breathing", "shortness of breath", "wheezing"],
    },
    SpecialtyKeywords {
        key: "gastroenterology",
        keywords: &["stomach", "abdominal", "nausea", "diarrhea", "vomiting"],
    },
    SpecialtyKeywords {
        key: "dermatology",
        keywords: &["rash", "skin", "itching", "acne"],
    },
    SpecialtyKeywords {
        key: "orthopedics",
        keywords: &["joint", "bone", "back pain", "fracture"],
    },
    SpecialtyKeywords {
        key: "ent",
        keywords: &["ear", "throat", "sinus", "hearing"],
    },
    SpecialtyKeywords {
        key: "ophthalmology",
        keywords: &["eye", "vision", "blurry"],
    },
    SpecialtyKeywords {
        key: "gynecology",
        keywords: &["menstrual", "pregnancy", "pelvic"],
    },
    SpecialtyKeywords {
        key: "urology",
        keywords: &["urinary", "urine", "kidney", "bladder"],
    },
    SpecialtyKeywords {
        key: "psychiatry",
        keywords: &["anxiety", "depression", "stress", "insomnia"],
    },
    SpecialtyKeywords {
        key: "general practice",
        keywords: &["fever", "fatigue", "cold", "flu"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_twelve_specialties_with_two_to_five_keywords() {
        assert_eq!(SPECIALTY_TABLE.len(), 12);
        for entry in SPECIALTY_TABLE {
            assert!(
                (2..=5).contains(&entry.keywords.len()),
                "{} has {} keywords",
                entry.key,
                entry.keywords.len()
            );
        }
    }

    #[test]
    fn keys_and_keywords_are_lower_case() {
        for entry in SPECIALTY_TABLE {
            assert_eq!(entry.key, entry.key.to_lowercase());
            for kw in entry.keywords {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
    }
}
