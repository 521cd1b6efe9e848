/// One row of the doctor roster.
///
/// Fields are kept exactly as they appear in the roster file so a seeded roster
/// re-loads identically. Numeric views are parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorRecord {
    pub name: String,
    pub specialization: String,
    pub location: String,
    /// Free text in the form `"<N> years"`.
    pub experience: String,
    /// Free text holding a float, nominally 0–5.
    pub rating: String,
    pub contact: String,
}

impl DoctorRecord {
    pub fn new(
        name: &str,
        specialization: &str,
        location: &str,
        experience: &str,
        rating: &str,
        contact: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            specialization: specialization.to_string(),
            location: location.to_string(),
            experience: experience.to_string(),
            rating: rating.to_string(),
            contact: contact.to_string(),
        }
    }

    /// Years of practice, when `experience` reads `"<integer> years"`.
    pub fn experience_years(&self) -> Option<u32> {
        let mut parts = self.experience.split_whitespace();
        let years = parts.next()?.parse::<u32>().ok()?;
        match parts.next() {
            Some(unit) if unit.eq_ignore_ascii_case("years") || unit.eq_ignore_ascii_case("year") => {}
            _ => return None,
        }
        if parts.next().is_some() {
            return None;
        }
        Some(years)
    }

    pub fn rating_value(&self) -> Option<f64> {
        self.rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
    }
}
